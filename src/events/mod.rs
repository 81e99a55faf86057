//! Engine events and sinks.
//!
//! The engine never calls collaborators (UI, audio, achievements) directly.
//! Every mutation queues typed events on a single ordered queue; the queue
//! is drained once the transaction has committed, so collaborators observe
//! a consistent causal order and a failed action emits nothing.
//!
//! Delivery is at-most-once and fire-and-forget: sinks are not awaited and
//! cannot veto or reorder events. Consumers without a sink can pull the
//! same stream via `TurnEngine::take_events`.

use serde::{Deserialize, Serialize};

use crate::core::{Color, TokenId};

/// Why the acting player rolls again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraTurnReason {
    /// Rolled a six (while under the consecutive-six cap).
    RolledSix,
    /// The committed move captured at least one opponent token.
    Capture,
}

/// An abstract engine event, carrying ids and before/after path indices.
///
/// Within a single committed move the order is fixed: `TokenMoved`, then
/// any `TokenCaptured` events, then `TokenFinished` if the mover reached
/// the goal, then exactly one of `GameWon`, `ExtraTurn`, or `TurnAdvanced`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A dice roll by the current player.
    DiceRolled {
        player: Color,
        value: u8,
        consecutive_sixes: u8,
    },
    /// A token relocation (including entry from the home yard).
    TokenMoved {
        token: TokenId,
        from: Option<u8>,
        to: u8,
    },
    /// An opponent token evicted to its home yard.
    TokenCaptured {
        captured: TokenId,
        by: TokenId,
        /// Path index the captured token was evicted from.
        from: u8,
    },
    /// A token reached path index 57.
    TokenFinished { token: TokenId },
    /// The acting player keeps the turn.
    ExtraTurn {
        player: Color,
        reason: ExtraTurnReason,
    },
    /// The turn passed to the next unfinished player.
    TurnAdvanced { from: Color, to: Color },
    /// A player finished all four tokens; the match is over.
    GameWon {
        winner: Color,
        /// Full ranking, winner first, losers by remaining unfinished tokens.
        ranking: Vec<Color>,
    },
}

/// Abstract sink the engine writes to.
///
/// Implementations must not re-enter the engine from `publish`.
pub trait EventSink {
    /// Receive one event. Fire-and-forget; the engine ignores the outcome.
    fn publish(&mut self, event: &GameEvent);
}

/// A sink that records everything it sees. Useful in tests and for
/// replay-log collaborators.
#[derive(Default)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events observed so far, in delivery order.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn publish(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
