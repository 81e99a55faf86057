//! The turn state machine.
//!
//! `TurnEngine` orchestrates roll -> validate -> apply -> advance -> win
//! check, and owns all phase transitions:
//!
//! ```text
//! Waiting -> Playing -> {Paused <-> Playing} -> {Finished, Cancelled}
//! ```
//!
//! Every public mutation is an atomic transaction: validation happens
//! before any state is touched, so a rejected action leaves the state
//! byte-for-byte unchanged and emits no events. Events queue during a
//! transaction and are delivered only after it commits.
//!
//! ## Extra turns and the six cap
//!
//! A capture or a six grants another roll. The consecutive-six counter is
//! capped at three: the third six forfeits the extra turn at roll time and
//! ends the turn immediately, preventing runaway moves.
//!
//! ## One action in flight
//!
//! While an AI move request is outstanding, human `apply_move` calls are
//! rejected. Tickets are epoch-stamped; a result submitted after the epoch
//! has moved on (pause, cancellation) is discarded instead of applied.

use tracing::{debug, trace};

use crate::board;
use crate::core::{
    ActionKind, Controller, DiceRng, Difficulty, GameConfig, GameId, GameState, GameStatus,
    TokenId, TurnPhase,
};
use crate::error::EngineError;
use crate::events::{EventSink, ExtraTurnReason, GameEvent};
use crate::persist::Snapshot;
use crate::rules::capture::resolve_captures;
use crate::rules::validator::{self, LegalMove};

/// What a dice roll led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// At least one legal move exists; waiting for a selection.
    AwaitingMove { value: u8 },
    /// No token could move; the turn auto-resolved with no movement.
    NoMoves { value: u8 },
    /// Third consecutive six; the turn was forfeited.
    ForfeitedTurn { value: u8 },
}

impl RollOutcome {
    /// The rolled value.
    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            RollOutcome::AwaitingMove { value }
            | RollOutcome::NoMoves { value }
            | RollOutcome::ForfeitedTurn { value } => value,
        }
    }
}

/// Result of a committed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Opponent tokens evicted to their home yards.
    pub captured: Vec<TokenId>,
    /// Whether the mover reached path index 57.
    pub finished: bool,
    /// Whether the acting player rolls again.
    pub extra_turn: bool,
    /// Whether this move won the match.
    pub won: bool,
}

/// Epoch-stamped handle for an in-flight AI move computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiTicket {
    epoch: u64,
}

/// Everything an offloaded AI computation needs: an immutable state
/// snapshot, the legal-move set, and the seat's difficulty.
#[derive(Clone, Debug)]
pub struct AiRequest {
    /// Handle to submit or discard the result with.
    pub ticket: AiTicket,
    /// Legal moves for the current roll, in token-id order.
    pub legal: Vec<LegalMove>,
    /// Snapshot of the state the moves were computed against.
    pub state: GameState,
    /// Difficulty of the acting AI seat.
    pub difficulty: Difficulty,
}

/// The deterministic turn state machine.
pub struct TurnEngine {
    state: GameState,
    rng: DiceRng,
    cached_moves: Vec<LegalMove>,
    queue: Vec<GameEvent>,
    outbox: Vec<GameEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    epoch: u64,
    ai_pending: bool,
}

impl TurnEngine {
    /// Create an engine for a fresh match in `Waiting` status.
    #[must_use]
    pub fn new(id: GameId, config: &GameConfig) -> Self {
        Self {
            state: GameState::new(id, config),
            rng: DiceRng::new(config.seed()),
            cached_moves: Vec::new(),
            queue: Vec::new(),
            outbox: Vec::new(),
            sinks: Vec::new(),
            epoch: 0,
            ai_pending: false,
        }
    }

    /// Rebuild an engine from a validated snapshot.
    ///
    /// Fails with `CorruptedSnapshot` if the snapshot violates state
    /// invariants. A mid-selection snapshot has its legal-move set
    /// recomputed from the recorded dice value.
    pub fn restore(snapshot: Snapshot) -> Result<Self, EngineError> {
        snapshot.validate()?;
        let rng = DiceRng::from_state(&snapshot.rng);
        let state = snapshot.state;

        let cached_moves = match (state.phase(), state.last_dice()) {
            (TurnPhase::AwaitingMove, Some(dice)) => validator::legal_moves(&state, dice),
            _ => Vec::new(),
        };

        Ok(Self {
            state,
            rng,
            cached_moves,
            queue: Vec::new(),
            outbox: Vec::new(),
            sinks: Vec::new(),
            epoch: 0,
            ai_pending: false,
        })
    }

    /// Capture a serializable snapshot of the match.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
        }
    }

    // === Observation ===

    /// Current match state (immutable).
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Final (or provisional) ranking; see `GameState::standings`.
    #[must_use]
    pub fn standings(&self) -> Vec<crate::core::Color> {
        self.state.standings()
    }

    /// Register an event sink. All sinks see every event, in order.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Drain events accumulated for pull-based consumers.
    ///
    /// Only populated while no sinks are registered; with sinks attached,
    /// events go to the sinks instead.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Fork the engine RNG for AI choice randomness.
    ///
    /// The fork is deterministic under the match seed but independent of
    /// the dice stream, so AI activity never shifts dice outcomes.
    pub fn fork_rng(&mut self) -> DiceRng {
        self.rng.fork()
    }

    // === Lifecycle ===

    /// Start the match: `Waiting -> Playing`.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state.status() != GameStatus::Waiting {
            return Err(self.invalid_phase());
        }
        self.state.status = GameStatus::Playing;
        self.state.phase = TurnPhase::AwaitingRoll;
        debug!(game = %self.state.id(), players = self.state.player_count(), "match started");
        self.commit();
        Ok(())
    }

    /// Suspend a running match: `Playing -> Paused`.
    ///
    /// Cancels any in-flight AI request; its late result will be discarded.
    pub fn pause(&mut self) -> Result<(), EngineError> {
        if self.state.status() != GameStatus::Playing {
            return Err(self.invalid_phase());
        }
        self.state.status = GameStatus::Paused;
        self.ai_pending = false;
        self.commit();
        Ok(())
    }

    /// Resume a paused match: `Paused -> Playing`.
    pub fn resume(&mut self) -> Result<(), EngineError> {
        if self.state.status() != GameStatus::Paused {
            return Err(self.invalid_phase());
        }
        self.state.status = GameStatus::Playing;
        self.commit();
        Ok(())
    }

    /// Abort the match externally. Legal from any non-terminal status.
    pub fn cancel(&mut self) -> Result<(), EngineError> {
        match self.state.status() {
            GameStatus::Finished | GameStatus::Cancelled => Err(self.invalid_phase()),
            _ => {
                self.state.status = GameStatus::Cancelled;
                self.ai_pending = false;
                debug!(game = %self.state.id(), "match cancelled");
                self.commit();
                Ok(())
            }
        }
    }

    // === The turn cycle ===

    /// Roll the dice for the current player.
    ///
    /// Only legal in `Playing`/`AwaitingRoll`. Updates the consecutive-six
    /// counter; a third consecutive six forfeits the turn immediately. An
    /// empty legal-move set auto-resolves the turn with no movement.
    pub fn roll_dice(&mut self) -> Result<RollOutcome, EngineError> {
        self.ensure(TurnPhase::AwaitingRoll)?;
        let value = self.rng.roll_die();
        self.apply_roll(value)
    }

    /// Apply an externally supplied dice value.
    ///
    /// Same semantics as `roll_dice` with the draw replaced by `value`.
    /// This is the replay path: a transport layer re-applies the dice
    /// values and token selections of a remote peer through this entry
    /// point. Panics if `value` is outside `1..=6` (caller contract).
    pub fn apply_roll(&mut self, value: u8) -> Result<RollOutcome, EngineError> {
        assert!((1..=6).contains(&value), "dice value must be 1-6");
        self.ensure(TurnPhase::AwaitingRoll)?;

        let color = self.state.current_color();

        if value == 6 {
            self.state.consecutive_sixes += 1;
        } else {
            self.state.consecutive_sixes = 0;
        }
        self.state.last_dice = Some(value);
        self.state.record(color, ActionKind::Rolled { value });
        self.queue.push(GameEvent::DiceRolled {
            player: color,
            value,
            consecutive_sixes: self.state.consecutive_sixes,
        });
        debug!(game = %self.state.id(), player = %color, value, "dice rolled");

        let outcome = if self.state.consecutive_sixes >= 3 {
            // Third consecutive six: forfeit the extra turn, no move phase.
            self.state.record(color, ActionKind::TurnForfeited);
            debug!(game = %self.state.id(), player = %color, "turn forfeited on third six");
            self.advance_turn();
            RollOutcome::ForfeitedTurn { value }
        } else {
            let moves = validator::legal_moves(&self.state, value);
            if moves.is_empty() {
                self.state.record(color, ActionKind::TurnSkipped);
                trace!(game = %self.state.id(), player = %color, "no legal moves, turn skipped");
                self.advance_turn();
                RollOutcome::NoMoves { value }
            } else {
                self.cached_moves = moves;
                self.state.phase = TurnPhase::AwaitingMove;
                RollOutcome::AwaitingMove { value }
            }
        };

        self.commit();
        Ok(outcome)
    }

    /// The legal-move set for the current roll.
    ///
    /// Only callable in `Playing`/`AwaitingMove`.
    pub fn legal_moves(&self) -> Result<&[LegalMove], EngineError> {
        self.ensure(TurnPhase::AwaitingMove)?;
        Ok(&self.cached_moves)
    }

    /// Commit a move for the current player (human input path).
    ///
    /// The token must appear in the last computed legal-move set. Rejected
    /// with `InvalidPhase` while an AI request is in flight.
    pub fn apply_move(&mut self, token: TokenId) -> Result<MoveOutcome, EngineError> {
        if self.ai_pending {
            return Err(self.invalid_phase());
        }
        self.apply_move_inner(token)
    }

    // === AI hand-off ===

    /// Hand the current selection to an AI computation.
    ///
    /// Returns the immutable inputs for `ai::choose_move` plus an
    /// epoch-stamped ticket. While the ticket is outstanding, human input
    /// is rejected. Fails unless the current seat is AI-controlled and the
    /// phase is `AwaitingMove`.
    pub fn request_ai_move(&mut self) -> Result<AiRequest, EngineError> {
        self.ensure(TurnPhase::AwaitingMove)?;
        if self.ai_pending {
            return Err(self.invalid_phase());
        }
        let Controller::Ai(difficulty) = self.state.current_player().controller() else {
            return Err(self.invalid_phase());
        };

        self.ai_pending = true;
        Ok(AiRequest {
            ticket: AiTicket { epoch: self.epoch },
            legal: self.cached_moves.clone(),
            state: self.state.clone(),
            difficulty,
        })
    }

    /// Submit the result of an AI computation.
    ///
    /// A stale ticket (the epoch moved on through pause, cancellation, or
    /// any committed action) is discarded with `InvalidPhase` rather than
    /// applied.
    pub fn submit_ai_move(
        &mut self,
        ticket: AiTicket,
        token: TokenId,
    ) -> Result<MoveOutcome, EngineError> {
        if !self.ai_pending || ticket.epoch != self.epoch {
            return Err(self.invalid_phase());
        }
        self.ai_pending = false;
        self.apply_move_inner(token)
    }

    /// Explicitly abort an in-flight AI request.
    pub fn cancel_ai_request(&mut self) {
        self.ai_pending = false;
    }

    // === Internals ===

    fn apply_move_inner(&mut self, token: TokenId) -> Result<MoveOutcome, EngineError> {
        self.ensure(TurnPhase::AwaitingMove)?;

        let mv = self
            .cached_moves
            .iter()
            .find(|m| m.token == token)
            .cloned()
            .ok_or(EngineError::IllegalMove { token })?;
        let Some(dice) = self.state.last_dice() else {
            return Err(self.invalid_phase());
        };

        // Validation is done; everything below is the committed transaction.
        let color = self.state.current_color();
        if let Some(moving) = self.state.token_mut(mv.token) {
            moving.set_path_index(mv.to);
        }
        self.queue.push(GameEvent::TokenMoved {
            token: mv.token,
            from: mv.from,
            to: mv.to,
        });
        debug!(
            game = %self.state.id(),
            token = %mv.token,
            from = ?mv.from,
            to = mv.to,
            "move committed"
        );

        let dest = board::resolve_cell(color, mv.to);
        let captures = resolve_captures(&mut self.state, mv.token, dest);
        for capture in &captures {
            self.queue.push(GameEvent::TokenCaptured {
                captured: capture.token,
                by: mv.token,
                from: capture.from,
            });
        }

        let finished = mv.to == board::TRACK_LENGTH;
        if finished {
            self.queue.push(GameEvent::TokenFinished { token: mv.token });
        }

        self.state.record(
            color,
            ActionKind::Moved {
                token: mv.token,
                from: mv.from,
                to: mv.to,
            },
        );
        self.cached_moves.clear();

        let won = self.state.current_player().has_won();
        let captured_any = !captures.is_empty();
        let extra_turn =
            !won && (captured_any || (dice == 6 && self.state.consecutive_sixes < 3));

        if won {
            self.state.status = GameStatus::Finished;
            self.state.winner = Some(color);
            self.queue.push(GameEvent::GameWon {
                winner: color,
                ranking: self.state.standings(),
            });
            debug!(game = %self.state.id(), winner = %color, "match won");
        } else if extra_turn {
            let reason = if captured_any {
                ExtraTurnReason::Capture
            } else {
                ExtraTurnReason::RolledSix
            };
            self.state.phase = TurnPhase::AwaitingRoll;
            self.queue.push(GameEvent::ExtraTurn {
                player: color,
                reason,
            });
        } else {
            self.advance_turn();
        }

        self.commit();
        Ok(MoveOutcome {
            captured: captures.iter().map(|c| c.token).collect(),
            finished,
            extra_turn,
            won,
        })
    }

    /// Pass the turn to the next player with unfinished tokens.
    ///
    /// If no other such player exists, the match finishes with the first
    /// fully-finished player as winner.
    fn advance_turn(&mut self) {
        let from = self.state.current_color();
        self.state.consecutive_sixes = 0;
        self.state.phase = TurnPhase::AwaitingRoll;
        self.state.turn_number += 1;
        self.cached_moves.clear();

        let n = self.state.player_count();
        let next = (1..n)
            .map(|step| (self.state.current_index() + step) % n)
            .find(|&idx| !self.state.players()[idx].has_won());

        match next {
            Some(idx) => {
                self.state.current = idx;
                let to = self.state.current_color();
                self.queue.push(GameEvent::TurnAdvanced { from, to });
                trace!(game = %self.state.id(), from = %from, to = %to, "turn advanced");
            }
            None => {
                // Every other player already finished.
                let winner = self
                    .state
                    .players()
                    .iter()
                    .find(|p| p.has_won())
                    .map(|p| p.color())
                    .unwrap_or(from);
                self.state.status = GameStatus::Finished;
                self.state.winner = Some(winner);
                self.queue.push(GameEvent::GameWon {
                    winner,
                    ranking: self.state.standings(),
                });
            }
        }
    }

    fn ensure(&self, phase: TurnPhase) -> Result<(), EngineError> {
        if self.state.status() != GameStatus::Playing || self.state.phase() != phase {
            return Err(self.invalid_phase());
        }
        Ok(())
    }

    fn invalid_phase(&self) -> EngineError {
        EngineError::InvalidPhase {
            status: self.state.status(),
            phase: self.state.phase(),
        }
    }

    /// Close a transaction: bump the action epoch and deliver queued events.
    fn commit(&mut self) {
        self.epoch += 1;
        if self.sinks.is_empty() {
            self.outbox.append(&mut self.queue);
        } else {
            for event in self.queue.drain(..) {
                for sink in &mut self.sinks {
                    sink.publish(&event);
                }
            }
        }
    }
}
