//! Snapshot persistence.
//!
//! The engine's boundary with storage is an opaque-blob contract: a
//! `Snapshot` bundles the match state with the RNG position, serializes
//! with bincode, and restores byte-for-byte into an equivalent engine. The
//! engine never retries failed saves; errors surface as `Persistence`.
//!
//! Loaded snapshots are validated before use. A snapshot that fails the
//! invariant checks is rejected with `CorruptedSnapshot`, fatal to the
//! load attempt, after which callers fall back to a new game.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board;
use crate::core::{DiceRngState, GameId, GameState, GameStatus, TokenId, TurnPhase};
use crate::error::EngineError;

/// A serializable point-in-time capture of a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Complete match state.
    pub state: GameState,
    /// Dice RNG position, so a restored match continues the same sequence.
    pub rng: DiceRngState,
}

impl Snapshot {
    /// Check state invariants.
    ///
    /// Returns `CorruptedSnapshot` on the first violation: malformed seat
    /// list, token identity/color mismatch, out-of-range path index,
    /// dice/phase disagreement, or winner/status disagreement.
    pub fn validate(&self) -> Result<(), EngineError> {
        let state = &self.state;
        let corrupt = |msg: String| Err(EngineError::CorruptedSnapshot(msg));

        if !(2..=4).contains(&state.player_count()) {
            return corrupt(format!("{} players", state.player_count()));
        }
        if state.current_index() >= state.player_count() {
            return corrupt(format!("current player index {}", state.current_index()));
        }

        for (idx, player) in state.players().iter().enumerate() {
            if player.seat() as usize != idx {
                return corrupt(format!("seat {} out of order", player.seat()));
            }
            if idx > 0 && state.players()[idx - 1].color() >= player.color() {
                return corrupt(format!("seat colors out of turn order at {}", idx));
            }
            for (slot, token) in player.tokens().iter().enumerate() {
                let expected = TokenId::new(player.color(), slot as u8);
                if token.id() != expected {
                    return corrupt(format!("token id {} at {} slot {}", token.id(), player.color(), slot));
                }
                if let Some(p) = token.path_index() {
                    if p > board::TRACK_LENGTH {
                        return corrupt(format!("path index {} on {}", p, token.id()));
                    }
                }
            }
        }

        if let Some(dice) = state.last_dice() {
            if !(1..=6).contains(&dice) {
                return corrupt(format!("dice value {}", dice));
            }
        }
        if state.phase() == TurnPhase::AwaitingMove && state.last_dice().is_none() {
            return corrupt("awaiting move with no dice value".to_string());
        }
        if state.consecutive_sixes() > 3 {
            return corrupt(format!("consecutive sixes {}", state.consecutive_sixes()));
        }

        match (state.status(), state.winner()) {
            (GameStatus::Finished, None) => {
                return corrupt("finished with no winner".to_string());
            }
            (status, Some(winner)) => {
                if status != GameStatus::Finished {
                    return corrupt(format!("winner {} while {:?}", winner, status));
                }
                if state.player_by_color(winner).is_none() {
                    return corrupt(format!("winner {} has no seat", winner));
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// Persistence collaborator contract.
///
/// The engine treats implementations as opaque: it saves and loads whole
/// snapshots and never inspects the stored representation.
pub trait SnapshotStore {
    /// Persist a snapshot under a match id, replacing any previous one.
    fn save(&mut self, id: GameId, snapshot: &Snapshot) -> Result<(), EngineError>;

    /// Load the snapshot for a match id, `None` if absent.
    ///
    /// Implementations validate before returning; a stored blob that no
    /// longer decodes or fails invariants is a `CorruptedSnapshot`.
    fn load(&self, id: GameId) -> Result<Option<Snapshot>, EngineError>;
}

/// In-memory bincode-backed store.
///
/// Serializes through the same codec a file- or DB-backed store would use,
/// so tests exercise the full encode/validate/decode path.
#[derive(Default)]
pub struct MemoryStore {
    blobs: FxHashMap<u64, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, id: GameId, snapshot: &Snapshot) -> Result<(), EngineError> {
        let blob =
            bincode::serialize(snapshot).map_err(|e| EngineError::Persistence(e.to_string()))?;
        tracing::debug!(game = %id, bytes = blob.len(), "snapshot saved");
        self.blobs.insert(id.0, blob);
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Option<Snapshot>, EngineError> {
        let Some(blob) = self.blobs.get(&id.0) else {
            return Ok(None);
        };
        let snapshot: Snapshot = bincode::deserialize(blob)
            .map_err(|e| EngineError::CorruptedSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(Some(snapshot))
    }
}
