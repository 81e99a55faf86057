//! Engine error taxonomy.
//!
//! Every fallible engine operation returns `Result<_, EngineError>`. All
//! variants are recoverable at the call boundary: a rejected action leaves
//! game state untouched because mutation is transactional, and callers
//! decide whether to retry, prompt, or fall back to a fresh game.

use thiserror::Error;

use crate::core::{GameStatus, TokenId, TurnPhase};

/// Errors surfaced by the rule engine and its collaborators.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Action attempted outside its legal phase or game status.
    #[error("action not legal in status {status:?}, phase {phase:?}")]
    InvalidPhase {
        /// Game status at the time of the attempt.
        status: GameStatus,
        /// Turn sub-phase at the time of the attempt.
        phase: TurnPhase,
    },

    /// Token is not in the current legal-move set.
    #[error("token {token} is not in the current legal-move set")]
    IllegalMove {
        /// The rejected token.
        token: TokenId,
    },

    /// AI strategy invoked with no moves to choose from.
    ///
    /// The caller is responsible for never reaching the AI with an empty
    /// set; empty sets auto-resolve the turn inside the turn engine.
    #[error("AI invoked with an empty legal-move set")]
    EmptyMoveSet,

    /// Save/load failure from the persistence collaborator.
    ///
    /// The engine never retries; the error is surfaced upward as-is.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// A loaded snapshot failed invariant checks.
    ///
    /// Fatal to the load attempt, not to the process: callers fall back to
    /// starting a new game.
    #[error("corrupted snapshot: {0}")]
    CorruptedSnapshot(String),
}
