//! # ludo-engine
//!
//! A deterministic four-player Ludo rule engine.
//!
//! ## Design Principles
//!
//! 1. **Rules only**: rendering, navigation, animation, audio, and
//!    achievement UI are external collaborators that consume the engine's
//!    event stream. The engine never depends on their implementation.
//!
//! 2. **Transactional mutation**: state changes only inside
//!    `roll_dice`/`apply_move`/`pause`/`resume`, each all-or-nothing. A
//!    rejected action leaves state byte-for-byte unchanged.
//!
//! 3. **Deterministic**: a seeded ChaCha8 RNG with serializable position
//!    makes matches replayable: the same seed and inputs produce the same
//!    rolls, AI choices, and events.
//!
//! ## Modules
//!
//! - `board`: static topology (ring, home stretches, safe cells)
//! - `core`: colors, tokens, players, configuration, RNG, match state
//! - `rules`: move validation, capture resolution, the turn state machine
//! - `ai`: difficulty-tiered move selection and the AI driver
//! - `events`: typed event stream and sinks
//! - `persist`: snapshot serialization and the store contract
//!
//! ## Example
//!
//! ```
//! use ludo_engine::core::{Color, Controller, Difficulty, GameConfig, GameId, GameMode, SeatConfig};
//! use ludo_engine::rules::{RollOutcome, TurnEngine};
//!
//! let config = GameConfig::new(
//!     vec![
//!         SeatConfig::new(Color::Red, Controller::Human),
//!         SeatConfig::new(Color::Blue, Controller::Ai(Difficulty::Medium)),
//!     ],
//!     GameMode::FreeForAll,
//!     42,
//! );
//!
//! let mut engine = TurnEngine::new(GameId(1), &config);
//! engine.start().unwrap();
//!
//! match engine.roll_dice().unwrap() {
//!     RollOutcome::AwaitingMove { .. } => {
//!         let token = engine.legal_moves().unwrap()[0].token;
//!         engine.apply_move(token).unwrap();
//!     }
//!     // No movable token (or a forfeited turn): already resolved.
//!     _ => {}
//! }
//! ```

pub mod ai;
pub mod board;
pub mod core;
pub mod error;
pub mod events;
pub mod persist;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionRecord, Color, Controller, DiceRng, DiceRngState, Difficulty, GameConfig,
    GameId, GameMode, GameState, GameStatus, SeatConfig, Token, TokenId, TokenState, TurnPhase,
};

pub use crate::board::{entry_path_index, is_safe_cell, resolve_cell, Cell, TRACK_LENGTH};

pub use crate::error::EngineError;

pub use crate::events::{EventSink, ExtraTurnReason, GameEvent, RecordingSink};

pub use crate::rules::{
    legal_moves, AiRequest, AiTicket, LegalMove, MoveOutcome, RollOutcome, TurnEngine,
};

pub use crate::ai::{choose_move, run_turn, AiStep};

pub use crate::persist::{MemoryStore, Snapshot, SnapshotStore};
