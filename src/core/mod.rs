//! Core data model: colors, tokens, players, configuration, RNG, state.

mod color;
mod config;
mod player;
mod rng;
mod state;
mod token;

pub use color::Color;
pub use config::{GameConfig, GameMode, SeatConfig};
pub use player::{Controller, Difficulty, Player};
pub use rng::{DiceRng, DiceRngState};
pub use state::{ActionKind, ActionRecord, GameId, GameState, GameStatus, TurnPhase};
pub use token::{Token, TokenId, TokenState};
