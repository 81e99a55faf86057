//! Game rules: legal-move validation, capture resolution, and the turn
//! state machine.

pub(crate) mod capture;
pub mod turn;
pub mod validator;

pub use turn::{AiRequest, AiTicket, MoveOutcome, RollOutcome, TurnEngine};
pub use validator::{legal_moves, LegalMove};
