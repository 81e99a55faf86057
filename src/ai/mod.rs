//! AI strategy engine: difficulty-tiered move selection and the driver
//! that feeds AI choices back through the turn engine.

pub mod driver;
pub mod strategy;

pub use driver::{run_turn, step, AiStep};
pub use strategy::{choose_move, score_move, weights};
