//! Drives AI seats through the turn engine.
//!
//! The engine accepts AI results only through the same `apply_move` path
//! as human input, guarded by epoch-stamped tickets. This driver wires the
//! pieces together for hosts that run the AI in-process and synchronously;
//! hosts that offload to a worker use `TurnEngine::request_ai_move` /
//! `submit_ai_move` directly and get the same stale-result protection.

use crate::core::{Controller, GameStatus, TokenId};
use crate::error::EngineError;
use crate::rules::{MoveOutcome, RollOutcome, TurnEngine};

use super::strategy::choose_move;

/// One roll (and, when moves existed, one committed move) by an AI seat.
#[derive(Clone, Debug)]
pub enum AiStep {
    /// The roll resolved the turn by itself (no moves, or forfeited).
    Rolled(RollOutcome),
    /// The roll produced moves and the AI committed one.
    Moved {
        /// The rolled value.
        value: u8,
        /// The chosen token.
        token: TokenId,
        /// The committed move's outcome.
        outcome: MoveOutcome,
    },
}

/// Execute a single roll-and-select step for the current AI seat.
///
/// Fails with `InvalidPhase` if the current seat is human or the engine is
/// not awaiting a roll.
pub fn step(engine: &mut TurnEngine) -> Result<AiStep, EngineError> {
    if engine.state().current_player().controller() == Controller::Human {
        return Err(EngineError::InvalidPhase {
            status: engine.state().status(),
            phase: engine.state().phase(),
        });
    }

    let roll = engine.roll_dice()?;
    let RollOutcome::AwaitingMove { value } = roll else {
        return Ok(AiStep::Rolled(roll));
    };

    let request = engine.request_ai_move()?;
    let mut rng = engine.fork_rng();
    let token = choose_move(&request.legal, &request.state, request.difficulty, &mut rng)?;
    let outcome = engine.submit_ai_move(request.ticket, token)?;

    Ok(AiStep::Moved {
        value,
        token,
        outcome,
    })
}

/// Run the current AI seat's whole turn, including extra turns, until the
/// turn passes or the match ends.
pub fn run_turn(engine: &mut TurnEngine) -> Result<Vec<AiStep>, EngineError> {
    let seat = engine.state().current_index();
    let mut steps = Vec::new();

    while engine.state().status() == GameStatus::Playing
        && engine.state().current_index() == seat
        && engine.state().current_player().controller() != Controller::Human
    {
        steps.push(step(engine)?);
    }

    Ok(steps)
}
