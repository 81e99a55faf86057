//! Move selection policies, parameterized by difficulty.
//!
//! The strategy engine never mutates state: it scores the legal-move set
//! the validator produced and returns a token id. All tuning lives in one
//! weight table so results are reproducible and testable.
//!
//! ## Tiers
//!
//! - `Easy`: uniform-random choice (seeded RNG, deterministic in tests).
//! - `Medium`: greedy single-step scoring.
//! - `Hard`: Medium plus a one-ply lookahead that penalizes landing within
//!   an opponent's dice range on an unsafe cell, and rewards completing a
//!   blockade.
//! - `Expert`: Hard plus a bias toward advancing the most advanced token,
//!   finishing sooner.

use crate::board::{self, Cell};
use crate::core::{Color, DiceRng, Difficulty, GameState, TokenId};
use crate::error::EngineError;
use crate::rules::LegalMove;

/// Fixed scoring weights.
///
/// The base weights are shared by Medium and above; the lookahead weights
/// apply from Hard; the frontrunner bonus is Expert-only.
pub mod weights {
    /// Move captures at least one opponent token.
    pub const CAPTURE: i32 = 10;
    /// Destination is a safe cell.
    pub const SAFE_CELL: i32 = 5;
    /// Per path step advanced.
    pub const STEP: i32 = 1;
    /// Destination is an unsafe ring cell an opponent can reach in 1-6
    /// steps (Hard/Expert).
    pub const THREAT_PENALTY: i32 = 8;
    /// Destination already holds one own token, completing a blockade
    /// (Hard/Expert).
    pub const BLOCKADE: i32 = 6;
    /// Move advances the player's most advanced token (Expert).
    pub const FRONTRUNNER: i32 = 4;
}

/// Choose a move for the current roll.
///
/// Fails with `EmptyMoveSet` if `legal` is empty; callers avoid invoking
/// the AI when the turn auto-resolves. Ties break to the lowest token id.
pub fn choose_move(
    legal: &[LegalMove],
    state: &GameState,
    difficulty: Difficulty,
    rng: &mut DiceRng,
) -> Result<TokenId, EngineError> {
    if legal.is_empty() {
        return Err(EngineError::EmptyMoveSet);
    }

    if difficulty == Difficulty::Easy {
        let idx = rng.gen_range_usize(0..legal.len());
        return Ok(legal[idx].token);
    }

    let color = state.current_color();
    let frontrunner = legal.iter().filter_map(|m| m.from).max();

    let mut best = &legal[0];
    let mut best_score = score_move(best, state, color, difficulty, frontrunner);
    for mv in &legal[1..] {
        let score = score_move(mv, state, color, difficulty, frontrunner);
        // Strictly greater keeps the lowest token id on ties; the
        // validator emits moves in ascending id order.
        if score > best_score {
            best = mv;
            best_score = score;
        }
    }
    Ok(best.token)
}

/// Score a single candidate under the fixed weight table.
#[must_use]
pub fn score_move(
    mv: &LegalMove,
    state: &GameState,
    color: Color,
    difficulty: Difficulty,
    frontrunner: Option<u8>,
) -> i32 {
    let dest = board::resolve_cell(color, mv.to);
    let mut score = 0;

    if !mv.captures.is_empty() {
        score += weights::CAPTURE;
    }
    if board::is_safe_cell(dest) {
        score += weights::SAFE_CELL;
    }
    score += weights::STEP * i32::from(mv.to - mv.from.unwrap_or(0));

    if matches!(difficulty, Difficulty::Hard | Difficulty::Expert) {
        if destination_threatened(state, color, mv.to) {
            score -= weights::THREAT_PENALTY;
        }
        if completes_blockade(state, mv) {
            score += weights::BLOCKADE;
        }
    }

    if difficulty == Difficulty::Expert && mv.from.is_some() && mv.from == frontrunner {
        score += weights::FRONTRUNNER;
    }

    score
}

/// One-ply capture risk: could any opponent land on `to` with a single
/// roll? Only unsafe ring cells are at risk; home-stretch cells are
/// unreachable by opponents.
fn destination_threatened(state: &GameState, mover: Color, to: u8) -> bool {
    let dest = board::resolve_cell(mover, to);
    let Cell::Ring(dest_idx) = dest else {
        return false;
    };
    if board::is_safe_cell(dest) {
        return false;
    }

    state
        .players()
        .iter()
        .filter(|p| p.color() != mover)
        .flat_map(|p| p.tokens().iter())
        .any(|token| {
            let Some(Cell::Ring(opp_idx)) = token.cell() else {
                return false;
            };
            let Some(p) = token.path_index() else {
                return false;
            };
            let dist = (dest_idx + board::RING_LEN - opp_idx) % board::RING_LEN;
            // The opponent must stay on the ring after `dist` steps to
            // land on our cell.
            (1..=6).contains(&dist) && p + dist <= 51
        })
}

/// Whether `mv` stacks a second own token onto the destination cell.
fn completes_blockade(state: &GameState, mv: &LegalMove) -> bool {
    let color = mv.token.color();
    let dest = board::resolve_cell(color, mv.to);
    if !matches!(dest, Cell::Ring(_)) {
        return false;
    }
    state
        .tokens_on_cell(dest)
        .iter()
        .filter(|t| t.color() == color && t.id() != mv.token)
        .count()
        == 1
}
