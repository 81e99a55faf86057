//! Capture resolution.
//!
//! Invoked only from the turn engine's `apply_move`, never standalone.
//! After the moving token has been relocated, every opponent token on the
//! destination cell is evicted to its home yard, unless the destination
//! is a safe cell or lies off the shared ring.

use crate::board::{self, Cell};
use crate::core::{GameState, TokenId};

/// An eviction produced by a committed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Capture {
    /// The evicted token.
    pub token: TokenId,
    /// Path index it was evicted from.
    pub from: u8,
}

/// Evict opponent tokens on `dest` after `mover` landed there.
///
/// Returns evictions in ascending token-id order so the turn engine can
/// queue `TokenCaptured` events deterministically, ahead of any
/// `TokenFinished` event.
pub(crate) fn resolve_captures(state: &mut GameState, mover: TokenId, dest: Cell) -> Vec<Capture> {
    if !matches!(dest, Cell::Ring(_)) || board::is_safe_cell(dest) {
        return Vec::new();
    }

    let victims: Vec<Capture> = state
        .tokens_on_cell(dest)
        .iter()
        .filter(|t| t.color() != mover.color())
        .filter_map(|t| {
            t.path_index().map(|from| Capture {
                token: t.id(),
                from,
            })
        })
        .collect();

    for capture in &victims {
        if let Some(token) = state.token_mut(capture.token) {
            token.send_home();
        }
    }

    victims
}
