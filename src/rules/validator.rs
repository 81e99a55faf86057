//! Legal-move computation.
//!
//! A pure function of `(GameState, dice)`. Moves are emitted in ascending
//! token-id order with no prioritization; ranking candidates is the AI's
//! job, not the validator's.
//!
//! ## Blockade policy
//!
//! Two same-color tokens on one cell form a blockade. An opponent may pass
//! through a blockade cell but may not land on it; only the terminal cell
//! of a move is restricted. Ludo variants differ here; this engine fixes
//! the landing-only rule. Entering from the home yard counts as landing on
//! the start cell, so an opponent blockade there refuses entry too.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{self, Cell};
use crate::core::{Color, GameState, TokenId};

/// A validated candidate move: a pure value, never mutates state.
///
/// `captures` lists the opponent tokens a commit would evict. It exists
/// for AI scoring; the capture resolver rescans the destination at commit
/// time and remains the single source of truth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMove {
    /// The token to move.
    pub token: TokenId,
    /// Current path index, `None` for entry from the home yard.
    pub from: Option<u8>,
    /// Resulting path index (`<= 57`, never overshoots).
    pub to: u8,
    /// Opponent tokens that would be captured by this move.
    pub captures: SmallVec<[TokenId; 2]>,
}

/// Compute the legal-move set for the current player and dice value.
///
/// - A home token moves only on a six, to the color's entry cell.
/// - An active token needs `path + dice <= 57`; overshoot is immovable,
///   no rounding or clamping.
/// - Finished tokens never move.
/// - Destinations under an opponent blockade are excluded.
#[must_use]
pub fn legal_moves(state: &GameState, dice: u8) -> Vec<LegalMove> {
    debug_assert!((1..=6).contains(&dice));

    let color = state.current_color();
    let mut moves = Vec::new();

    for token in state.current_player().tokens() {
        let (from, to) = match token.path_index() {
            None => {
                if dice != 6 {
                    continue;
                }
                (None, board::entry_path_index(color))
            }
            Some(board::TRACK_LENGTH) => continue,
            Some(p) => {
                let to = p + dice;
                if to > board::TRACK_LENGTH {
                    continue;
                }
                (Some(p), to)
            }
        };

        let dest = board::resolve_cell(color, to);
        if state.opponent_blockade_on(dest, color) {
            continue;
        }

        moves.push(LegalMove {
            token: token.id(),
            from,
            to,
            captures: capture_candidates(state, color, dest),
        });
    }

    moves
}

/// Opponent tokens a landing on `dest` would evict.
///
/// Empty on safe cells and anywhere off the shared ring (home-stretch and
/// goal cells are color-exclusive).
pub(crate) fn capture_candidates(
    state: &GameState,
    mover: Color,
    dest: Cell,
) -> SmallVec<[TokenId; 2]> {
    if !matches!(dest, Cell::Ring(_)) || board::is_safe_cell(dest) {
        return SmallVec::new();
    }
    state
        .tokens_on_cell(dest)
        .iter()
        .filter(|t| t.color() != mover)
        .map(|t| t.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Controller, GameConfig, GameId, GameMode, SeatConfig};

    fn state_with(colors: &[Color]) -> GameState {
        let seats = colors
            .iter()
            .map(|&c| SeatConfig::new(c, Controller::Human))
            .collect();
        let config = GameConfig::new(seats, GameMode::FreeForAll, 42);
        GameState::new(GameId(1), &config)
    }

    fn place(state: &mut GameState, id: TokenId, path: u8) {
        state.token_mut(id).unwrap().set_path_index(path);
    }

    #[test]
    fn test_home_tokens_need_a_six() {
        let state = state_with(&[Color::Red, Color::Blue]);

        for dice in 1..=5 {
            assert!(legal_moves(&state, dice).is_empty());
        }

        let moves = legal_moves(&state, 6);
        assert_eq!(moves.len(), 4);
        for mv in &moves {
            assert_eq!(mv.from, None);
            assert_eq!(mv.to, 0);
        }
    }

    #[test]
    fn test_moves_in_token_id_order() {
        let mut state = state_with(&[Color::Red, Color::Blue]);
        place(&mut state, TokenId::new(Color::Red, 3), 10);
        place(&mut state, TokenId::new(Color::Red, 1), 20);

        let moves = legal_moves(&state, 3);
        let ids: Vec<_> = moves.iter().map(|m| m.token).collect();
        assert_eq!(
            ids,
            vec![TokenId::new(Color::Red, 1), TokenId::new(Color::Red, 3)]
        );
    }

    #[test]
    fn test_overshoot_is_immovable() {
        let mut state = state_with(&[Color::Red, Color::Blue]);
        place(&mut state, TokenId::new(Color::Red, 0), 55);

        // 55 + 3 = 58 > 57: no move for this token.
        assert!(legal_moves(&state, 3).is_empty());

        // 55 + 2 = 57 exactly: finishes.
        let moves = legal_moves(&state, 2);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, board::TRACK_LENGTH);
    }

    #[test]
    fn test_finished_token_never_moves() {
        let mut state = state_with(&[Color::Red, Color::Blue]);
        place(&mut state, TokenId::new(Color::Red, 0), board::TRACK_LENGTH);

        for dice in 1..=6 {
            let moves = legal_moves(&state, dice);
            assert!(moves.iter().all(|m| m.token != TokenId::new(Color::Red, 0)));
        }
    }

    #[test]
    fn test_capture_annotation_on_unsafe_cell() {
        let mut state = state_with(&[Color::Red, Color::Blue]);
        let red0 = TokenId::new(Color::Red, 0);
        let blue0 = TokenId::new(Color::Blue, 0);

        // Blue path 18 is absolute ring cell (39 + 18) % 52 = 5; red reaches
        // ring cell 5 from path 2 with a 3. Ring 5 is not safe.
        place(&mut state, blue0, 18);
        place(&mut state, red0, 2);

        let moves = legal_moves(&state, 3);
        let mv = moves.iter().find(|m| m.token == red0).unwrap();
        assert_eq!(mv.to, 5);
        assert_eq!(mv.captures.as_slice(), &[blue0]);
    }

    #[test]
    fn test_no_capture_annotation_on_safe_cell() {
        let mut state = state_with(&[Color::Red, Color::Blue]);
        let red0 = TokenId::new(Color::Red, 0);
        let blue0 = TokenId::new(Color::Blue, 0);

        // Blue sits on the star cell at ring 8 (blue path 21).
        place(&mut state, blue0, 21);
        place(&mut state, red0, 5);

        let moves = legal_moves(&state, 3);
        let mv = moves.iter().find(|m| m.token == red0).unwrap();
        assert_eq!(mv.to, 8);
        assert!(mv.captures.is_empty());
    }

    #[test]
    fn test_blockade_blocks_landing_not_passing() {
        let mut state = state_with(&[Color::Red, Color::Blue]);
        let red0 = TokenId::new(Color::Red, 0);

        // Blue blockade on ring cell 10 (blue paths 23).
        place(&mut state, TokenId::new(Color::Blue, 0), 23);
        place(&mut state, TokenId::new(Color::Blue, 1), 23);

        place(&mut state, red0, 7);

        // Landing on ring 10 (red path 10) with dice 3 is refused.
        assert!(legal_moves(&state, 3)
            .iter()
            .all(|m| m.token != red0));

        // Passing through with dice 5 is allowed.
        let moves = legal_moves(&state, 5);
        let mv = moves.iter().find(|m| m.token == red0).unwrap();
        assert_eq!(mv.to, 12);
    }

    #[test]
    fn test_blockade_on_start_cell_refuses_entry() {
        let mut state = state_with(&[Color::Red, Color::Blue]);

        // Blue blockade on red's start cell (ring 0, blue path 13).
        place(&mut state, TokenId::new(Color::Blue, 0), 13);
        place(&mut state, TokenId::new(Color::Blue, 1), 13);

        assert!(legal_moves(&state, 6).is_empty());
    }

    #[test]
    fn test_own_stack_is_not_a_blockade_for_self() {
        let mut state = state_with(&[Color::Red, Color::Blue]);
        place(&mut state, TokenId::new(Color::Red, 0), 10);
        place(&mut state, TokenId::new(Color::Red, 1), 10);
        place(&mut state, TokenId::new(Color::Red, 2), 7);

        // Red may land on its own pair.
        let moves = legal_moves(&state, 3);
        assert!(moves.iter().any(|m| m.token == TokenId::new(Color::Red, 2) && m.to == 10));
    }

    #[test]
    fn test_home_stretch_has_no_captures() {
        let mut state = state_with(&[Color::Red, Color::Blue]);
        let red0 = TokenId::new(Color::Red, 0);
        place(&mut state, red0, 50);

        let moves = legal_moves(&state, 6);
        let mv = moves.iter().find(|m| m.token == red0).unwrap();
        assert_eq!(mv.to, 56);
        assert!(mv.captures.is_empty());
    }
}
