//! Property tests over the legal-move computation: randomized token
//! placements must never produce a move that overshoots, moves a finished
//! token, enters without a six, or lands on an opponent blockade.

use proptest::prelude::*;

use ludo_engine::{
    is_safe_cell, legal_moves, resolve_cell, Cell, Color, Controller, GameConfig, GameId, GameMode,
    GameState, SeatConfig, TokenId, TRACK_LENGTH,
};

/// Red-to-act state with forged token placements for red and blue.
fn forged(red: [Option<u8>; 4], blue: [Option<u8>; 4]) -> GameState {
    let config = GameConfig::new(
        vec![
            SeatConfig::new(Color::Red, Controller::Human),
            SeatConfig::new(Color::Blue, Controller::Human),
        ],
        GameMode::FreeForAll,
        42,
    );
    let mut state = GameState::new(GameId(1), &config);
    for (slot, p) in red.into_iter().enumerate() {
        state.place_token(TokenId::new(Color::Red, slot as u8), p);
    }
    for (slot, p) in blue.into_iter().enumerate() {
        state.place_token(TokenId::new(Color::Blue, slot as u8), p);
    }
    state
}

fn positions() -> impl Strategy<Value = [Option<u8>; 4]> {
    prop::array::uniform4(prop::option::of(0u8..=TRACK_LENGTH))
}

proptest! {
    #[test]
    fn prop_moves_advance_by_exactly_the_dice(
        dice in 1u8..=6,
        red in positions(),
        blue in positions(),
    ) {
        let state = forged(red, blue);
        for mv in legal_moves(&state, dice) {
            prop_assert!(mv.to <= TRACK_LENGTH);
            match mv.from {
                Some(p) => prop_assert_eq!(mv.to, p + dice),
                None => {
                    // Entry happens only on a six, always to path index 0.
                    prop_assert_eq!(dice, 6);
                    prop_assert_eq!(mv.to, 0);
                }
            }
        }
    }

    #[test]
    fn prop_home_entry_iff_six_and_unblocked(
        dice in 1u8..=6,
        red in positions(),
        blue in positions(),
    ) {
        let state = forged(red, blue);
        let moves = legal_moves(&state, dice);
        let entry_blocked =
            state.opponent_blockade_on(resolve_cell(Color::Red, 0), Color::Red);

        for slot in 0..4u8 {
            let id = TokenId::new(Color::Red, slot);
            let home = state.token(id).unwrap().path_index().is_none();
            let expected = home && dice == 6 && !entry_blocked;
            let present = moves.iter().any(|m| m.token == id && m.from.is_none());
            prop_assert_eq!(present, expected);
        }
    }

    #[test]
    fn prop_finished_tokens_never_move(
        dice in 1u8..=6,
        red in positions(),
        blue in positions(),
    ) {
        let state = forged(red, blue);
        for mv in legal_moves(&state, dice) {
            prop_assert_ne!(mv.from, Some(TRACK_LENGTH));
        }
    }

    #[test]
    fn prop_moves_sorted_by_token_id(
        dice in 1u8..=6,
        red in positions(),
        blue in positions(),
    ) {
        let state = forged(red, blue);
        let moves = legal_moves(&state, dice);
        for pair in moves.windows(2) {
            prop_assert!(pair[0].token < pair[1].token);
        }
    }

    #[test]
    fn prop_no_landing_on_opponent_blockade(
        dice in 1u8..=6,
        red in positions(),
        blue in positions(),
    ) {
        let state = forged(red, blue);
        for mv in legal_moves(&state, dice) {
            let dest = resolve_cell(Color::Red, mv.to);
            prop_assert!(!state.opponent_blockade_on(dest, Color::Red));
        }
    }

    #[test]
    fn prop_capture_annotations_are_unsafe_ring_opponents(
        dice in 1u8..=6,
        red in positions(),
        blue in positions(),
    ) {
        let state = forged(red, blue);
        for mv in legal_moves(&state, dice) {
            let dest = resolve_cell(Color::Red, mv.to);
            if !mv.captures.is_empty() {
                prop_assert!(matches!(dest, Cell::Ring(_)));
                prop_assert!(!is_safe_cell(dest));
            }
            for &victim in &mv.captures {
                prop_assert_eq!(victim.color(), Color::Blue);
                let token = state.token(victim).unwrap();
                prop_assert_eq!(token.cell(), Some(dest));
            }
        }
    }
}
