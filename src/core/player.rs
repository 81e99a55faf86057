//! Players and seat controllers.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::token::{Token, TokenId};

/// AI difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniform-random choice among legal moves.
    Easy,
    /// Greedy single-step scoring.
    Medium,
    /// Greedy scoring plus one-ply threat lookahead and blockade awareness.
    Hard,
    /// Hard, plus a bias toward finishing the most advanced token.
    Expert,
}

/// Who drives a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// Moves arrive from external (UI) input.
    Human,
    /// Moves are chosen by the AI strategy engine.
    Ai(Difficulty),
}

impl Controller {
    /// Whether this seat is driven by a human.
    #[must_use]
    pub fn is_human(self) -> bool {
        matches!(self, Controller::Human)
    }
}

/// A player: seat, color, controller, and exactly four tokens.
///
/// Invariant: every token's color equals the player's color, and token ids
/// are `color * 4 + slot` for slots 0-3.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    seat: u8,
    color: Color,
    controller: Controller,
    tokens: [Token; 4],
}

impl Player {
    /// Create a player with all four tokens in the home yard.
    #[must_use]
    pub fn new(seat: u8, color: Color, controller: Controller) -> Self {
        let tokens = [
            Token::new(TokenId::new(color, 0)),
            Token::new(TokenId::new(color, 1)),
            Token::new(TokenId::new(color, 2)),
            Token::new(TokenId::new(color, 3)),
        ];
        Self {
            seat,
            color,
            controller,
            tokens,
        }
    }

    /// Seat index in turn order.
    #[must_use]
    pub fn seat(&self) -> u8 {
        self.seat
    }

    /// The player's color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Seat controller.
    #[must_use]
    pub fn controller(&self) -> Controller {
        self.controller
    }

    /// Whether this seat is human-driven.
    #[must_use]
    pub fn is_human(&self) -> bool {
        self.controller.is_human()
    }

    /// The player's tokens in ascending id order.
    #[must_use]
    pub fn tokens(&self) -> &[Token; 4] {
        &self.tokens
    }

    /// A specific token by slot.
    #[must_use]
    pub fn token(&self, slot: u8) -> Token {
        self.tokens[slot as usize]
    }

    /// Mutable access for the turn engine.
    pub(crate) fn token_mut(&mut self, slot: u8) -> &mut Token {
        &mut self.tokens[slot as usize]
    }

    /// Count of tokens that have reached the goal.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_finished()).count()
    }

    /// Count of tokens not yet finished.
    #[must_use]
    pub fn unfinished_count(&self) -> usize {
        4 - self.finished_count()
    }

    /// Whether all four tokens have finished.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.finished_count() == 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_in_home() {
        let player = Player::new(0, Color::Red, Controller::Human);
        assert_eq!(player.seat(), 0);
        assert_eq!(player.color(), Color::Red);
        assert!(player.is_human());
        assert_eq!(player.finished_count(), 0);
        assert_eq!(player.unfinished_count(), 4);
        for token in player.tokens() {
            assert_eq!(token.path_index(), None);
            assert_eq!(token.color(), Color::Red);
        }
    }

    #[test]
    fn test_token_ids_ascending() {
        let player = Player::new(1, Color::Green, Controller::Ai(Difficulty::Easy));
        let ids: Vec<_> = player.tokens().iter().map(|t| t.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_win_detection() {
        let mut player = Player::new(0, Color::Blue, Controller::Human);
        for slot in 0..4 {
            assert!(!player.has_won());
            player.token_mut(slot).set_path_index(crate::board::TRACK_LENGTH);
        }
        assert!(player.has_won());
        assert_eq!(player.unfinished_count(), 0);
    }

    #[test]
    fn test_serialization() {
        let player = Player::new(2, Color::Yellow, Controller::Ai(Difficulty::Expert));
        let json = serde_json::to_string(&player).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, back);
    }
}
