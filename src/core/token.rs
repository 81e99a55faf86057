//! Tokens and token identity.
//!
//! ## TokenId
//!
//! Packs color and slot into one `u8` (`color * 4 + slot`), giving a total
//! order across the board that the validator and AI use for deterministic
//! tie-breaks.
//!
//! ## Token state
//!
//! `TokenState` is derived from the path index on every query rather than
//! cached, so it can never diverge from position.

use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::board;

/// Token identifier: `color * 4 + slot`, slot in `0..4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl TokenId {
    /// Create a token ID from color and slot.
    ///
    /// Panics if `slot >= 4`; callers validate.
    #[must_use]
    pub fn new(color: Color, slot: u8) -> Self {
        assert!(slot < 4, "token slot must be 0-3");
        Self(color.index() as u8 * 4 + slot)
    }

    /// The owning color.
    #[must_use]
    pub const fn color(self) -> Color {
        Color::from_index((self.0 / 4) as usize)
    }

    /// Slot within the owning player (0-3).
    #[must_use]
    pub const fn slot(self) -> u8 {
        self.0 % 4
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.color(), self.slot())
    }
}

/// Derived token state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenState {
    /// In the home yard, not yet entered; path index is `None`.
    Home,
    /// On the track, capturable.
    Active,
    /// On a safe cell, exempt from capture.
    Safe,
    /// Reached path index 57.
    Finished,
}

/// A single token: identity plus path position.
///
/// `path_index` is the color-relative linear offset:
/// - `None`: home yard
/// - `0..=51`: shared ring
/// - `52..=56`: home stretch
/// - `57`: finished
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    id: TokenId,
    path_index: Option<u8>,
}

impl Token {
    /// Create a token in the home yard.
    #[must_use]
    pub fn new(id: TokenId) -> Self {
        Self {
            id,
            path_index: None,
        }
    }

    /// Token identity.
    #[must_use]
    pub const fn id(self) -> TokenId {
        self.id
    }

    /// Owning color.
    #[must_use]
    pub const fn color(self) -> Color {
        self.id.color()
    }

    /// Current path index, `None` while in the home yard.
    #[must_use]
    pub const fn path_index(self) -> Option<u8> {
        self.path_index
    }

    /// Derived state, computed from position.
    #[must_use]
    pub fn state(self) -> TokenState {
        match self.path_index {
            None => TokenState::Home,
            Some(board::TRACK_LENGTH) => TokenState::Finished,
            Some(p) => {
                if board::is_safe_cell(board::resolve_cell(self.color(), p)) {
                    TokenState::Safe
                } else {
                    TokenState::Active
                }
            }
        }
    }

    /// The cell this token occupies, `None` while in the home yard.
    #[must_use]
    pub fn cell(self) -> Option<board::Cell> {
        self.path_index
            .map(|p| board::resolve_cell(self.color(), p))
    }

    /// Whether the token has reached the goal.
    #[must_use]
    pub fn is_finished(self) -> bool {
        self.path_index == Some(board::TRACK_LENGTH)
    }

    /// Relocate the token to a path index.
    pub(crate) fn set_path_index(&mut self, path_index: u8) {
        debug_assert!(path_index <= board::TRACK_LENGTH);
        self.path_index = Some(path_index);
    }

    /// Send the token back to the home yard.
    pub(crate) fn send_home(&mut self) {
        self.path_index = None;
    }

    /// Bypass the range check, to forge corrupt states in tests.
    #[cfg(test)]
    pub(crate) fn set_path_index_unchecked(&mut self, path_index: u8) {
        self.path_index = Some(path_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_packing() {
        let id = TokenId::new(Color::Yellow, 2);
        assert_eq!(id.0, 10);
        assert_eq!(id.color(), Color::Yellow);
        assert_eq!(id.slot(), 2);
        assert_eq!(format!("{}", id), "yellow#2");
    }

    #[test]
    fn test_token_id_ordering() {
        let red0 = TokenId::new(Color::Red, 0);
        let red3 = TokenId::new(Color::Red, 3);
        let green0 = TokenId::new(Color::Green, 0);
        assert!(red0 < red3);
        assert!(red3 < green0);
    }

    #[test]
    fn test_state_home() {
        let token = Token::new(TokenId::new(Color::Red, 0));
        assert_eq!(token.state(), TokenState::Home);
        assert_eq!(token.path_index(), None);
        assert_eq!(token.cell(), None);
    }

    #[test]
    fn test_state_safe_on_start_cell() {
        let mut token = Token::new(TokenId::new(Color::Red, 0));
        token.set_path_index(0);
        assert_eq!(token.state(), TokenState::Safe);
    }

    #[test]
    fn test_state_active_on_plain_cell() {
        let mut token = Token::new(TokenId::new(Color::Red, 0));
        token.set_path_index(3);
        assert_eq!(token.state(), TokenState::Active);
    }

    #[test]
    fn test_state_finished() {
        let mut token = Token::new(TokenId::new(Color::Blue, 1));
        token.set_path_index(board::TRACK_LENGTH);
        assert_eq!(token.state(), TokenState::Finished);
        assert!(token.is_finished());
    }

    #[test]
    fn test_send_home() {
        let mut token = Token::new(TokenId::new(Color::Green, 0));
        token.set_path_index(20);
        token.send_home();
        assert_eq!(token.state(), TokenState::Home);
        assert_eq!(token.path_index(), None);
    }

    #[test]
    fn test_serialization() {
        let mut token = Token::new(TokenId::new(Color::Blue, 3));
        token.set_path_index(12);
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(token, back);
    }
}
