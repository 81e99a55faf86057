//! Match configuration.
//!
//! Supplied once at `GameState` creation and immutable thereafter. The
//! builder asserts structural validity (2-4 seats, distinct colors) at
//! construction, so downstream code never re-checks it.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::player::Controller;

/// Match mode.
///
/// Free-for-all is the only mode the rule engine ships; the enum leaves
/// room for team variants without a wire-format break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// 2-4 players, first winner ends the match.
    FreeForAll,
}

/// One seat: a color and who controls it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Seat color; also determines turn order.
    pub color: Color,
    /// Human or AI (with difficulty).
    pub controller: Controller,
}

impl SeatConfig {
    /// Create a seat configuration.
    #[must_use]
    pub fn new(color: Color, controller: Controller) -> Self {
        Self { color, controller }
    }
}

/// Immutable match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    seats: Vec<SeatConfig>,
    mode: GameMode,
    seed: u64,
}

impl GameConfig {
    /// Create a configuration.
    ///
    /// Seats are reordered into turn order (color declaration order).
    /// Panics unless there are 2-4 seats with distinct colors; configuration
    /// is assembled by the host before a match exists, so a bad seat list is
    /// a programming error rather than a runtime condition.
    #[must_use]
    pub fn new(mut seats: Vec<SeatConfig>, mode: GameMode, seed: u64) -> Self {
        assert!(
            (2..=4).contains(&seats.len()),
            "a match needs 2-4 seats, got {}",
            seats.len()
        );
        seats.sort_by_key(|s| s.color.index());
        for pair in seats.windows(2) {
            assert!(
                pair[0].color != pair[1].color,
                "duplicate seat color {}",
                pair[0].color
            );
        }
        Self { seats, mode, seed }
    }

    /// Seats in turn order.
    #[must_use]
    pub fn seats(&self) -> &[SeatConfig] {
        &self.seats
    }

    /// Number of seats (2-4).
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Match mode.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// RNG seed for dice and AI randomness.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Difficulty;

    #[test]
    fn test_seats_sorted_into_turn_order() {
        let config = GameConfig::new(
            vec![
                SeatConfig::new(Color::Blue, Controller::Human),
                SeatConfig::new(Color::Red, Controller::Ai(Difficulty::Medium)),
            ],
            GameMode::FreeForAll,
            42,
        );

        assert_eq!(config.player_count(), 2);
        assert_eq!(config.seats()[0].color, Color::Red);
        assert_eq!(config.seats()[1].color, Color::Blue);
        assert_eq!(config.seed(), 42);
    }

    #[test]
    #[should_panic(expected = "2-4 seats")]
    fn test_too_few_seats() {
        let _ = GameConfig::new(
            vec![SeatConfig::new(Color::Red, Controller::Human)],
            GameMode::FreeForAll,
            0,
        );
    }

    #[test]
    #[should_panic(expected = "duplicate seat color")]
    fn test_duplicate_colors() {
        let _ = GameConfig::new(
            vec![
                SeatConfig::new(Color::Red, Controller::Human),
                SeatConfig::new(Color::Red, Controller::Human),
            ],
            GameMode::FreeForAll,
            0,
        );
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new(
            vec![
                SeatConfig::new(Color::Red, Controller::Human),
                SeatConfig::new(Color::Yellow, Controller::Ai(Difficulty::Hard)),
            ],
            GameMode::FreeForAll,
            7,
        );
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
