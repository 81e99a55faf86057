//! Player colors.
//!
//! The four colors are fixed; declaration order is turn order. The engine
//! carries no presentation data here; display names and shades live in a
//! separate lookup so rendering concerns never leak into rule logic.

use serde::{Deserialize, Serialize};

/// One of the four fixed player colors.
///
/// Declaration order is turn order: Red moves first, then Green, Yellow,
/// Blue. Games with 2-3 players use a subset in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    /// All colors in turn order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Turn-order index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color for a turn-order index.
    ///
    /// Panics if `index >= 4`; callers validate.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    /// Rotation offset of this color's start cell on the 52-cell ring.
    ///
    /// Colors enter the ring 13 cells apart.
    #[must_use]
    pub const fn ring_offset(self) -> u8 {
        (self as u8) * 13
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        };
        write!(f, "{}", name)
    }
}
