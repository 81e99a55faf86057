//! Static board topology.
//!
//! Pure, stateless lookups over constant tables: no mutation, no owned
//! state. Callers validate inputs before reaching this module; nothing here
//! returns an error.
//!
//! ## Layout
//!
//! - A shared 52-cell ring. Each color's track is the ring rotated by that
//!   color's offset (13 cells apart).
//! - Path indices are color-relative: `0` is the color's start cell, `51`
//!   the last shared cell, `52..=56` the color-exclusive home stretch, `57`
//!   the goal.
//! - Safe cells: the four start cells and four star cells, all on the ring.
//!   Home-stretch and goal cells are unreachable by opponents and need no
//!   safety marking.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Per-color track length: path index 57 means finished.
pub const TRACK_LENGTH: u8 = 57;

/// Number of cells on the shared ring.
pub const RING_LEN: u8 = 52;

/// Path index a token occupies the instant it leaves the home yard.
pub const ENTRY_PATH_INDEX: u8 = 0;

/// Ring indices of the star cells, safe for every color.
const STAR_CELLS: [u8; 4] = [8, 21, 34, 47];

/// An absolute board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// A shared ring cell, index `0..52`.
    Ring(u8),
    /// A color-exclusive home-stretch cell, step `0..5`.
    HomeStretch(Color, u8),
    /// The goal for a color (path index 57).
    Goal(Color),
}

/// Map a color-relative path offset to an absolute board coordinate.
///
/// Shared cells (0-51) use the common ring with the color's rotation
/// offset; home-stretch cells (52-56) and the goal are color-exclusive.
#[must_use]
pub fn resolve_cell(color: Color, path_index: u8) -> Cell {
    debug_assert!(path_index <= TRACK_LENGTH);
    match path_index {
        0..=51 => Cell::Ring((color.ring_offset() + path_index) % RING_LEN),
        52..=56 => Cell::HomeStretch(color, path_index - 52),
        _ => Cell::Goal(color),
    }
}

/// Whether a cell is exempt from capture.
///
/// True for each color's start cell and the fixed star cells. Tokens of any
/// colors may share a safe cell.
#[must_use]
pub fn is_safe_cell(cell: Cell) -> bool {
    match cell {
        Cell::Ring(idx) => {
            STAR_CELLS.contains(&idx) || Color::ALL.iter().any(|c| c.ring_offset() == idx)
        }
        // Unreachable by opponents, so capture never arises there.
        Cell::HomeStretch(..) | Cell::Goal(_) => false,
    }
}

/// The path index of a color's start cell (always 0).
#[must_use]
pub const fn entry_path_index(_color: Color) -> u8 {
    ENTRY_PATH_INDEX
}
