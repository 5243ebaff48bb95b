//! Constants for board geometry, cell encoding, and search defaults.
//!
//! The board side length is chosen at runtime, so unlike fixed-size engines
//! nothing here depends on `N`. Only defaults and lookup tables live here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). The standard Amazons board is 10x10.
pub const DEFAULT_N: usize = 10;

/// Smallest board that accepts a caller-supplied layout.
pub const MIN_CUSTOM_LAYOUT_N: usize = 2;

/// Queen directions as `(dx, dy)` row/column steps.
/// Order: Up, Down, Left, Right, UpLeft, UpRight, DownLeft, DownRight
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),  // Up
    (0, 1),   // Down
    (-1, 0),  // Left
    (1, 0),   // Right
    (-1, -1), // UpLeft
    (1, -1),  // UpRight
    (-1, 1),  // DownLeft
    (1, 1),   // DownRight
];

// =============================================================================
// Cell Encoding (rendering values)
// =============================================================================

/// Empty square.
pub const CELL_EMPTY: i8 = 0;

/// Burned square (arrow landed here).
pub const CELL_BURNED: i8 = -1;

/// Character used when rendering a burned square.
pub const BURNED_CHAR: char = 'X';

// =============================================================================
// Monte-Carlo Parameters
// =============================================================================

/// Default number of playouts per candidate move.
pub const DEFAULT_ROUNDS: usize = 10;

/// Default number of games for the `play` subcommand.
pub const DEFAULT_GAMES: usize = 1;
