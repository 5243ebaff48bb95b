//! Coordinates, players, and the immutable [`Move`] value.
//!
//! A move is built fully formed: source, destination, arrow square and the
//! owning player id. The id is kept as the raw wire value (`1` or `2`) so that
//! the board can reject moves that carry a sentinel id instead of a player.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A square on the board as `(row, column)`.
///
/// Components are signed so that off-board input survives parsing and can be
/// reported by the board as out of bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one square in direction `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error returned when human input cannot be read as a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordError {
    #[error("expected two comma-separated numbers, got {0:?}")]
    Shape(String),
    #[error("invalid number {0:?}")]
    Number(String),
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parse `"x,y"`, tolerating whitespace and surrounding parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(ParseCoordError::Shape(s.to_string()));
        }
        let parse = |p: &str| {
            p.parse::<i32>()
                .map_err(|_| ParseCoordError::Number(p.to_string()))
        };
        Ok(Coord::new(parse(parts[0])?, parse(parts[1])?))
    }
}

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Map a raw id (`1` or `2`) to a player. Any other value is a sentinel.
    pub fn from_id(id: i8) -> Option<Self> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub fn id(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A single ply: move a piece from `start` to `end`, then burn `attack`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Coord,
    pub end: Coord,
    pub attack: Coord,
    /// Raw owner id. `1` and `2` are players; anything else is rejected.
    pub player: i8,
}

impl Move {
    pub fn new(start: Coord, end: Coord, attack: Coord, player: Player) -> Self {
        Self::with_id(start, end, attack, player.id())
    }

    /// Build a move with an unchecked owner id.
    pub const fn with_id(start: Coord, end: Coord, attack: Coord, player: i8) -> Self {
        Self {
            start,
            end,
            attack,
            player,
        }
    }

    /// Parse three `"x,y"` strings into a move for `player`.
    pub fn parse(start: &str, end: &str, attack: &str, player: Player) -> Result<Self, ParseCoordError> {
        Ok(Self::new(start.parse()?, end.parse()?, attack.parse()?, player))
    }

    /// The owning player, if the id is a real one.
    pub fn owner(&self) -> Option<Player> {
        Player::from_id(self.player)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} @ {}",
            self.player, self.start, self.end, self.attack
        )
    }
}
