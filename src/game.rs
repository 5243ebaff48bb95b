//! Game driver: starting layouts, two-strategy games, and human input.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::moves::{Coord, Move, Player};
use crate::strategy::Strategy;

const COLUMNS_MIN_N: usize = 4;

/// Named starting positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Four pieces per side near the edges.
    #[default]
    Default,
    /// One piece each in opposite corners.
    Corners,
    /// Two pieces each on the first and last rows, one column in from each
    /// side. Needs at least a 4x4 board.
    Columns,
}

impl Layout {
    /// Explicit `(coord, player id)` pairs, or `None` for the built-in layout.
    pub fn positions(self, n: usize) -> Option<Vec<(Coord, i8)>> {
        let last = n as i32 - 1;
        match self {
            Layout::Default => None,
            Layout::Corners => Some(vec![(Coord::new(0, 0), 1), (Coord::new(last, last), 2)]),
            Layout::Columns => Some(vec![
                (Coord::new(0, 1), 1),
                (Coord::new(0, last - 1), 1),
                (Coord::new(last, 1), 2),
                (Coord::new(last, last - 1), 2),
            ]),
        }
    }

    pub fn board(self, n: usize) -> Result<Board, BoardError> {
        if self == Layout::Columns && n < COLUMNS_MIN_N {
            return Err(BoardError::Size {
                n,
                reason: "the columns layout needs at least a 4x4 board",
            });
        }
        match self.positions(n) {
            Some(layout) => Board::with_layout(n, &layout),
            None => Board::new(n),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Default => write!(f, "default"),
            Layout::Corners => write!(f, "corners"),
            Layout::Columns => write!(f, "columns"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout {0:?} (expected default, corners or columns)")]
pub struct ParseLayoutError(String);

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Layout::Default),
            "corners" => Ok(Layout::Corners),
            "columns" => Ok(Layout::Columns),
            _ => Err(ParseLayoutError(s.to_string())),
        }
    }
}

/// Final state of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Player,
    pub moves: usize,
}

/// Play `board` to completion, `first` moving for player one and `second` for
/// player two. `on_move` runs after every ply.
pub fn play_game<F>(
    board: &mut Board,
    first: &Strategy,
    second: &Strategy,
    rng: &mut fastrand::Rng,
    mut on_move: F,
) -> Result<GameResult>
where
    F: FnMut(&Board, &Move),
{
    while !board.done() {
        let player = board.next_player();
        let strategy = match player {
            Player::One => first,
            Player::Two => second,
        };
        let m = strategy
            .play(board, player, rng)
            .with_context(|| format!("player {player} ({strategy}) failed to move"))?;
        on_move(board, &m);
    }

    let winner = board.winner().context("finished game has no winner")?;
    Ok(GameResult {
        winner,
        moves: board.move_count(),
    })
}

fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

/// Ask for a move until a legal one is entered, then play it.
///
/// Parse and validation errors are reported on `output` and the prompt
/// repeats. Fails only when the input ends.
pub fn prompt_human_move<R: BufRead, W: Write>(
    board: &mut Board,
    player: Player,
    input: &mut R,
    output: &mut W,
) -> Result<Move> {
    loop {
        let piece = prompt_line(input, output, "Which piece would you like to move? ")?;
        let location = prompt_line(input, output, "Where would you like to move that piece to? ")?;
        let attack = prompt_line(input, output, "Where would you like the piece to attack? ")?;

        let m = match Move::parse(&piece, &location, &attack, player) {
            Ok(m) => m,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };
        match board.make_move(m) {
            Ok(()) => return Ok(m),
            Err(e @ BoardError::GameOver) => return Err(e.into()),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}
