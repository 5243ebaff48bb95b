//! Simulated games played to the end.
//!
//! A playout alternates the opponent (random or min-opponent, per
//! [`PlayoutMode`]) with random moves for the searching side until the board
//! reports the game is done. Playouts only ever run on boards restored from a
//! [`Snapshot`](crate::board::Snapshot), never on the live game.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::moves::Player;
use crate::strategy::{make_min_opponent_move, make_random_move};

/// How the opponent moves during a playout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayoutMode {
    #[default]
    Random,
    MinOpponent,
}

impl fmt::Display for PlayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayoutMode::Random => write!(f, "random"),
            PlayoutMode::MinOpponent => write!(f, "min"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid playout mode {0:?} (expected random or min)")]
pub struct ParsePlayoutModeError(String);

impl FromStr for PlayoutMode {
    type Err = ParsePlayoutModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(PlayoutMode::Random),
            "min" => Ok(PlayoutMode::MinOpponent),
            _ => Err(ParsePlayoutModeError(s.to_string())),
        }
    }
}

/// Outcome of one playout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayoutResult {
    /// Whether the searching side won.
    pub won: bool,
    /// Total plies in the finished game, including those before the playout.
    pub moves: usize,
}

/// Play `board` to the end, opponent first, and report whether `player` won.
pub fn play_full_game(
    board: &mut Board,
    player: Player,
    mode: PlayoutMode,
    rng: &mut fastrand::Rng,
) -> Result<PlayoutResult, BoardError> {
    let opponent = player.opponent();
    while !board.done() {
        match mode {
            PlayoutMode::Random => make_random_move(board, opponent, rng)?,
            PlayoutMode::MinOpponent => make_min_opponent_move(board, opponent)?,
        };
        if board.done() {
            break;
        }
        make_random_move(board, player, rng)?;
    }

    Ok(PlayoutResult {
        won: board.winner() == Some(player),
        moves: board.move_count(),
    })
}
