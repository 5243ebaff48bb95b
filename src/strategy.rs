//! Move selection strategies.
//!
//! Every strategy reads candidates from the [`Board`], picks one, and submits
//! it with [`Board::make_move`]. The returned [`Move`] is already on the board.
//!
//! The one-ply heuristics score a candidate by playing it on the live board,
//! counting movements, and undoing it. Ties go to the first candidate in
//! generation order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::constants::DEFAULT_ROUNDS;
use crate::mcts::MonteCarlo;
use crate::moves::{Move, Player};
use crate::playout::PlayoutMode;

/// How a side chooses its moves.
#[derive(Clone, Debug, PartialEq)]
pub enum Strategy {
    /// Uniform movement, then uniform arrow for it.
    Random,
    /// Leave the opponent with the fewest movements.
    MinOpponent,
    /// Keep the most movements for ourselves.
    MaxSelf,
    /// Maximize own movements divided by the opponent's.
    MinMaxRatio,
    /// Shortest simulated win over random playouts.
    MonteCarlo(MonteCarlo),
}

impl Strategy {
    /// Choose a move for `player` and play it on `board`.
    pub fn play(&self, board: &mut Board, player: Player, rng: &mut fastrand::Rng) -> Result<Move, BoardError> {
        match self {
            Strategy::Random => make_random_move(board, player, rng),
            Strategy::MinOpponent => make_min_opponent_move(board, player),
            Strategy::MaxSelf => make_max_self_move(board, player),
            Strategy::MinMaxRatio => make_minmax_move(board, player),
            Strategy::MonteCarlo(mc) => {
                let m = mc.search(board, player, rng)?;
                board.make_move(m)?;
                Ok(m)
            }
        }
    }

    /// Set playout parameters. Has no effect on the other strategies.
    pub fn with_playouts(self, rounds: usize, mode: PlayoutMode, verbose: bool) -> Self {
        match self {
            Strategy::MonteCarlo(_) => Strategy::MonteCarlo(MonteCarlo {
                rounds,
                mode,
                verbose,
            }),
            other => other,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Random => write!(f, "random"),
            Strategy::MinOpponent => write!(f, "min"),
            Strategy::MaxSelf => write!(f, "max"),
            Strategy::MinMaxRatio => write!(f, "minmax"),
            Strategy::MonteCarlo(mc) => write!(f, "mcts({} rounds, {} playouts)", mc.rounds, mc.mode),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy {0:?} (expected random, min, max, minmax or mcts)")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(Strategy::Random),
            "min" => Ok(Strategy::MinOpponent),
            "max" => Ok(Strategy::MaxSelf),
            "minmax" => Ok(Strategy::MinMaxRatio),
            "mcts" => Ok(Strategy::MonteCarlo(MonteCarlo {
                rounds: DEFAULT_ROUNDS,
                mode: PlayoutMode::Random,
                verbose: false,
            })),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Every legal move for `player`: each movement crossed with its arrow targets.
pub fn generate_all_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut all_moves = Vec::new();
    for (start, end) in board.populate_all_movements(player) {
        for attack in board.populate_all_attacks_for_move(start, end) {
            all_moves.push(Move::new(start, end, attack, player));
        }
    }
    all_moves
}

pub fn make_random_move(board: &mut Board, player: Player, rng: &mut fastrand::Rng) -> Result<Move, BoardError> {
    let movements = board.populate_all_movements(player);
    if movements.is_empty() {
        return Err(BoardError::NoLegalMoves { player });
    }
    let (start, end) = movements[rng.usize(..movements.len())];
    let attacks = board.populate_all_attacks_for_move(start, end);
    let attack = attacks[rng.usize(..attacks.len())];

    let m = Move::new(start, end, attack, player);
    board.make_move(m)?;
    Ok(m)
}

/// Play the candidate with the highest `score`, measured after the candidate
/// is on the board. The first best candidate wins ties.
fn make_best_scored_move<S, F>(board: &mut Board, player: Player, score: F) -> Result<Move, BoardError>
where
    S: PartialOrd,
    F: Fn(&Board) -> S,
{
    let mut best: Option<(Move, S)> = None;
    for m in generate_all_moves(board, player) {
        board.make_move(m)?;
        let value = score(board);
        board.pop_last_move();

        if best.as_ref().is_none_or(|(_, b)| value > *b) {
            best = Some((m, value));
        }
    }

    let (m, _) = best.ok_or(BoardError::NoLegalMoves { player })?;
    board.make_move(m)?;
    Ok(m)
}

pub fn make_min_opponent_move(board: &mut Board, player: Player) -> Result<Move, BoardError> {
    let opponent = player.opponent();
    make_best_scored_move(board, player, |b| std::cmp::Reverse(b.mobility(opponent)))
}

pub fn make_max_self_move(board: &mut Board, player: Player) -> Result<Move, BoardError> {
    make_best_scored_move(board, player, |b| b.mobility(player))
}

/// Maximize `own / opponent` mobility.
///
/// A candidate that leaves the opponent without a movement wins at once: it
/// stays on the board and the search stops there.
pub fn make_minmax_move(board: &mut Board, player: Player) -> Result<Move, BoardError> {
    let opponent = player.opponent();
    let mut best: Option<(Move, f64)> = None;

    for m in generate_all_moves(board, player) {
        board.make_move(m)?;
        let opponent_moves = board.mobility(opponent);
        if opponent_moves == 0 {
            return Ok(m);
        }
        let ratio = board.mobility(player) as f64 / opponent_moves as f64;
        board.pop_last_move();

        if best.is_none_or(|(_, b)| ratio > b) {
            best = Some((m, ratio));
        }
    }

    let (m, _) = best.ok_or(BoardError::NoLegalMoves { player })?;
    board.make_move(m)?;
    Ok(m)
}
