//! Flat Monte-Carlo move selection.
//!
//! This is a one-level search, not a tree search. Each candidate move is played
//! on its own copy of the board, and then `rounds` independent playouts run from
//! that position. A candidate is scored by its shortest winning playout. The
//! move with the shortest win overall is chosen. If no candidate ever wins,
//! the move is drawn uniformly from all legal moves.
//!
//! Every simulation runs on a board restored from a [`Snapshot`], so the live
//! board is only touched by the final `make_move`.

use crate::board::{Board, BoardError, Snapshot};
use crate::constants::DEFAULT_ROUNDS;
use crate::moves::{Move, Player};
use crate::playout::{PlayoutMode, play_full_game};
use crate::strategy::generate_all_moves;

/// Playout search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarlo {
    /// Playouts per candidate move.
    pub rounds: usize,
    /// Opponent policy inside playouts.
    pub mode: PlayoutMode,
    /// Print per-candidate statistics to stderr.
    pub verbose: bool,
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            mode: PlayoutMode::Random,
            verbose: false,
        }
    }
}

/// Simulation statistics for one candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateScore {
    pub mv: Move,
    /// Playouts won out of `rounds`.
    pub wins: usize,
    /// Fewest total plies among the winning playouts.
    pub shortest_win: Option<usize>,
}

impl MonteCarlo {
    pub fn new(rounds: usize, mode: PlayoutMode) -> Self {
        Self {
            rounds,
            mode,
            verbose: false,
        }
    }

    /// Run playouts for every legal move of `player`.
    pub fn evaluate(
        &self,
        board: &Board,
        player: Player,
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<CandidateScore>, BoardError> {
        let root = board.snapshot();
        generate_all_moves(board, player)
            .into_iter()
            .map(|m| self.evaluate_candidate(&root, m, player, rng))
            .collect()
    }

    fn evaluate_candidate(
        &self,
        root: &Snapshot,
        m: Move,
        player: Player,
        rng: &mut fastrand::Rng,
    ) -> Result<CandidateScore, BoardError> {
        let mut after = Board::from_snapshot(root.clone());
        after.make_move(m)?;
        let after = after.snapshot();

        let mut score = CandidateScore {
            mv: m,
            wins: 0,
            shortest_win: None,
        };
        for _ in 0..self.rounds {
            let mut sim = Board::from_snapshot(after.clone());
            let result = play_full_game(&mut sim, player, self.mode, rng)?;
            if result.won {
                score.wins += 1;
                score.shortest_win = Some(score.shortest_win.map_or(result.moves, |s| s.min(result.moves)));
            }
        }
        Ok(score)
    }

    /// Pick a move for `player` without changing `board`.
    pub fn search(&self, board: &Board, player: Player, rng: &mut fastrand::Rng) -> Result<Move, BoardError> {
        let scores = self.evaluate(board, player, rng)?;
        if scores.is_empty() {
            return Err(BoardError::NoLegalMoves { player });
        }
        if self.verbose {
            dump_candidates(&scores);
        }

        let mut best: Option<(Move, usize)> = None;
        for score in &scores {
            let Some(len) = score.shortest_win else {
                continue;
            };
            if best.is_none_or(|(_, b)| len < b) {
                best = Some((score.mv, len));
            }
        }

        Ok(match best {
            Some((m, _)) => m,
            None => scores[rng.usize(..scores.len())].mv,
        })
    }
}

/// Print simulation statistics for each candidate that won at least once.
pub fn dump_candidates(scores: &[CandidateScore]) {
    let winning = scores.iter().filter(|s| s.wins > 0).count();
    eprintln!("{} candidates, {winning} with a simulated win", scores.len());
    for score in scores.iter().filter(|s| s.wins > 0) {
        eprintln!(
            "move {} wins={} shortest={}",
            score.mv,
            score.wins,
            score.shortest_win.unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Coord;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_zero_rounds_falls_back_to_legal_move() {
        let mut board = Board::new(5).unwrap();
        let before = board.snapshot();
        let mut rng = fastrand::Rng::with_seed(9);
        let mc = MonteCarlo::new(0, PlayoutMode::Random);

        let m = mc.search(&board, Player::One, &mut rng).unwrap();
        assert_eq!(board.snapshot(), before);
        assert!(board.check_move(&m).is_ok());
        board.make_move(m).unwrap();
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = Board::new(5).unwrap();
        let before = board.snapshot();
        let mut rng = fastrand::Rng::with_seed(5);
        let mc = MonteCarlo::new(2, PlayoutMode::Random);
        let m = mc.search(&board, Player::One, &mut rng).unwrap();
        assert_eq!(board.snapshot(), before);
        assert!(board.moves().is_empty());
        assert!(generate_all_moves(&board, Player::One).contains(&m));
    }

    #[test]
    fn test_prefers_immediate_win() {
        // Walling in player 2 ends the game after a single ply
        let layout = [(c(0, 0), 2), (c(1, 0), 1), (c(1, 1), 1), (c(3, 3), 1)];
        let board = Board::with_layout(4, &layout).unwrap();
        let mut rng = fastrand::Rng::with_seed(21);
        let mc = MonteCarlo::new(1, PlayoutMode::Random);

        let scores = mc.evaluate(&board, Player::One, &mut rng).unwrap();
        let m = mc.search(&board, Player::One, &mut rng).unwrap();
        let shortest = scores.iter().filter_map(|s| s.shortest_win).min();
        assert_eq!(shortest, Some(1));

        let mut after = board.clone();
        after.make_move(m).unwrap();
        assert!(after.done());
        assert_eq!(after.winner(), Some(Player::One));
    }

    #[test]
    fn test_scores_count_wins() {
        let board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        let mut rng = fastrand::Rng::with_seed(2);
        let mc = MonteCarlo::new(3, PlayoutMode::Random);
        for score in mc.evaluate(&board, Player::One, &mut rng).unwrap() {
            assert!(score.wins <= 3);
            assert_eq!(score.wins == 0, score.shortest_win.is_none());
        }
    }

    #[test]
    fn test_no_candidates() {
        let layout = [(c(0, 0), 1), (c(0, 1), 2), (c(1, 0), 2), (c(1, 1), 2)];
        let board = Board::with_layout(3, &layout).unwrap();
        let mut rng = fastrand::Rng::with_seed(4);
        assert_eq!(
            MonteCarlo::default().search(&board, Player::One, &mut rng),
            Err(BoardError::NoLegalMoves { player: Player::One })
        );
    }
}
