//! The Amazons board engine.
//!
//! [`Board`] is the only owner of grid state. It validates moves, applies
//! and undoes them, enumerates legal movements and arrow targets, and detects
//! the end of the game.
//!
//! The grid is a flat `Vec<Cell>` in row-major order, addressed `(x, y)` as
//! `(row, column)`. Speculative search uses two tools:
//! - [`Board::make_move`] followed by [`Board::pop_last_move`] for one-ply lookahead
//! - [`Snapshot`] clones for independent deep simulations

use std::fmt;

use thiserror::Error;

use crate::constants::{
    BURNED_CHAR, CELL_BURNED, CELL_EMPTY, DIRECTIONS, MIN_CUSTOM_LAYOUT_N,
};
use crate::moves::{Coord, Move, Player};

/// State of one square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Owned(Player),
    /// Permanently blocked by an arrow.
    Burned,
}

impl Cell {
    /// Rendering value: 0 = empty, 1/2 = piece, -1 = burned.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => CELL_EMPTY,
            Cell::Owned(p) => p.id(),
            Cell::Burned => CELL_BURNED,
        }
    }
}

/// Reasons the board rejects an operation.
///
/// Validation runs fully before any mutation, so an error never leaves the
/// board half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board cannot be of size {n}: {reason}")]
    Size { n: usize, reason: &'static str },
    #[error("player {player} does not have control of the piece at {at}")]
    Control { player: i8, at: Coord },
    #[error("it is not player {player}'s turn")]
    Turn { player: i8 },
    #[error("no player piece at {at}")]
    NoPiece { at: Coord },
    #[error("position {at} is out of bounds on a {n}x{n} board")]
    OutOfBounds { at: Coord, n: usize },
    #[error("path {from} -> {to} is not a legal queen trajectory")]
    Path { from: Coord, to: Coord },
    #[error("the game is over, reset the board to play again")]
    GameOver,
    #[error("player {player} has no legal moves")]
    NoLegalMoves { player: Player },
}

/// A cheap, independent copy of the board state without move history.
///
/// Cloning a snapshot is a flat buffer copy. Simulations built from it can
/// never alias the board they were taken from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    n: usize,
    cells: Vec<Cell>,
    last_player: Option<Player>,
    done: bool,
    winner: Option<Player>,
    plies: usize,
}

impl Snapshot {
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total plies played in the game this snapshot was taken from.
    pub fn plies(&self) -> usize {
        self.plies
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }
}

/// An Amazons game: grid, turn state, and move history.
#[derive(Clone, Debug)]
pub struct Board {
    n: usize,
    cells: Vec<Cell>,
    last_player: Option<Player>,
    done: bool,
    winner: Option<Player>,
    /// Plies played including any made before this board was restored from a snapshot.
    plies: usize,
    history: Vec<Move>,
}

impl Board {
    /// Create an `n`x`n` board with the default starting layout.
    pub fn new(n: usize) -> Result<Self, BoardError> {
        Self::build(n, None)
    }

    /// Create an `n`x`n` board with pieces at the given `(coord, player id)` pairs.
    /// Later entries for the same square replace earlier ones.
    pub fn with_layout(n: usize, layout: &[(Coord, i8)]) -> Result<Self, BoardError> {
        Self::build(n, Some(layout))
    }

    fn build(n: usize, layout: Option<&[(Coord, i8)]>) -> Result<Self, BoardError> {
        let mut board = Board {
            n: 0,
            cells: Vec::new(),
            last_player: None,
            done: false,
            winner: None,
            plies: 0,
            history: Vec::new(),
        };
        board.reset(n, layout)?;
        Ok(board)
    }

    /// Restore a board from a snapshot. The history starts empty, so
    /// [`Board::pop_last_move`] cannot rewind past the snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Board {
            n: snapshot.n,
            cells: snapshot.cells,
            last_player: snapshot.last_player,
            done: snapshot.done,
            winner: snapshot.winner,
            plies: snapshot.plies,
            history: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            n: self.n,
            cells: self.cells.clone(),
            last_player: self.last_player,
            done: self.done,
            winner: self.winner,
            plies: self.plies,
        }
    }

    /// Rebuild the grid at size `n`, with either the default layout or `layout`.
    ///
    /// The new grid is fully built before anything is replaced, so on error the
    /// board is unchanged.
    pub fn reset(&mut self, n: usize, layout: Option<&[(Coord, i8)]>) -> Result<(), BoardError> {
        let cells = match layout {
            Some(layout) => custom_layout(n, layout)?,
            None => default_layout(n)?,
        };
        self.n = n;
        self.cells = cells;
        self.last_player = None;
        self.done = false;
        self.winner = None;
        self.plies = 0;
        self.history.clear();
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// The player who moved last, or `None` before the first move.
    pub fn last_player(&self) -> Option<Player> {
        self.last_player
    }

    /// The player expected to move next. Player one opens.
    pub fn next_player(&self) -> Player {
        self.last_player.map_or(Player::One, Player::opponent)
    }

    /// Moves made on this board, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.plies
    }

    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        let n = self.n as i32;
        c.x >= 0 && c.x < n && c.y >= 0 && c.y < n
    }

    #[inline]
    fn idx(&self, c: Coord) -> usize {
        c.x as usize * self.n + c.y as usize
    }

    #[inline]
    fn coord(&self, idx: usize) -> Coord {
        Coord::new((idx / self.n) as i32, (idx % self.n) as i32)
    }

    /// Cell at `c`, or `None` off the board.
    pub fn cell(&self, c: Coord) -> Option<Cell> {
        if self.in_bounds(c) {
            Some(self.cells[self.idx(c)])
        } else {
            None
        }
    }

    /// Squares currently holding `player`'s pieces, in row-major order.
    pub fn pieces(&self, player: Player) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == Cell::Owned(player))
            .map(|(i, _)| self.coord(i))
            .collect()
    }

    #[inline]
    fn is_open(&self, c: Coord) -> bool {
        self.cell(c) == Some(Cell::Empty)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate `m` against the current position without changing anything.
    ///
    /// Checks run in a fixed order, so a malformed move always reports the
    /// same error.
    pub fn check_move(&self, m: &Move) -> Result<(), BoardError> {
        let Some(mover) = m.owner() else {
            return Err(BoardError::Control {
                player: m.player,
                at: m.start,
            });
        };

        if self.last_player == Some(mover) {
            return Err(BoardError::Turn { player: m.player });
        }

        match self.cell(m.start) {
            None => return Err(self.out_of_bounds(m.start)),
            Some(Cell::Empty | Cell::Burned) => return Err(BoardError::NoPiece { at: m.start }),
            Some(Cell::Owned(owner)) if owner != mover => {
                return Err(BoardError::Control {
                    player: m.player,
                    at: m.start,
                });
            }
            Some(Cell::Owned(_)) => {}
        }

        for c in [m.start, m.end, m.attack] {
            if !self.in_bounds(c) {
                return Err(self.out_of_bounds(c));
            }
        }

        if !self.check_trajectory(m.start, m.end) {
            return Err(BoardError::Path {
                from: m.start,
                to: m.end,
            });
        }

        // A piece may always shoot back where it came from
        if m.attack != m.start && !self.check_trajectory(m.end, m.attack) {
            return Err(BoardError::Path {
                from: m.end,
                to: m.attack,
            });
        }

        Ok(())
    }

    fn out_of_bounds(&self, at: Coord) -> BoardError {
        BoardError::OutOfBounds { at, n: self.n }
    }

    /// Whether a queen standing on `from` can travel to `to`.
    ///
    /// The line must be horizontal, vertical or diagonal with non-zero length,
    /// and every square after `from` up to and including `to` must be empty.
    pub fn check_trajectory(&self, from: Coord, to: Coord) -> bool {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return false;
        }
        if !self.is_open(to) {
            return false;
        }
        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return false;
        }

        let (sx, sy) = (dx.signum(), dy.signum());
        let mut c = from;
        while c != to {
            c = c.offset(sx, sy);
            if !self.is_open(c) {
                return false;
            }
        }
        true
    }

    // =========================================================================
    // Move Execution
    // =========================================================================

    /// Write `m` onto the grid without validation.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate of `m` is off the board.
    pub fn apply_move(&mut self, m: &Move) {
        let owner = m.owner();
        let (s, e, a) = (self.idx(m.start), self.idx(m.end), self.idx(m.attack));
        self.cells[s] = Cell::Empty;
        self.cells[e] = owner.map_or(Cell::Empty, Cell::Owned);
        self.cells[a] = Cell::Burned;
        self.last_player = owner;
    }

    /// Validate, apply, record, and then check whether the game is over.
    pub fn make_move(&mut self, m: Move) -> Result<(), BoardError> {
        if self.done {
            return Err(BoardError::GameOver);
        }
        self.check_move(&m)?;
        self.apply_move(&m);
        self.history.push(m);
        self.plies += 1;
        self.check_done();
        Ok(())
    }

    /// Undo the most recent move. Does nothing when there is no history.
    pub fn pop_last_move(&mut self) {
        let Some(last) = self.history.pop() else {
            return;
        };

        // Attack may equal start, so clear it before restoring the piece
        let (s, e, a) = (self.idx(last.start), self.idx(last.end), self.idx(last.attack));
        self.cells[a] = Cell::Empty;
        self.cells[e] = Cell::Empty;
        self.cells[s] = last.owner().map_or(Cell::Empty, Cell::Owned);

        self.last_player = self.history.last().and_then(Move::owner);
        self.plies -= 1;
        self.done = false;
        self.winner = None;
    }

    /// End the game if either side is left without a movement.
    ///
    /// The second branch only fires on contrived layouts, where the mover walls
    /// in its own last piece while the opponent can still move.
    fn check_done(&mut self) {
        let Some(mover) = self.last_player else {
            return;
        };
        let next = mover.opponent();
        if !self.check_if_player_has_moves(next) {
            self.done = true;
            self.winner = Some(mover);
        } else if !self.check_if_player_has_moves(mover) {
            self.done = true;
            self.winner = Some(next);
        }
    }

    // =========================================================================
    // Move Generation
    // =========================================================================

    /// Visit every open square reachable from `from` along the 8 queen lines.
    fn for_each_ray_square(&self, from: Coord, mut visit: impl FnMut(Coord)) {
        for (dx, dy) in DIRECTIONS {
            let mut c = from.offset(dx, dy);
            while self.is_open(c) {
                visit(c);
                c = c.offset(dx, dy);
            }
        }
    }

    /// All `(piece, destination)` pairs available to `player`.
    pub fn populate_all_movements(&self, player: Player) -> Vec<(Coord, Coord)> {
        let mut movements = Vec::new();
        for piece in self.pieces(player) {
            self.for_each_ray_square(piece, |dest| movements.push((piece, dest)));
        }
        movements
    }

    /// All arrow targets after moving the piece on `start` to `end`.
    ///
    /// `start` is always first. The piece has not left `start` yet, so rays
    /// from `end` stop there like at any other occupied square.
    pub fn populate_all_attacks_for_move(&self, start: Coord, end: Coord) -> Vec<Coord> {
        let mut attacks = vec![start];
        self.for_each_ray_square(end, |c| attacks.push(c));
        attacks
    }

    /// Number of movements available to `player`.
    pub fn mobility(&self, player: Player) -> usize {
        let mut count = 0;
        for piece in self.pieces(player) {
            self.for_each_ray_square(piece, |_| count += 1);
        }
        count
    }

    pub fn check_if_player_has_moves(&self, player: Player) -> bool {
        self.pieces(player).into_iter().any(|piece| {
            DIRECTIONS
                .iter()
                .any(|&(dx, dy)| self.cell(piece.offset(dx, dy)) == Some(Cell::Empty))
        })
    }
}

// =============================================================================
// Starting Layouts
// =============================================================================

fn default_layout(n: usize) -> Result<Vec<Cell>, BoardError> {
    match n {
        0 | 1 => {
            return Err(BoardError::Size {
                n,
                reason: "a board needs at least two rows",
            });
        }
        2 => {
            return Err(BoardError::Size {
                n,
                reason: "a 2x2 board needs custom starting positions",
            });
        }
        _ => {}
    }

    let last = n - 1;
    let pos = n / 2;
    // Even boards push the pieces one square further from the centre line
    let (lo, hi) = if n % 2 == 0 { (pos - 2, pos + 1) } else { (pos - 1, pos + 1) };

    let ones = [(0, lo), (0, hi), (lo, 0), (lo, last)];
    let twos = [(pos + 1, 0), (pos + 1, last), (last, lo), (last, hi)];

    // On 3x3 and 4x4 boards the placements coincide and each side gets two pieces
    let mut cells = vec![Cell::Empty; n * n];
    for (x, y) in ones {
        cells[x * n + y] = Cell::Owned(Player::One);
    }
    for (x, y) in twos {
        cells[x * n + y] = Cell::Owned(Player::Two);
    }
    Ok(cells)
}

fn custom_layout(n: usize, layout: &[(Coord, i8)]) -> Result<Vec<Cell>, BoardError> {
    if n < MIN_CUSTOM_LAYOUT_N {
        return Err(BoardError::Size {
            n,
            reason: "a board needs at least two rows",
        });
    }

    let mut cells = vec![Cell::Empty; n * n];
    let side = n as i32;
    for &(at, id) in layout {
        if at.x < 0 || at.x >= side || at.y < 0 || at.y >= side {
            return Err(BoardError::OutOfBounds { at, n });
        }
        let player = Player::from_id(id).ok_or(BoardError::Control { player: id, at })?;
        cells[at.x as usize * n + at.y as usize] = Cell::Owned(player);
    }
    Ok(cells)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.n) {
            for cell in row {
                match cell {
                    Cell::Burned => write!(f, "{BURNED_CHAR} ")?,
                    other => write!(f, "{} ", other.value())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    fn mv(start: (i32, i32), end: (i32, i32), attack: (i32, i32), player: Player) -> Move {
        Move::new(start.into(), end.into(), attack.into(), player)
    }

    fn burn(board: &mut Board, at: Coord) {
        let i = board.idx(at);
        board.cells[i] = Cell::Burned;
    }

    #[test]
    fn test_default_layout_counts() {
        for n in 5..=14 {
            let board = Board::new(n).unwrap();
            assert_eq!(board.pieces(Player::One).len(), 4, "n = {n}");
            assert_eq!(board.pieces(Player::Two).len(), 4, "n = {n}");
            let burned = board.cells.iter().filter(|&&c| c == Cell::Burned).count();
            assert_eq!(burned, 0);
            assert!(!board.done());
            assert_eq!(board.last_player(), None);
            assert_eq!(board.winner(), None);
        }
    }

    #[test]
    fn test_default_layout_ten() {
        let board = Board::new(10).unwrap();
        assert_eq!(
            board.pieces(Player::One),
            vec![c(0, 3), c(0, 6), c(3, 0), c(3, 9)]
        );
        assert_eq!(
            board.pieces(Player::Two),
            vec![c(6, 0), c(6, 9), c(9, 3), c(9, 6)]
        );
    }

    #[test]
    fn test_default_layout_odd() {
        let board = Board::new(7).unwrap();
        assert_eq!(
            board.pieces(Player::One),
            vec![c(0, 2), c(0, 4), c(2, 0), c(2, 6)]
        );
        assert_eq!(
            board.pieces(Player::Two),
            vec![c(4, 0), c(4, 6), c(6, 2), c(6, 4)]
        );
    }

    #[test]
    fn test_size_errors() {
        assert!(matches!(Board::new(1), Err(BoardError::Size { n: 1, .. })));
        assert!(matches!(Board::new(2), Err(BoardError::Size { n: 2, .. })));
        assert!(matches!(
            Board::with_layout(1, &[(c(0, 0), 1)]),
            Err(BoardError::Size { n: 1, .. })
        ));
        assert!(Board::with_layout(2, &[(c(0, 0), 1), (c(1, 1), 2)]).is_ok());
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(
            Board::with_layout(4, &[(c(4, 0), 1)]).unwrap_err(),
            BoardError::OutOfBounds { at: c(4, 0), n: 4 }
        );
        assert!(matches!(
            Board::with_layout(4, &[(c(0, -1), 2)]),
            Err(BoardError::OutOfBounds { .. })
        ));
        assert!(matches!(
            Board::with_layout(4, &[(c(0, 0), 3)]),
            Err(BoardError::Control { player: 3, .. })
        ));
    }

    #[test]
    fn test_failed_reset_keeps_board() {
        let mut board = Board::new(6).unwrap();
        let before = board.snapshot();
        assert!(board.reset(1, None).is_err());
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_check_order_control_before_turn() {
        let mut board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        board.make_move(mv((0, 0), (0, 1), (0, 0), Player::One)).unwrap();
        // Sentinel id is reported even though it also breaks other rules
        let bad = Move::with_id(c(2, 2), c(2, 2), c(2, 2), 0);
        assert!(matches!(board.check_move(&bad), Err(BoardError::Control { player: 0, .. })));
    }

    #[test]
    fn test_turn_before_piece() {
        let mut board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        board.make_move(mv((0, 0), (0, 1), (0, 0), Player::One)).unwrap();
        let again = mv((2, 2), (2, 3), (1, 3), Player::One);
        assert_eq!(board.check_move(&again), Err(BoardError::Turn { player: 1 }));
    }

    #[test]
    fn test_no_piece_and_control() {
        let board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        let empty = mv((1, 1), (1, 2), (1, 1), Player::One);
        assert_eq!(board.check_move(&empty), Err(BoardError::NoPiece { at: c(1, 1) }));

        let foreign = mv((3, 3), (3, 2), (3, 3), Player::One);
        assert!(matches!(board.check_move(&foreign), Err(BoardError::Control { player: 1, .. })));
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        let off_start = mv((-1, 0), (0, 1), (0, 0), Player::One);
        assert!(matches!(board.check_move(&off_start), Err(BoardError::OutOfBounds { .. })));

        let off_end = mv((0, 0), (0, 4), (0, 0), Player::One);
        assert_eq!(
            board.check_move(&off_end),
            Err(BoardError::OutOfBounds { at: c(0, 4), n: 4 })
        );

        let off_attack = mv((0, 0), (0, 1), (0, 9), Player::One);
        assert_eq!(
            board.check_move(&off_attack),
            Err(BoardError::OutOfBounds { at: c(0, 9), n: 4 })
        );
    }

    #[test]
    fn test_knight_shape_is_path_error() {
        let board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        let knight = mv((0, 0), (2, 1), (0, 0), Player::One);
        assert_eq!(
            board.check_move(&knight),
            Err(BoardError::Path { from: c(0, 0), to: c(2, 1) })
        );
    }

    #[test]
    fn test_blocked_paths() {
        let mut board = Board::with_layout(5, &[(c(0, 0), 1), (c(4, 4), 2)]).unwrap();
        burn(&mut board, c(0, 2));
        burn(&mut board, c(2, 2));

        // Through a burned square, in a decreasing-coordinate direction too
        assert!(!board.check_trajectory(c(0, 0), c(0, 3)));
        assert!(!board.check_trajectory(c(4, 4), c(1, 1)));
        assert!(!board.check_trajectory(c(0, 0), c(0, 2)));
        assert!(board.check_trajectory(c(0, 0), c(0, 1)));
        assert!(board.check_trajectory(c(4, 4), c(3, 3)));
        assert!(board.check_trajectory(c(4, 4), c(4, 0)));
        // Zero length
        assert!(!board.check_trajectory(c(1, 1), c(1, 1)));

        let through = mv((0, 0), (0, 4), (0, 0), Player::One);
        assert!(matches!(board.check_move(&through), Err(BoardError::Path { .. })));

        let bad_arrow = mv((0, 0), (1, 0), (3, 1), Player::One);
        assert_eq!(
            board.check_move(&bad_arrow),
            Err(BoardError::Path { from: c(1, 0), to: c(3, 1) })
        );
    }

    #[test]
    fn test_arrow_blocked_by_start_square() {
        let mut board = Board::with_layout(5, &[(c(0, 2), 1), (c(4, 4), 2)]).unwrap();
        // Shooting back onto the start square is always allowed
        let m = mv((0, 2), (2, 2), (0, 2), Player::One);
        assert!(board.check_move(&m).is_ok());

        // The piece still stands on (0, 2) while the arrow is checked
        let past_start = mv((0, 2), (0, 3), (0, 0), Player::One);
        assert_eq!(
            board.make_move(past_start),
            Err(BoardError::Path { from: c(0, 3), to: c(0, 0) })
        );
        assert!(board.moves().is_empty());

        let attacks = board.populate_all_attacks_for_move(c(0, 2), c(0, 3));
        assert_eq!(attacks[0], c(0, 2));
        assert!(!attacks.contains(&c(0, 1)));
        assert!(!attacks.contains(&c(0, 0)));
        assert!(attacks.contains(&c(0, 4)));
        assert!(attacks.contains(&c(1, 3)));
    }

    #[test]
    fn test_small_default_layouts() {
        let three = Board::new(3).unwrap();
        assert_eq!(three.pieces(Player::One), vec![c(0, 0), c(0, 2)]);
        assert_eq!(three.pieces(Player::Two), vec![c(2, 0), c(2, 2)]);
        assert!(three.check_if_player_has_moves(Player::One));

        let four = Board::new(4).unwrap();
        assert_eq!(four.pieces(Player::One), vec![c(0, 0), c(0, 3)]);
        assert_eq!(four.pieces(Player::Two), vec![c(3, 0), c(3, 3)]);
        assert!(!four.done());
    }

    #[test]
    fn test_shooting_own_landing_square_rejected() {
        let board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        let m = mv((0, 0), (0, 2), (0, 2), Player::One);
        assert!(matches!(board.check_move(&m), Err(BoardError::Path { .. })));
    }

    #[test]
    fn test_apply_and_pop_round_trip() {
        let mut board = Board::new(10).unwrap();
        let first = mv((0, 3), (5, 3), (5, 8), Player::One);
        board.make_move(first).unwrap();
        let before = board.snapshot();
        let history_len = board.moves().len();

        let reply = mv((6, 0), (6, 4), (6, 0), Player::Two);
        board.make_move(reply).unwrap();
        assert_eq!(board.cell(c(6, 4)), Some(Cell::Owned(Player::Two)));
        assert_eq!(board.cell(c(6, 0)), Some(Cell::Burned));

        board.pop_last_move();
        assert_eq!(board.snapshot(), before);
        assert_eq!(board.moves().len(), history_len);
        assert_eq!(board.last_player(), Some(Player::One));

        board.pop_last_move();
        assert_eq!(board.last_player(), None);
        assert_eq!(board.snapshot(), Board::new(10).unwrap().snapshot());

        // Empty history is a no-op
        board.pop_last_move();
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_pop_when_attack_is_start() {
        let mut board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        let before = board.snapshot();
        board.make_move(mv((0, 0), (2, 2), (0, 0), Player::One)).unwrap();
        assert_eq!(board.cell(c(0, 0)), Some(Cell::Burned));
        board.pop_last_move();
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_movements_stop_at_blockers() {
        let mut board = Board::with_layout(5, &[(c(2, 2), 1), (c(2, 4), 2), (c(0, 2), 1)]).unwrap();
        burn(&mut board, c(3, 3));
        let moves = board.populate_all_movements(Player::One);
        let from_centre: Vec<Coord> = moves
            .iter()
            .filter(|(p, _)| *p == c(2, 2))
            .map(|&(_, d)| d)
            .collect();

        assert!(from_centre.contains(&c(2, 3)));
        assert!(!from_centre.contains(&c(2, 4)), "opponent piece blocks");
        assert!(from_centre.contains(&c(1, 2)));
        assert!(!from_centre.contains(&c(0, 2)), "own piece blocks");
        assert!(!from_centre.contains(&c(3, 3)), "burned square blocks");
        assert!(!from_centre.contains(&c(4, 4)), "nothing past a blocker");
        assert!(!from_centre.contains(&c(2, 2)));
        assert_eq!(board.mobility(Player::One), moves.len());
    }

    #[test]
    fn test_attacks_start_first() {
        let board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        let attacks = board.populate_all_attacks_for_move(c(0, 0), c(0, 2));
        assert_eq!(attacks[0], c(0, 0));
        assert_eq!(attacks.iter().filter(|&&a| a == c(0, 0)).count(), 1);
        assert!(attacks.contains(&c(0, 1)));
        assert!(attacks.contains(&c(0, 3)));
        assert!(!attacks.contains(&c(0, 2)));
        assert!(!attacks.contains(&c(3, 3)));
    }

    #[test]
    fn test_game_over_when_opponent_walled_in() {
        let mut board = Board::with_layout(4, &[(c(0, 0), 1), (c(3, 3), 2)]).unwrap();
        burn(&mut board, c(0, 1));
        burn(&mut board, c(1, 0));
        board.last_player = Some(Player::One);

        // Player 2 closes the last gap
        board.make_move(mv((3, 3), (2, 2), (1, 1), Player::Two)).unwrap();
        assert!(board.done());
        assert_eq!(board.winner(), Some(Player::Two));
        assert_eq!(
            board.make_move(mv((0, 0), (0, 1), (0, 0), Player::One)),
            Err(BoardError::GameOver)
        );

        board.pop_last_move();
        assert!(!board.done());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_mover_walls_itself_in() {
        let layout = [
            (c(0, 0), 1),
            (c(1, 0), 2),
            (c(1, 1), 2),
            (c(1, 2), 2),
            (c(0, 2), 2),
        ];
        let mut board = Board::with_layout(3, &layout).unwrap();
        board.make_move(mv((0, 0), (0, 1), (0, 0), Player::One)).unwrap();
        assert!(board.done());
        assert_eq!(board.winner(), Some(Player::Two));
    }

    #[test]
    fn test_display() {
        let mut board = Board::with_layout(2, &[(c(0, 0), 1), (c(1, 1), 2)]).unwrap();
        board.make_move(mv((0, 0), (0, 1), (0, 0), Player::One)).unwrap();
        assert_eq!(board.to_string(), "X 1 \n0 2 \n");
    }
}
