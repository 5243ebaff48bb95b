//! Amazons-Rust: an engine for the game of the Amazons.
//!
//! Two players each move queen-like pieces on an n×n board. After each move
//! the piece shoots an arrow that burns a square for the rest of the game. A
//! player who cannot move loses.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes, directions, and cell encoding
//! - [`moves`] - Coordinates, players, and the immutable move value
//! - [`board`] - Board engine: validation, apply/undo, move generation, game end
//! - [`strategy`] - Random and one-ply mobility strategies
//! - [`playout`] - Simulated games for Monte-Carlo search
//! - [`mcts`] - Flat Monte-Carlo move selection
//! - [`game`] - Game driver, starting layouts, and human input
//! - [`protocol`] - Text command protocol
//!
//! ## Example
//!
//! ```
//! use amazons_rust::board::Board;
//! use amazons_rust::moves::Player;
//! use amazons_rust::strategy::Strategy;
//!
//! let mut board = Board::new(10).unwrap();
//! let mut rng = fastrand::Rng::with_seed(1);
//!
//! // Let a mobility heuristic open the game
//! let m = Strategy::MaxSelf.play(&mut board, Player::One, &mut rng).unwrap();
//! println!("{m}");
//! println!("{board}");
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod mcts;
pub mod moves;
pub mod playout;
pub mod protocol;
pub mod strategy;
