//! A perfect agent for playing or analysing the game of tic-tac-toe
//!
//! This agent uses a minimax game tree search with alpha-beta pruning
//! to find the optimal move for the player to act in any position.
//!
//! # Basic Usage
//!
//! ```
//! use tictactoe_ai::{best_move, board::{Action, Board}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // X holds the two left cells of the top row, O is one short of a row below
//! let board = Board::from_moves("1425")?;
//!
//! assert_eq!(best_move(&board), Some(Action::new(0, 2)));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod solver;

pub mod analysis;


pub use board::{Action, Board, Cell, InvalidMoveError, Player};
pub use solver::{best_move, search, SearchResult, Solver};

/// The side length of the game board in cells
pub const SIZE: usize = 3;

// 1-based cell digits are used to name moves, so every cell needs a single digit
const_assert!(SIZE * SIZE <= 9);

/// Returns the empty board that every game starts from
pub fn initial_board() -> Board {
    Board::new()
}

/// Returns the player whose turn it is on `board`
pub fn current_player(board: &Board) -> Player {
    board.current_player()
}

/// Returns every empty cell of `board` in row-major order
pub fn legal_actions(board: &Board) -> Vec<Action> {
    board.legal_actions()
}

/// Returns the board that results from the current player marking `action`
pub fn apply(board: &Board, action: Action) -> Result<Board, InvalidMoveError> {
    board.apply(action)
}

/// Returns the player holding a completed line, if any
pub fn winner(board: &Board) -> Option<Player> {
    board.winner()
}

/// Returns true once the game on `board` has been won or drawn
pub fn is_terminal(board: &Board) -> bool {
    board.is_terminal()
}

/// Returns 1 if X has won, -1 if O has won and 0 otherwise
pub fn utility(board: &Board) -> i32 {
    board.utility()
}
