//! Board representation and the queries derived from a position

use anyhow::{anyhow, Result};
use thiserror::Error;

use std::fmt;

use crate::SIZE;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    X,
    O,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn to_char(self) -> char {
        match self {
            Cell::X => 'X',
            Cell::O => 'O',
            Cell::Empty => '.',
        }
    }
}

/// One of the two sides, X always moves first
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark this player leaves in a cell
    pub fn mark(&self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark().to_char())
    }
}

/// A zero-indexed (row, column) coordinate
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Creates an action from a 1-based cell number, counted row-major
    ///
    /// ```text
    /// 1 2 3
    /// 4 5 6
    /// 7 8 9
    /// ```
    pub fn from_index(index: usize) -> Result<Self> {
        if index < 1 || index > SIZE * SIZE {
            return Err(anyhow!(
                "Invalid cell {}, cells must be between 1 and {}",
                index,
                SIZE * SIZE
            ));
        }
        Ok(Self::new((index - 1) / SIZE, (index - 1) % SIZE))
    }

    /// The 1-based cell number of this action
    pub fn index(&self) -> usize {
        self.row * SIZE + self.col + 1
    }

    fn in_range(&self) -> bool {
        self.row < SIZE && self.col < SIZE
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Returned by [`Board::apply`] for a move onto anything but an empty cell
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum InvalidMoveError {
    #[error("Invalid move {0}, rows and columns must be between 0 and {}", SIZE - 1)]
    OutOfRange(Action),
    #[error("Invalid move {0}, cell already taken")]
    Occupied(Action),
}

impl InvalidMoveError {
    pub fn action(&self) -> Action {
        match self {
            InvalidMoveError::OutOfRange(action) | InvalidMoveError::Occupied(action) => *action,
        }
    }
}

// rows, columns, then the two diagonals
const LINES: [[(usize, usize); SIZE]; 2 * SIZE + 2] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A 3x3 grid of cells
///
/// Boards are plain values: every move produces a new board and leaves the
/// one it was played on untouched, so search branches never share state.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// Creates a board from raw cells without checking that it is reachable
    pub const fn from_cells(cells: [[Cell; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// Plays a string of 1-based cell numbers from the empty board
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();

        for cell_char in moves.as_ref().chars() {
            match cell_char.to_digit(10).map(|c| c as usize) {
                Some(index @ 1..=9) => {
                    // abort if the position is won at any point
                    if board.is_terminal() {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    board = board.apply(Action::from_index(index)?)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", cell_char)),
            }
        }
        Ok(board)
    }

    pub fn cells(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Returns the content of a cell, or `None` off the board
    pub fn cell(&self, action: Action) -> Option<Cell> {
        self.cells
            .get(action.row)
            .and_then(|row| row.get(action.col))
            .copied()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_empty()).count()
    }

    pub fn num_moves(&self) -> usize {
        SIZE * SIZE - self.count_empty()
    }

    /// Returns the player to act, decided only by the parity of the move count
    pub fn current_player(&self) -> Player {
        if self.num_moves() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Returns every empty cell in row-major order
    pub fn legal_actions(&self) -> Vec<Action> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Action::new(row, col)))
            .filter(|&action| self.cells[action.row][action.col].is_empty())
            .collect()
    }

    /// Returns the board after the current player marks `action`
    pub fn apply(&self, action: Action) -> Result<Board, InvalidMoveError> {
        match self.cell(action) {
            None => Err(InvalidMoveError::OutOfRange(action)),
            Some(Cell::Empty) => Ok(self.play(action)),
            Some(_) => Err(InvalidMoveError::Occupied(action)),
        }
    }

    // assumes `action` is an empty cell on the board
    pub(crate) fn play(&self, action: Action) -> Board {
        debug_assert!(action.in_range());
        let mut next = *self;
        next.cells[action.row][action.col] = self.current_player().mark();
        next
    }

    /// Returns the owner of the first completed line
    ///
    /// Legal play can never complete lines for both players, so boards where
    /// that happens get whichever line is checked first.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let (row, col) = line[0];
            let player = match self.cells[row][col] {
                Cell::X => Player::X,
                Cell::O => Player::O,
                Cell::Empty => return None,
            };
            line.iter()
                .all(|&(row, col)| self.cells[row][col] == player.mark())
                .then(|| player)
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.count_empty() == 0
    }

    /// Scores the board from X's point of view
    ///
    /// Only meaningful for terminal boards, anything without a winner scores 0.
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row.iter() {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}
