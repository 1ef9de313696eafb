//! An agent to solve the game of tic-tac-toe

use tracing::{debug, instrument};

use crate::board::*;

/// The score of a position won by O
pub const MIN_SCORE: i32 = -1;
/// The score of a position won by X
pub const MAX_SCORE: i32 = 1;

/// Lower bound of the search window, below any reachable score
pub const NEG_INFINITY: i32 = MIN_SCORE - 1;
/// Upper bound of the search window, above any reachable score
pub const POS_INFINITY: i32 = MAX_SCORE + 1;

/// The outcome of a search: the best move found and the score it guarantees
///
/// `action` is `None` exactly when the searched board is terminal.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    pub action: Option<Action>,
    pub value: i32,
}

/// An agent to solve tic-tac-toe positions
///
/// # Notes
/// This agent runs a plain minimax search over the full game tree. X maximises
/// and O minimises the score, with alpha-beta cutoffs skipping branches that
/// cannot change the choice made further up the tree.
///
/// # Position Scoring
/// A position is scored as 1 if X can force a win, -1 if O can force a win
/// and 0 if best play from both sides ends in a draw.
///
/// # Move Ordering
/// Moves are tried in row-major order and the first move reaching the best
/// score is kept, so results are reproducible between runs.
#[derive(Clone)]
pub struct Solver {
    board: Board,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
    pruning: bool,
}

impl Solver {
    /// Creates a new `Solver` with alpha-beta pruning enabled
    pub fn new(board: Board) -> Self {
        Self {
            board,
            node_count: 0,
            pruning: true,
        }
    }

    /// Creates a new `Solver` that visits every node of the game tree
    pub fn exhaustive(board: Board) -> Self {
        Self {
            board,
            node_count: 0,
            pruning: false,
        }
    }

    /// Performs game tree search from `board` with `player` to act
    fn minimax(
        &mut self,
        board: Board,
        player: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchResult {
        self.node_count += 1;

        if board.is_terminal() {
            return SearchResult {
                action: None,
                value: board.utility(),
            };
        }

        let mut best = SearchResult {
            action: None,
            value: match player {
                Player::X => NEG_INFINITY,
                Player::O => POS_INFINITY,
            },
        };

        for action in board.legal_actions() {
            let value = self
                .minimax(board.play(action), player.opponent(), alpha, beta)
                .value;

            // strict comparisons keep the first of several equally good moves
            match player {
                Player::X => {
                    if value > best.value {
                        best = SearchResult {
                            action: Some(action),
                            value,
                        };
                    }
                    alpha = alpha.max(value);
                }
                Player::O => {
                    if value < best.value {
                        best = SearchResult {
                            action: Some(action),
                            value,
                        };
                    }
                    beta = beta.min(value);
                }
            }

            // the opponent already has a better option higher up the tree
            if self.pruning && alpha >= beta {
                break;
            }
        }

        best
    }

    /// Searches the position within the window (`alpha`, `beta`)
    ///
    /// The returned value is exact when it falls strictly inside the window,
    /// otherwise it only bounds the true score.
    pub fn search(&mut self, alpha: i32, beta: i32) -> SearchResult {
        self.minimax(self.board, self.board.current_player(), alpha, beta)
    }

    /// Calculates the score and best move of the current position
    #[instrument(level = "debug", skip(self), fields(board = %self.board, pruning = self.pruning))]
    pub fn solve(&mut self) -> SearchResult {
        let result = self.search(NEG_INFINITY, POS_INFINITY);
        debug!(
            value = result.value,
            action = ?result.action,
            nodes = self.node_count,
            "search complete"
        );
        result
    }
}

/// Solves `board` with alpha-beta pruning over the full score window
pub fn search(board: &Board) -> SearchResult {
    Solver::new(*board).solve()
}

/// Returns the optimal move for the player to act, or `None` once the game is over
#[instrument(level = "debug", skip(board), fields(board = %board))]
pub fn best_move(board: &Board) -> Option<Action> {
    if board.is_terminal() {
        return None;
    }
    search(board).action
}
