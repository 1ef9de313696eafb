//! Whole-game analysis: every reachable position, solved with and without pruning

use indicatif::*;
use rayon::prelude::*;
use tracing::{info, warn};

use std::collections::HashSet;
use std::time::Instant;

use crate::solver::{MAX_SCORE, MIN_SCORE};
use crate::*;

/// Totals gathered by [`analyse`]
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// Distinct boards reachable from the empty board, including it
    pub positions: usize,
    /// Reachable boards where the game is over
    pub terminal: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Non-terminal positions X can force a win from
    pub forced_x_wins: usize,
    /// Non-terminal positions O can force a win from
    pub forced_o_wins: usize,
    /// Non-terminal positions that are drawn with best play
    pub forced_draws: usize,
    pub pruned_nodes: usize,
    pub exhaustive_nodes: usize,
    /// Positions where pruned and exhaustive search disagree on the score or the move
    pub mismatches: Vec<Board>,
}

struct Solved {
    board: Board,
    pruned: SearchResult,
    pruned_nodes: usize,
    exhaustive: SearchResult,
    exhaustive_nodes: usize,
}

/// Returns every distinct board reachable by legal play from the empty board
///
/// Play stops at terminal boards, so no board holds a move made after a win.
pub fn reachable_positions() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut positions = Vec::new();
    let mut stack = vec![initial_board()];

    while let Some(board) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        positions.push(board);
        if board.is_terminal() {
            continue;
        }
        for action in board.legal_actions() {
            let next = board.play(action);
            if !seen.contains(&next) {
                stack.push(next);
            }
        }
    }
    positions
}

/// Solves every reachable non-terminal position twice, once with pruning and
/// once exhaustively, and collects the results
pub fn analyse(progress: bool) -> Report {
    let start = Instant::now();

    let positions = reachable_positions();
    let mut report = Report {
        positions: positions.len(),
        ..Report::default()
    };

    let mut open = Vec::new();
    for board in positions {
        if !board.is_terminal() {
            open.push(board);
            continue;
        }
        report.terminal += 1;
        match board.winner() {
            Some(Player::X) => report.x_wins += 1,
            Some(Player::O) => report.o_wins += 1,
            None => report.draws += 1,
        }
    }
    info!(
        positions = report.positions,
        terminal = report.terminal,
        "position generation complete"
    );

    let bar = if progress {
        let bar = ProgressBar::new(open.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("Solving positions: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let solved: Vec<Solved> = open
        .par_iter()
        .map(|&board| {
            let mut pruned = Solver::new(board);
            let pruned_result = pruned.solve();
            let mut exhaustive = Solver::exhaustive(board);
            let exhaustive_result = exhaustive.solve();
            bar.inc(1);
            Solved {
                board,
                pruned: pruned_result,
                pruned_nodes: pruned.node_count,
                exhaustive: exhaustive_result,
                exhaustive_nodes: exhaustive.node_count,
            }
        })
        .collect();
    bar.finish();

    for entry in solved {
        report.pruned_nodes += entry.pruned_nodes;
        report.exhaustive_nodes += entry.exhaustive_nodes;
        match entry.exhaustive.value {
            MAX_SCORE => report.forced_x_wins += 1,
            MIN_SCORE => report.forced_o_wins += 1,
            _ => report.forced_draws += 1,
        }
        if entry.pruned != entry.exhaustive {
            warn!(
                board = %entry.board,
                pruned = ?entry.pruned,
                exhaustive = ?entry.exhaustive,
                "pruned search disagrees with exhaustive search"
            );
            report.mismatches.push(entry.board);
        }
    }

    info!(
        pruned_nodes = report.pruned_nodes,
        exhaustive_nodes = report.exhaustive_nodes,
        mismatches = report.mismatches.len(),
        "analysis completed in {}",
        HumanDuration(start.elapsed())
    );
    report
}
