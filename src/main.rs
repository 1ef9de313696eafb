use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::cmp::Ordering;
use std::io::{stdin, stdout, Stdin, Write};
use std::time::Duration;

use tictactoe_ai::*;

mod terminal;

/// Play tic-tac-toe against a perfect opponent, or analyse the whole game
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The engine plays X
    #[arg(long)]
    x_ai: bool,

    /// The engine plays O
    #[arg(long)]
    o_ai: bool,

    /// Pause between moves when the engine plays both sides, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Search every node instead of pruning with alpha-beta cutoffs
    #[arg(long)]
    exhaustive: bool,

    /// Solve every reachable position, print a summary and exit
    #[arg(long)]
    analyse: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.analyse {
        return run_analysis();
    }

    let stdin = stdin();

    println!("Welcome to Tic-Tac-Toe\n");

    // fall back to asking when no side was chosen on the command line
    let ai_players = if cli.x_ai || cli.o_ai {
        (cli.x_ai, cli.o_ai)
    } else {
        (
            ask(&stdin, "Is player X AI controlled? y/n: ")?,
            ask(&stdin, "Is player O AI controlled? y/n: ")?,
        )
    };
    info!(
        x_ai = ai_players.0,
        o_ai = ai_players.1,
        exhaustive = cli.exhaustive,
        "starting game"
    );

    let mut board = initial_board();

    // game loop
    loop {
        terminal::display(&board)?;

        if board.is_terminal() {
            match board.winner() {
                Some(player) => println!("Player {} wins!", player),
                None => println!("Draw!"),
            }
            break;
        }

        let player = board.current_player();
        let ai_turn = match player {
            Player::X => ai_players.0,
            Player::O => ai_players.1,
        };

        let next_move =
            // AI player
            if ai_turn {
                println!("AI is thinking...");
                stdout().flush()?;

                // slow down play if both players are AI
                if ai_players == (true, true) {
                    std::thread::sleep(Duration::from_millis(cli.delay_ms));
                }

                let mut solver = if cli.exhaustive {
                    Solver::exhaustive(board)
                } else {
                    Solver::new(board)
                };
                let result = solver.solve();

                match result.value.cmp(&0) {
                    Ordering::Greater => println!("Player X can force a win."),
                    Ordering::Less => println!("Player O can force a win."),
                    Ordering::Equal => println!("Best play from both sides ends in a draw."),
                }
                println!("Searched {} positions", solver.node_count);

                match result.action {
                    Some(action) => {
                        println!("Best move: {}", action.index());
                        action
                    }
                    None => break,
                }

            // human player
            } else {
                print!("Player {} move (1-{}) > ", player, SIZE * SIZE);
                stdout().flush()?;
                let mut input_str = String::new();
                if stdin.read_line(&mut input_str)? == 0 {
                    // input closed, nobody left to play this side
                    return Ok(());
                }

                let index = match input_str.trim().parse::<usize>() {
                    Err(_) => {
                        println!("Invalid number: {}", input_str.trim());
                        continue;
                    }
                    Ok(index) => index,
                };
                match Action::from_index(index) {
                    Err(err) => {
                        println!("{}", err);
                        continue;
                    }
                    Ok(action) => action,
                }
            };

        match board.apply(next_move) {
            Ok(next) => board = next,
            Err(err) => {
                println!("{}, pick a cell other than {}", err, err.action().index());
                // try the move again
                continue;
            }
        }
    }
    Ok(())
}

/// Repeats `question` until it gets a y/n answer
fn ask(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{}", question);
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(false);
        }
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn run_analysis() -> Result<()> {
    let report = analysis::analyse(true);

    println!("Reachable positions: {}", report.positions);
    println!(
        "Finished games: {} (X wins {}, O wins {}, draws {})",
        report.terminal, report.x_wins, report.o_wins, report.draws
    );
    println!(
        "Games in progress: {} (X forces a win in {}, O forces a win in {}, drawn in {})",
        report.positions - report.terminal,
        report.forced_x_wins,
        report.forced_o_wins,
        report.forced_draws
    );
    println!(
        "Nodes searched: {} with pruning, {} exhaustively",
        report.pruned_nodes, report.exhaustive_nodes
    );
    if report.mismatches.is_empty() {
        println!("Pruned and exhaustive search agree on every position");
    } else {
        println!(
            "Pruned and exhaustive search disagree on {} positions:",
            report.mismatches.len()
        );
        for board in report.mismatches.iter() {
            println!("{}\n", board);
        }
    }
    Ok(())
}
