use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use tictactoe_ai::{Action, Board, Cell, SIZE};

/// Draws the board, numbering empty cells with the digit that plays them
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    stdout.queue(PrintStyledContent(style("\n".to_string())))?;
    for (row, cells) in board.cells().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let (text, color) = match cell {
                Cell::X => ("X".to_string(), Color::Red),
                Cell::O => ("O".to_string(), Color::Yellow),
                Cell::Empty => (Action::new(row, col).index().to_string(), Color::DarkGrey),
            };
            stdout.queue(PrintStyledContent(
                style(format!(" {} ", text))
                    .attribute(Attribute::Bold)
                    .with(color),
            ))?;
            if col + 1 < SIZE {
                stdout.queue(PrintStyledContent(style("│".to_string())))?;
            }
        }
        stdout.queue(PrintStyledContent(style("\n".to_string())))?;
        if row + 1 < SIZE {
            stdout.queue(PrintStyledContent(style("───┼───┼───\n".to_string())))?;
        }
    }
    stdout.queue(PrintStyledContent(style("\n".to_string())))?;
    stdout.flush()?;
    Ok(())
}
