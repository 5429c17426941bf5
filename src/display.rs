//! Terminal rendering of a board

use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color as TermColor, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use crate::board::{Board, Slot};

/// Writes the board to `out`, top row first, under a row of one-indexed
/// column numbers
pub fn render<W: Write>(board: &Board, out: &mut W) -> Result<()> {
    let header: String = (1..=board.column_count())
        .map(|column| (column % 10).to_string())
        .collect();
    out.queue(PrintStyledContent(style(header + "\n")))?;

    for row in (0..board.row_count()).rev() {
        for column in 0..board.column_count() {
            out.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(TermColor::DarkBlue)
                    .with(match board.get_slot(column, row) {
                        Slot::Red => TermColor::Red,
                        Slot::Yellow => TermColor::Yellow,
                        Slot::Empty => TermColor::DarkBlue,
                    }),
            ))?;
        }
        out.queue(PrintStyledContent(style("\n")))?;
    }
    out.flush()?;
    Ok(())
}

/// Draws the board on stdout
pub fn display(board: &Board) -> Result<()> {
    render(board, &mut stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    #[test]
    fn one_line_per_row_plus_header() -> Result<()> {
        let mut board = Board::new();
        board.drop_token(0, Color::Red)?;

        let mut out = Vec::new();
        render(&board, &mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("1234567"));
        assert_eq!(text.matches('\n').count(), board.row_count() + 1);
        assert_eq!(text.matches('O').count(), board.column_count() * board.row_count());
        Ok(())
    }
}
