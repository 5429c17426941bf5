//! Detection of lines one token away from four in a row

use log::debug;

use crate::{
    board::{Board, Color},
    WIN_LENGTH,
};

/// The four line shapes checked through every board position, in scan order
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Vertical,
    Horizontal,
    /// Rising to the right: /
    DiagonalUp,
    /// Rising to the left: \
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Vertical,
        Direction::Horizontal,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// Column and row step between consecutive slots of a line
    fn step(self) -> (i32, i32) {
        match self {
            Direction::Vertical => (0, 1),
            Direction::Horizontal => (1, 0),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (-1, 1),
        }
    }

    /// Positions of the line of four starting at (column, row), or `None` if
    /// the line would leave the board
    fn line(self, board: &Board, column: usize, row: usize) -> Option<[(usize, usize); WIN_LENGTH]> {
        let (dx, dy) = self.step();
        let mut line = [(0, 0); WIN_LENGTH];
        for (i, position) in line.iter_mut().enumerate() {
            let x = column as i32 + dx * i as i32;
            let y = row as i32 + dy * i as i32;
            if x < 0 || y < 0 || x as usize >= board.column_count() || y as usize >= board.row_count() {
                return None;
            }
            *position = (x as usize, y as usize);
        }
        Some(line)
    }
}

/// A line of four holding three tokens of one color and a single empty slot
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Threat {
    pub direction: Direction,
    /// Column of the empty slot that completes the line
    pub column: usize,
    /// Row of the empty slot that completes the line
    pub row: usize,
}

/// Returns the position of the empty slot if exactly three of the four slots
/// hold `color` and the fourth is empty
fn one_away(board: &Board, line: &[(usize, usize); WIN_LENGTH], color: Color) -> Option<(usize, usize)> {
    let mut color_count = 0;
    let mut blank = None;
    let mut blank_count = 0;

    for &(column, row) in line.iter() {
        let slot = board.get_slot(column, row);
        if slot == color.slot() {
            color_count += 1;
        } else if slot.is_empty() {
            blank = Some((column, row));
            blank_count += 1;
        }
    }

    if color_count == WIN_LENGTH - 1 && blank_count == 1 {
        blank
    } else {
        None
    }
}

/// Finds the first playable threat for `color`
///
/// Positions are scanned column by column from the left, bottom row first,
/// trying each [`Direction`] in turn. A threat only counts when its empty slot
/// is the lowest empty slot of its column, so a token dropped there would
/// actually land on it. Lines that are already complete are not threats.
pub fn find_threat(board: &Board, color: Color) -> Option<Threat> {
    for column in 0..board.column_count() {
        for row in 0..board.row_count() {
            for &direction in Direction::ALL.iter() {
                let line = match direction.line(board, column, row) {
                    Some(line) => line,
                    None => continue,
                };
                if let Some((blank_column, blank_row)) = one_away(board, &line, color) {
                    if board.is_playable_at(blank_column, blank_row) {
                        return Some(Threat {
                            direction,
                            column: blank_column,
                            row: blank_row,
                        });
                    }
                }
            }
        }
    }
    None
}

/// Returns the column that lets `color` complete four in a row with its next
/// token, or `None` if there is no such column
pub fn find_winning_column(board: &Board, color: Color) -> Option<usize> {
    let threat = find_threat(board, color)?;
    debug!(
        "{:?}: winning move for {} at column {}",
        threat.direction,
        color.name(),
        threat.column
    );
    Some(threat.column)
}
