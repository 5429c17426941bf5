//! Board state and token placement

use anyhow::{anyhow, Result};
use thiserror::Error;

use crate::{HEIGHT, WIDTH, WIN_LENGTH};

/// One of the two player identities
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Color {
    Red,
    Yellow,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Yellow,
            Color::Yellow => Color::Red,
        }
    }

    /// The slot state of a token of this color
    pub fn slot(self) -> Slot {
        match self {
            Color::Red => Slot::Red,
            Color::Yellow => Slot::Yellow,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
        }
    }
}

/// The contents of a single board position
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Slot {
    Empty,
    Red,
    Yellow,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Slot::Empty => None,
            Slot::Red => Some(Color::Red),
            Slot::Yellow => Some(Color::Yellow),
        }
    }
}

/// Errors raised when a move cannot be made on a board
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum MoveError {
    #[error("column {column} out of range, columns must be below {columns}")]
    InvalidColumn { column: usize, columns: usize },
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("no playable column remains")]
    NoPlayableColumn,
}

/// A fixed-size grid of columns with gravity
///
/// # Notes
/// Cells are stored column by column, bottom to top, alongside the fill
/// height of every column. Filled cells in a column always form a prefix
/// starting at row 0, so the fill height is also the lowest empty row.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<Slot>,
    heights: Vec<usize>,
    num_moves: usize,
}

impl Board {
    /// Creates an empty board of the default size
    pub fn new() -> Self {
        Self::with_size(WIDTH, HEIGHT)
    }

    /// Creates an empty board with the given number of columns and rows
    pub fn with_size(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Slot::Empty; columns * rows],
            heights: vec![0; columns],
            num_moves: 0,
        }
    }

    /// Builds a default-size board from a string of one-indexed column digits,
    /// alternating colors starting with red
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut color = Color::Red;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= board.columns => {
                    if board.drop_token(column - 1, color)?.is_none() {
                        return Err(anyhow!("Invalid move, column {} full", column));
                    }
                    color = color.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Returns the slot at a column and row, row 0 being the bottom
    ///
    /// # Panics
    /// Panics if the position is outside the board.
    pub fn get_slot(&self, column: usize, row: usize) -> Slot {
        assert!(
            column < self.columns && row < self.rows,
            "slot ({}, {}) outside a {}x{} board",
            column,
            row,
            self.columns,
            self.rows
        );
        self.cells[column * self.rows + row]
    }

    /// Out-of-range columns count as full, since nothing can be dropped there
    pub fn is_column_full(&self, column: usize) -> bool {
        column >= self.columns || self.heights[column] >= self.rows
    }

    /// The row a token dropped into `column` would land on
    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        if self.is_column_full(column) {
            None
        } else {
            Some(self.heights[column])
        }
    }

    /// Whether a token dropped into `column` would come to rest at `row`
    pub fn is_playable_at(&self, column: usize, row: usize) -> bool {
        self.lowest_empty_row(column) == Some(row)
    }

    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.columns).filter(move |&column| !self.is_column_full(column))
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == self.columns * self.rows
    }

    /// Drops a token into the live board
    ///
    /// Returns the landing row, or `None` if the column was already full, in
    /// which case the board is left untouched.
    pub fn drop_token(&mut self, column: usize, color: Color) -> Result<Option<usize>, MoveError> {
        if column >= self.columns {
            return Err(MoveError::InvalidColumn {
                column,
                columns: self.columns,
            });
        }
        let row = self.heights[column];
        if row >= self.rows {
            return Ok(None);
        }
        self.cells[column * self.rows + row] = color.slot();
        self.heights[column] += 1;
        self.num_moves += 1;
        Ok(Some(row))
    }

    /// Returns a copy of this board with a token of `color` dropped into `column`
    ///
    /// A full or out-of-range column yields an unchanged copy; check
    /// [`Board::is_column_full`] first when the difference matters.
    pub fn with_token(&self, column: usize, color: Color) -> Board {
        let mut next = self.clone();
        // a full column is a no-op and a bad index leaves the copy untouched
        let _ = next.drop_token(column, color);
        next
    }

    /// Whether dropping `color` into `column` would complete a line of four
    pub fn is_winning_drop(&self, column: usize, color: Color) -> bool {
        let row = match self.lowest_empty_row(column) {
            Some(row) => row,
            None => return false,
        };
        let slot = color.slot();

        // vertical, horizontal and both diagonals
        for &(dx, dy) in [(0i32, 1i32), (1, 0), (1, 1), (1, -1)].iter() {
            let mut run = 1;
            for &sign in [-1i32, 1].iter() {
                let mut x = column as i32 + sign * dx;
                let mut y = row as i32 + sign * dy;
                while x >= 0
                    && y >= 0
                    && (x as usize) < self.columns
                    && (y as usize) < self.rows
                    && self.get_slot(x as usize, y as usize) == slot
                {
                    run += 1;
                    x += sign * dx;
                    y += sign * dy;
                }
            }
            if run >= WIN_LENGTH {
                return true;
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
