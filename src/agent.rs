//! Players that pick a column and drop a token into a live board

use anyhow::Result;

use crate::{
    board::{Board, Color, MoveError},
    random::{random_playable_column, RandomSource},
    search::{Score, Searcher},
    threat::find_winning_column,
};

/// Common interface of every computer player
pub trait Agent {
    /// The color this agent plays
    fn color(&self) -> Color;

    /// Display name of this agent
    fn name(&self) -> &str;

    /// Picks the column to play next without touching the board
    fn choose_move(&mut self, board: &Board) -> Result<usize>;

    /// Drops one token of this agent's color into `column` of the live board,
    /// returning the row it landed on
    ///
    /// Full and out-of-range columns are refused, so a bad choice never turns
    /// into a skipped move or an out-of-bounds write.
    fn apply_move(&self, board: &mut Board, column: usize) -> Result<usize> {
        if column >= board.column_count() {
            return Err(MoveError::InvalidColumn {
                column,
                columns: board.column_count(),
            }
            .into());
        }
        match board.drop_token(column, self.color())? {
            Some(row) => Ok(row),
            None => Err(MoveError::ColumnFull(column).into()),
        }
    }

    /// Chooses a column and plays it on the live board
    fn make_move(&mut self, board: &mut Board) -> Result<usize> {
        let column = self.choose_move(board)?;
        self.apply_move(board, column)?;
        Ok(column)
    }
}

/// The search-based agent
///
/// Each move searches a copy of the live board a fixed number of plies ahead
/// (see [`Searcher`]); the live board is only changed by the final placement.
pub struct SearchAgent<R> {
    color: Color,
    searcher: Searcher<R>,
    last_score: Option<Score>,
}

impl<R: RandomSource> SearchAgent<R> {
    pub fn new(color: Color, rng: R) -> Self {
        Self {
            color,
            searcher: Searcher::new(rng),
            last_score: None,
        }
    }

    /// Changes how many plies ahead this agent searches
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.searcher = self.searcher.with_max_depth(max_depth);
        self
    }

    /// Score of the most recent search, if any
    pub fn last_score(&self) -> Option<Score> {
        self.last_score
    }

    /// Nodes visited by the most recent search
    pub fn node_count(&self) -> usize {
        self.searcher.node_count
    }
}

impl<R: RandomSource> Agent for SearchAgent<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        "Search"
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let snapshot = board.clone();
        let result = self.searcher.search(&snapshot, self.color);
        self.last_score = Some(result.score);

        match result.column {
            Some(column) if !board.is_column_full(column) => Ok(column),
            _ => Err(MoveError::NoPlayableColumn.into()),
        }
    }
}

/// Looks a single move ahead: win if possible, otherwise block the
/// opponent's win, otherwise play randomly
pub struct ShallowAgent<R> {
    color: Color,
    rng: R,
}

impl<R: RandomSource> ShallowAgent<R> {
    pub fn new(color: Color, rng: R) -> Self {
        Self { color, rng }
    }
}

impl<R: RandomSource> Agent for ShallowAgent<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        "Shallow"
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        if let Some(column) = find_winning_column(board, self.color) {
            return Ok(column);
        }
        if let Some(column) = find_winning_column(board, self.color.opponent()) {
            return Ok(column);
        }
        random_playable_column(board, &mut self.rng).ok_or_else(|| MoveError::NoPlayableColumn.into())
    }
}

/// Plays a uniformly random playable column
pub struct RandomAgent<R> {
    color: Color,
    rng: R,
}

impl<R: RandomSource> RandomAgent<R> {
    pub fn new(color: Color, rng: R) -> Self {
        Self { color, rng }
    }
}

impl<R: RandomSource> Agent for RandomAgent<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        random_playable_column(board, &mut self.rng).ok_or_else(|| MoveError::NoPlayableColumn.into())
    }
}
