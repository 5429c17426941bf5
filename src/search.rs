//! A depth-bounded game tree search for choosing a column

use log::{debug, trace};

use crate::{
    board::{Board, Color},
    random::{random_playable_column, RandomSource},
    threat::find_winning_column,
    MAX_DEPTH,
};

/// Outcome of a searched position, from the point of view of the searching side
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Score {
    /// The opponent wins, or is assumed to
    Loss,
    /// Nothing decisive was found before the search horizon
    Neutral,
    /// The searching side wins, or is assumed to
    Win,
}

impl Score {
    pub fn as_i32(self) -> i32 {
        match self {
            Score::Loss => -1,
            Score::Neutral => 0,
            Score::Win => 1,
        }
    }
}

/// A chosen column and the score it leads to
///
/// `column` is `None` only for a full board, which cannot occur at the root
/// of a search on a legal position.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: Score,
}

/// An agent to search Connect 4 positions a fixed number of plies ahead
///
/// # Notes
/// Even depths are moves of the searching side and odd depths are moves of
/// its opponent. Every node only checks whether the side to move can win
/// immediately: if it can, that column is returned with a decisive score and
/// the node is not explored further. Otherwise each playable column is tried
/// from left to right, keeping the best score for the searching side and the
/// worst for the opponent. A later column replaces an earlier one with the
/// same score, and the scan stops as soon as a decisive score turns up.
///
/// Past the horizon a random playable column is returned with a neutral
/// score, drawn from the searcher's own [`RandomSource`].
pub struct Searcher<R> {
    rng: R,
    max_depth: usize,

    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl<R: RandomSource> Searcher<R> {
    /// Creates a new `Searcher` with the default horizon of [`MAX_DEPTH`] plies
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_depth: MAX_DEPTH,
            node_count: 0,
        }
    }

    /// Changes the search horizon of an existing `Searcher`
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Searches `board` for the best column for `color`, who is to move
    pub fn search(&mut self, board: &Board, color: Color) -> SearchResult {
        self.node_count = 0;
        let result = self.evaluate(board, 0, color, color.opponent());
        debug!(
            "{} searched {} nodes: column {:?}, score {}",
            color.name(),
            self.node_count,
            result.column,
            result.score.as_i32()
        );
        result
    }

    /// Scores `board` at `depth` plies below the root
    ///
    /// The board is never modified, every explored move is played on a copy.
    pub fn evaluate(
        &mut self,
        board: &Board,
        depth: usize,
        engine_color: Color,
        opponent_color: Color,
    ) -> SearchResult {
        self.node_count += 1;

        // search horizon reached
        if depth >= self.max_depth {
            let column = random_playable_column(board, &mut self.rng);
            trace!("horizon at depth {}, random column {:?}", depth, column);
            return SearchResult {
                column,
                score: Score::Neutral,
            };
        }

        let engine_to_move = depth % 2 == 0;
        let (mover, decisive) = if engine_to_move {
            (engine_color, Score::Win)
        } else {
            (opponent_color, Score::Loss)
        };

        // the side to move takes an immediate win without looking further
        if let Some(column) = find_winning_column(board, mover) {
            return SearchResult {
                column: Some(column),
                score: decisive,
            };
        }

        let mut best: Option<SearchResult> = None;
        for column in board.playable_columns() {
            let next = board.with_token(column, mover);
            let score = self
                .evaluate(&next, depth + 1, engine_color, opponent_color)
                .score;

            // ties go to the later column
            let replace = match best {
                None => true,
                Some(best) if engine_to_move => score >= best.score,
                Some(best) => score <= best.score,
            };
            if replace {
                best = Some(SearchResult {
                    column: Some(column),
                    score,
                });
            }
            if score == decisive {
                break;
            }
        }

        match best {
            Some(best) => best,
            None => SearchResult {
                column: random_playable_column(board, &mut self.rng),
                score: Score::Neutral,
            },
        }
    }
}
