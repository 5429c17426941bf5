//! A referee that runs complete games on a live board

use anyhow::Result;
use log::warn;
use thiserror::Error;

use crate::{
    agent::Agent,
    board::{Board, Color, MoveError},
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Color),
    Draw,
}

/// Errors raised by the referee
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,
    #[error("illegal move by {color:?}: {reason}")]
    IllegalMove { color: Color, reason: String },
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// The live game: the board, whose turn it is and whether the game is over
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Color,
    state: GameState,
}

impl Game {
    /// Starts a game on an empty default-size board, red to move
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::Red)
    }

    /// Continues a game from an existing position
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let state = if board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        Self {
            board,
            to_move,
            state,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Plays `column` for the side to move
    pub fn play(&mut self, column: usize) -> Result<GameState, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::GameOver);
        }
        if column >= self.board.column_count() {
            return Err(MoveError::InvalidColumn {
                column,
                columns: self.board.column_count(),
            }
            .into());
        }
        if self.board.is_column_full(column) {
            return Err(MoveError::ColumnFull(column).into());
        }

        let winning = self.board.is_winning_drop(column, self.to_move);
        self.board.drop_token(column, self.to_move)?;
        self.finish_turn(winning);
        Ok(self.state)
    }

    /// Lets `agent` move on the live board, then checks that it placed
    /// exactly one token of its own color
    pub fn play_agent<A: Agent + ?Sized>(&mut self, agent: &mut A) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(GameError::GameOver.into());
        }
        let color = self.to_move;
        if agent.color() != color {
            return Err(self.illegal(color, format!("{} moved out of turn", agent.name())));
        }

        let before = self.board.clone();
        if let Err(err) = agent.make_move(&mut self.board) {
            self.board = before;
            return Err(err);
        }

        let column = match self.placed_column(&before, color) {
            Ok(column) => column,
            Err(reason) => {
                self.board = before;
                return Err(self.illegal(color, format!("{} {}", agent.name(), reason)));
            }
        };

        let winning = before.is_winning_drop(column, color);
        self.finish_turn(winning);
        Ok(self.state)
    }

    /// The column of the single token of `color` dropped since `before`
    fn placed_column(&self, before: &Board, color: Color) -> Result<usize, String> {
        let mut placed = None;
        for column in 0..self.board.column_count() {
            for row in 0..self.board.row_count() {
                let (old, new) = (before.get_slot(column, row), self.board.get_slot(column, row));
                if old == new {
                    continue;
                }
                if !old.is_empty() {
                    return Err(format!("changed an existing token at ({}, {})", column, row));
                }
                if new != color.slot() {
                    return Err(format!("placed a token of the wrong color at ({}, {})", column, row));
                }
                if !before.is_playable_at(column, row) {
                    return Err(format!("left a token floating at ({}, {})", column, row));
                }
                if placed.is_some() {
                    return Err("placed more than one token".to_string());
                }
                placed = Some(column);
            }
        }
        placed.ok_or_else(|| "placed no token".to_string())
    }

    fn illegal(&self, color: Color, reason: String) -> anyhow::Error {
        warn!("illegal move by {}: {}", color.name(), reason);
        GameError::IllegalMove { color, reason }.into()
    }

    fn finish_turn(&mut self, winning: bool) {
        self.state = if winning {
            GameState::Won(self.to_move)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = self.to_move.opponent();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
