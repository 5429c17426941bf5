//! A depth-bounded move-selection agent for the board game 'Connect 4'
//!
//! The agent looks for four-in-a-row threats and explores the game tree a
//! fixed number of plies ahead, alternating between its own best outcome
//! and the opponent's. Past the search horizon it falls back to a random
//! legal move drawn from an injected random source.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_agent::{agent::{Agent, SearchAgent}, board::{Board, Color}};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // red has three stacked in the fourth column
//! let mut board = Board::from_moves("414141")?;
//! let mut agent = SearchAgent::new(Color::Red, StdRng::seed_from_u64(7));
//!
//! let column = agent.make_move(&mut board)?;
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod threat;

pub mod random;

pub mod search;

pub mod agent;

pub mod game;

pub mod arena;

pub mod display;

mod test;

pub use agent::{Agent, RandomAgent, SearchAgent, ShallowAgent};
pub use board::{Board, Color, MoveError, Slot};
pub use search::{Score, SearchResult, Searcher};
pub use threat::find_winning_column;

/// The width of the default game board in tiles
pub const WIDTH: usize = 7;

/// The height of the default game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const WIN_LENGTH: usize = 4;

/// The number of plies the search explores before falling back to a random move
pub const MAX_DEPTH: usize = 5;

// a four-in-a-row must fit on the default board in at least one direction
const_assert!(WIDTH >= WIN_LENGTH || HEIGHT >= WIN_LENGTH);
const_assert!(MAX_DEPTH > 0);
