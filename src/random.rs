//! The source of randomness used for fallback moves
//!
//! Randomness is passed in rather than drawn from process-wide state, so a
//! seeded or scripted source makes every move choice reproducible.

use rand::{
    rngs::{StdRng, ThreadRng},
    Rng,
};

use crate::board::Board;

/// A capability to pick integers uniformly at random
pub trait RandomSource {
    /// Returns an integer in `[0, upper)`; `upper` is never 0
    fn uniform(&mut self, upper: usize) -> usize;
}

impl RandomSource for StdRng {
    fn uniform(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

impl RandomSource for ThreadRng {
    fn uniform(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, upper: usize) -> usize {
        (**self).uniform(upper)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self, upper: usize) -> usize {
        (**self).uniform(upper)
    }
}

/// Draws columns uniformly until a non-full one comes up
///
/// Returns `None` on a full board rather than drawing forever.
pub fn random_playable_column<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    if board.playable_columns().next().is_none() {
        return None;
    }
    loop {
        let column = rng.uniform(board.column_count());
        if !board.is_column_full(column) {
            return Some(column);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::board::Color;
    use anyhow::Result;
    use rand::SeedableRng;

    /// Replays a fixed list of draws, cycling when it runs out
    pub(crate) struct Scripted {
        draws: Vec<usize>,
        next: usize,
    }

    impl Scripted {
        pub(crate) fn new(draws: &[usize]) -> Self {
            Self {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn uniform(&mut self, upper: usize) -> usize {
            let draw = self.draws[self.next % self.draws.len()];
            self.next += 1;
            draw % upper
        }
    }

    #[test]
    fn full_columns_are_skipped() -> Result<()> {
        let mut board = Board::new();
        for _ in 0..board.row_count() {
            board.drop_token(0, Color::Red)?;
            board.drop_token(1, Color::Yellow)?;
        }
        let mut rng = Scripted::new(&[0, 1, 0, 5]);

        assert_eq!(random_playable_column(&board, &mut rng), Some(5));
        Ok(())
    }

    #[test]
    fn full_board_has_no_random_column() -> Result<()> {
        let mut board = Board::with_size(2, 1);
        board.drop_token(0, Color::Red)?;
        board.drop_token(1, Color::Yellow)?;

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_playable_column(&board, &mut rng), None);
        Ok(())
    }

    #[test]
    fn seeded_draws_stay_in_range() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let column = random_playable_column(&board, &mut rng).unwrap();
            assert!(column < board.column_count());
        }
    }
}
