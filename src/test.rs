#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        agent::{Agent, RandomAgent, SearchAgent},
        game::{Game, GameState},
        find_winning_column, Board, Color, Score, Searcher, MAX_DEPTH,
    };

    /// Positions reached by random play, stopping before the game is decided
    fn random_positions(seed: u64) -> Result<Vec<Board>> {
        let mut red = RandomAgent::new(Color::Red, StdRng::seed_from_u64(seed));
        let mut yellow = RandomAgent::new(Color::Yellow, StdRng::seed_from_u64(seed + 1));
        let mut game = Game::new();
        let mut positions = vec![game.board().clone()];

        loop {
            let state = if game.to_move() == Color::Red {
                game.play_agent(&mut red)?
            } else {
                game.play_agent(&mut yellow)?
            };
            if state != GameState::Playing {
                return Ok(positions);
            }
            positions.push(game.board().clone());
        }
    }

    #[test]
    pub fn empty_board() {
        let board = Board::new();
        assert_eq!(find_winning_column(&board, Color::Red), None);
        assert_eq!(find_winning_column(&board, Color::Yellow), None);

        let result = Searcher::new(StdRng::seed_from_u64(0)).evaluate(&board, 0, Color::Red, Color::Yellow);
        assert!(result.column.unwrap() < board.column_count());
        assert!(-1 <= result.score.as_i32() && result.score.as_i32() <= 1);
    }

    #[test]
    pub fn stacked_three() -> Result<()> {
        let mut board = Board::new();
        for _ in 0..3 {
            board.drop_token(3, Color::Red)?;
        }
        assert_eq!(find_winning_column(&board, Color::Red), Some(3));

        let result = Searcher::new(StdRng::seed_from_u64(0)).evaluate(&board, 0, Color::Red, Color::Yellow);
        assert_eq!(result.column, Some(3));
        assert_eq!(result.score, Score::Win);
        Ok(())
    }

    #[test]
    pub fn blocks_the_bottom_row() -> Result<()> {
        let mut board = Board::new();
        for column in 0..3 {
            board.drop_token(column, Color::Yellow)?;
        }

        for seed in 0..3 {
            let mut live = board.clone();
            let mut agent = SearchAgent::new(Color::Red, StdRng::seed_from_u64(seed));
            assert_eq!(agent.make_move(&mut live)?, 3);
            assert_eq!(agent.last_score(), Some(Score::Neutral));
            assert_eq!(live, board.with_token(3, Color::Red));
        }
        Ok(())
    }

    #[test]
    pub fn does_not_open_a_winning_slot() -> Result<()> {
        // yellow waits on row 1 for column 3, which is still empty
        let mut board = Board::new();
        board.drop_token(0, Color::Red)?;
        board.drop_token(1, Color::Red)?;
        board.drop_token(2, Color::Yellow)?;
        for column in 0..3 {
            board.drop_token(column, Color::Yellow)?;
        }
        assert_eq!(find_winning_column(&board, Color::Yellow), None);
        assert_eq!(find_winning_column(&board.with_token(3, Color::Red), Color::Yellow), Some(3));

        for seed in 0..3 {
            let mut searcher = Searcher::new(StdRng::seed_from_u64(seed));
            let result = searcher.search(&board, Color::Red);
            assert_ne!(result.column, Some(3));
            assert_ne!(result.score, Score::Loss);
        }
        Ok(())
    }

    #[test]
    pub fn threats_match_winning_drops() -> Result<()> {
        for seed in 0..20 {
            for board in random_positions(seed * 2)? {
                for &color in [Color::Red, Color::Yellow].iter() {
                    let winning = board
                        .playable_columns()
                        .any(|column| board.is_winning_drop(column, color));
                    match find_winning_column(&board, color) {
                        Some(column) => {
                            assert!(winning);
                            assert!(board.is_winning_drop(column, color));
                        }
                        None => assert!(!winning),
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn search_terminates_on_a_playable_column() -> Result<()> {
        let columns = Board::new().column_count();
        let bound = (0..=MAX_DEPTH).map(|depth| columns.pow(depth as u32)).sum::<usize>();

        for seed in 0..3 {
            for (i, board) in random_positions(100 + seed * 2)?.into_iter().enumerate() {
                // every fourth position keeps the test quick
                if i % 4 != 0 {
                    continue;
                }
                let color = if board.num_moves() % 2 == 0 { Color::Red } else { Color::Yellow };
                let before = board.clone();
                let mut searcher = Searcher::new(StdRng::seed_from_u64(seed));

                let result = searcher.search(&board, color);
                assert!(!board.is_column_full(result.column.unwrap()));
                assert!(searcher.node_count <= bound);
                assert_eq!(board, before);
            }
        }
        Ok(())
    }

    #[test]
    pub fn winning_move_beats_blocking() -> Result<()> {
        // both sides have three stacked, red to move
        let mut board = Board::from_moves("414141")?;
        let mut agent = SearchAgent::new(Color::Red, StdRng::seed_from_u64(1));

        assert_eq!(agent.make_move(&mut board)?, 3);
        assert_eq!(agent.last_score(), Some(Score::Win));
        assert_eq!(agent.node_count(), 1);
        Ok(())
    }
}
