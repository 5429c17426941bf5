//! Batches of games between two kinds of agent, played in parallel

use anyhow::Result;
use indicatif::*;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;

use std::fmt;
use std::sync::mpsc::channel;
use std::thread;
use std::time::Instant;

use crate::{
    agent::Agent,
    board::Color,
    game::{Game, GameState},
};

/// Builds an agent for one game from its color and its own random source
pub type AgentFactory = dyn Fn(Color, StdRng) -> Box<dyn Agent + Send> + Sync;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Outcome {
    FirstWin,
    SecondWin,
    Draw,
}

/// Tally of an arena run, from the point of view of the first agent
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct ArenaReport {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
}

impl ArenaReport {
    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::FirstWin => self.first_wins += 1,
            Outcome::SecondWin => self.second_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

impl fmt::Display for ArenaReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} games: {} won by the first agent, {} won by the second, {} drawn",
            self.games(),
            self.first_wins,
            self.second_wins,
            self.draws
        )
    }
}

/// Plays a number of independent games between two agents
///
/// # Notes
/// The first agent plays red in even-numbered games and yellow in odd ones.
/// Every agent is built fresh for its game with a random source seeded from
/// the arena seed and the game number, so a run is reproducible no matter how
/// the games are spread over threads.
pub struct Arena {
    games: usize,
    seed: u64,
    show_progress: bool,
}

impl Arena {
    pub fn new(games: usize, seed: u64) -> Self {
        Self {
            games,
            seed,
            show_progress: false,
        }
    }

    /// Draws a progress bar on the terminal while games are running
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn run(&self, first: &AgentFactory, second: &AgentFactory) -> Result<ArenaReport> {
        let start = Instant::now();

        let progress = if self.show_progress {
            let progress = ProgressBar::new(self.games as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("Playing games: {bar:40.cyan/blue} {msg} ~{eta} remaining")
                    .progress_chars("█▓▒░  "),
            );
            progress
        } else {
            ProgressBar::hidden()
        };

        let (tx, rx) = channel();
        let mut report = ArenaReport::default();

        thread::scope(|scope| -> Result<()> {
            scope.spawn(move || {
                // no new games are started once the receiver hangs up
                let _ = (0..self.games)
                    .into_par_iter()
                    .try_for_each_with(tx, |tx, index| tx.send(self.play_one(index, first, second)));
            });

            while let Ok(outcome) = rx.recv() {
                let outcome = match outcome {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        drop(rx);
                        return Err(err);
                    }
                };
                report.record(outcome);
                progress.inc(1);
                progress.set_message(&format!(
                    "({} / {})",
                    progress.position(),
                    progress.length()
                ));
            }
            Ok(())
        })?;

        progress.finish();
        info!("{} in {}", report, HumanDuration(Instant::now() - start));
        Ok(report)
    }

    fn play_one(&self, index: usize, first: &AgentFactory, second: &AgentFactory) -> Result<Outcome> {
        let first_color = if index % 2 == 0 { Color::Red } else { Color::Yellow };
        let seed = self.seed.wrapping_add(2 * index as u64);

        let mut first_agent = first(first_color, StdRng::seed_from_u64(seed));
        let mut second_agent = second(first_color.opponent(), StdRng::seed_from_u64(seed.wrapping_add(1)));

        let mut game = Game::new();
        loop {
            let state = if game.to_move() == first_color {
                game.play_agent(first_agent.as_mut())?
            } else {
                game.play_agent(second_agent.as_mut())?
            };

            match state {
                GameState::Playing => continue,
                GameState::Won(color) if color == first_color => return Ok(Outcome::FirstWin),
                GameState::Won(_) => return Ok(Outcome::SecondWin),
                GameState::Draw => return Ok(Outcome::Draw),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{RandomAgent, SearchAgent, ShallowAgent};
    use crate::board::Board;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn random(color: Color, rng: StdRng) -> Box<dyn Agent + Send> {
        Box::new(RandomAgent::new(color, rng))
    }

    fn shallow(color: Color, rng: StdRng) -> Box<dyn Agent + Send> {
        Box::new(ShallowAgent::new(color, rng))
    }

    #[test]
    fn every_game_is_counted() -> Result<()> {
        let report = Arena::new(24, 1).run(&random, &random)?;
        assert_eq!(report.games(), 24);
        Ok(())
    }

    #[test]
    fn runs_are_reproducible() -> Result<()> {
        let arena = Arena::new(16, 99);
        assert_eq!(arena.run(&shallow, &random)?, arena.run(&shallow, &random)?);
        Ok(())
    }

    #[test]
    fn search_agent_beats_random_play() -> Result<()> {
        let search = |color: Color, rng: StdRng| -> Box<dyn Agent + Send> {
            Box::new(SearchAgent::new(color, rng).with_max_depth(3))
        };
        let report = Arena::new(12, 7).run(&search, &random)?;

        assert_eq!(report.games(), 12);
        assert!(report.first_wins > report.second_wins);
        Ok(())
    }

    /// Refuses to move
    struct Broken(Color);

    impl Agent for Broken {
        fn color(&self) -> Color {
            self.0
        }

        fn name(&self) -> &str {
            "Broken"
        }

        fn choose_move(&mut self, _board: &Board) -> Result<usize> {
            Err(anyhow!("no move"))
        }
    }

    #[test]
    fn failing_agent_stops_the_run() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        let broken = |color: Color, _rng: StdRng| -> Box<dyn Agent + Send> {
            BUILT.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(1));
            Box::new(Broken(color))
        };

        let games = 1000;
        let err = Arena::new(games, 5).run(&broken, &broken).unwrap_err();
        assert_eq!(err.to_string(), "no move");
        // each game builds two agents
        assert!(BUILT.load(Ordering::SeqCst) < 2 * games);
    }

    #[test]
    fn report_display() {
        let report = ArenaReport {
            first_wins: 3,
            second_wins: 1,
            draws: 0,
        };
        assert_eq!(
            report.to_string(),
            "4 games: 3 won by the first agent, 1 won by the second, 0 drawn"
        );
    }
}
