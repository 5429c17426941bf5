use anyhow::{anyhow, Result};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use std::io::{stdin, stdout, Stdin, Write};

use connect4_agent::{
    arena::Arena,
    display::display,
    game::{Game, GameState},
    Agent, Color, Score, SearchAgent, ShallowAgent,
};

const DEFAULT_ARENA_GAMES: usize = 100;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("arena") => run_arena(&args[1..]),
        Some(other) => Err(anyhow!("unknown command '{}', expected 'arena' or nothing", other)),
        None => play(),
    }
}

/// Pits the search agent against the one-ply agent and prints the tally
fn run_arena(args: &[String]) -> Result<()> {
    let games = match args.first() {
        Some(games) => games.parse::<usize>()?,
        None => DEFAULT_ARENA_GAMES,
    };
    let seed = match args.get(1) {
        Some(seed) => seed.parse::<u64>()?,
        None => rand::random(),
    };
    info!("arena with {} games, seed {}", games, seed);

    let search = |color: Color, rng: StdRng| -> Box<dyn Agent + Send> { Box::new(SearchAgent::new(color, rng)) };
    let shallow = |color: Color, rng: StdRng| -> Box<dyn Agent + Send> { Box::new(ShallowAgent::new(color, rng)) };

    println!("Search agent vs. shallow agent, seed {}", seed);
    let report = Arena::new(games, seed).with_progress(true).run(&search, &shallow)?;
    println!("{}", report);
    Ok(())
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn play() -> Result<()> {
    let stdin = stdin();
    let mut game = Game::new();

    println!("Welcome to Connect 4\n");

    // red moves first
    let mut red: Option<SearchAgent<StdRng>> = None;
    let mut yellow: Option<SearchAgent<StdRng>> = None;
    if ask_yes_no(&stdin, "Is player 1 (Red) AI controlled?")? {
        red = Some(SearchAgent::new(Color::Red, StdRng::from_os_rng()));
    }
    if ask_yes_no(&stdin, "Is player 2 (Yellow) AI controlled?")? {
        yellow = Some(SearchAgent::new(Color::Yellow, StdRng::from_os_rng()));
    }
    let both_ai = red.is_some() && yellow.is_some();

    // game loop
    loop {
        display(game.board()).expect("Failed to draw board!");

        match game.state() {
            GameState::Playing => {
                let color = game.to_move();
                let agent = match color {
                    Color::Red => red.as_mut(),
                    Color::Yellow => yellow.as_mut(),
                };

                match agent {
                    // AI player
                    Some(agent) => {
                        println!("AI is thinking...");
                        stdout().flush().expect("Failed to flush to stdout!");

                        // slow down play if both players are AI
                        if both_ai {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        game.play_agent(agent)?;
                        if let Some(score) = agent.last_score() {
                            match score {
                                Score::Win => println!("{} has a winning line.", color.name()),
                                Score::Loss => println!("{} expects to lose.", color.name()),
                                Score::Neutral => {}
                            }
                        }
                    }

                    // human player
                    None => {
                        print!("{} move input > ", color.name());
                        stdout().flush().expect("Failed to flush to stdout!");
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        let column = match input_str.trim().parse::<usize>() {
                            Ok(column) if column >= 1 => column - 1,
                            _ => {
                                println!("Invalid number: {}", input_str.trim());
                                continue;
                            }
                        };

                        if let Err(err) = game.play(column) {
                            println!("{}", err);
                            // try the move again
                            continue;
                        }
                    }
                }
            }

            // end states
            GameState::Won(color) => {
                println!("{} wins!", color.name());
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
