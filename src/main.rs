//! Escape Room
//!
//! Plays the escape room in the terminal: a timeline to order, a word search
//! and a map, each revealing a code that unlocks the next room. Helper
//! subcommands generate single puzzles for inspection.

mod terminal;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use escape_room::code::UnlockCode;
use escape_room::error::EngineError;
use escape_room::rooms::{SEARCH_WORDS, TIMELINE_EVENTS};
use escape_room::sequence::{derive_code, shuffle};
use escape_room::wordsearch::{WordSearch, WordSearchConfig};
use escape_room::{Session, SessionConfig};

/// Escape room puzzles in the terminal.
#[derive(Parser)]
#[command(name = "escape-room")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for reproducible puzzles. Random when omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play the full game interactively (default).
    Play,
    /// Generate a word-search grid and print it.
    Wordsearch {
        /// Comma-separated words to hide.
        #[arg(long, value_delimiter = ',')]
        words: Option<Vec<String>>,
        /// Minimum grid size.
        #[arg(long, default_value_t = 10)]
        size: usize,
    },
    /// Shuffle the built-in timeline and print the code it yields.
    Timeline,
    /// Print a fresh unlock code.
    Code,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("escape_room=warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = match cli.command {
        Some(Command::Play) | None => run_play(rng),
        Some(Command::Wordsearch { words, size }) => run_wordsearch(words, size, &mut rng),
        Some(Command::Timeline) => {
            run_timeline(&mut rng);
            Ok(())
        }
        Some(Command::Code) => {
            println!("{}", UnlockCode::generate(&mut rng));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Runs the interactive game over stdin.
fn run_play(rng: StdRng) -> Result<(), EngineError> {
    let session = Session::new(&SessionConfig::default(), rng, terminal::TerminalDisplay)?;
    terminal::play(session, std::io::stdin().lock());
    Ok(())
}

/// Generates one grid and prints it with its word list.
fn run_wordsearch(
    words: Option<Vec<String>>,
    size: usize,
    rng: &mut StdRng,
) -> Result<(), EngineError> {
    let words =
        words.unwrap_or_else(|| SEARCH_WORDS.iter().map(|word| word.to_string()).collect());
    let config = WordSearchConfig {
        min_size: size,
        ..WordSearchConfig::default()
    };
    let puzzle = WordSearch::new(&words, config, rng)?;

    print!("{}", puzzle.grid());
    println!();
    println!("Words: {}", puzzle.words().join(", "));
    Ok(())
}

/// Prints a shuffled timeline and the code its correct order unlocks.
fn run_timeline(rng: &mut StdRng) {
    let starting = shuffle(&TIMELINE_EVENTS, rng);
    for (i, event) in starting.iter().enumerate() {
        println!("{i}. {event}");
    }
    if let Some(code) = derive_code(&TIMELINE_EVENTS[..], &starting[..]) {
        println!();
        println!("Code: {code}");
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_wordsearch_arguments_parse() {
        let cli = Cli::try_parse_from([
            "escape-room",
            "--seed",
            "4",
            "wordsearch",
            "--words",
            "cat,dog",
            "--size",
            "6",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(4));
        match cli.command {
            Some(Command::Wordsearch { words, size }) => {
                assert_eq!(words, Some(vec!["cat".to_string(), "dog".to_string()]));
                assert_eq!(size, 6);
            }
            _ => panic!("expected wordsearch subcommand"),
        }
    }

    #[test]
    fn test_timeline_code_matches_shuffle() {
        let mut rng = StdRng::seed_from_u64(12);
        let starting = shuffle(&TIMELINE_EVENTS, &mut rng);
        let code = derive_code(&TIMELINE_EVENTS[..], &starting[..]).unwrap();
        assert_eq!(code.len(), TIMELINE_EVENTS.len());
    }
}
