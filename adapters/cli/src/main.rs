#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that validates puzzles and replays move lists.

mod config;
mod source;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maze_puzzle_core::{Event, Rules};
use maze_puzzle_system_analytics::stats;
use maze_puzzle_system_attempt::simulate_with_events;
use maze_puzzle_world::{catalog, Grid, GridDescription};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

const LOG_ENV_VAR: &str = "MAZE_PUZZLE_LOG";

/// Validate maze puzzles and replay move lists against them.
#[derive(Debug, Parser)]
#[command(name = "maze-puzzle", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print JSON on a single line.
    #[arg(long, global = true)]
    compact: bool,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Check a puzzle's structural invariants.
    Validate {
        /// Puzzle file path or `builtin:<slug>`.
        puzzle: String,
    },
    /// Replay a move list and print the attempt result.
    Simulate {
        /// Puzzle file path or `builtin:<slug>`.
        puzzle: String,
        /// Moves separated by commas or whitespace.
        #[arg(long, conflicts_with = "moves_file", required_unless_present = "moves_file")]
        moves: Option<String>,
        /// File holding the moves.
        #[arg(long)]
        moves_file: Option<PathBuf>,
    },
    /// Print cell-kind statistics for a puzzle.
    Stats {
        /// Puzzle file path or `builtin:<slug>`.
        puzzle: String,
    },
    /// List the built-in puzzles, or print one of them.
    Catalog {
        /// Slug of the puzzle to print.
        slug: Option<String>,
    },
}

/// Entry point for the maze puzzle command-line interface.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(&config)?;
    let pretty = config.pretty && !cli.compact;

    match cli.command {
        CliCommand::Validate { puzzle } => {
            let description = source::load_description(&puzzle)?;
            match Grid::from_description(&description) {
                Ok(_) => {
                    info!(%puzzle, "puzzle is structurally valid");
                    println!("valid");
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => {
                    warn!(%puzzle, %error, "puzzle failed validation");
                    println!("invalid: {error}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        CliCommand::Simulate {
            puzzle,
            moves,
            moves_file,
        } => {
            let grid = load_grid(&puzzle, &config)?;
            let moves = match (moves, moves_file) {
                (Some(raw), _) => source::split_moves(&raw),
                (None, Some(path)) => source::load_moves(&path)?,
                (None, None) => Vec::new(),
            };

            let mut events = Vec::new();
            let result = simulate_with_events(&grid, &moves, &mut events);
            log_events(&events);
            print_json(&result, pretty)?;
            Ok(if result.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        CliCommand::Stats { puzzle } => {
            let grid = load_grid(&puzzle, &config)?;
            print_json(&stats(&grid), pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Catalog { slug: None } => {
            for puzzle in catalog::puzzles() {
                let difficulty = serde_json::to_value(puzzle.difficulty)?;
                let difficulty = difficulty.as_str().unwrap_or_default();
                println!("{}\t{}\t{}", puzzle.slug, difficulty, puzzle.title);
            }
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Catalog { slug: Some(slug) } => {
            let puzzle = catalog::find(&slug)
                .with_context(|| format!("no built-in puzzle named `{slug}`"))?;
            print_json(&puzzle, pretty)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(config: &CliConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("invalid log filter `{}`", config.log_filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_grid(puzzle: &str, config: &CliConfig) -> Result<Grid> {
    let description: GridDescription = source::load_description(puzzle)?;
    let grid = Grid::from_description(&description).map_err(|error| {
        warn!(%puzzle, %error, "puzzle failed validation");
        error
    })?;
    Ok(apply_overrides(grid, config))
}

fn apply_overrides(grid: Grid, config: &CliConfig) -> Grid {
    match config.max_steps {
        Some(max_steps) => {
            debug!(max_steps, "overriding puzzle step limit");
            grid.with_rules(Rules {
                max_steps,
                ..*grid.rules()
            })
        }
        None => grid,
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::AttemptStarted { start, moves } => {
                debug!(%start, moves, "attempt started");
            }
            Event::Teleported { from, to, jumps } => {
                debug!(%from, %to, jumps, "teleported");
            }
            Event::KeyCollected { key, position } => {
                debug!(%key, %position, "key collected");
            }
            Event::DoorPassed { position } => {
                debug!(%position, "door passed");
            }
            Event::AttemptFinished {
                success,
                steps,
                final_position,
            } => {
                info!(success, steps, %final_position, "attempt finished");
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialise output")?;
    println!("{json}");
    Ok(())
}
