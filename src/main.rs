//! Pursuit CLI - run the enemy side of a match over the bot protocol, or
//! simulate enemy movement offline.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use pursuit::Enemy;
use std::path::PathBuf;
use std::process::ExitCode;

/// Pursuit - enemy movement and turn protocol core for grid pursuit games
#[derive(Parser, Debug)]
#[command(name = "pursuit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter used when `RUST_LOG` is not set (logs go to stderr)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Referee the enemies over stdin/stdout (or a recorded input file)
    Run {
        /// Board file ('.' open, 'x' or '#' wall)
        #[arg(short, long)]
        board: PathBuf,

        /// Enemy as x,y or x,y,heading (repeatable)
        #[arg(short, long = "enemy", required = true, value_parser = cli::parse_enemy)]
        enemies: Vec<Enemy>,

        /// Read messages from a recorded file instead of stdin
        #[arg(long)]
        replay: Option<PathBuf>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many ticks
        #[arg(long)]
        max_ticks: Option<u32>,
    },

    /// Advance the enemies offline and print every tick
    Simulate {
        /// Board file ('.' open, 'x' or '#' wall)
        #[arg(short, long)]
        board: PathBuf,

        /// Enemy as x,y or x,y,heading (repeatable)
        #[arg(short, long = "enemy", required = true, value_parser = cli::parse_enemy)]
        enemies: Vec<Enemy>,

        /// Number of ticks (default: 20)
        #[arg(short, long, default_value = "20")]
        ticks: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// JSON configuration file (only the policy is used)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Parse a board file and report its size
    CheckBoard {
        /// Board file to check
        #[arg(required = true)]
        board: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_tracing(&args.log_level);

    let result = match args.command {
        Commands::Run {
            board,
            enemies,
            replay,
            config,
            max_ticks,
        } => cli::run::execute(
            &board,
            enemies,
            replay.as_deref(),
            config.as_deref(),
            max_ticks,
        ),

        Commands::Simulate {
            board,
            enemies,
            ticks,
            format,
            config,
        } => cli::simulate::execute(&board, enemies, ticks, format, config.as_deref()),

        Commands::CheckBoard { board } => cli::check::execute(&board),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
