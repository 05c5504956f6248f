//! Werewolf CLI - Command-line interface for running Werewolf games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Werewolf - A rules engine for the social-deduction party game
#[derive(Parser, Debug)]
#[command(name = "werewolf")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the standard lineups for a table size
    Lineups {
        /// Number of players (4-12)
        players: usize,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Play a game interactively, answering every decision on stdin
    Play {
        /// Player names, comma separated
        #[arg(short, long, required = true, value_delimiter = ',')]
        players: Vec<String>,

        /// Lineup variant for this table size (see `lineups`)
        #[arg(short, long, default_value = "0")]
        variant: usize,

        /// Random seed for role distribution (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum rounds (default: 50)
        #[arg(short = 'r', long, default_value = "50")]
        max_rounds: u32,
    },

    /// Run a game with decisions replayed from a JSON script
    Run {
        /// Player names, comma separated
        #[arg(short, long, required = true, value_delimiter = ',')]
        players: Vec<String>,

        /// Decision script (JSON list of {"decision", "target"})
        #[arg(long, required = true)]
        script: std::path::PathBuf,

        /// Lineup variant for this table size (see `lineups`)
        #[arg(short, long, default_value = "0")]
        variant: usize,

        /// Random seed for role distribution (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum rounds (default: 50)
        #[arg(short = 'r', long, default_value = "50")]
        max_rounds: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "werewolf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Lineups { players, format } => cli::lineups::execute(players, format),

        Commands::Play {
            players,
            variant,
            seed,
            max_rounds,
        } => cli::play::execute(players, variant, seed, max_rounds),

        Commands::Run {
            players,
            script,
            variant,
            seed,
            max_rounds,
            format,
        } => cli::run::execute(players, script, variant, seed, max_rounds, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
