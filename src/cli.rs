//! CLI command implementations for Werewolf.

pub(crate) mod lineups;
pub(crate) mod play;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use std::io;
use std::path::PathBuf;
use werewolf::{ScriptError, SetupError};

/// Output format for the `lineups` and `run` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    /// The game could not be set up.
    #[error(transparent)]
    Setup(#[from] SetupError),
    /// A decision script failed to load.
    #[error("{}: {source}", path.display())]
    Script {
        /// Script location.
        path: PathBuf,
        /// Underlying load error.
        #[source]
        source: ScriptError,
    },
    /// Terminal or file I/O failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Result serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Use the given seed or derive one from the clock.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}
