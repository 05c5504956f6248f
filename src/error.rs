//! Error types for game setup and scripted decisions.

use std::io;

use crate::game::Role;

/// Configuration errors. All of them abort game creation.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The roster is empty.
    #[error("a game needs at least one player")]
    EmptyRoster,

    /// A player name is blank.
    #[error("player {index} has an empty name")]
    EmptyName {
        /// Position of the offending player in the roster.
        index: usize,
    },

    /// Two players share a name.
    #[error("duplicate player name: {0}")]
    DuplicateName(String),

    /// The lineup does not deal exactly one role per player.
    #[error("lineup deals {roles} roles for {players} players")]
    LineupMismatch {
        /// Total role count in the lineup.
        roles: usize,
        /// Number of players in the roster.
        players: usize,
    },

    /// No standard lineup exists for this player count.
    #[error("no standard lineup for {0} players (supported: 4-12)")]
    UnsupportedPlayerCount(usize),

    /// The requested lineup variant does not exist.
    #[error("lineup variant {variant} out of range ({available} available for {players} players)")]
    UnknownVariant {
        /// Requested variant (0-indexed).
        variant: usize,
        /// Number of variants for this player count.
        available: usize,
        /// Player count.
        players: usize,
    },

    /// A role appears with a count of zero.
    #[error("lineup lists {0} with a count of zero")]
    ZeroCount(Role),
}

/// Errors loading a decision script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script: {0}")]
    Io(#[from] io::Error),

    /// The script is not valid JSON for a decision list.
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
}
