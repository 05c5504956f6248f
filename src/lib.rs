// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Werewolf: a rules engine for the social-deduction party game.
//!
//! This crate provides a deterministic, I/O-free engine designed for:
//! - Role abilities resolved in a fixed night order
//! - Day votes with capped runoffs
//! - Win detection for the village, the pack, and mixed lovers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │          Session Driver             │
//! ├─────────────────────────────────────┤
//! │   Night / Day Orchestrators         │
//! ├─────────────────────────────────────┤
//! │   Role Resolvers + Win Evaluator    │
//! ├─────────────────────────────────────┤
//! │   Game State (players, log)         │
//! └─────────────────────────────────────┘
//! ```
//!
//! Choices are supplied by a [`DecisionProvider`]: a closure, a
//! [`ScriptedDecisions`] replay, or an interactive prompt in the binary.

pub mod error;
pub mod game;
pub mod session;

pub use error::{ScriptError, SetupError};

// Re-export key game types at crate root for convenience
pub use game::{
    DecisionKind, DecisionProvider, DecisionRequest, Faction, Game, Lineup, Outcome, Player,
    PlayerId, Role, ScriptedDecisions,
};
pub use session::{GameConfig, GameResult, run_game};
