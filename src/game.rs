//! Game layer for Werewolf.
//!
//! Implements the rules engine:
//! - Roles, factions and the players who hold them
//! - Lineups and role distribution
//! - Role abilities and the night/day orchestrators
//! - Win-condition evaluation
//!
//! The engine performs no I/O. Every choice a player makes is requested from
//! a [`DecisionProvider`].

pub mod abilities;
mod day;
mod decision;
pub mod invariants;
mod lineup;
mod log;
mod night;
mod player;
mod role;
mod state;
mod victory;

pub use day::{
    DEFAULT_MAX_RUNOFFS, DayReport, Tally, VoteOutcome, elect_mayor, mayor_succession, run_day,
    run_vote, village_vote,
};
pub use decision::{
    CandidateFilter, DecisionKind, DecisionProvider, DecisionRequest, ScriptedDecision,
    ScriptedDecisions,
};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use lineup::{
    Balance, Lineup, LineupProvider, MAX_PLAYERS, MIN_PLAYERS, StandardLineups, standard_variants,
};
pub use log::{Action, ActionType, Actor, GameLog, Phase};
pub use night::{NIGHT_ORDER, NightReport, run_night, werewolf_attack};
pub use player::{
    CupidState, HunterState, Player, PlayerId, Revenge, SeerState, SpecialState, ThiefState,
    WitchState,
};
pub use role::{Faction, Role, UnknownRole};
pub use state::{Game, GameSnapshot, GameStatus, PlayerSnapshot};
pub use victory::{Outcome, conclude, evaluate, faction_of};
