//! Win-condition evaluator.

use std::fmt;

use serde::Serialize;

use crate::game::{Faction, Game, GameStatus, Phase, PlayerId};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A single faction is all that remains.
    Winner(Faction),
    /// Nobody is left alive.
    NoSurvivors,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(faction) => write!(f, "{faction} win"),
            Outcome::NoSurvivors => f.write_str("everyone is dead, nobody wins"),
        }
    }
}

/// Faction a living player counts for right now.
///
/// A player belongs to the lovers iff their lover is alive and exactly one of
/// the pair is a werewolf. Same-side couples keep their base faction.
#[must_use]
pub fn faction_of(game: &Game, id: PlayerId) -> Option<Faction> {
    let player = game.player(id)?;
    let base = player.role().faction();
    let Some(lover) = player.lover().and_then(|l| game.player(l)) else {
        return Some(base);
    };
    if lover.alive && player.role().is_werewolf() != lover.role().is_werewolf() {
        Some(Faction::Lovers)
    } else {
        Some(base)
    }
}

/// Decide whether the game is over.
#[must_use]
pub fn evaluate(game: &Game) -> Option<Outcome> {
    let mut factions = game.alive_ids().filter_map(|id| faction_of(game, id));
    let Some(first) = factions.next() else {
        return Some(Outcome::NoSurvivors);
    };
    factions
        .all(|faction| faction == first)
        .then_some(Outcome::Winner(first))
}

/// Evaluate and, if the game is over, mark it finished.
pub fn conclude(game: &mut Game) -> Option<Outcome> {
    let outcome = evaluate(game)?;
    game.status = GameStatus::Finished;
    game.phase = Phase::Completed;
    tracing::info!(%outcome, round = game.round, "game over");
    Some(outcome)
}
