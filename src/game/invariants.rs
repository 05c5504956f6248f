//! Game invariants - structural checks that detect engine bugs.
//!
//! None of these can be broken through the public rule operations. A
//! violation means an orchestrator or resolver mutated state incorrectly.

use crate::game::{Game, HunterState, Player, Role};

/// Invariant violation error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(game: &Game) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut fail = |message: String| violations.push(InvariantViolation { message });

    if game.lineup().total() != game.players().len() {
        fail(format!(
            "lineup deals {} roles for {} players",
            game.lineup().total(),
            game.players().len()
        ));
    }

    for (id, player) in game.players().iter().enumerate() {
        if !player.special().matches(player.role()) {
            fail(format!(
                "{} holds {} but carries {:?}",
                player.name,
                player.role(),
                player.special()
            ));
        }

        // Lover bond must be symmetric and never point at oneself
        if let Some(lover) = player.lover() {
            let back = game.player(lover).and_then(Player::lover);
            if lover == id || back != Some(id) {
                fail(format!("{} has an asymmetric lover bond", player.name));
            }
        }

        if let Some(target) = player.hunter().and_then(HunterState::revenge_target) {
            if game.is_alive(target) {
                fail(format!(
                    "hunter {} shot {} who is still alive",
                    player.name,
                    game.name(target)
                ));
            }
        }
    }

    let mayors = game.players().iter().filter(|p| p.mayor).count();
    if mayors > 1 {
        fail(format!("{mayors} players hold the mayor's sash"));
    }

    let lover_count = game.players().iter().filter(|p| p.lover().is_some()).count();
    if lover_count != 0 && lover_count != 2 {
        fail(format!("{lover_count} players are bound as lovers"));
    }

    for id in game.recently_killed() {
        if game.is_alive(*id) {
            fail(format!("{} is marked killed tonight but alive", game.name(*id)));
        }
    }

    // A thief who stole leaves a spent thief card behind; at most one
    // unspent one can exist.
    let unspent_thieves = game
        .players()
        .iter()
        .filter(|p| p.role() == Role::Thief)
        .filter(|p| p.thief().is_some_and(|t| !t.role_stolen))
        .count();
    if unspent_thieves > 1 {
        fail(format!("{unspent_thieves} unspent thief cards in play"));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(game: &Game) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_game: &Game) {}
