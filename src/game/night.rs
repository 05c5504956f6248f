//! Night orchestrator.
//!
//! Roles wake in a fixed priority order, independent of seating. The set of
//! roles present is computed once at nightfall from the living players, and
//! absent roles are skipped. The pack always strikes before the witch wakes
//! so she can see tonight's victims.

use crate::game::abilities::resolver_for;
use crate::game::{
    ActionType, Actor, CandidateFilter, DecisionKind, DecisionProvider, Game, Phase, PlayerId,
    Role,
};

/// Wake-up order. The hunter is reactive and handled by the day.
pub const NIGHT_ORDER: [Role; 5] = [
    Role::Cupid,
    Role::Thief,
    Role::Seer,
    Role::Werewolf,
    Role::Witch,
];

/// What happened during one night.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightReport {
    /// Round the night belonged to.
    pub round: u32,
    /// Roles that woke up, in order.
    pub woke: Vec<Role>,
    /// Players whose death stands at dawn, net of any rescue.
    pub deaths: Vec<PlayerId>,
    /// Players the witch brought back.
    pub saved: Vec<PlayerId>,
}

const fn phase_for(role: Role) -> Phase {
    match role {
        Role::Cupid => Phase::Cupid,
        Role::Thief => Phase::Thief,
        Role::Seer => Phase::Seer,
        Role::Witch => Phase::Witch,
        Role::Hunter => Phase::Hunter,
        Role::Werewolf | Role::Villager | Role::LittleGirl => Phase::Werewolves,
    }
}

/// Play one night.
pub fn run_night(game: &mut Game, provider: &mut dyn DecisionProvider) -> NightReport {
    let round = game.round;
    tracing::info!(round, "night falls");

    game.recently_killed.clear();
    let alive_at_dusk: Vec<PlayerId> = game.alive_ids().collect();
    let present = game.present_roles();
    let mut report = NightReport {
        round,
        ..NightReport::default()
    };

    for role in NIGHT_ORDER {
        if !present.contains(&role) {
            continue;
        }
        if role.first_night_only() && round != 1 {
            continue;
        }
        game.phase = phase_for(role);
        report.woke.push(role);

        if role == Role::Werewolf {
            werewolf_attack(game, provider);
            continue;
        }
        let (Some(holder), Some(resolver)) = (game.holder_of(role), resolver_for(role)) else {
            continue;
        };
        let before: Vec<PlayerId> = game.recently_killed.clone();
        resolver(game, holder, provider);
        report
            .saved
            .extend(before.into_iter().filter(|id| game.is_alive(*id)));
    }

    report.deaths = alive_at_dusk
        .into_iter()
        .filter(|id| !game.is_alive(*id))
        .collect();
    game.reveal(&report.deaths);

    for id in &report.deaths {
        tracing::info!(round, player = %game.name(*id), "found dead at dawn");
    }
    report
}

/// The pack's pooled kill.
///
/// Victims (the target and any lover dragged along) go into
/// `recently_killed` so the witch can still save them.
pub fn werewolf_attack(game: &mut Game, provider: &mut dyn DecisionProvider) -> Vec<PlayerId> {
    let prey: Vec<PlayerId> = (0..game.players().len())
        .filter(|id| game.player(*id).is_some_and(|p| !p.role().is_werewolf()))
        .collect();
    let kind = DecisionKind::WerewolfKill;
    let filter = CandidateFilter::living();
    let Some(target) = game.ask(provider, kind, None, Some(prey.as_slice()), filter) else {
        tracing::debug!("werewolves spared everyone");
        return Vec::new();
    };

    let victims = game.kill(target);
    game.recently_killed.extend(victims.iter().copied());
    game.record(Actor::Werewolves, ActionType::Kill, target);
    tracing::debug!(target = %game.name(target), "werewolves attacked");
    victims
}
