//! Day orchestrator.
//!
//! Every day runs the same checks in a fixed order:
//! 1. a dead hunter who still owes a shot fires first;
//! 2. a dead mayor names a successor;
//! 3. with no mayor in office, the village elects one;
//! 4. the village votes someone out;
//! 5. if that killed the hunter or the mayor, steps 1 and 2 run again,
//!    unless the elimination already decided the game.

use std::collections::BTreeMap;

use crate::game::abilities::{resolver_for, revenge_pending};
use crate::game::victory::evaluate;
use crate::game::{
    ActionType, Actor, CandidateFilter, DecisionKind, DecisionProvider, Game, Phase, PlayerId,
    Role,
};

/// Default cap on runoff rounds before a vote is declared deadlocked.
pub const DEFAULT_MAX_RUNOFFS: u32 = 3;

/// What happened during one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayReport {
    /// Round the day belonged to.
    pub round: u32,
    /// Mayor named by a dying mayor, if any.
    pub successor: Option<PlayerId>,
    /// Mayor chosen by election, if one was held and decided.
    pub elected: Option<PlayerId>,
    /// Player voted out, if the vote was decided.
    pub eliminated: Option<PlayerId>,
    /// Everyone who died during the day, in order.
    pub deaths: Vec<PlayerId>,
}

/// Classification of a ballot count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tally {
    /// Nobody cast a ballot.
    Empty,
    /// One candidate has strictly the most ballots.
    Winner(PlayerId),
    /// Several candidates share the most ballots.
    Tied(Vec<PlayerId>),
}

impl Tally {
    /// Classify a ballot count.
    #[must_use]
    pub fn of(counts: &BTreeMap<PlayerId, u32>) -> Self {
        let Some(max) = counts.values().copied().max() else {
            return Tally::Empty;
        };
        let leaders: Vec<PlayerId> = counts
            .iter()
            .filter(|(_, votes)| **votes == max)
            .map(|(id, _)| *id)
            .collect();
        match leaders.as_slice() {
            [] => Tally::Empty,
            [winner] => Tally::Winner(*winner),
            _ => Tally::Tied(leaders),
        }
    }
}

/// Outcome of a vote including its runoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    /// The single winner, or `None` if nobody voted or the tie never broke.
    pub winner: Option<PlayerId>,
    /// Number of runoff rounds held.
    pub runoffs: u32,
}

/// Collect one ballot per living voter and resolve ties by runoff.
///
/// Each runoff is restricted to the tied leaders of the previous round. After
/// `max_runoffs` runoffs without a single leader the vote is deadlocked and
/// has no winner. Every ballot is logged.
pub fn run_vote(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    kind: DecisionKind,
    candidates: Vec<PlayerId>,
    max_runoffs: u32,
) -> VoteOutcome {
    let mut candidates = candidates;
    let mut runoffs = 0;
    loop {
        let voters: Vec<PlayerId> = game.alive_ids().collect();
        let mut counts = BTreeMap::new();
        for voter in voters {
            let pool = Some(candidates.as_slice());
            let ballot = CandidateFilter::living().or_none();
            let Some(choice) = game.ask(provider, kind, Some(voter), pool, ballot) else {
                continue;
            };
            game.record(Actor::Player(voter), ActionType::Vote, choice);
            *counts.entry(choice).or_insert(0) += 1;
        }

        match Tally::of(&counts) {
            Tally::Empty => {
                tracing::debug!(?kind, "no ballots cast");
                return VoteOutcome {
                    winner: None,
                    runoffs,
                };
            }
            Tally::Winner(winner) => {
                return VoteOutcome {
                    winner: Some(winner),
                    runoffs,
                };
            }
            Tally::Tied(leaders) => {
                if runoffs >= max_runoffs {
                    tracing::info!(?kind, runoffs, "vote deadlocked");
                    return VoteOutcome {
                        winner: None,
                        runoffs,
                    };
                }
                runoffs += 1;
                tracing::debug!(?kind, tied = leaders.len(), runoffs, "runoff");
                candidates = leaders;
            }
        }
    }
}

/// Let a dead mayor pass the sash.
///
/// Returns the successor. Without a nomination the village is left without
/// a mayor.
pub fn mayor_succession(game: &mut Game, provider: &mut dyn DecisionProvider) -> Option<PlayerId> {
    let mayor = game.mayor()?;
    if game.is_alive(mayor) {
        return None;
    }
    game.phase = Phase::MayorSuccession;
    let kind = DecisionKind::MayorSuccessor;
    let filter = CandidateFilter::living_others().or_none();
    let successor = game.ask(provider, kind, Some(mayor), None, filter);

    if let Some(old) = game.player_mut(mayor) {
        old.mayor = false;
    }
    match successor {
        Some(id) => {
            if let Some(new) = game.player_mut(id) {
                new.mayor = true;
            }
            game.record(Actor::Player(mayor), ActionType::Nominate, id);
            tracing::info!(from = %game.name(mayor), to = %game.name(id), "mayor succession");
        }
        None => tracing::info!(from = %game.name(mayor), "mayor died without a successor"),
    }
    successor
}

/// Elect a mayor among the living.
pub fn elect_mayor(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    max_runoffs: u32,
) -> Option<PlayerId> {
    game.phase = Phase::MayorElection;
    let candidates = game.candidates(None, None, CandidateFilter::living());
    let winner = run_vote(game, provider, DecisionKind::MayorVote, candidates, max_runoffs).winner?;

    if let Some(old) = game.mayor().and_then(|id| game.player_mut(id)) {
        old.mayor = false;
    }
    if let Some(p) = game.player_mut(winner) {
        p.mayor = true;
    }
    tracing::info!(mayor = %game.name(winner), "mayor elected");
    Some(winner)
}

/// The village votes one living player out.
///
/// Returns the eliminated player and everyone who died with them.
pub fn village_vote(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    max_runoffs: u32,
) -> Option<(PlayerId, Vec<PlayerId>)> {
    game.phase = Phase::DayVote;
    let candidates = game.candidates(None, None, CandidateFilter::living());
    let target = run_vote(game, provider, DecisionKind::EliminationVote, candidates, max_runoffs)
        .winner?;

    let victims = game.kill(target);
    game.reveal(&victims);
    game.record(Actor::Village, ActionType::Kill, target);
    tracing::info!(player = %game.name(target), "eliminated by the village");
    Some((target, victims))
}

fn hunter_check(game: &mut Game, provider: &mut dyn DecisionProvider) {
    let Some(resolver) = resolver_for(Role::Hunter) else {
        return;
    };
    let pending: Vec<PlayerId> = (0..game.players().len())
        .filter(|id| revenge_pending(game, *id))
        .collect();
    for hunter in pending {
        game.phase = Phase::Hunter;
        resolver(game, hunter, provider);
    }
}

/// Play one day.
pub fn run_day(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    max_runoffs: u32,
) -> DayReport {
    let round = game.round;
    tracing::info!(round, "day breaks");

    let alive_at_dawn: Vec<PlayerId> = game.alive_ids().collect();
    let mut report = DayReport {
        round,
        ..DayReport::default()
    };

    hunter_check(game, provider);
    report.successor = mayor_succession(game, provider);

    if evaluate(game).is_none() {
        if game.mayor().is_none() {
            report.elected = elect_mayor(game, provider, max_runoffs);
        }
        report.eliminated = village_vote(game, provider, max_runoffs).map(|(target, _)| target);

        if evaluate(game).is_none() {
            hunter_check(game, provider);
            if let Some(successor) = mayor_succession(game, provider) {
                report.successor = Some(successor);
            }
        }
    }

    report.deaths = alive_at_dawn
        .into_iter()
        .filter(|id| !game.is_alive(*id))
        .collect();
    game.reveal(&report.deaths);
    report
}
