//! Append-only record of who did what to whom.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::PlayerId;

/// Phase tag of the game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Before the first night.
    StartUp,
    /// Cupid binds the lovers.
    Cupid,
    /// The thief steals a role.
    Thief,
    /// The seer investigates.
    Seer,
    /// The pack picks a victim.
    Werewolves,
    /// The witch uses her potions.
    Witch,
    /// A dead hunter takes revenge.
    Hunter,
    /// A dead mayor passes the sash.
    MayorSuccession,
    /// The village elects a mayor.
    MayorElection,
    /// The village votes someone out.
    DayVote,
    /// The game is over.
    Completed,
}

impl Phase {
    /// Whether the phase belongs to the night.
    #[must_use]
    pub const fn is_night(self) -> bool {
        matches!(
            self,
            Phase::Cupid | Phase::Thief | Phase::Seer | Phase::Werewolves | Phase::Witch
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::StartUp => "start up",
            Phase::Cupid => "cupid",
            Phase::Thief => "thief",
            Phase::Seer => "seer",
            Phase::Werewolves => "werewolves",
            Phase::Witch => "witch",
            Phase::Hunter => "hunter",
            Phase::MayorSuccession => "mayor succession",
            Phase::MayorElection => "mayor election",
            Phase::DayVote => "day vote",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Kind of logged action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// A ballot in an election or elimination vote.
    Vote,
    /// A death inflicted by the pack, the village, or a succession.
    Kill,
    /// The witch's healing potion.
    Heal,
    /// The witch's poison.
    Poison,
    /// A seer investigation.
    Reveal,
    /// Cupid binding one of the lovers.
    ChooseLovers,
    /// The thief taking a role.
    StealRole,
    /// The hunter's dying shot.
    RevengeKill,
    /// A dead mayor naming a successor.
    Nominate,
}

/// Who performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    /// A single player.
    Player(PlayerId),
    /// The werewolf pack acting together.
    Werewolves,
    /// The village acting on a vote result.
    Village,
}

/// Immutable log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Who acted.
    pub actor: Actor,
    /// What they did.
    pub action: ActionType,
    /// Whom they did it to.
    pub target: PlayerId,
    /// Round number the action happened in.
    pub round: u32,
    /// Phase the action happened in.
    pub phase: Phase,
}

/// Append-only action log for a whole game.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    actions: Vec<Action>,
}

impl GameLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action. Entries are never modified afterwards.
    pub fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// All actions in the order they happened.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of recorded actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions recorded during one round and phase.
    pub fn actions_in(&self, round: u32, phase: Phase) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .filter(move |a| a.round == round && a.phase == phase)
    }

    /// Actions of one kind, across the whole game.
    pub fn of_type(&self, action: ActionType) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.action == action)
    }

    /// Rebuild the ballot count of a round/phase from its logged votes.
    ///
    /// Runoffs are logged in the same phase, so this counts every ballot
    /// cast during that phase.
    #[must_use]
    pub fn vote_tally(&self, round: u32, phase: Phase) -> BTreeMap<PlayerId, u32> {
        let mut tally = BTreeMap::new();
        for action in self.actions_in(round, phase) {
            if action.action == ActionType::Vote {
                *tally.entry(action.target).or_insert(0) += 1;
            }
        }
        tally
    }
}
