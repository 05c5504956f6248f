//! Decision points and the providers that answer them.
//!
//! The engine never performs I/O. Whenever a player has to pick someone, the
//! engine builds a pre-filtered candidate list and asks a [`DecisionProvider`]
//! for one of them. "No selection" is always a valid answer and means skip.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;
use crate::game::{Game, PlayerId};

/// Which decision is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// Cupid's first lover.
    CupidFirstLover,
    /// Cupid's second lover.
    CupidSecondLover,
    /// The thief's victim.
    ThiefSteal,
    /// The seer's investigation.
    SeerInvestigate,
    /// The pack's victim.
    WerewolfKill,
    /// Whom the witch saves.
    WitchHeal,
    /// Whom the witch poisons.
    WitchPoison,
    /// Whom the dead hunter shoots.
    HunterRevenge,
    /// Whom the dead mayor names as successor.
    MayorSuccessor,
    /// A ballot in the mayor election.
    MayorVote,
    /// A ballot in the elimination vote.
    EliminationVote,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prompt = match self {
            DecisionKind::CupidFirstLover => "Cupid, choose the first lover",
            DecisionKind::CupidSecondLover => "Cupid, choose the second lover",
            DecisionKind::ThiefSteal => "Thief, choose whose role to steal",
            DecisionKind::SeerInvestigate => "Seer, choose a player to see",
            DecisionKind::WerewolfKill => "Werewolves, choose your victim",
            DecisionKind::WitchHeal => "Witch, choose a player to save",
            DecisionKind::WitchPoison => "Witch, choose a player to poison",
            DecisionKind::HunterRevenge => "Hunter, choose who dies with you",
            DecisionKind::MayorSuccessor => "Mayor, name your successor",
            DecisionKind::MayorVote => "vote for a mayor",
            DecisionKind::EliminationVote => "vote for a player to eliminate",
        };
        f.write_str(prompt)
    }
}

/// Criteria used to build a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Required alive status, or `None` for either.
    pub alive: Option<bool>,
    /// Required revealed status, or `None` for either.
    pub revealed: Option<bool>,
    /// Whether the acting player may pick themself.
    pub include_self: bool,
    /// Whether "no selection" is offered explicitly. [`Game::ask`] copies it
    /// into the request.
    pub allow_none: bool,
}

impl CandidateFilter {
    /// Living players other than the actor.
    #[must_use]
    pub const fn living_others() -> Self {
        Self {
            alive: Some(true),
            revealed: None,
            include_self: false,
            allow_none: false,
        }
    }

    /// Living players, actor included.
    #[must_use]
    pub const fn living() -> Self {
        Self {
            alive: Some(true),
            revealed: None,
            include_self: true,
            allow_none: false,
        }
    }

    /// Same filter with "no selection" offered.
    #[must_use]
    pub const fn or_none(self) -> Self {
        Self {
            allow_none: true,
            ..self
        }
    }
}

/// A single question put to the decision provider.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRequest<'a> {
    /// What is being decided.
    pub kind: DecisionKind,
    /// The deciding player, if a single player decides.
    pub actor: Option<PlayerId>,
    /// Pre-filtered eligible targets.
    pub candidates: &'a [PlayerId],
    /// Whether "no selection" is an expected answer.
    pub allow_none: bool,
    /// Read-only view of the game for rendering the question.
    pub game: &'a Game,
}

impl DecisionRequest<'_> {
    /// Candidate names in offer order.
    #[must_use]
    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .filter_map(|id| self.game.player(*id))
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// External collaborator that answers decision requests.
pub trait DecisionProvider {
    /// Pick one of `request.candidates`, or `None` to skip.
    fn choose(&mut self, request: &DecisionRequest<'_>) -> Option<PlayerId>;
}

impl<F> DecisionProvider for F
where
    F: FnMut(&DecisionRequest<'_>) -> Option<PlayerId>,
{
    fn choose(&mut self, request: &DecisionRequest<'_>) -> Option<PlayerId> {
        self(request)
    }
}

/// One line of a decision script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedDecision {
    /// Decision this answer belongs to.
    pub decision: DecisionKind,
    /// Name of the chosen player, or `null` for no selection.
    pub target: Option<String>,
}

/// Provider replaying pre-recorded answers, one queue per decision kind.
///
/// A request whose queue is empty gets "no selection". A scripted name that
/// is not among the candidates is also answered with "no selection".
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    queues: HashMap<DecisionKind, VecDeque<Option<String>>>,
}

impl ScriptedDecisions {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a script from decisions listed in play order.
    #[must_use]
    pub fn from_decisions(decisions: Vec<ScriptedDecision>) -> Self {
        let mut script = Self::new();
        for d in decisions {
            script.queues.entry(d.decision).or_default().push_back(d.target);
        }
        script
    }

    /// Parse a JSON array of `{ "decision": .., "target": .. }` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let decisions: Vec<ScriptedDecision> = serde_json::from_str(json)?;
        Ok(Self::from_decisions(decisions))
    }

    /// Load a JSON script from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Queue an answer for `kind`.
    #[must_use]
    pub fn then(mut self, kind: DecisionKind, target: Option<&str>) -> Self {
        self.queues
            .entry(kind)
            .or_default()
            .push_back(target.map(str::to_string));
        self
    }

    /// Number of answers not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn choose(&mut self, request: &DecisionRequest<'_>) -> Option<PlayerId> {
        let name = self.queues.get_mut(&request.kind)?.pop_front()??;
        let id = request.game.player_id(&name)?;
        request.candidates.contains(&id).then_some(id)
    }
}
