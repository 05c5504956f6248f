//! Game state management.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::error::SetupError;
use crate::game::{
    Action, ActionType, Actor, CandidateFilter, DecisionKind, DecisionProvider, DecisionRequest,
    GameLog, Lineup, LineupProvider, Phase, Player, PlayerId, Role,
};

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created, not yet started.
    Waiting,
    /// Nights and days are being played.
    Running,
    /// A terminal faction state was reached.
    Finished,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Waiting => write!(f, "waiting"),
            GameStatus::Running => write!(f, "running"),
            GameStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Complete game state.
#[derive(Debug, Clone)]
pub struct Game {
    id: Uuid,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Current phase tag.
    pub phase: Phase,
    /// Current round, starting at 1.
    pub round: u32,
    players: Vec<Player>,
    lineup: Lineup,
    log: GameLog,
    /// Players killed by the pack tonight who may still be saved.
    pub(crate) recently_killed: Vec<PlayerId>,
}

impl Game {
    /// Create a game, dealing the lineup onto `names` with a seeded shuffle.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster is empty, a name is blank or repeated,
    /// or the lineup total differs from the number of players.
    pub fn new<S: AsRef<str>>(names: &[S], lineup: Lineup, seed: u64) -> Result<Self, SetupError> {
        validate_roster(names)?;
        lineup.validate(names.len())?;

        let players = names
            .iter()
            .zip(lineup.deal(seed))
            .map(|(name, role)| Player::new(name.as_ref().trim(), role))
            .collect();

        Ok(Self::from_parts(players, lineup))
    }

    /// Create a game asking `provider` for the lineup.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no lineup for this table size or
    /// the roster is invalid.
    pub fn with_provider<S: AsRef<str>>(
        names: &[S],
        provider: &impl LineupProvider,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let lineup = provider.lineup(names.len())?;
        Self::new(names, lineup, seed)
    }

    /// Create a game with explicit role assignments, in seat order.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster is empty or names are blank or repeated.
    pub fn with_roles<S: AsRef<str>>(seats: &[(S, Role)]) -> Result<Self, SetupError> {
        let names: Vec<&str> = seats.iter().map(|(name, _)| name.as_ref()).collect();
        validate_roster(&names)?;

        let roles: Vec<Role> = seats.iter().map(|(_, role)| *role).collect();
        let players = seats
            .iter()
            .map(|(name, role)| Player::new(name.as_ref().trim(), *role))
            .collect();

        Ok(Self::from_parts(players, Lineup::from_roles(&roles)))
    }

    fn from_parts(players: Vec<Player>, lineup: Lineup) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: GameStatus::Waiting,
            phase: Phase::StartUp,
            round: 1,
            players,
            lineup,
            log: GameLog::new(),
            recently_killed: Vec::new(),
        }
    }

    /// Unique game identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Move from `Waiting` to `Running`.
    pub fn start(&mut self) {
        if self.status == GameStatus::Waiting {
            self.status = GameStatus::Running;
            tracing::info!(game = %self.id, players = self.players.len(), "game started");
        }
    }

    /// The lineup this game was dealt from.
    #[must_use]
    pub const fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    /// The action log.
    #[must_use]
    pub const fn log(&self) -> &GameLog {
        &self.log
    }

    /// All players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Get a mutable reference to a player by ID.
    #[must_use]
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    /// Look up a player's ID by exact name.
    #[must_use]
    pub fn player_id(&self, name: &str) -> Option<PlayerId> {
        self.players.iter().position(|p| p.name == name)
    }

    /// Get a player by exact name.
    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Name of a player, or `"?"` for an unknown ID.
    #[must_use]
    pub fn name(&self, id: PlayerId) -> &str {
        self.player(id).map_or("?", |p| p.name.as_str())
    }

    /// Whether the player exists and is alive.
    #[must_use]
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.alive)
    }

    /// IDs of all living players in seat order.
    pub fn alive_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive)
            .map(|(id, _)| id)
    }

    /// Number of living players.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Player currently holding `role`: the first living holder, else the
    /// first dead one.
    #[must_use]
    pub fn holder_of(&self, role: Role) -> Option<PlayerId> {
        let holds = |p: &Player| p.role() == role;
        self.players
            .iter()
            .position(|p| p.alive && holds(p))
            .or_else(|| self.players.iter().position(holds))
    }

    /// Roles held by living players.
    #[must_use]
    pub fn present_roles(&self) -> HashSet<Role> {
        self.players
            .iter()
            .filter(|p| p.alive)
            .map(Player::role)
            .collect()
    }

    /// The player holding the mayor's sash, dead or alive.
    #[must_use]
    pub fn mayor(&self) -> Option<PlayerId> {
        self.players.iter().position(|p| p.mayor)
    }

    /// The bound pair, if Cupid has acted.
    #[must_use]
    pub fn lovers(&self) -> Option<(PlayerId, PlayerId)> {
        let first = self.players.iter().position(|p| p.lover().is_some())?;
        let second = self.players[first].lover()?;
        Some((first, second))
    }

    /// Players killed by the pack tonight who have not been saved.
    #[must_use]
    pub fn recently_killed(&self) -> &[PlayerId] {
        &self.recently_killed
    }

    /// Kill a player and, recursively, their living lover.
    ///
    /// Returns every player who died in this call, target first. Killing a
    /// dead player is a no-op, which also stops the cascade.
    pub fn kill(&mut self, id: PlayerId) -> Vec<PlayerId> {
        let mut victims = Vec::new();
        let mut next = Some(id);
        while let Some(current) = next {
            let Some(player) = self.players.get_mut(current) else {
                break;
            };
            if !player.alive {
                break;
            }
            player.alive = false;
            victims.push(current);
            next = player.lover();
            tracing::debug!(player = %player.name, "died");
        }
        victims
    }

    /// Bring a dead player back.
    pub(crate) fn revive(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(id) {
            player.alive = true;
        }
    }

    /// Bind two players symmetrically.
    pub(crate) fn bind_lovers(&mut self, first: PlayerId, second: PlayerId) {
        if first == second || first >= self.players.len() || second >= self.players.len() {
            return;
        }
        self.players[first].bind(second);
        self.players[second].bind(first);
    }

    /// Show the roles of players whose death is final.
    pub(crate) fn reveal(&mut self, ids: &[PlayerId]) {
        for id in ids {
            if let Some(player) = self.players.get_mut(*id) {
                player.revealed = true;
            }
        }
    }

    /// Append an action stamped with the current round and phase.
    pub(crate) fn record(&mut self, actor: Actor, action: ActionType, target: PlayerId) {
        self.log.record(Action {
            actor,
            action,
            target,
            round: self.round,
            phase: self.phase,
        });
    }

    /// Build a candidate list, mirroring the filter the prompt layer shows.
    ///
    /// `pool` restricts the search to a subset of players; `None` means the
    /// whole roster. Seat order is preserved.
    #[must_use]
    pub fn candidates(
        &self,
        actor: Option<PlayerId>,
        pool: Option<&[PlayerId]>,
        filter: CandidateFilter,
    ) -> Vec<PlayerId> {
        let eligible = |id: PlayerId| {
            let Some(p) = self.player(id) else {
                return false;
            };
            filter.alive.is_none_or(|alive| p.alive == alive)
                && filter.revealed.is_none_or(|revealed| p.revealed == revealed)
                && (filter.include_self || Some(id) != actor)
        };
        match pool {
            Some(pool) => pool.iter().copied().filter(|id| eligible(*id)).collect(),
            None => (0..self.players.len()).filter(|id| eligible(*id)).collect(),
        }
    }

    /// Ask the provider to pick among the players `filter` admits from `pool`.
    ///
    /// The candidate list and the request's `allow_none` both come from
    /// `filter`. An empty candidate list short-circuits to `None` without
    /// asking. An answer outside the list is treated as no selection.
    pub fn ask(
        &self,
        provider: &mut dyn DecisionProvider,
        kind: DecisionKind,
        actor: Option<PlayerId>,
        pool: Option<&[PlayerId]>,
        filter: CandidateFilter,
    ) -> Option<PlayerId> {
        let candidates = self.candidates(actor, pool, filter);
        if candidates.is_empty() {
            tracing::debug!(?kind, "no eligible candidates");
            return None;
        }
        let request = DecisionRequest {
            kind,
            actor,
            candidates: &candidates,
            allow_none: filter.allow_none,
            game: self,
        };
        let choice = provider.choose(&request)?;
        if candidates.contains(&choice) {
            Some(choice)
        } else {
            tracing::warn!(?kind, choice, "decision outside candidate list ignored");
            None
        }
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id.to_string(),
            status: self.status,
            phase: self.phase,
            round: self.round,
            alive_count: self.alive_count(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name.clone(),
                    role: p.role(),
                    alive: p.alive,
                    revealed: p.revealed,
                    mayor: p.mayor,
                    lover: p.lover().map(|id| self.name(id).to_string()),
                })
                .collect(),
        }
    }
}

fn validate_roster<S: AsRef<str>>(names: &[S]) -> Result<(), SetupError> {
    if names.is_empty() {
        return Err(SetupError::EmptyRoster);
    }
    let mut seen = HashSet::new();
    for (index, name) in names.iter().enumerate() {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(SetupError::EmptyName { index });
        }
        if !seen.insert(name) {
            return Err(SetupError::DuplicateName(name.to_string()));
        }
    }
    Ok(())
}

/// Serializable snapshot of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    /// Player name.
    pub name: String,
    /// Current role.
    pub role: Role,
    /// Alive status.
    pub alive: bool,
    /// Whether the role has been shown to the table.
    pub revealed: bool,
    /// Mayor status.
    pub mayor: bool,
    /// Lover's name, if bound.
    pub lover: Option<String>,
}

/// Serializable snapshot of the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Game identifier.
    pub id: String,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Current phase.
    pub phase: Phase,
    /// Current round.
    pub round: u32,
    /// Number of living players.
    pub alive_count: usize,
    /// Players in seat order.
    pub players: Vec<PlayerSnapshot>,
}
