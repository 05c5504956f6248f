//! Player state management.

use std::collections::BTreeMap;

use crate::game::Role;

/// Index of a player in the game roster.
///
/// The roster owns every player; lover bonds and revenge targets refer to
/// each other through this handle.
pub type PlayerId = usize;

/// Witch potions. Each flag flips once and never back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WitchState {
    /// The healing potion has been drunk.
    pub heal_used: bool,
    /// The poison potion has been poured.
    pub poison_used: bool,
}

/// Seer investigation record, keyed by player name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeerState {
    /// Names already investigated and the role seen at the time.
    pub investigations: BTreeMap<String, Role>,
}

/// Outcome of the hunter's dying shot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Revenge {
    /// The hunter has not fired yet.
    #[default]
    Pending,
    /// The hunter shot this player.
    Shot(PlayerId),
    /// The hunter died without naming anyone.
    Waived,
}

/// Hunter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HunterState {
    /// Whether and whom the hunter has shot.
    pub revenge: Revenge,
}

impl HunterState {
    /// The player shot by the hunter, if any.
    #[must_use]
    pub const fn revenge_target(&self) -> Option<PlayerId> {
        match self.revenge {
            Revenge::Shot(target) => Some(target),
            Revenge::Pending | Revenge::Waived => None,
        }
    }
}

/// Cupid state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CupidState {
    /// The bound pair, once chosen.
    pub lovers_chosen: Option<(PlayerId, PlayerId)>,
}

/// Thief state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThiefState {
    /// The Thief card has already been used.
    pub role_stolen: bool,
    /// Role held by this player before the steal touched them.
    pub original_role: Option<Role>,
}

/// Role-specific extension block.
///
/// A player carries the block matching their role and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpecialState {
    /// Roles without per-player ability state.
    #[default]
    None,
    /// Witch potions.
    Witch(WitchState),
    /// Seer investigations.
    Seer(SeerState),
    /// Hunter revenge.
    Hunter(HunterState),
    /// Cupid's pair.
    Cupid(CupidState),
    /// Thief's steal.
    Thief(ThiefState),
}

impl SpecialState {
    /// Fresh state for a newly dealt role.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Witch => Self::Witch(WitchState::default()),
            Role::Seer => Self::Seer(SeerState::default()),
            Role::Hunter => Self::Hunter(HunterState::default()),
            Role::Cupid => Self::Cupid(CupidState::default()),
            Role::Thief => Self::Thief(ThiefState::default()),
            Role::Villager | Role::Werewolf | Role::LittleGirl => Self::None,
        }
    }

    /// Whether this block is the one a holder of `role` must carry.
    #[must_use]
    pub const fn matches(&self, role: Role) -> bool {
        matches!(
            (self, role),
            (Self::None, Role::Villager | Role::Werewolf | Role::LittleGirl)
                | (Self::Witch(_), Role::Witch)
                | (Self::Seer(_), Role::Seer)
                | (Self::Hunter(_), Role::Hunter)
                | (Self::Cupid(_), Role::Cupid)
                | (Self::Thief(_), Role::Thief)
        )
    }
}

/// State for a single participant.
#[derive(Debug, Clone)]
pub struct Player {
    /// Unique name, used as lookup key.
    pub name: String,
    role: Role,
    dealt_role: Role,
    /// Whether the player is still alive.
    pub alive: bool,
    /// Whether the player's role has been shown to the table.
    pub revealed: bool,
    /// Whether the player currently holds the mayor's sash.
    pub mayor: bool,
    lover: Option<PlayerId>,
    special: SpecialState,
}

impl Player {
    /// Create a living player holding `role`.
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            dealt_role: role,
            alive: true,
            revealed: false,
            mayor: false,
            lover: None,
            special: SpecialState::for_role(role),
        }
    }

    /// Current role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Role dealt at setup, before any steal.
    #[must_use]
    pub const fn dealt_role(&self) -> Role {
        self.dealt_role
    }

    /// The player this one is bound to, if any.
    #[must_use]
    pub const fn lover(&self) -> Option<PlayerId> {
        self.lover
    }

    /// Role-specific state block.
    #[must_use]
    pub const fn special(&self) -> &SpecialState {
        &self.special
    }

    /// Mutable role-specific state block.
    pub fn special_mut(&mut self) -> &mut SpecialState {
        &mut self.special
    }

    /// Replace role and state together so they can never disagree.
    pub(crate) fn assume(&mut self, role: Role, special: SpecialState) {
        debug_assert!(special.matches(role));
        self.role = role;
        self.special = special;
    }

    pub(crate) fn bind(&mut self, lover: PlayerId) {
        self.lover = Some(lover);
    }

    /// Witch potions, if this player is the witch.
    #[must_use]
    pub fn witch(&self) -> Option<&WitchState> {
        match &self.special {
            SpecialState::Witch(state) => Some(state),
            _ => None,
        }
    }

    /// Seer record, if this player is the seer.
    #[must_use]
    pub fn seer(&self) -> Option<&SeerState> {
        match &self.special {
            SpecialState::Seer(state) => Some(state),
            _ => None,
        }
    }

    /// Hunter state, if this player is the hunter.
    #[must_use]
    pub fn hunter(&self) -> Option<&HunterState> {
        match &self.special {
            SpecialState::Hunter(state) => Some(state),
            _ => None,
        }
    }

    /// Cupid state, if this player is Cupid.
    #[must_use]
    pub fn cupid(&self) -> Option<&CupidState> {
        match &self.special {
            SpecialState::Cupid(state) => Some(state),
            _ => None,
        }
    }

    /// Thief state, if this player holds the Thief card.
    #[must_use]
    pub fn thief(&self) -> Option<&ThiefState> {
        match &self.special {
            SpecialState::Thief(state) => Some(state),
            _ => None,
        }
    }
}
