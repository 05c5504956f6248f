//! Role catalog: the closed set of role identities and their factions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coalition of living players sharing a win condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// Everyone who is not a werewolf.
    Village,
    /// The werewolf pack.
    Werewolf,
    /// A mixed couple bound by Cupid (one werewolf, one not).
    Lovers,
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Village => write!(f, "Village"),
            Faction::Werewolf => write!(f, "Werewolves"),
            Faction::Lovers => write!(f, "Lovers"),
        }
    }
}

/// A role identity dealt to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Plain villager, no ability.
    Villager,
    /// Member of the werewolf pack; kills as a pool at night.
    Werewolf,
    /// Learns one player's role each night.
    Seer,
    /// Holds one healing and one poison potion.
    Witch,
    /// Shoots someone on death.
    Hunter,
    /// Binds two players as lovers on the first night.
    Cupid,
    /// Steals another player's role on the first night.
    Thief,
    /// Villager variant without a resolver.
    LittleGirl,
}

impl Role {
    /// Display name of the role.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Villager => "Villager",
            Role::Werewolf => "Werewolf",
            Role::Seer => "Seer",
            Role::Witch => "Witch",
            Role::Hunter => "Hunter",
            Role::Cupid => "Cupid",
            Role::Thief => "Thief",
            Role::LittleGirl => "Little Girl",
        }
    }

    /// Base faction of the role, ignoring lover bonds.
    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            Role::Werewolf => Faction::Werewolf,
            _ => Faction::Village,
        }
    }

    /// Whether the role belongs to the werewolf pack.
    #[must_use]
    pub const fn is_werewolf(self) -> bool {
        matches!(self, Role::Werewolf)
    }

    /// Whether the role is anything other than a plain villager or werewolf.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, Role::Villager | Role::Werewolf)
    }

    /// Roles that only wake up on the first night.
    #[must_use]
    pub const fn first_night_only(self) -> bool {
        matches!(self, Role::Cupid | Role::Thief)
    }

    /// Every role in catalog order.
    #[must_use]
    pub const fn all() -> &'static [Role] {
        &[
            Role::Villager,
            Role::Werewolf,
            Role::Seer,
            Role::Witch,
            Role::Hunter,
            Role::Cupid,
            Role::Thief,
            Role::LittleGirl,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a role name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        Role::all()
            .iter()
            .copied()
            .find(|role| role.name().replace(' ', "").to_lowercase() == normalized)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
