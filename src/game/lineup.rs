//! Role lineups: how many of each role a game deals.

// Ratios and RNG indexing use intentional casts
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::SetupError;
use crate::game::Role;

/// Smallest table size with a standard lineup.
pub const MIN_PLAYERS: usize = 4;

/// Largest table size with a standard lineup.
pub const MAX_PLAYERS: usize = 12;

/// Immutable role → count mapping, produced once at setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lineup {
    counts: BTreeMap<Role, usize>,
}

impl Lineup {
    /// Build a lineup from `(role, count)` pairs.
    ///
    /// Repeated roles are summed.
    ///
    /// # Errors
    ///
    /// Returns an error if any count is zero.
    pub fn new(entries: &[(Role, usize)]) -> Result<Self, SetupError> {
        let mut counts = BTreeMap::new();
        for &(role, count) in entries {
            if count == 0 {
                return Err(SetupError::ZeroCount(role));
            }
            *counts.entry(role).or_insert(0) += count;
        }
        Ok(Self { counts })
    }

    /// Lineup matching an explicit list of dealt roles.
    #[must_use]
    pub fn from_roles(roles: &[Role]) -> Self {
        let mut counts = BTreeMap::new();
        for role in roles {
            *counts.entry(*role).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of copies of `role`.
    #[must_use]
    pub fn count(&self, role: Role) -> usize {
        self.counts.get(&role).copied().unwrap_or(0)
    }

    /// Total number of roles dealt.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Copy of the role counts.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<Role, usize> {
        self.counts.clone()
    }

    /// Check that the lineup deals exactly one role per player.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::LineupMismatch`] when the totals differ.
    pub fn validate(&self, players: usize) -> Result<(), SetupError> {
        let roles = self.total();
        if roles == players {
            Ok(())
        } else {
            Err(SetupError::LineupMismatch { roles, players })
        }
    }

    /// Rough balance indicator for the game organizer.
    #[must_use]
    pub fn balance(&self) -> Balance {
        let total = self.total();
        if total == 0 {
            return Balance::Balanced;
        }
        let wolf_ratio = self.count(Role::Werewolf) as f64 / total as f64;
        let specials: usize = self
            .counts
            .iter()
            .filter(|(role, _)| role.is_special())
            .map(|(_, count)| count)
            .sum();

        if wolf_ratio >= 0.4 {
            Balance::WolfFavored
        } else if wolf_ratio <= 0.2 {
            Balance::VillageFavored
        } else if specials >= 3 {
            Balance::SpecialHeavy
        } else {
            Balance::Balanced
        }
    }

    /// Expand into one role per seat, shuffled deterministically by `seed`.
    #[must_use]
    pub fn deal(&self, seed: u64) -> Vec<Role> {
        let mut roles: Vec<Role> = self
            .counts
            .iter()
            .flat_map(|(role, count)| std::iter::repeat_n(*role, *count))
            .collect();

        let mut rng = Rng::new(seed);
        for i in (1..roles.len()).rev() {
            let j = rng.next_below(i + 1);
            roles.swap(i, j);
        }
        roles
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(role, count)| format!("{role}: {count}"))
            .collect();
        f.write_str(&parts.join(" | "))
    }
}

/// Balance label of a lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Balance {
    /// Wolves make up at least 40% of the table.
    WolfFavored,
    /// Wolves make up at most 20% of the table.
    VillageFavored,
    /// Three or more special roles.
    SpecialHeavy,
    /// None of the above.
    Balanced,
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Balance::WolfFavored => "Wolf-favored",
            Balance::VillageFavored => "Village-favored",
            Balance::SpecialHeavy => "Special-heavy",
            Balance::Balanced => "Balanced",
        };
        f.write_str(label)
    }
}

/// Source of lineups for a given table size.
pub trait LineupProvider {
    /// Produce a lineup whose total equals `players`.
    ///
    /// # Errors
    ///
    /// Returns an error if no lineup exists for this table size.
    fn lineup(&self, players: usize) -> Result<Lineup, SetupError>;
}

use Role::{Cupid, Hunter, Seer, Villager, Werewolf, Witch};

/// Standard table, indexed by `players - MIN_PLAYERS`.
const STANDARD: [&[&[(Role, usize)]]; MAX_PLAYERS - MIN_PLAYERS + 1] = [
    // 4
    &[
        &[(Villager, 2), (Werewolf, 1), (Seer, 1)],
        &[(Villager, 3), (Werewolf, 1)],
    ],
    // 5
    &[
        &[(Villager, 2), (Werewolf, 1), (Seer, 1), (Witch, 1)],
        &[(Villager, 3), (Werewolf, 2)],
    ],
    // 6
    &[
        &[(Villager, 2), (Werewolf, 2), (Seer, 1), (Witch, 1)],
        &[(Villager, 3), (Werewolf, 2), (Seer, 1)],
    ],
    // 7
    &[
        &[(Villager, 3), (Werewolf, 2), (Seer, 1), (Witch, 1)],
        &[(Villager, 4), (Werewolf, 2), (Seer, 1)],
    ],
    // 8
    &[
        &[(Villager, 3), (Werewolf, 2), (Seer, 1), (Witch, 1), (Cupid, 1)],
        &[(Villager, 4), (Werewolf, 3), (Seer, 1)],
    ],
    // 9
    &[
        &[(Villager, 4), (Werewolf, 2), (Seer, 1), (Witch, 1), (Cupid, 1)],
        &[(Villager, 4), (Werewolf, 3), (Seer, 1), (Witch, 1)],
    ],
    // 10
    &[
        &[(Villager, 4), (Werewolf, 3), (Seer, 1), (Witch, 1), (Cupid, 1)],
        &[(Villager, 5), (Werewolf, 3), (Seer, 1), (Hunter, 1)],
    ],
    // 11
    &[
        &[(Villager, 5), (Werewolf, 3), (Seer, 1), (Witch, 1), (Cupid, 1)],
        &[(Villager, 5), (Werewolf, 3), (Seer, 1), (Witch, 1), (Hunter, 1)],
    ],
    // 12
    &[
        &[
            (Villager, 5),
            (Werewolf, 3),
            (Seer, 1),
            (Witch, 1),
            (Cupid, 1),
            (Hunter, 1),
        ],
        &[(Villager, 6), (Werewolf, 3), (Seer, 1), (Witch, 1), (Hunter, 1)],
        &[(Villager, 6), (Werewolf, 4), (Seer, 1), (Witch, 1)],
    ],
];

/// All standard lineup variants for a table size.
///
/// # Errors
///
/// Returns an error if the table size is outside 4-12.
pub fn standard_variants(players: usize) -> Result<Vec<Lineup>, SetupError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(SetupError::UnsupportedPlayerCount(players));
    }
    STANDARD[players - MIN_PLAYERS]
        .iter()
        .map(|entries| Lineup::new(entries))
        .collect()
}

/// Lineup provider backed by the standard table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLineups {
    /// Which variant to pick for every table size (0-indexed).
    pub variant: usize,
}

impl StandardLineups {
    /// Provider picking `variant` for every table size.
    #[must_use]
    pub const fn new(variant: usize) -> Self {
        Self { variant }
    }
}

impl LineupProvider for StandardLineups {
    fn lineup(&self, players: usize) -> Result<Lineup, SetupError> {
        let variants = standard_variants(players)?;
        let available = variants.len();
        variants
            .into_iter()
            .nth(self.variant)
            .ok_or(SetupError::UnknownVariant {
                variant: self.variant,
                available,
                players,
            })
    }
}

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Random index in [0, max).
    fn next_below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as usize
    }
}
