//! Property-based tests for the game rules.
//!
//! These tests verify the kill cascade, win detection, vote tallying and
//! whole-game structural invariants.
//! Run with: cargo test --release prop_rules

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use proptest::prelude::*;

use werewolf::game::{DecisionRequest, Lineup, Tally, abilities, check_invariants, evaluate};
use werewolf::{Faction, Game, GameConfig, Outcome, PlayerId, Role, run_game};

/// A table of `n` villagers with Cupid in seat 0.
fn cupid_table(n: usize) -> Game {
    let mut seats = vec![("P0".to_string(), Role::Cupid)];
    seats.extend((1..n).map(|i| (format!("P{i}"), Role::Villager)));
    Game::with_roles(&seats).unwrap()
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::all().to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Killing one lover kills the other; killing again is a no-op.
    #[test]
    fn prop_kill_cascades_to_lover(n in 3usize..12, a in 0usize..12, b in 0usize..12) {
        let (a, b) = (a % n, b % n);
        prop_assume!(a != b);
        let mut game = cupid_table(n);
        prop_assert!(abilities::choose_lovers(&mut game, 0, a, b));

        let victims = game.kill(a);
        prop_assert_eq!(victims, vec![a, b]);
        prop_assert!(!game.is_alive(a));
        prop_assert!(!game.is_alive(b));
        prop_assert!(game.kill(b).is_empty());
        prop_assert_eq!(game.alive_count(), n - 2);
    }

    /// Without lovers, the evaluator reports a winner iff one base faction
    /// remains among the living.
    #[test]
    fn prop_win_detection_matches_survivors(
        roles in prop::collection::vec(role_strategy(), 1..12),
        dead in prop::collection::vec(any::<bool>(), 12),
    ) {
        let seats: Vec<(String, Role)> = roles
            .iter()
            .enumerate()
            .map(|(i, r)| (format!("P{i}"), *r))
            .collect();
        let mut game = Game::with_roles(&seats).unwrap();
        for (id, kill) in dead.iter().take(roles.len()).enumerate() {
            if *kill {
                game.kill(id);
            }
        }

        let living: Vec<Role> = game
            .alive_ids()
            .map(|id| game.player(id).unwrap().role())
            .collect();
        let wolves = living.iter().filter(|r| r.is_werewolf()).count();
        let expected = if living.is_empty() {
            Some(Outcome::NoSurvivors)
        } else if wolves == living.len() {
            Some(Outcome::Winner(Faction::Werewolf))
        } else if wolves == 0 {
            Some(Outcome::Winner(Faction::Village))
        } else {
            None
        };
        prop_assert_eq!(evaluate(&game), expected);
    }

    /// A tally has a winner iff exactly one candidate holds the maximum.
    #[test]
    fn prop_tally_winner_is_unique_max(
        votes in prop::collection::btree_map(0usize..8, 1u32..6, 0..8),
    ) {
        let counts: BTreeMap<PlayerId, u32> = votes;
        let max = counts.values().copied().max();
        let leaders: Vec<PlayerId> = counts
            .iter()
            .filter(|(_, v)| Some(**v) == max)
            .map(|(id, _)| *id)
            .collect();

        match Tally::of(&counts) {
            Tally::Empty => prop_assert!(counts.is_empty()),
            Tally::Winner(id) => prop_assert_eq!(leaders, vec![id]),
            Tally::Tied(tied) => {
                prop_assert!(tied.len() > 1);
                prop_assert_eq!(tied, leaders);
            }
        }
    }

    /// Investigating the same target twice records one entry.
    #[test]
    fn prop_seer_investigation_idempotent(target in 1usize..4) {
        let mut game = Game::with_roles(&[
            ("S", Role::Seer),
            ("A", Role::Villager),
            ("W", Role::Werewolf),
            ("B", Role::Villager),
        ])
        .unwrap();
        let first = abilities::see(&mut game, 0, target);
        let second = abilities::see(&mut game, 0, target);

        prop_assert_eq!(first, Some(game.player(target).unwrap().role()));
        prop_assert_eq!(second, None);
        prop_assert_eq!(game.player(0).unwrap().seer().unwrap().investigations.len(), 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Whole games driven by arbitrary choices keep every invariant and
    /// stop within the round cap.
    #[test]
    fn prop_random_games_stay_consistent(
        players in 4usize..=12,
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u8>(), 1..256),
    ) {
        let names: Vec<String> = (0..players).map(|i| format!("P{i}")).collect();
        let lineup = werewolf::game::standard_variants(players).unwrap().remove(0);
        let mut game = Game::new(&names, lineup, seed).unwrap();

        let mut cursor = 0usize;
        let mut provider = |req: &DecisionRequest<'_>| -> Option<PlayerId> {
            let byte = usize::from(choices[cursor % choices.len()]);
            cursor += 1;
            // One extra slot stands for "no selection"
            req.candidates.get(byte % (req.candidates.len() + 1)).copied()
        };
        let config = GameConfig { seed, max_rounds: 20, ..GameConfig::default() };
        let result = run_game(&mut game, &mut provider, &config);

        let violations = check_invariants(&game);
        prop_assert!(violations.is_empty(), "{:?}", violations);
        prop_assert!(result.rounds_played <= 20);
        prop_assert_eq!(result.outcome, evaluate(&game));
        prop_assert_eq!(result.death_order.len() + result.survivors.len(), players);
    }

    /// Dealing a lineup hands out exactly its role counts.
    #[test]
    fn prop_deal_preserves_counts(
        wolves in 1usize..4,
        villagers in 0usize..6,
        seer in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut entries = vec![(Role::Werewolf, wolves)];
        if villagers > 0 {
            entries.push((Role::Villager, villagers));
        }
        if seer {
            entries.push((Role::Seer, 1));
        }
        let lineup = Lineup::new(&entries).unwrap();
        let dealt = lineup.deal(seed);

        prop_assert_eq!(dealt.len(), lineup.total());
        prop_assert_eq!(Lineup::from_roles(&dealt), lineup);
    }
}
