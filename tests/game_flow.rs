//! End-to-end game flow tests.
//!
//! These tests drive whole games through the session loop with scripted or
//! closure providers and check the resulting state and log.
//!
//! Run with: cargo test game_flow

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::Write as _;

use werewolf::game::{
    ActionType, Actor, DecisionKind, DecisionRequest, GameStatus, Lineup, Phase, Revenge,
    StandardLineups, check_invariants, run_night,
};
use werewolf::{
    DecisionProvider, Faction, Game, GameConfig, Outcome, Player, PlayerId, Role,
    ScriptedDecisions, SetupError, run_game,
};

fn four_player_table() -> Game {
    Game::with_roles(&[
        ("Ann", Role::Villager),
        ("Ben", Role::Werewolf),
        ("Cid", Role::Seer),
        ("Dee", Role::Villager),
    ])
    .unwrap()
}

#[test]
fn test_four_player_village_victory() {
    let mut game = four_player_table();
    let mut script = ScriptedDecisions::new()
        .then(DecisionKind::SeerInvestigate, Some("Ben"))
        .then(DecisionKind::WerewolfKill, Some("Ann"))
        // Ben, Cid, Dee vote for a mayor in seat order
        .then(DecisionKind::MayorVote, Some("Ben"))
        .then(DecisionKind::MayorVote, Some("Cid"))
        .then(DecisionKind::MayorVote, Some("Cid"))
        .then(DecisionKind::EliminationVote, Some("Cid"))
        .then(DecisionKind::EliminationVote, Some("Ben"))
        .then(DecisionKind::EliminationVote, Some("Ben"));

    let result = run_game(&mut game, &mut script, &GameConfig::default());

    assert_eq!(result.outcome, Some(Outcome::Winner(Faction::Village)));
    assert_eq!(result.rounds_played, 1);
    assert_eq!(script.remaining(), 0);

    let seer = game.player_by_name("Cid").unwrap().seer().unwrap();
    assert_eq!(seer.investigations.get("Ben"), Some(&Role::Werewolf));
    assert_eq!(seer.investigations.len(), 1);

    assert!(!game.is_alive(0));
    assert!(!game.is_alive(1));
    assert_eq!(game.mayor(), Some(2));
    assert_eq!(game.status, GameStatus::Finished);
    assert_eq!(game.phase, Phase::Completed);

    let names: Vec<&str> = result.death_order.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Ben"]);
    assert_eq!(result.survivors, vec!["Cid".to_string(), "Dee".to_string()]);
}

#[test]
fn test_log_records_every_event() {
    let mut game = four_player_table();
    let mut script = ScriptedDecisions::new()
        .then(DecisionKind::SeerInvestigate, Some("Ben"))
        .then(DecisionKind::WerewolfKill, Some("Ann"))
        .then(DecisionKind::MayorVote, Some("Dee"))
        .then(DecisionKind::EliminationVote, Some("Ben"))
        .then(DecisionKind::EliminationVote, Some("Ben"))
        .then(DecisionKind::EliminationVote, Some("Ben"));
    run_game(&mut game, &mut script, &GameConfig::default());

    let log = game.log();
    let reveal = log.of_type(ActionType::Reveal).next().unwrap();
    assert_eq!(
        (reveal.actor, reveal.target, reveal.round, reveal.phase),
        (Actor::Player(2), 1, 1, Phase::Seer)
    );

    let kills: Vec<(Actor, PlayerId)> = log
        .of_type(ActionType::Kill)
        .map(|a| (a.actor, a.target))
        .collect();
    assert_eq!(kills, vec![(Actor::Werewolves, 0), (Actor::Village, 1)]);

    assert_eq!(log.vote_tally(1, Phase::MayorElection).get(&3), Some(&1));
    assert_eq!(log.vote_tally(1, Phase::DayVote).get(&1), Some(&3));
}

#[test]
fn test_witch_heal_revives_both_lovers() {
    let mut game = Game::with_roles(&[
        ("Cupid", Role::Cupid),
        ("Witch", Role::Witch),
        ("Wolf", Role::Werewolf),
        ("Romeo", Role::Villager),
        ("Juliet", Role::Villager),
    ])
    .unwrap();
    let mut script = ScriptedDecisions::new()
        .then(DecisionKind::CupidFirstLover, Some("Romeo"))
        .then(DecisionKind::CupidSecondLover, Some("Juliet"))
        .then(DecisionKind::WerewolfKill, Some("Romeo"))
        .then(DecisionKind::WitchHeal, Some("Romeo"));
    let report = run_night(&mut game, &mut script);

    assert!(report.deaths.is_empty());
    assert_eq!(report.saved, vec![3, 4]);
    assert!(game.is_alive(3) && game.is_alive(4));
    assert_eq!(game.lovers(), Some((3, 4)));
    assert!(check_invariants(&game).is_empty());
}

#[test]
fn test_unhealed_lover_dies_with_partner() {
    let mut game = Game::with_roles(&[
        ("Cupid", Role::Cupid),
        ("Wolf", Role::Werewolf),
        ("Romeo", Role::Villager),
        ("Juliet", Role::Villager),
    ])
    .unwrap();
    let mut script = ScriptedDecisions::new()
        .then(DecisionKind::CupidFirstLover, Some("Romeo"))
        .then(DecisionKind::CupidSecondLover, Some("Juliet"))
        .then(DecisionKind::WerewolfKill, Some("Juliet"));
    let report = run_night(&mut game, &mut script);

    assert_eq!(report.deaths, vec![2, 3]);
    assert!(game.player(2).unwrap().revealed);
}

#[test]
fn test_mixed_lovers_win_together() {
    let mut game = Game::with_roles(&[
        ("Cupid", Role::Cupid),
        ("Wolf", Role::Werewolf),
        ("Vil", Role::Villager),
    ])
    .unwrap();
    // Cupid binds the wolf to the villager, then the pair votes Cupid out
    let mut provider = |req: &DecisionRequest<'_>| -> Option<PlayerId> {
        match req.kind {
            DecisionKind::CupidFirstLover => Some(1),
            DecisionKind::CupidSecondLover => Some(2),
            DecisionKind::MayorVote | DecisionKind::EliminationVote => Some(0),
            _ => None,
        }
    };
    let result = run_game(&mut game, &mut provider, &GameConfig::default());

    assert_eq!(result.outcome, Some(Outcome::Winner(Faction::Lovers)));
    assert_eq!(result.survivors, vec!["Wolf".to_string(), "Vil".to_string()]);
}

#[test]
fn test_thief_becomes_the_seer() {
    let mut game = Game::with_roles(&[
        ("Thief", Role::Thief),
        ("Seer", Role::Seer),
        ("Wolf", Role::Werewolf),
        ("Vil", Role::Villager),
    ])
    .unwrap();
    let mut script = ScriptedDecisions::new()
        .then(DecisionKind::ThiefSteal, Some("Seer"))
        .then(DecisionKind::SeerInvestigate, Some("Wolf"));
    let mut asked_seer = None;
    let mut provider = |req: &DecisionRequest<'_>| {
        if req.kind == DecisionKind::SeerInvestigate {
            asked_seer = req.actor;
        }
        script.choose(req)
    };
    run_night(&mut game, &mut provider);

    assert_eq!(asked_seer, Some(0), "the new seer wakes, not the old one");
    let thief = game.player(0).unwrap();
    assert_eq!(thief.role(), Role::Seer);
    assert_eq!(thief.dealt_role(), Role::Thief);
    assert_eq!(
        thief.seer().unwrap().investigations.get("Wolf"),
        Some(&Role::Werewolf)
    );

    let robbed = game.player(1).unwrap();
    assert_eq!(robbed.role(), Role::Thief);
    assert_eq!(robbed.thief().unwrap().original_role, Some(Role::Seer));
    assert!(check_invariants(&game).is_empty());
}

#[test]
fn test_hunter_killed_at_night_shoots_at_dawn() {
    let mut game = Game::with_roles(&[
        ("Hunter", Role::Hunter),
        ("Wolf", Role::Werewolf),
        ("A", Role::Villager),
        ("B", Role::Villager),
    ])
    .unwrap();
    let mut script = ScriptedDecisions::new()
        .then(DecisionKind::WerewolfKill, Some("Hunter"))
        .then(DecisionKind::HunterRevenge, Some("Wolf"));
    let result = run_game(&mut game, &mut script, &GameConfig::default());

    assert_eq!(result.outcome, Some(Outcome::Winner(Faction::Village)));
    assert_eq!(
        game.player(0).unwrap().hunter().unwrap().revenge,
        Revenge::Shot(1)
    );
    assert_eq!(game.log().of_type(ActionType::RevengeKill).count(), 1);
}

#[test]
fn test_seeded_deal_is_deterministic() {
    let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let deal = |seed| {
        let game = Game::with_provider(&names, &StandardLineups::new(0), seed).unwrap();
        game.players().iter().map(Player::role).collect::<Vec<_>>()
    };
    assert_eq!(deal(7), deal(7));

    let roles = deal(7);
    assert_eq!(roles.iter().filter(|r| **r == Role::Werewolf).count(), 2);
    assert_eq!(roles.iter().filter(|r| **r == Role::Cupid).count(), 1);
}

#[test]
fn test_largest_table_deals_every_variant() {
    let names: Vec<String> = (1..=12).map(|i| format!("P{i}")).collect();
    for variant in 0..3 {
        let game = Game::with_provider(&names, &StandardLineups::new(variant), 11).unwrap();
        assert_eq!(game.players().len(), 12);
        assert!(check_invariants(&game).is_empty());
    }
}

#[test]
fn test_lineup_mismatch_aborts_setup() {
    let lineup = Lineup::new(&[(Role::Villager, 2), (Role::Werewolf, 1)]).unwrap();
    let err = Game::new(&["A", "B", "C", "D"], lineup, 1).unwrap_err();
    assert!(matches!(
        err,
        SetupError::LineupMismatch {
            roles: 3,
            players: 4
        }
    ));

    let err = Game::with_provider(&["A", "B", "C"], &StandardLineups::new(0), 1).unwrap_err();
    assert!(matches!(err, SetupError::UnsupportedPlayerCount(3)));
}

#[test]
fn test_script_loaded_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"decision": "werewolf_kill", "target": "Ann"}},
            {{"decision": "seer_investigate", "target": "Ben"}},
            {{"decision": "mayor_vote", "target": "Dee"}},
            {{"decision": "elimination_vote", "target": "Ben"}},
            {{"decision": "elimination_vote", "target": "Ben"}},
            {{"decision": "elimination_vote", "target": null}}
        ]"#
    )
    .unwrap();

    let mut script = ScriptedDecisions::load(file.path()).unwrap();
    let mut game = four_player_table();
    let result = run_game(&mut game, &mut script, &GameConfig::default());
    assert_eq!(result.outcome, Some(Outcome::Winner(Faction::Village)));
}

#[test]
fn test_snapshot_serializes() {
    let mut game = four_player_table();
    game.start();
    game.kill(0);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.alive_count, 3);
    assert_eq!(snapshot.players[1].role, Role::Werewolf);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["status"], "running");
    assert_eq!(json["players"][0]["alive"], false);
}
