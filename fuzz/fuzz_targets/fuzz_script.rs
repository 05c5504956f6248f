#![no_main]

//! Decision script fuzzer.
//!
//! Feeds arbitrary bytes to the JSON script parser and, when they parse,
//! replays the script against a fixed table.

use libfuzzer_sys::fuzz_target;
use werewolf::game::check_invariants;
use werewolf::{Game, GameConfig, Role, ScriptedDecisions, run_game};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut script) = ScriptedDecisions::from_json(json) else {
        return;
    };

    let Ok(mut game) = Game::with_roles(&[
        ("Ann", Role::Cupid),
        ("Ben", Role::Werewolf),
        ("Cid", Role::Seer),
        ("Dee", Role::Witch),
        ("Eve", Role::Hunter),
        ("Fay", Role::Thief),
    ]) else {
        return;
    };
    let config = GameConfig {
        max_rounds: 10,
        ..GameConfig::default()
    };
    run_game(&mut game, &mut script, &config);

    let violations = check_invariants(&game);
    assert!(violations.is_empty(), "{violations:?}");
});
