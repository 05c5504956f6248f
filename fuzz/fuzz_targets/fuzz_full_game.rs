#![no_main]

//! Full game fuzzer.
//!
//! Deals a standard lineup and plays a whole game where every decision is
//! taken from the fuzzer input, including out-of-range answers the engine
//! must reject. After the game:
//! 1. No structural invariant is violated
//! 2. The session result agrees with the evaluator
//! 3. Every player either died once or survived

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use werewolf::game::{DecisionRequest, StandardLineups, check_invariants, evaluate};
use werewolf::{GameConfig, PlayerId, run_game};

/// Structured input for whole-game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    /// Table size, mapped into 4-12.
    players: u8,
    /// Lineup variant, reduced modulo the available count.
    variant: u8,
    /// Seed for the deal.
    seed: u64,
    /// Raw answers. 0 means "no selection", 255 names a player outside
    /// the candidates, anything else picks a candidate by index.
    answers: Vec<u8>,
}

fuzz_target!(|input: GameInput| {
    let players = 4 + usize::from(input.players % 9);
    let names: Vec<String> = (0..players).map(|i| format!("P{i}")).collect();
    let variant = usize::from(input.variant % 2);
    let config = GameConfig {
        seed: input.seed,
        max_rounds: 15,
        ..GameConfig::default()
    };
    let Ok(mut game) = config.setup(&names, &StandardLineups::new(variant)) else {
        return;
    };

    let mut cursor = 0usize;
    let mut provider = |req: &DecisionRequest<'_>| -> Option<PlayerId> {
        let answer = input.answers.get(cursor).copied().unwrap_or(0);
        cursor += 1;
        match answer {
            0 => None,
            255 => Some(players + 1),
            n => req.candidates.get(usize::from(n) % req.candidates.len().max(1)).copied(),
        }
    };
    let result = run_game(&mut game, &mut provider, &config);

    let violations = check_invariants(&game);
    assert!(violations.is_empty(), "{violations:?}");
    assert_eq!(result.outcome, evaluate(&game));
    assert_eq!(result.death_order.len() + result.survivors.len(), players);
});
