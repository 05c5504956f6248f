//! Output formatting utilities for CLI.

use serde::Serialize;
use std::fmt::Write as _;
use werewolf::game::{Action, ActionType, Actor, GameSnapshot, Phase};
use werewolf::session::Death;
use werewolf::{Game, GameResult, Outcome};

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used for role distribution.
    seed: u64,
    /// How the game ended (null if the round cap was hit).
    outcome: Option<Outcome>,
    /// Total rounds played.
    rounds_played: u32,
    /// Deaths in order.
    death_order: Vec<Death>,
    /// Final table state.
    final_state: GameSnapshot,
    /// Every logged action.
    log: Vec<JsonAction>,
}

/// JSON-serializable log entry with names resolved.
#[derive(Debug, Serialize)]
struct JsonAction {
    round: u32,
    phase: Phase,
    actor: String,
    action: ActionType,
    target: String,
}

impl JsonGameResult {
    /// Create from a finished game and its result.
    pub(super) fn new(seed: u64, game: &Game, result: &GameResult) -> Self {
        Self {
            seed,
            outcome: result.outcome,
            rounds_played: result.rounds_played,
            death_order: result.death_order.clone(),
            final_state: game.snapshot(),
            log: game
                .log()
                .actions()
                .iter()
                .map(|a| JsonAction {
                    round: a.round,
                    phase: a.phase,
                    actor: actor_name(game, a.actor),
                    action: a.action,
                    target: game.name(a.target).to_string(),
                })
                .collect(),
        }
    }
}

fn actor_name(game: &Game, actor: Actor) -> String {
    match actor {
        Actor::Player(id) => game.name(id).to_string(),
        Actor::Werewolves => "the werewolves".to_string(),
        Actor::Village => "the village".to_string(),
    }
}

/// One log entry as a sentence.
pub(super) fn describe(game: &Game, action: &Action) -> String {
    let actor = actor_name(game, action.actor);
    let target = game.name(action.target);
    match action.action {
        ActionType::Vote => format!("{actor} votes for {target}"),
        ActionType::Kill => format!("{actor} kill {target}"),
        ActionType::Heal => format!("{actor} saves {target}"),
        ActionType::Poison => format!("{actor} poisons {target}"),
        ActionType::Reveal => format!("{actor} sees {target}"),
        ActionType::ChooseLovers => format!("{actor} binds {target}"),
        ActionType::StealRole => format!("{actor} steals the role of {target}"),
        ActionType::RevengeKill => format!("{actor} shoots {target}"),
        ActionType::Nominate => format!("{actor} names {target} as mayor"),
    }
}

/// Render the table as one line per player.
pub(super) fn format_table(game: &Game) -> String {
    let mut output = String::new();
    for player in game.players() {
        let status = if player.alive { "alive" } else { "dead" };
        let role = if player.revealed || !player.alive {
            player.role().to_string()
        } else {
            "?".to_string()
        };
        let mayor = if player.mayor { " [mayor]" } else { "" };
        let _ = writeln!(output, "  {:<12} {:<6} {role}{mayor}", player.name, status);
    }
    output
}

/// Format a game result as human-readable text.
pub(super) fn format_text(seed: u64, game: &Game, result: &GameResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {seed})");
    match result.outcome {
        Some(outcome) => {
            let _ = writeln!(output, "  Outcome: {outcome}");
        }
        None => {
            let _ = writeln!(output, "  Outcome: undecided after round cap");
        }
    }
    let _ = writeln!(output, "  Rounds: {}\n", result.rounds_played);

    for player in game.players() {
        let _ = write!(output, "  {} ({})", player.name, player.role());
        if player.role() != player.dealt_role() {
            let _ = write!(output, " [dealt {}]", player.dealt_role());
        }
        if let Some(death) = result.death_order.iter().find(|d| d.name == player.name) {
            let _ = write!(output, " [died round {}]", death.round);
        }
        output.push('\n');
    }

    output.push_str("\nLog:\n");
    let mut current = None;
    for action in game.log().actions() {
        if current != Some((action.round, action.phase)) {
            current = Some((action.round, action.phase));
            let _ = writeln!(output, "  Round {} - {}", action.round, action.phase);
        }
        let _ = writeln!(output, "    {}", describe(game, action));
    }

    output
}
