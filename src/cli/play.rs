//! Play command implementation.
//!
//! The terminal acts as the moderator: every decision is prompted on stdout
//! and answered on stdin by number. An empty line skips when the decision
//! allows it.

use super::output::{describe, format_table, format_text};
use super::{CliError, resolve_seed};
use std::io::{self, BufRead, Write};
use werewolf::game::{DecisionRequest, Phase, StandardLineups};
use werewolf::{DecisionProvider, Game, GameConfig, PlayerId, run_game};

/// Decision provider reading answers from a line-oriented input.
#[derive(Debug)]
pub(crate) struct PromptProvider<R, W> {
    input: R,
    output: W,
    /// Log entries already shown.
    shown: usize,
    last_phase: Option<(u32, Phase)>,
}

impl<R: BufRead, W: Write> PromptProvider<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            shown: 0,
            last_phase: None,
        }
    }

    fn catch_up(&mut self, game: &Game) -> io::Result<()> {
        let actions = game.log().actions();
        for action in actions.iter().skip(self.shown) {
            writeln!(self.output, "  * {}", describe(game, action))?;
        }
        self.shown = actions.len();

        let phase = (game.round, game.phase);
        if self.last_phase != Some(phase) {
            self.last_phase = Some(phase);
            let half = if game.phase.is_night() { "night" } else { "day" };
            writeln!(self.output, "\n== Round {} {half} - {} ==", game.round, game.phase)?;
            write!(self.output, "{}", format_table(game))?;
        }
        Ok(())
    }

    fn prompt(&mut self, request: &DecisionRequest<'_>) -> io::Result<Option<PlayerId>> {
        self.catch_up(request.game)?;

        let actor = request
            .actor
            .map(|id| format!(" ({})", request.game.name(id)))
            .unwrap_or_default();
        writeln!(self.output, "{}{actor}:", request.kind)?;
        for (i, name) in request.candidate_names().iter().enumerate() {
            writeln!(self.output, "  {}) {name}", i + 1)?;
        }

        let count = request.candidates.len();
        let hint = if request.allow_none {
            format!("enter 1-{count} or an empty line to skip")
        } else {
            format!("enter 1-{count}")
        };
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.is_empty() && request.allow_none {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(Some(request.candidates[n - 1])),
                _ => writeln!(self.output, "{hint}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> DecisionProvider for PromptProvider<R, W> {
    fn choose(&mut self, request: &DecisionRequest<'_>) -> Option<PlayerId> {
        match self.prompt(request) {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!(error = %e, "prompt failed, skipping decision");
                None
            }
        }
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the game cannot be set up.
pub(crate) fn execute(
    players: Vec<String>,
    variant: usize,
    seed: Option<u64>,
    max_rounds: u32,
) -> Result<(), CliError> {
    let seed = resolve_seed(seed);
    let config = GameConfig {
        seed,
        max_rounds,
        ..GameConfig::default()
    };
    let mut game = config.setup(&players, &StandardLineups::new(variant))?;

    println!("Lineup: {}", game.lineup());
    let stdin = io::stdin();
    let mut prompt = PromptProvider::new(stdin.lock(), io::stdout());
    let result = run_game(&mut game, &mut prompt, &config);

    println!();
    print!("{}", format_text(seed, &game, &result));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use werewolf::Role;
    use werewolf::game::DecisionKind;

    #[test]
    fn test_prompt_reads_numbered_choice() {
        let game = Game::with_roles(&[("Ann", Role::Villager), ("Ben", Role::Werewolf)]).unwrap();
        let candidates = [0, 1];
        let request = DecisionRequest {
            kind: DecisionKind::EliminationVote,
            actor: Some(0),
            candidates: &candidates,
            allow_none: true,
            game: &game,
        };

        let mut out = Vec::new();
        let mut prompt = PromptProvider::new(&b"7\n2\n\n"[..], &mut out);
        assert_eq!(prompt.choose(&request), Some(1));
        assert_eq!(prompt.choose(&request), None);
        assert_eq!(prompt.choose(&request), None, "end of input skips");
        drop(prompt);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("vote for a player to eliminate (Ann)"));
        assert!(text.contains("enter 1-2 or an empty line to skip"));
    }

    #[test]
    fn test_prompt_requires_choice_when_none_not_allowed() {
        let mut game = Game::with_roles(&[("Ann", Role::Seer), ("Ben", Role::Werewolf)]).unwrap();
        game.phase = Phase::Seer;
        let candidates = [1];
        let request = DecisionRequest {
            kind: DecisionKind::SeerInvestigate,
            actor: Some(0),
            candidates: &candidates,
            allow_none: false,
            game: &game,
        };

        let mut out = Vec::new();
        let mut prompt = PromptProvider::new(&b"\n1\n"[..], &mut out);
        assert_eq!(prompt.choose(&request), Some(1));
        drop(prompt);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("enter 1-1\n"));
        assert!(!text.contains("skip"));
        assert!(text.contains("== Round 1 night - seer =="));
    }
}
