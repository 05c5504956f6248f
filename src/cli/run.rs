//! Run command implementation.

use super::output::{JsonGameResult, format_text};
use super::{CliError, OutputFormat, resolve_seed};
use std::path::PathBuf;
use werewolf::game::StandardLineups;
use werewolf::{GameConfig, ScriptedDecisions, run_game};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the script cannot be loaded or the game cannot be
/// set up.
pub(crate) fn execute(
    players: Vec<String>,
    script: PathBuf,
    variant: usize,
    seed: Option<u64>,
    max_rounds: u32,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut decisions = ScriptedDecisions::load(&script)
        .map_err(|source| CliError::Script { path: script.clone(), source })?;

    let seed = resolve_seed(seed);
    let config = GameConfig {
        seed,
        max_rounds,
        ..GameConfig::default()
    };

    let mut game = config.setup(&players, &StandardLineups::new(variant))?;
    let result = run_game(&mut game, &mut decisions, &config);

    if decisions.remaining() > 0 {
        tracing::warn!(unused = decisions.remaining(), "script answers left unconsumed");
    }

    match format {
        OutputFormat::Text => print!("{}", format_text(seed, &game, &result)),
        OutputFormat::Json => {
            let json = JsonGameResult::new(seed, &game, &result);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
