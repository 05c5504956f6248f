//! Lineups command implementation.

use super::{CliError, OutputFormat};
use serde::Serialize;
use std::collections::BTreeMap;
use werewolf::game::{Balance, standard_variants};
use werewolf::Role;

#[derive(Debug, Serialize)]
struct JsonLineup {
    variant: usize,
    balance: Balance,
    roles: BTreeMap<Role, usize>,
}

/// Execute the lineups command.
///
/// # Errors
///
/// Returns an error if no standard lineup exists for `players`.
pub(crate) fn execute(players: usize, format: OutputFormat) -> Result<(), CliError> {
    let variants = standard_variants(players)?;

    match format {
        OutputFormat::Text => {
            println!("Standard lineups for {players} players:");
            for (i, lineup) in variants.iter().enumerate() {
                println!("  [{i}] {lineup} ({})", lineup.balance());
            }
        }
        OutputFormat::Json => {
            let json: Vec<JsonLineup> = variants
                .iter()
                .enumerate()
                .map(|(variant, lineup)| JsonLineup {
                    variant,
                    balance: lineup.balance(),
                    roles: lineup.counts(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
