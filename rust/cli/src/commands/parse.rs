//! Parse command handler.
//!
//! Turns an exported log into the hand list and hands it to the output: a
//! pretty JSON array by default, or JSONL through the engine's
//! [`HandLogger`]. The resolved hero and any warnings go to stderr so that
//! stdout stays machine-readable.

use crate::commands::load_hands;
use crate::config::{Config, OutputFormat};
use crate::error::CliError;
use crate::io_utils::write_output;
use riverlog_engine::logger::HandLogger;
use riverlog_engine::summary::rename_players;
use std::collections::HashMap;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct ParseArgs {
    pub input: String,
    pub output: Option<String>,
    pub format: Option<OutputFormat>,
    pub hero: Option<String>,
    pub renames: Vec<String>,
}

pub fn handle_parse_command(
    args: ParseArgs,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let renames = parse_renames(&args.renames)?;
    let mut config = config.clone();
    if let Some(hero) = args.hero {
        config.hero = Some(hero);
    }
    let format = args.format.unwrap_or(config.format);

    let outcome = load_hands(&args.input, config.parser_config(), err)?;
    if let Some(hero) = outcome.hero.as_deref() {
        writeln!(err, "Hero: {}", hero)?;
    }
    let mut hands = outcome.hands;
    rename_players(&mut hands, &renames);

    match (format, args.output.as_deref()) {
        (OutputFormat::Json, output) => {
            let mut json = serde_json::to_string_pretty(&hands)?;
            json.push('\n');
            write_output(output, &json, out)?;
        }
        (OutputFormat::Jsonl, Some(path)) => {
            let mut logger = HandLogger::create(path)?;
            logger.write_all(&hands)?;
        }
        (OutputFormat::Jsonl, None) => {
            let mut logger = HandLogger::new(&mut *out);
            logger.write_all(&hands)?;
        }
    }

    if let Some(path) = args.output.as_deref() {
        writeln!(out, "Wrote {} hands to {}", hands.len(), path)?;
    }
    Ok(())
}

/// Reads `OLD=NEW` pairs.
fn parse_renames(pairs: &[String]) -> Result<HashMap<String, String>, CliError> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
                Ok((from.trim().to_string(), to.trim().to_string()))
            }
            _ => Err(CliError::InvalidInput(format!(
                "Invalid rename {:?}, expected OLD=NEW",
                pair
            ))),
        })
        .collect()
}
