//! Hero command handler: prints who the account holder is.

use crate::commands::read_log;
use crate::config::Config;
use crate::error::CliError;
use riverlog_engine::ParseWarning;
use riverlog_engine::hero::find_hero;
use riverlog_engine::records::read_records;
use std::io::Write;

/// Prints the hero detected from the log's own card reveals.
///
/// The configured fallback name is not consulted. A log that never reveals the
/// hero fails with the undetermined-hero message.
pub fn handle_hero_command(
    input: &str,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_log(input)?;
    let records = read_records(&content, &config.parser_config())?;
    match find_hero(&records) {
        Some(name) => {
            writeln!(out, "{}", name)?;
            Ok(())
        }
        None => Err(CliError::InvalidInput(
            ParseWarning::HeroUndetermined.to_string(),
        )),
    }
}
