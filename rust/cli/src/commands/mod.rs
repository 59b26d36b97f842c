//! Command handler modules for the riverlog CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Dependency injection: configuration and output streams (`&mut dyn Write`)
//!   are passed in as parameters
//! - Error propagation: all errors propagated via `CliError`; [`crate::run`]
//!   prints them and picks the exit code

pub mod cfg;
pub mod export;
pub mod hero;
pub mod parse;
pub mod replay;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use export::handle_export_command;
pub use hero::handle_hero_command;
pub use parse::{ParseArgs, handle_parse_command};
pub use replay::handle_replay_command;
pub use stats::handle_stats_command;

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;
use riverlog_engine::config::ParserConfig;
use riverlog_engine::{ParseOutcome, ParseWarning, Parser};
use std::io::Write;

/// Reads the export at `input`.
pub(crate) fn read_log(input: &str) -> Result<String, CliError> {
    read_text_auto(input).map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", input, e)))
}

/// Reads and parses `input`, printing non-fatal warnings to `err`.
///
/// A log without hands is rejected with the user-facing "no hands" message.
pub(crate) fn load_hands(
    input: &str,
    parser_config: ParserConfig,
    err: &mut dyn Write,
) -> Result<ParseOutcome, CliError> {
    let content = read_log(input)?;
    let outcome = Parser::new(parser_config).parse(&content)?;
    if outcome.has_warning(&ParseWarning::NoHandsFound) {
        return Err(CliError::InvalidInput(ParseWarning::NoHandsFound.to_string()));
    }
    ui::display_parse_warnings(err, &outcome.warnings)?;
    Ok(outcome)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn load_hands_rejects_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(&dir, "entry,at,order\n");
        let mut err = Vec::new();
        let res = load_hands(path.to_str().unwrap(), ParserConfig::default(), &mut err);
        match res {
            Err(CliError::InvalidInput(msg)) => {
                assert_eq!(msg, "No hands found in the uploaded file")
            }
            other => panic!("unexpected: {:?}", other.map(|o| o.hands.len())),
        }
    }

    #[test]
    fn load_hands_reports_unknown_hero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(
            &dir,
            "entry,at,order\n-- starting hand #1 (No Limit Texas Hold'em) --,t,1\n",
        );
        let mut err = Vec::new();
        let outcome = load_hands(path.to_str().unwrap(), ParserConfig::default(), &mut err).unwrap();
        assert_eq!(outcome.hands.len(), 1);
        assert!(String::from_utf8(err).unwrap().contains("WARNING: Could not auto-detect hero"));
    }

    #[test]
    fn load_hands_fails_on_missing_file() {
        let mut err = Vec::new();
        let res = load_hands("/nonexistent/log.csv", ParserConfig::default(), &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
    }
}
