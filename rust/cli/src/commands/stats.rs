//! Statistics over a parsed log.
//!
//! Without `--player` this prints the session rollup the persistence layer
//! keeps next to the hands (hand count, pot total, game label, time span).
//! With `--player` it prints heads-up VPIP/PFR for that player.

use crate::commands::load_hands;
use crate::config::Config;
use crate::error::CliError;
use crate::ui;
use riverlog_engine::summary::{heads_up_stats, summarize};
use std::io::Write;

pub fn handle_stats_command(
    input: &str,
    player: Option<&str>,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let outcome = load_hands(input, config.parser_config(), err)?;

    let json = match player {
        None => serde_json::to_string_pretty(&summarize(&outcome.hands))?,
        Some(name) => {
            let stats = heads_up_stats(&outcome.hands, name);
            if stats.hands == 0 {
                ui::display_warning(err, &format!("no heads-up hands found for {}", name))?;
            }
            serde_json::to_string_pretty(&stats)?
        }
    };
    writeln!(out, "{}", json)?;
    Ok(())
}
