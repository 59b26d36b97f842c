//! Configuration command handler.
//!
//! Displays the resolved settings with their sources (default, environment,
//! or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "hero": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   "format": {
//!     "value": "jsonl",
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config::ConfigResolved;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "hero": {
            "value": config.hero,
            "source": sources.hero,
        },
        "format": {
            "value": config.format,
            "source": sources.format,
        },
        "marker": {
            "value": config.marker,
            "source": sources.marker,
        },
        "noise_prefixes": {
            "value": config.noise_prefixes,
            "source": sources.noise_prefixes,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
