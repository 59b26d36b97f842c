//! Stderr helpers shared by the command handlers.

use riverlog_engine::ParseWarning;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Prints every parse warning.
pub fn display_parse_warnings(
    err: &mut dyn Write,
    warnings: &[ParseWarning],
) -> std::io::Result<()> {
    for w in warnings {
        display_warning(err, &w.to_string())?;
    }
    Ok(())
}
