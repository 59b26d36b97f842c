//! # riverlog CLI Library
//!
//! Command-line host for the `riverlog-engine` parser. It reads exported
//! table logs from disk, turns parse warnings into user-facing messages and
//! exit codes, and hands the parsed hands to an output sink.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["riverlog", "parse", "--input", "poker_now_log.csv"];
//! let code = riverlog_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `parse`: Parse a log into hands (JSON array or JSONL)
//! - `hero`: Print the detected hero
//! - `stats`: Session summary, or heads-up VPIP/PFR for one player
//! - `replay`: Print hands as readable text
//! - `export`: Persist hands as CSV, JSON, or SQLite
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, RiverlogCli};
use commands::{
    ParseArgs, handle_cfg_command, handle_export_command, handle_hero_command,
    handle_parse_command, handle_replay_command, handle_stats_command,
};

pub use error::CliError;

/// Subcommand names, listed on usage errors.
pub const COMMANDS: &[&str] = &["parse", "hero", "stats", "replay", "export", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments, resolves configuration from
/// `RIVERLOG_CONFIG` and the `RIVERLOG_*` variables, and dispatches to the
/// subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let code = riverlog_cli::run(["riverlog", "cfg"], &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match RiverlogCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
            return exit_code::ERROR;
        }
    };
    let config = &resolved.config;

    let result = match cli.cmd {
        Commands::Parse {
            input,
            output,
            format,
            hero,
            renames,
        } => handle_parse_command(
            ParseArgs {
                input,
                output,
                format,
                hero,
                renames,
            },
            config,
            out,
            err,
        ),
        Commands::Hero { input } => handle_hero_command(&input, config, out),
        Commands::Stats { input, player } => {
            handle_stats_command(&input, player.as_deref(), config, out, err)
        }
        Commands::Replay { input, hand } => handle_replay_command(&input, hand, config, out, err),
        Commands::Export {
            input,
            format,
            output,
        } => handle_export_command(&input, &output, &format, config, out, err),
        Commands::Cfg => handle_cfg_command(&resolved, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut usage = format!(
        "{}\nriverlog\nUsage: riverlog <command> [options]\n\nCommands:\n",
        e
    );
    for c in COMMANDS {
        usage.push_str(&format!("  {}\n", c));
    }
    usage.push_str("\nFor full help, run: riverlog --help\n");
    let _ = err.write_all(usage.as_bytes());
    exit_code::ERROR
}
