//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "riverlog",
    version,
    about = "Parse exported poker table logs into structured hands"
)]
pub struct RiverlogCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an exported log and write the hands as JSON
    Parse {
        /// CSV export (plain or .zst)
        #[arg(long)]
        input: String,
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<String>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Hero name used when the log never reveals it
        #[arg(long)]
        hero: Option<String>,
        /// Rename a player in the output, as OLD=NEW (repeatable)
        #[arg(long = "rename", value_name = "OLD=NEW")]
        renames: Vec<String>,
    },
    /// Print the account holder detected in a log
    Hero {
        #[arg(long)]
        input: String,
    },
    /// Session summary, or heads-up VPIP/PFR for one player
    Stats {
        #[arg(long)]
        input: String,
        #[arg(long)]
        player: Option<String>,
    },
    /// Print hands as readable text
    Replay {
        #[arg(long)]
        input: String,
        /// Only the hand with this index
        #[arg(long)]
        hand: Option<u32>,
    },
    /// Persist parsed hands as csv, json or sqlite
    Export {
        #[arg(long)]
        input: String,
        #[arg(long)]
        format: String,
        #[arg(long)]
        output: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
