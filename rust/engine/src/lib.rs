//! # riverlog-engine: Hand-History Log Parser
//!
//! Converts the line-oriented CSV export of an online poker table into fully
//! normalized [`hand::Hand`] records: players, seats, stacks, dealer, hero,
//! streets, actions with a running pot, board cards and winners.
//!
//! ## Core Modules
//!
//! - [`records`] - Log Normalizer: CSV rows to sorted [`records::LogRecord`]s
//! - [`hero`] - Hero Resolver: who the account holder is
//! - [`line`] - Line-shape classification and text helpers
//! - [`parser`] - Hand Segmenter and Field Extractor
//! - [`pot`] - Pot Accountant: raise-to deltas and running pot
//! - [`hand`] - Hand, Player, Action and Board data model
//! - [`cards`] - Card notation (`A♥`, `10♠` in, `Ah`, `Ts` out)
//! - [`config`] - Parser configuration
//! - [`logger`] - JSONL hand output
//! - [`summary`] - Session totals and heads-up player stats
//! - [`errors`] - Fatal errors and non-fatal warnings
//!
//! ## Quick Start
//!
//! ```rust
//! use riverlog_engine::parser::parse_log;
//!
//! let csv = r#"entry,at,order
//! "-- starting hand #1 (id: x1)  (No Limit Texas Hold'em) (dealer: ""Ann @ a1"") --",2024-01-01T20:00:00Z,1
//! "Player stacks: #1 ""Ann @ a1"" (1000) | #2 ""Bob @ b2"" (1000)",2024-01-01T20:00:00Z,2
//! """Ann @ a1"" posts a small blind of 10",2024-01-01T20:00:01Z,3
//! """Bob @ b2"" posts a big blind of 20",2024-01-01T20:00:01Z,4
//! """Ann @ a1"" raises to 60",2024-01-01T20:00:02Z,5
//! """Bob @ b2"" folds",2024-01-01T20:00:03Z,6
//! "Uncalled bet of 40 returned to ""Ann @ a1""",2024-01-01T20:00:03Z,7
//! """Ann @ a1"" collected 40 from pot",2024-01-01T20:00:03Z,8
//! -- ending hand #1 --,2024-01-01T20:00:04Z,9
//! "#;
//!
//! let outcome = parse_log(csv).unwrap();
//! let hand = &outcome.hands[0];
//! assert_eq!(hand.players.len(), 2);
//! assert_eq!(hand.actions.last().unwrap().pot_size_after, 80);
//! assert_eq!(hand.final_pot_size, 80);
//! assert_eq!(hand.winners, vec!["Ann"]);
//! ```
//!
//! ## Failure Model
//!
//! Only a header row without an `entry` column fails a parse. An empty log,
//! an unresolvable hero, unknown lines and bad numbers all degrade to a partial
//! result; see [`errors::ParseWarning`].

pub mod cards;
pub mod config;
pub mod errors;
pub mod hand;
pub mod hero;
pub mod line;
pub mod logger;
pub mod parser;
pub mod pot;
pub mod records;
pub mod summary;

pub use errors::{ParseError, ParseWarning};
pub use hand::{Action, ActionType, Board, GameType, Hand, Player, Street};
pub use parser::{parse_log, ParseOutcome, Parser};
