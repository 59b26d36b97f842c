//! Hand export command.
//!
//! Persists the parsed hands of one log as a CSV of per-hand rows, a JSON
//! array, or a SQLite `hands` table that keeps each hand's full JSON next to
//! its indexed columns.

use crate::commands::load_hands;
use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use riverlog_engine::Hand;
use std::io::Write;
use std::path::Path;

pub fn handle_export_command(
    input: &str,
    output: &str,
    format: &str,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let export: fn(&[Hand], &str) -> Result<(), CliError> = match format {
        f if f.eq_ignore_ascii_case("csv") => export_csv,
        f if f.eq_ignore_ascii_case("sqlite") => export_sqlite,
        f if f.eq_ignore_ascii_case("json") => export_json,
        _ => {
            return Err(CliError::InvalidInput(format!(
                "Unsupported format: {}",
                format
            )));
        }
    };

    let outcome = load_hands(input, config.parser_config(), err)?;
    ensure_parent_dir(Path::new(output)).map_err(CliError::InvalidInput)?;
    export(&outcome.hands, output)?;
    writeln!(
        out,
        "Exported {} hands to {}",
        outcome.hands.len(),
        output
    )?;
    Ok(())
}

const CSV_HEADER: [&str; 10] = [
    "index",
    "date_played",
    "game_type",
    "dealer",
    "hero",
    "players",
    "actions",
    "board",
    "winners",
    "final_pot",
];

fn csv_row(hand: &Hand) -> [String; 10] {
    let board: Vec<String> = hand.board.cards().map(|c| c.to_string()).collect();
    [
        hand.index.to_string(),
        hand.date_played.clone(),
        hand.game_type.map(|g| g.as_str().to_string()).unwrap_or_default(),
        hand.dealer_name.clone().unwrap_or_default(),
        hand.hero_name.clone().unwrap_or_default(),
        hand.players.len().to_string(),
        hand.actions.len().to_string(),
        board.join(" "),
        hand.winners.join("|"),
        hand.final_pot_size.to_string(),
    ]
}

/// Export to CSV format
fn export_csv(hands: &[Hand], output: &str) -> Result<(), CliError> {
    let mut w = csv::Writer::from_path(output).map_err(csv_error)?;
    w.write_record(CSV_HEADER).map_err(csv_error)?;
    for hand in hands {
        w.write_record(csv_row(hand)).map_err(csv_error)?;
    }
    w.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Export to JSON array format
fn export_json(hands: &[Hand], output: &str) -> Result<(), CliError> {
    let s = serde_json::to_string_pretty(hands)?;
    std::fs::write(output, s)?;
    Ok(())
}

/// Export to SQLite format
fn export_sqlite(hands: &[Hand], output: &str) -> Result<(), CliError> {
    enum ExportAttemptError {
        Busy(String),
        Fatal(String),
    }

    fn sqlite_busy(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(info, _)
                if matches!(
                    info.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                )
        )
    }

    fn classify(what: &str) -> impl Fn(rusqlite::Error) -> ExportAttemptError + '_ {
        move |e| {
            if sqlite_busy(&e) {
                ExportAttemptError::Busy(format!("{}: {}", what, e))
            } else {
                ExportAttemptError::Fatal(format!("Failed to {}: {}", what, e))
            }
        }
    }

    fn export_sqlite_attempt(hands: &[Hand], output: &str) -> Result<(), ExportAttemptError> {
        let mut conn = rusqlite::Connection::open(output).map_err(classify("open database"))?;
        let tx = conn.transaction().map_err(classify("start transaction"))?;

        tx.execute("DROP TABLE IF EXISTS hands", [])
            .map_err(classify("reset schema"))?;
        tx.execute(
            "CREATE TABLE hands (
                hand_index INTEGER NOT NULL PRIMARY KEY,
                date_played TEXT NOT NULL,
                game_type TEXT,
                dealer TEXT,
                hero TEXT,
                players INTEGER NOT NULL,
                actions INTEGER NOT NULL,
                winners TEXT NOT NULL,
                final_pot INTEGER NOT NULL,
                raw_json TEXT NOT NULL
            )",
            [],
        )
        .map_err(classify("create schema"))?;

        let mut stmt = tx
            .prepare(
                "INSERT INTO hands (hand_index, date_played, game_type, dealer, hero, players,
                 actions, winners, final_pot, raw_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )
            .map_err(classify("prepare insert"))?;

        for hand in hands {
            let raw = serde_json::to_string(hand)
                .map_err(|e| ExportAttemptError::Fatal(format!("Failed to encode hand: {}", e)))?;
            let final_pot = i64::try_from(hand.final_pot_size).map_err(|_| {
                ExportAttemptError::Fatal(format!(
                    "Pot {} of hand {} exceeds SQLite INTEGER range",
                    hand.final_pot_size, hand.index
                ))
            })?;
            stmt.execute(rusqlite::params![
                hand.index,
                &hand.date_played,
                hand.game_type.map(|g| g.as_str()),
                hand.dealer_name.as_deref(),
                hand.hero_name.as_deref(),
                hand.players.len() as i64,
                hand.actions.len() as i64,
                hand.winners.join("|"),
                final_pot,
                raw
            ])
            .map_err(classify("insert hand"))?;
        }

        drop(stmt);
        tx.commit().map_err(classify("commit export"))?;
        Ok(())
    }

    let backoff_ms: u64 = std::env::var("RIVERLOG_SQLITE_BACKOFF_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(100);
    let max_attempts: u32 = std::env::var("RIVERLOG_SQLITE_MAX_ATTEMPTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(50);

    let mut attempt = 1;
    loop {
        match export_sqlite_attempt(hands, output) {
            Ok(()) => return Ok(()),
            Err(ExportAttemptError::Busy(msg)) if attempt < max_attempts => {
                tracing::debug!(attempt, %msg, "sqlite busy, retrying");
                std::thread::sleep(std::time::Duration::from_millis(
                    backoff_ms * u64::from(attempt),
                ));
                attempt += 1;
            }
            Err(ExportAttemptError::Busy(msg)) => {
                return Err(CliError::Config(format!(
                    "SQLite busy after {} attempt(s): {}",
                    attempt, msg
                )));
            }
            Err(ExportAttemptError::Fatal(msg)) => return Err(CliError::Config(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    fn export(format: &str, file: &str) -> (tempfile::TempDir, std::path::PathBuf, Result<(), CliError>) {
        let dir = tempfile::tempdir().unwrap();
        let input = write_log(&dir, SESSION);
        let output = dir.path().join("exports").join(file);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_export_command(
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            format,
            &Config::default(),
            &mut out,
            &mut err,
        );
        (dir, output, res)
    }

    #[test]
    fn test_export_csv() {
        let (_dir, output, res) = export("csv", "hands.csv");
        res.unwrap();
        let mut reader = csv::Reader::from_path(&output).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][2], "NLH");
        assert_eq!(&rows[0][7], "Jh Th 2c Qh");
        assert_eq!(&rows[2][8], "Bob");
    }

    #[test]
    fn test_export_json() {
        let (_dir, output, res) = export("JSON", "hands.json");
        res.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json.as_array().map(|a| a.len()), Some(3));
    }

    #[test]
    fn test_export_sqlite() {
        let (_dir, output, res) = export("sqlite", "hands.db");
        res.unwrap();
        let conn = rusqlite::Connection::open(output).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM hands", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
        let (game, raw): (String, String) = conn
            .query_row(
                "SELECT game_type, raw_json FROM hands WHERE hand_index = 3",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(game, "PLO");
        let hand: Hand = serde_json::from_str(&raw).unwrap();
        assert_eq!(hand.winners, vec!["Bob"]);
    }

    #[test]
    fn test_export_unsupported_format() {
        let (_dir, output, res) = export("xml", "hands.xml");
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(!output.exists());
    }
}
