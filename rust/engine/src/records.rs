//! Log Normalizer: turns the exported CSV into ordered [`LogRecord`]s.
//!
//! The export carries at least the columns `order`, `at` and `entry`. Rows are
//! not guaranteed to arrive in chronological order, so records are sorted by
//! `order` read as a number. Blank entries and platform noise are dropped here
//! so that later stages only see lines that can belong to a hand.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ParserConfig;
use crate::errors::ParseError;

/// One raw input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Ordering key from the `order` column
    pub sequence: i64,
    /// Opaque passthrough of the `at` column
    pub timestamp: String,
    /// Free-text log line
    pub entry: String,
}

impl LogRecord {
    pub fn new(sequence: i64, timestamp: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            sequence,
            timestamp: timestamp.into(),
            entry: entry.into(),
        }
    }
}

/// Reads and sorts the records of an exported log.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInput`] when the header row has no `entry`
/// column, and [`ParseError::Csv`] when the header row itself cannot be read.
/// Empty input is not an error and yields no records.
///
/// # Examples
///
/// ```
/// use riverlog_engine::config::ParserConfig;
/// use riverlog_engine::records::read_records;
///
/// let csv = "entry,at,order\n\"second\",t2,20\n\"first\",t1,3\n";
/// let records = read_records(csv, &ParserConfig::default()).unwrap();
/// assert_eq!(records[0].entry, "first");
/// assert_eq!(records[1].entry, "second");
/// ```
pub fn read_records(input: &str, config: &ParserConfig) -> Result<Vec<LogRecord>, ParseError> {
    let input = input.trim_start_matches('\u{feff}');
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| ParseError::Csv(e.to_string()))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let entry_col = column("entry").ok_or_else(|| ParseError::MalformedInput {
        missing: "entry".to_string(),
    })?;
    let order_col = column("order");
    let at_col = column("at");

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row_data = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(row, error = %e, "skipping unreadable row");
                continue;
            }
        };
        let entry = row_data.get(entry_col).unwrap_or("").trim();
        if config.is_noise(entry) {
            continue;
        }
        let sequence = match order_col {
            Some(i) => match parse_order(row_data.get(i).unwrap_or("")) {
                Some(n) => n,
                None => {
                    debug!(row, "skipping row without numeric order");
                    continue;
                }
            },
            None => row as i64,
        };
        let timestamp = at_col.and_then(|i| row_data.get(i)).unwrap_or("").trim();
        records.push(LogRecord::new(sequence, timestamp, entry));
    }

    // stable: rows sharing an order value keep file order
    records.sort_by_key(|r| r.sequence);
    Ok(records)
}

fn parse_order(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f as i64),
        _ => None,
    }
}
