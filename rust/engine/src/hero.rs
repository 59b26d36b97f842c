//! Hero Resolver.
//!
//! The export never flags which seat belongs to the account holder. The only
//! private signal is `Your hand is ...`, which the platform emits solely for
//! the account holder's cards. It becomes attributable to a name once some
//! player later shows the same cards publicly.

use tracing::debug;

use crate::cards::{parse_card_list, sorted, Card};
use crate::line::{action_verb, display_name, is_hand_end, split_actor, HOLE_CARDS_PREFIX};
use crate::records::LogRecord;

/// Reads a `<name> shows a <cards>.` line into the display name and cards.
pub fn read_show(entry: &str) -> Option<(String, Vec<Card>)> {
    if action_verb(entry)? != "shows" {
        return None;
    }
    let (actor, rest) = split_actor(entry)?;
    let cards = rest.trim_start().strip_prefix("shows")?.trim_start();
    let cards = cards.strip_prefix("a ").unwrap_or(cards);
    Some((display_name(actor), parse_card_list(cards)))
}

/// Cards disclosed by a `Your hand is ...` line.
pub fn read_hole_cards(entry: &str) -> Option<Vec<Card>> {
    entry.strip_prefix(HOLE_CARDS_PREFIX).map(parse_card_list)
}

/// Returns the hero's display name, or `None` if the hero never showed.
///
/// The candidate cards are cleared at every hand end, so a reveal is only
/// matched against the private cards of the same hand. Cards compare as sets.
///
/// # Examples
///
/// ```
/// use riverlog_engine::hero::find_hero;
/// use riverlog_engine::records::LogRecord;
///
/// let records = vec![
///     LogRecord::new(1, "t", "Your hand is Ah,Kh"),
///     LogRecord::new(2, "t", "Nate shows a Ah, Kh."),
/// ];
/// assert_eq!(find_hero(&records).as_deref(), Some("Nate"));
/// ```
pub fn find_hero(records: &[LogRecord]) -> Option<String> {
    let mut candidate: Option<Vec<Card>> = None;

    for record in records {
        let entry = record.entry.as_str();
        if is_hand_end(entry) {
            candidate = None;
            continue;
        }
        if let Some(cards) = read_hole_cards(entry) {
            candidate = Some(sorted(&cards)).filter(|c| !c.is_empty());
            continue;
        }
        let Some(expected) = candidate.as_ref() else {
            continue;
        };
        if let Some((name, shown)) = read_show(entry) {
            if sorted(&shown) == *expected {
                debug!(hero = %name, sequence = record.sequence, "hero identified");
                return Some(name);
            }
        }
    }
    None
}
