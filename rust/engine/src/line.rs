//! Line-shape classification for log entries.
//!
//! Every entry is matched against [`LINE_SHAPES`], an ordered table of
//! `(shape, predicate)` pairs. The first predicate that accepts the entry wins,
//! so a line has exactly one shape. Entries no predicate accepts (joins, chat,
//! seat requests) have no shape and are ignored by the segmenter.
//!
//! The module also holds the small text helpers shared by the extractors:
//! actor splitting, platform-ID stripping and amount scanning.

use crate::hand::Street;

/// The recognized kinds of log line, in priority order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LineShape {
    HandStart,
    PlayerStacks,
    HoleCards,
    StreetBoard,
    Action,
    Settlement,
    HandEnd,
}

type Predicate = fn(&str) -> bool;

/// Priority-ordered shape table.
pub const LINE_SHAPES: [(LineShape, Predicate); 7] = [
    (LineShape::HandStart, is_hand_start),
    (LineShape::PlayerStacks, is_player_stacks),
    (LineShape::HoleCards, is_hole_cards),
    (LineShape::StreetBoard, is_street_board),
    (LineShape::Action, is_action),
    (LineShape::Settlement, is_settlement),
    (LineShape::HandEnd, is_hand_end),
];

/// Returns the highest-priority shape accepting `entry`.
pub fn classify(entry: &str) -> Option<LineShape> {
    LINE_SHAPES
        .iter()
        .find(|(_, accepts)| accepts(entry))
        .map(|(shape, _)| *shape)
}

pub const HAND_START: &str = "-- starting hand";
pub const HAND_END: &str = "-- ending hand";
pub const STACKS_PREFIX: &str = "Player stacks:";
pub const HOLE_CARDS_PREFIX: &str = "Your hand is";
pub const UNCALLED_PREFIX: &str = "Uncalled bet of";
pub const COLLECTED: &str = " collected ";

/// Verbs that mark an action line. Only matched directly after the actor.
pub const ACTION_VERBS: [&str; 8] = [
    "posts", "calls", "raises", "bets", "checks", "folds", "shows", "mucks",
];

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

pub fn is_hand_start(entry: &str) -> bool {
    starts_with_ignore_case(entry, HAND_START)
}

pub fn is_hand_end(entry: &str) -> bool {
    starts_with_ignore_case(entry, HAND_END)
}

pub fn is_player_stacks(entry: &str) -> bool {
    entry.starts_with(STACKS_PREFIX)
}

pub fn is_hole_cards(entry: &str) -> bool {
    entry.starts_with(HOLE_CARDS_PREFIX)
}

pub fn is_street_board(entry: &str) -> bool {
    board_street(entry).is_some()
}

pub fn is_action(entry: &str) -> bool {
    action_verb(entry).is_some()
}

pub fn is_settlement(entry: &str) -> bool {
    entry.contains(COLLECTED) || entry.starts_with(UNCALLED_PREFIX)
}

/// Street named by a board line (`Flop:`, `Turn:`, `River:`).
///
/// Second-run boards (`Flop (second run): ...`) are not matched.
pub fn board_street(entry: &str) -> Option<Street> {
    [
        ("Flop:", Street::Flop),
        ("Turn:", Street::Turn),
        ("River:", Street::River),
    ]
    .into_iter()
    .find(|(prefix, _)| starts_with_ignore_case(entry, prefix))
    .map(|(_, street)| street)
}

/// Splits an entry into the raw actor text and the remainder after it.
///
/// Quoted actors (`"Bob @ x1" calls 20`) end at the last quote. Unquoted actors
/// (`Bob calls 20`) end before the first known verb.
pub fn split_actor(entry: &str) -> Option<(&str, &str)> {
    if let Some(inner) = entry.strip_prefix('"') {
        let close = inner.rfind('"')?;
        return Some((&inner[..close], &inner[close + 1..]));
    }
    ACTION_VERBS
        .iter()
        .copied()
        .chain(std::iter::once("collected"))
        .filter_map(|verb| verb_position(entry, verb))
        .min()
        .filter(|&at| at > 0)
        .map(|at| (&entry[..at], &entry[at..]))
}

fn verb_position(entry: &str, verb: &str) -> Option<usize> {
    if let Some(at) = entry.find(&format!(" {} ", verb)) {
        return Some(at);
    }
    // verb closing the line, as in `Bob folds`
    entry
        .strip_suffix(verb)
        .filter(|head| head.ends_with(' '))
        .map(|head| head.len() - 1)
}

/// The verb that follows the actor, if the entry is an action line.
pub fn action_verb(entry: &str) -> Option<&'static str> {
    let (_, rest) = split_actor(entry)?;
    let word = rest.split_whitespace().next()?;
    let word = word.trim_end_matches(|c: char| !c.is_alphanumeric());
    ACTION_VERBS.iter().copied().find(|v| *v == word)
}

/// Strips the platform ID suffix: `Nate @ s9p1qZMXYl` becomes `Nate`.
pub fn display_name(raw: &str) -> String {
    let raw = raw.trim();
    match raw.rfind(" @ ") {
        Some(at) => raw[..at].trim().to_string(),
        None => raw.to_string(),
    }
}

/// Display name of the first quoted section of `s`.
pub fn quoted_name(s: &str) -> Option<String> {
    let start = s.find('"')?;
    let end = s.rfind('"')?;
    if end <= start {
        return None;
    }
    Some(display_name(&s[start + 1..end]))
}

/// Scans tokens right to left for the first integer.
///
/// Thousands separators and surrounding punctuation are stripped before the
/// integer parse. Returns 0 when no token parses.
pub fn scan_amount(text: &str) -> u64 {
    text.split_whitespace()
        .rev()
        .find_map(parse_amount_token)
        .unwrap_or(0)
}

/// Parses one amount token such as `1,250` or `40.`.
pub fn parse_amount_token(token: &str) -> Option<u64> {
    let cleaned: String = token
        .trim_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
