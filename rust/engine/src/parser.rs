//! Hand Segmenter and Field Extractor.
//!
//! [`Segmenter`] is an explicit accumulator folded over the sorted records. It
//! holds the finished hands and at most one open hand. Each record is
//! classified by [`crate::line::classify`] and dispatched to the extractor for
//! its shape. Hand-start closes any open hand before opening the next one; a
//! hand still open at end of input is emitted rather than dropped.

use tracing::{debug, info, trace, warn};

use crate::cards::{parse_card_list, Card};
use crate::config::ParserConfig;
use crate::errors::{ParseError, ParseWarning};
use crate::hand::{ActionType, GameType, Hand, Player, Street};
use crate::hero::{find_hero, read_hole_cards, read_show};
use crate::line::{
    board_street, classify, display_name, parse_amount_token, quoted_name, split_actor, LineShape,
    COLLECTED, STACKS_PREFIX, UNCALLED_PREFIX,
};
use crate::pot::{read_action, record_action};
use crate::records::{read_records, LogRecord};

/// Result of one parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub hands: Vec<Hand>,
    pub hero: Option<String>,
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutcome {
    pub fn has_warning(&self, warning: &ParseWarning) -> bool {
        self.warnings.contains(warning)
    }
}

/// Stateless log parser. Each call is independent of every other.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parses exported CSV text into hands.
    ///
    /// # Errors
    ///
    /// Only an unrecognizable header fails the call, see
    /// [`crate::records::read_records`]. Everything else degrades to a partial
    /// or empty result with warnings.
    pub fn parse(&self, input: &str) -> Result<ParseOutcome, ParseError> {
        let records = read_records(input, &self.config)?;
        Ok(self.parse_records(&records))
    }

    /// Runs hero resolution and segmentation over already sorted records.
    pub fn parse_records(&self, records: &[LogRecord]) -> ParseOutcome {
        let resolved = find_hero(records);
        let hero = resolved.or_else(|| self.config.hero_fallback.clone());
        let hands = segment(records, hero.as_deref());

        let mut warnings = Vec::new();
        if hands.is_empty() {
            warnings.push(ParseWarning::NoHandsFound);
        } else if hero.is_none() {
            warnings.push(ParseWarning::HeroUndetermined);
        }
        for w in &warnings {
            warn!("{}", w);
        }
        info!(
            records = records.len(),
            hands = hands.len(),
            hero = hero.as_deref().unwrap_or("-"),
            "parsed log"
        );

        ParseOutcome {
            hands,
            hero,
            warnings,
        }
    }
}

/// Parses with the default configuration.
///
/// # Examples
///
/// ```
/// let csv = "entry,at,order\n\
///            -- starting hand #1 (No Limit Texas Hold'em) --,2024-01-01T00:00:00Z,1\n\
///            -- ending hand #1 --,2024-01-01T00:00:09Z,2\n";
/// let outcome = riverlog_engine::parser::parse_log(csv).unwrap();
/// assert_eq!(outcome.hands.len(), 1);
/// assert_eq!(outcome.hands[0].index, 1);
/// ```
pub fn parse_log(input: &str) -> Result<ParseOutcome, ParseError> {
    Parser::default().parse(input)
}

/// Splits sorted records into hands.
pub fn segment(records: &[LogRecord], hero: Option<&str>) -> Vec<Hand> {
    records
        .iter()
        .fold(Segmenter::new(hero), Segmenter::step)
        .finish()
}

#[derive(Debug, Clone)]
struct OpenHand {
    hand: Hand,
    street: Street,
}

/// Fold state: finished hands plus the one hand currently open.
#[derive(Debug, Clone)]
pub struct Segmenter<'h> {
    hero: Option<&'h str>,
    finished: Vec<Hand>,
    open: Option<OpenHand>,
    next_index: u32,
}

impl<'h> Segmenter<'h> {
    pub fn new(hero: Option<&'h str>) -> Self {
        Self {
            hero,
            finished: Vec::new(),
            open: None,
            next_index: 1,
        }
    }

    /// Applies one record and returns the updated state.
    pub fn step(mut self, record: &LogRecord) -> Self {
        let entry = record.entry.as_str();
        let Some(shape) = classify(entry) else {
            trace!(sequence = record.sequence, "ignoring line");
            return self;
        };

        match shape {
            LineShape::HandStart => {
                self.close();
                let hand = start_hand(self.next_index, record, self.hero);
                self.next_index += 1;
                self.open = Some(OpenHand {
                    hand,
                    street: Street::Preflop,
                });
            }
            LineShape::HandEnd => self.close(),
            _ => match self.open.as_mut() {
                Some(open) => apply_line(open, shape, entry, self.hero),
                None => trace!(sequence = record.sequence, "line outside any hand"),
            },
        }
        self
    }

    /// Finished hands and the hand still open, if any.
    pub fn into_parts(self) -> (Vec<Hand>, Option<Hand>) {
        (self.finished, self.open.map(|o| o.hand))
    }

    /// Ends the fold, emitting a still-open hand.
    pub fn finish(self) -> Vec<Hand> {
        let (mut hands, open) = self.into_parts();
        if let Some(hand) = open {
            debug!(index = hand.index, "emitting hand without end marker");
            hands.push(hand);
        }
        hands
    }

    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            self.finished.push(open.hand);
        }
    }
}

fn apply_line(open: &mut OpenHand, shape: LineShape, entry: &str, hero: Option<&str>) {
    match shape {
        LineShape::PlayerStacks => apply_stacks(&mut open.hand, entry, hero),
        LineShape::HoleCards => apply_hole_cards(&mut open.hand, entry),
        LineShape::StreetBoard => {
            if let Some(street) = apply_board(&mut open.hand, entry) {
                open.street = street;
            }
        }
        LineShape::Action => apply_action(&mut open.hand, open.street, entry),
        LineShape::Settlement => apply_settlement(&mut open.hand, entry),
        LineShape::HandStart | LineShape::HandEnd => {}
    }
}

/// Opens a hand from its start line.
pub fn start_hand(index: u32, record: &LogRecord, hero: Option<&str>) -> Hand {
    let mut hand = Hand::new(index, record.timestamp.clone());
    hand.game_type = GameType::from_game_name(&record.entry);
    hand.dealer_name = dealer_name(&record.entry);
    hand.hero_name = hero.map(str::to_string);
    hand
}

/// Dealer named in `(dealer: "Alice @ x1")`; absent for a dead button.
pub fn dealer_name(entry: &str) -> Option<String> {
    let at = entry.find("dealer:")?;
    quoted_name(&entry[at..])
}

/// Parses `#1 "Alice @ x1" (1000) | #3 "Bob @ y2" (950)` into players.
pub fn parse_players(list: &str) -> Vec<Player> {
    list.split(" | ")
        .filter_map(|part| {
            let name = quoted_name(part)?;
            let seat = part
                .trim_start()
                .strip_prefix('#')
                .and_then(|s| s.split_whitespace().next())
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            let stack = match (part.rfind('('), part.rfind(')')) {
                (Some(open), Some(close)) if open < close => {
                    parse_amount_token(&part[open + 1..close]).unwrap_or(0)
                }
                _ => 0,
            };
            Some(Player::new(seat, name, stack))
        })
        .collect()
}

pub fn apply_stacks(hand: &mut Hand, entry: &str, hero: Option<&str>) {
    let list = entry.strip_prefix(STACKS_PREFIX).unwrap_or(entry);
    hand.players = parse_players(list);
    for player in &mut hand.players {
        player.is_dealer = hand.dealer_name.as_deref() == Some(player.name.as_str());
        player.is_hero = hero == Some(player.name.as_str());
    }
}

pub fn apply_hole_cards(hand: &mut Hand, entry: &str) {
    let Some(cards) = read_hole_cards(entry) else {
        return;
    };
    let Some(hero) = hand.hero_name.clone() else {
        return;
    };
    match hand.player_mut(&hero) {
        Some(player) => {
            player.is_hero = true;
            player.hole_cards = cards;
        }
        None => debug!(index = hand.index, "hero not seated in this hand"),
    }
}

/// Cards a board line adds for its street: the bracketed card(s) when
/// present, otherwise the whole list. Turn and river keep only the last card.
pub fn board_cards(entry: &str, street: Street) -> Vec<Card> {
    let after_colon = entry.split_once(':').map_or(entry, |(_, rest)| rest);
    let list = match (after_colon.find('['), after_colon.rfind(']')) {
        (Some(open), Some(close)) if open < close => &after_colon[open + 1..close],
        (Some(open), None) => &after_colon[open + 1..],
        _ => after_colon,
    };
    let mut cards = parse_card_list(list);
    match street {
        Street::Flop => cards.truncate(3),
        Street::Turn | Street::River => {
            let last = cards.pop();
            cards = last.into_iter().collect();
        }
        Street::Preflop => cards.clear(),
    }
    cards
}

/// Fills the board for the line's street and returns that street.
pub fn apply_board(hand: &mut Hand, entry: &str) -> Option<Street> {
    let street = board_street(entry)?;
    let cards = board_cards(entry, street);
    if !cards.is_empty() {
        match street {
            Street::Flop => hand.board.flop = cards,
            Street::Turn => hand.board.turn = cards,
            Street::River => hand.board.river = cards,
            Street::Preflop => {}
        }
    }
    Some(street)
}

pub fn apply_action(hand: &mut Hand, street: Street, entry: &str) {
    let Some(line) = read_action(entry) else {
        trace!("skipping unsupported action line");
        return;
    };
    if line.action_type == ActionType::ShowHand {
        if let Some((name, cards)) = read_show(entry) {
            if let Some(player) = hand.player_mut(&name) {
                player.showed_hand = cards;
            }
        }
    }
    record_action(&mut hand.actions, street, line);
}

/// Reads a settlement line into the receiving player and amount.
pub fn read_settlement(entry: &str) -> Option<(String, u64)> {
    if let Some(rest) = entry.strip_prefix(UNCALLED_PREFIX) {
        let amount = rest
            .split_whitespace()
            .next()
            .and_then(parse_amount_token)
            .unwrap_or(0);
        let name = quoted_name(rest).or_else(|| {
            rest.split_once("returned to ")
                .map(|(_, n)| display_name(n.trim_end_matches('.')))
        })?;
        return Some((name, amount));
    }
    let at = entry.find(COLLECTED)?;
    let amount = entry[at + COLLECTED.len()..]
        .split_whitespace()
        .next()
        .and_then(parse_amount_token)
        .unwrap_or(0);
    let name = match split_actor(entry) {
        Some((actor, _)) => display_name(actor),
        None => display_name(&entry[..at]),
    };
    Some((name, amount))
}

pub fn apply_settlement(hand: &mut Hand, entry: &str) {
    if let Some((name, amount)) = read_settlement(entry) {
        hand.settle(&name, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(entry: &str) -> LogRecord {
        LogRecord::new(0, "2024-03-01T21:00:00.000Z", entry)
    }

    #[test]
    fn start_line_fields() {
        let hand = start_hand(
            7,
            &rec("-- starting hand #7 (id: qq1)  (Pot Limit Omaha Hi) (dealer: \"Ann @ a1\") --"),
            Some("Bob"),
        );
        assert_eq!(hand.index, 7);
        assert_eq!(hand.game_type, Some(GameType::Plo));
        assert_eq!(hand.dealer_name.as_deref(), Some("Ann"));
        assert_eq!(hand.hero_name.as_deref(), Some("Bob"));
        assert_eq!(hand.date_played, "2024-03-01T21:00:00.000Z");
    }

    #[test]
    fn dead_button_has_no_dealer() {
        assert_eq!(
            dealer_name("-- starting hand #2 (id: z) (No Limit Texas Hold'em) (dead button) --"),
            None
        );
    }

    #[test]
    fn stacks_keep_list_order_and_flags() {
        let mut hand = Hand::new(1, "t");
        hand.dealer_name = Some("Bob".into());
        apply_stacks(
            &mut hand,
            "Player stacks: #7 \"Ann @ a1\" (1,500) | #2 \"Bob @ b2\" (980)",
            Some("Ann"),
        );
        let seats: Vec<u32> = hand.players.iter().map(|p| p.seat).collect();
        assert_eq!(seats, vec![7, 2]);
        assert_eq!(hand.players[0].stack, 1500);
        assert!(hand.players[0].is_hero);
        assert!(!hand.players[0].is_dealer);
        assert!(hand.players[1].is_dealer);
        assert!(!hand.players[1].is_hero);
    }

    #[test]
    fn hole_cards_go_to_hero() {
        let mut hand = Hand::new(1, "t");
        hand.hero_name = Some("Ann".into());
        apply_stacks(&mut hand, "Player stacks: #1 \"Ann @ a\" (100) | #2 \"Bob @ b\" (100)", Some("Ann"));
        apply_hole_cards(&mut hand, "Your hand is 10♥, 10♣");
        let hole: Vec<String> = hand.players[0].hole_cards.iter().map(|c| c.to_string()).collect();
        assert_eq!(hole, vec!["Th", "Tc"]);
        assert!(hand.players[1].hole_cards.is_empty());
    }

    #[test]
    fn hole_cards_without_hero_are_dropped() {
        let mut hand = Hand::new(1, "t");
        apply_stacks(&mut hand, "Player stacks: #1 \"Ann @ a\" (100)", None);
        apply_hole_cards(&mut hand, "Your hand is A♥, K♥");
        assert!(hand.players[0].hole_cards.is_empty());
        assert!(!hand.players[0].is_hero);
    }

    #[test]
    fn board_lines_fill_each_street() {
        let mut hand = Hand::new(1, "t");
        assert_eq!(apply_board(&mut hand, "Flop:  [A♥, 10♦, 3♣]"), Some(Street::Flop));
        assert_eq!(
            apply_board(&mut hand, "Turn: A♥, 10♦, 3♣ [7♠]"),
            Some(Street::Turn)
        );
        assert_eq!(
            apply_board(&mut hand, "River: A♥, 10♦, 3♣, 7♠ [2♦]"),
            Some(Street::River)
        );
        let all: Vec<String> = hand.board.cards().map(|c| c.to_string()).collect();
        assert_eq!(all, vec!["Ah", "Td", "3c", "7s", "2d"]);
    }

    #[test]
    fn unbracketed_turn_takes_last_card() {
        let cards = board_cards("Turn: 2♣, 3♣, 4♣, 5♣", Street::Turn);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].to_string(), "5c");
    }

    #[test]
    fn settlement_lines() {
        assert_eq!(
            read_settlement("\"Bob @ b2\" collected 1,240 from pot with Two Pair, A's & 10's (combination: A♥, A♦, 10♠, 10♣, 7♦)"),
            Some(("Bob".to_string(), 1240))
        );
        assert_eq!(
            read_settlement("Uncalled bet of 80 returned to \"Ann @ a1\""),
            Some(("Ann".to_string(), 80))
        );
        assert_eq!(
            read_settlement("Uncalled bet of 15 returned to Ann"),
            Some(("Ann".to_string(), 15))
        );
    }

    #[test]
    fn show_sets_showed_hand_and_logs_action() {
        let mut hand = Hand::new(1, "t");
        apply_stacks(&mut hand, "Player stacks: #1 \"Ann @ a\" (100)", None);
        apply_action(&mut hand, Street::River, "\"Ann @ a\" shows a Q♠, Q♦.");
        assert_eq!(hand.players[0].showed_hand.len(), 2);
        assert_eq!(hand.actions[0].action_type, ActionType::ShowHand);
        assert_eq!(hand.actions[0].street, Street::River);
    }

    #[test]
    fn hand_start_closes_open_hand() {
        let records = vec![
            rec("-- starting hand #1 (No Limit Texas Hold'em) --"),
            rec("-- starting hand #2 (No Limit Texas Hold'em) --"),
            rec("-- ending hand #2 --"),
        ];
        let hands = segment(&records, None);
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].index, 1);
        assert_eq!(hands[1].index, 2);
    }

    #[test]
    fn lines_outside_hands_are_ignored() {
        let records = vec![
            rec("\"Ann @ a\" calls 20"),
            rec("-- starting hand #1 (No Limit Texas Hold'em) --"),
            rec("-- ending hand #1 --"),
            rec("\"Ann @ a\" collected 20 from pot"),
        ];
        let hands = segment(&records, None);
        assert_eq!(hands.len(), 1);
        assert!(hands[0].actions.is_empty());
        assert_eq!(hands[0].final_pot_size, 0);
    }

    #[test]
    fn segmenter_exposes_open_hand() {
        let seg = Segmenter::new(None).step(&rec("-- starting hand #1 (No Limit Texas Hold'em) --"));
        let (finished, open) = seg.into_parts();
        assert!(finished.is_empty());
        assert_eq!(open.map(|h| h.index), Some(1));
    }

    #[test]
    fn hero_fallback_suppresses_warning() {
        let records = vec![
            rec("-- starting hand #1 (No Limit Texas Hold'em) --"),
            rec("Player stacks: #1 \"Me @ m\" (100)"),
            rec("-- ending hand #1 --"),
        ];
        let outcome = Parser::new(ParserConfig::default().with_hero_fallback("Me"))
            .parse_records(&records);
        assert!(outcome.warnings.is_empty());
        assert!(outcome.hands[0].players[0].is_hero);
    }
}
