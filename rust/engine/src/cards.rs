use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// Accepts both the exported glyph and the canonical lower-case letter.
    pub fn from_symbol(s: &str) -> Option<Suit> {
        match s {
            "♥" | "♡" | "h" | "H" => Some(Suit::Hearts),
            "♦" | "♢" | "d" | "D" => Some(Suit::Diamonds),
            "♣" | "♧" | "c" | "C" => Some(Suit::Clubs),
            "♠" | "♤" | "s" | "S" => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Parses a rank token. The log spells ten as `10`, canonical form is `T`.
    pub fn from_symbol(s: &str) -> Option<Rank> {
        match s {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" | "T" | "t" => Some(Rank::Ten),
            "J" | "j" => Some(Rank::Jack),
            "Q" | "q" => Some(Rank::Queen),
            "K" | "k" => Some(Rank::King),
            "A" | "a" => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// Represents a single playing card with a suit and rank.
///
/// Cards print and serialize in the canonical two-character form (`Ah`, `Ts`),
/// whatever notation they were parsed from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("empty card token")]
    Empty,
    #[error("unknown rank in card `{0}`")]
    Rank(String),
    #[error("unknown suit in card `{0}`")]
    Suit(String),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parses `A♥`, `10♠`, `Ah` or `Ts`. Surrounding whitespace and a trailing
    /// period (as in `"... shows a A♥, K♥."`) are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().trim_end_matches('.');
        let Some((split, _)) = token.char_indices().last() else {
            return Err(CardParseError::Empty);
        };
        let (rank_part, suit_part) = token.split_at(split);
        let suit =
            Suit::from_symbol(suit_part).ok_or_else(|| CardParseError::Suit(token.to_string()))?;
        let rank =
            Rank::from_symbol(rank_part).ok_or_else(|| CardParseError::Rank(token.to_string()))?;
        Ok(Card { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.letter(), self.suit.letter())
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// Parses a comma separated card list such as `A♥, 10♦, 3♣` or `Ah,Kh`.
///
/// Tokens that are not cards are dropped, so a damaged list degrades to the
/// cards that could be read.
pub fn parse_card_list(s: &str) -> Vec<Card> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|t| match t.parse::<Card>() {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::debug!(token = t, error = %e, "dropping unreadable card");
                None
            }
        })
        .collect()
}

/// Order-independent comparison key for a set of cards.
pub fn sorted(cards: &[Card]) -> Vec<Card> {
    let mut v = cards.to_vec();
    v.sort();
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_canonical(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == 2 && b"23456789TJQKA".contains(&b[0]) && b"hdcs".contains(&b[1])
    }

    #[test]
    fn ten_glyph_normalizes_to_t() {
        let c: Card = "10♠".parse().unwrap();
        assert_eq!(c.to_string(), "Ts");
    }

    #[test]
    fn ace_of_hearts_glyph() {
        let c: Card = "A♥".parse().unwrap();
        assert_eq!(c.to_string(), "Ah");
    }

    #[test]
    fn canonical_input_round_trips() {
        for s in ["2c", "9d", "Th", "Js", "Qc", "Kd", "Ah"] {
            let c: Card = s.parse().unwrap();
            assert_eq!(c.to_string(), s);
        }
    }

    #[test]
    fn every_card_prints_canonically() {
        let ranks = ["2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A"];
        for r in ranks {
            for s in ["♥", "♦", "♣", "♠"] {
                let c: Card = format!("{}{}", r, s).parse().unwrap();
                assert!(is_canonical(&c.to_string()), "{}", c);
            }
        }
    }

    #[test]
    fn trailing_period_and_spaces_ignored() {
        let c: Card = " K♥. ".parse().unwrap();
        assert_eq!(c.to_string(), "Kh");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<Card>(), Err(CardParseError::Empty));
        assert!(matches!("1♥".parse::<Card>(), Err(CardParseError::Rank(_))));
        assert!(matches!("Ax".parse::<Card>(), Err(CardParseError::Suit(_))));
    }

    #[test]
    fn card_list_skips_bad_tokens() {
        let cards = parse_card_list("A♥, 10♦, ??, 3♣");
        let shown: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
        assert_eq!(shown, vec!["Ah", "Td", "3c"]);
    }

    #[test]
    fn serializes_as_string() {
        let c: Card = "10♣".parse().unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"Tc\"");
        let back: Card = serde_json::from_str("\"Tc\"").unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn sorted_is_order_independent() {
        let a = parse_card_list("Ah, Kh");
        let b = parse_card_list("K♥, A♥");
        assert_eq!(sorted(&a), sorted(&b));
    }
}
