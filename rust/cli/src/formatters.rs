//! Card, board, and action formatters for terminal display.
//!
//! Cards render with suit glyphs where the terminal supports them:
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use riverlog_engine::cards::{Card, Rank, Suit};
//! use riverlog_cli::formatters::{format_card, format_cards};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_cards(&[ace_spades]).starts_with("[A"));
//! ```

use riverlog_engine::cards::{Card, Suit};
use riverlog_engine::hand::{Action, ActionType, Board};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.letter().to_string()
    }
}

/// Format a Card as a string combining rank and suit, like "A♠" or "As".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.letter(), format_suit(&card.suit))
}

/// Format cards in bracket notation: "[A♠ K♥ Q♦]", or "[]" if empty.
pub fn format_cards(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Full board so far, or `None` before the flop.
pub fn format_board(board: &Board) -> Option<String> {
    let cards: Vec<Card> = board.cards().copied().collect();
    if cards.is_empty() {
        None
    } else {
        Some(format_cards(&cards))
    }
}

/// One replay line: actor, what they did, and the pot afterwards.
///
/// # Example
///
/// ```rust
/// use riverlog_engine::hand::{Action, ActionType, Street};
/// # use riverlog_cli::formatters::format_action;
///
/// let action = Action {
///     street: Street::Preflop,
///     action_type: ActionType::Raise,
///     player: "Nate".into(),
///     amount: 60,
///     pot_size_after: 90,
/// };
/// assert_eq!(format_action(&action), "Nate raises to 60 (pot 90)");
/// ```
pub fn format_action(action: &Action) -> String {
    let what = match action.action_type {
        ActionType::PostSb => format!("posts small blind {}", action.amount),
        ActionType::PostBb => format!("posts big blind {}", action.amount),
        ActionType::Fold => "folds".to_string(),
        ActionType::Check => "checks".to_string(),
        ActionType::Call => format!("calls {}", action.amount),
        ActionType::Bet => format!("bets {}", action.amount),
        ActionType::Raise => format!("raises to {}", action.amount),
        ActionType::ShowHand => "shows".to_string(),
        ActionType::Muck => "mucks".to_string(),
    };
    format!("{} {} (pot {})", action.player, what, action.pot_size_after)
}
