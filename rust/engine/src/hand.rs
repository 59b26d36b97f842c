use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Game variant named in the hand-start line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameType {
    /// No Limit Texas Hold'em
    Nlh,
    /// Pot Limit Omaha
    Plo,
}

impl GameType {
    /// Classifies the game name found in a hand-start line.
    pub fn from_game_name(line: &str) -> Option<GameType> {
        let lower = line.to_ascii_lowercase();
        if lower.contains("omaha") {
            Some(GameType::Plo)
        } else if lower.contains("hold'em") || lower.contains("holdem") {
            Some(GameType::Nlh)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Nlh => "NLH",
            GameType::Plo => "PLO",
        }
    }
}

/// Represents a betting street.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Street {
    /// Before the flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

/// Kind of a logged action.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    PostSb,
    PostBb,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    ShowHand,
    Muck,
}

impl ActionType {
    /// Actions whose raw amount is chips added to the pot.
    pub fn adds_raw_amount(&self) -> bool {
        matches!(
            self,
            ActionType::PostSb | ActionType::PostBb | ActionType::Bet | ActionType::Call
        )
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self, ActionType::Bet | ActionType::Raise)
    }
}

/// One action taken inside a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub street: Street,
    pub action_type: ActionType,
    /// Display name of the acting player
    pub player: String,
    /// Raw amount from the log: chips added for posts/bets/calls, the new
    /// street total for raises, 0 for everything else
    pub amount: u64,
    /// Running pot total once this action resolves
    pub pot_size_after: u64,
}

/// A seated player as listed in the stacks line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub seat: u32,
    pub name: String,
    /// Chips at hand start
    pub stack: u64,
    pub is_dealer: bool,
    pub is_hero: bool,
    /// 0 (hidden), 2 (NLH) or 4 (PLO) cards
    pub hole_cards: Vec<Card>,
    /// Cards this player voluntarily showed
    pub showed_hand: Vec<Card>,
    pub winnings: u64,
}

impl Player {
    pub fn new(seat: u32, name: impl Into<String>, stack: u64) -> Self {
        Self {
            seat,
            name: name.into(),
            stack,
            is_dealer: false,
            is_hero: false,
            hole_cards: Vec::new(),
            showed_hand: Vec::new(),
            winnings: 0,
        }
    }
}

/// Community cards, each street filled independently.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub flop: Vec<Card>,
    pub turn: Vec<Card>,
    pub river: Vec<Card>,
}

impl Board {
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.flop.iter().chain(&self.turn).chain(&self.river)
    }
}

/// One played hand, as handed to persistence.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    /// 1-based ordinal in parse order
    pub index: u32,
    pub game_type: Option<GameType>,
    /// Timestamp of the hand-start record, passed through untouched
    pub date_played: String,
    pub dealer_name: Option<String>,
    pub hero_name: Option<String>,
    /// In stacks-line order
    pub players: Vec<Player>,
    pub actions: Vec<Action>,
    pub board: Board,
    /// Distinct winner names in the order they were collected
    pub winners: Vec<String>,
    pub final_pot_size: u64,
}

impl Hand {
    pub fn new(index: u32, date_played: impl Into<String>) -> Self {
        Self {
            index,
            game_type: None,
            date_played: date_played.into(),
            dealer_name: None,
            hero_name: None,
            players: Vec::new(),
            actions: Vec::new(),
            board: Board::default(),
            winners: Vec::new(),
            final_pot_size: 0,
        }
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Records a settlement: the name joins `winners` once and the amount is
    /// added to the final pot. Winnings are credited only when `name` is
    /// seated, so a hand whose stacks line is missing keeps its pot total but
    /// has no per-player winnings. Totals saturate at `u64::MAX`.
    pub fn settle(&mut self, name: &str, amount: u64) {
        if !self.winners.iter().any(|w| w == name) {
            self.winners.push(name.to_string());
        }
        if let Some(p) = self.player_mut(name) {
            p.winnings = p.winnings.saturating_add(amount);
        }
        self.final_pot_size = self.final_pot_size.saturating_add(amount);
    }
}
