//! Replay command handler.
//!
//! Prints parsed hands as text: seats and stacks, the hero's cards, every
//! action grouped by street with the running pot, the board as it was on each
//! street, and the settlement.

use crate::commands::load_hands;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_cards};
use riverlog_engine::cards::Card;
use riverlog_engine::hand::{Hand, Street};
use std::io::Write;

const STREETS: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

pub fn handle_replay_command(
    input: &str,
    hand: Option<u32>,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let outcome = load_hands(input, config.parser_config(), err)?;

    let selected: Vec<&Hand> = outcome
        .hands
        .iter()
        .filter(|h| hand.is_none_or(|n| h.index == n))
        .collect();
    if selected.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "Hand {} not found in {}",
            hand.unwrap_or_default(),
            input
        )));
    }

    for (i, h) in selected.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        replay_hand(h, out)?;
    }
    Ok(())
}

fn replay_hand(hand: &Hand, out: &mut dyn Write) -> Result<(), CliError> {
    let game = hand.game_type.map_or("?", |g| g.as_str());
    writeln!(out, "Hand #{} ({}) {}", hand.index, game, hand.date_played)?;
    writeln!(out, "═══════════════════════════════════════")?;
    if let Some(dealer) = hand.dealer_name.as_deref() {
        writeln!(out, "Dealer: {}", dealer)?;
    }
    for p in &hand.players {
        let mut line = format!("Seat {}: {} ({})", p.seat, p.name, p.stack);
        if p.is_hero {
            line.push_str(" [hero]");
        }
        if !p.hole_cards.is_empty() {
            line.push(' ');
            line.push_str(&format_cards(&p.hole_cards));
        }
        writeln!(out, "{}", line)?;
    }

    for street in STREETS {
        let board = board_through(hand, street);
        let mut actions = hand.actions.iter().filter(|a| a.street == street).peekable();
        if actions.peek().is_none() && (street == Street::Preflop || board.is_empty()) {
            continue;
        }
        match street {
            Street::Preflop => writeln!(out, "Preflop:")?,
            Street::Flop => writeln!(out, "Flop: {}", format_cards(&board))?,
            Street::Turn => writeln!(out, "Turn: {}", format_cards(&board))?,
            Street::River => writeln!(out, "River: {}", format_cards(&board))?,
        }
        for action in actions {
            writeln!(out, "  {}", format_action(action))?;
        }
    }

    for p in hand.players.iter().filter(|p| !p.showed_hand.is_empty()) {
        writeln!(out, "{} showed {}", p.name, format_cards(&p.showed_hand))?;
    }
    if !hand.winners.is_empty() {
        writeln!(out, "Winners: {}", hand.winners.join(", "))?;
    }
    writeln!(out, "Final pot: {}", hand.final_pot_size)?;
    Ok(())
}

/// Board cards visible on `street`.
fn board_through(hand: &Hand, street: Street) -> Vec<Card> {
    let b = &hand.board;
    match street {
        Street::Preflop => Vec::new(),
        Street::Flop => b.flop.clone(),
        Street::Turn => [b.flop.as_slice(), b.turn.as_slice()].concat(),
        Street::River => [b.flop.as_slice(), b.turn.as_slice(), b.river.as_slice()].concat(),
    }
}
