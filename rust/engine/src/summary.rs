//! Session rollups over parsed hands.
//!
//! These are consumers of the hand list: totals for a whole upload, heads-up
//! VPIP/PFR for one player, and opponent renames applied after the fact.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::hand::{ActionType, Hand, Street};

pub const HEADS_UP: &str = "Heads-Up";

/// Totals for one uploaded log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_hands: usize,
    /// Sum of `finalPotSize` across hands
    pub total_profit: u64,
    /// `NLH`, `PLO`, or `Heads-Up` when the first hand seats exactly two
    pub game_type: Option<String>,
    pub hero_name: Option<String>,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub duration_minutes: Option<i64>,
}

pub fn summarize(hands: &[Hand]) -> SessionSummary {
    let first = hands.first();
    let game_type = first.and_then(|h| {
        if h.players.len() == 2 {
            Some(HEADS_UP.to_string())
        } else {
            h.game_type.map(|g| g.as_str().to_string())
        }
    });

    let stamps: Vec<DateTime<Utc>> = hands
        .iter()
        .filter_map(|h| DateTime::parse_from_rfc3339(&h.date_played).ok())
        .map(|d| d.with_timezone(&Utc))
        .collect();
    let start = stamps.iter().min();
    let end = stamps.iter().max();
    let fmt = |d: &DateTime<Utc>| d.to_rfc3339_opts(SecondsFormat::Secs, true);

    SessionSummary {
        total_hands: hands.len(),
        total_profit: hands
            .iter()
            .fold(0u64, |total, h| total.saturating_add(h.final_pot_size)),
        game_type,
        hero_name: first.and_then(|h| h.hero_name.clone()),
        started_at: start.map(fmt),
        ended_at: end.map(fmt),
        duration_minutes: start.zip(end).map(|(s, e)| (*e - *s).num_minutes()),
    }
}

/// Heads-up preflop tendencies of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub player: String,
    pub hands: usize,
    /// Percent of hands with voluntary preflop money, rounded
    pub vpip: u32,
    /// Percent of hands with a preflop bet or raise, rounded
    pub pfr: u32,
}

/// VPIP and PFR over the two-handed hands `player` sat in.
///
/// The dealer posts the small blind heads-up. A small blind only counts as
/// VPIP when it raises; completing is not voluntary. A big blind counts when
/// it calls or raises an opponent's raise, or raises an unraised pot.
pub fn heads_up_stats(hands: &[Hand], player: &str) -> PlayerStats {
    let mut counted = 0usize;
    let mut vpip = 0usize;
    let mut pfr = 0usize;

    for hand in hands.iter().filter(|h| h.players.len() == 2) {
        let Some(seat) = hand.player(player) else {
            continue;
        };
        counted += 1;

        let preflop: Vec<_> = hand
            .actions
            .iter()
            .filter(|a| a.street == Street::Preflop)
            .filter(|a| !matches!(a.action_type, ActionType::PostSb | ActionType::PostBb))
            .collect();
        let raised = preflop
            .iter()
            .any(|a| a.player == player && a.action_type.is_aggressive());
        if raised {
            pfr += 1;
        }

        let voluntary = if seat.is_dealer {
            raised
        } else {
            preflop.iter().enumerate().any(|(i, a)| {
                if a.player != player {
                    return false;
                }
                let facing_raise = preflop[..i]
                    .iter()
                    .any(|p| p.player != player && p.action_type.is_aggressive());
                a.action_type.is_aggressive()
                    || (facing_raise && a.action_type == ActionType::Call)
            })
        };
        if voluntary {
            vpip += 1;
        }
    }

    let pct = |n: usize| {
        if counted == 0 {
            0
        } else {
            ((n as f64 / counted as f64) * 100.0).round() as u32
        }
    };
    PlayerStats {
        player: player.to_string(),
        hands: counted,
        vpip: pct(vpip),
        pfr: pct(pfr),
    }
}

/// Applies opponent renames to players, winners, actions, dealer and hero.
pub fn rename_players(hands: &mut [Hand], renames: &HashMap<String, String>) {
    let rename = |name: &mut String| {
        if let Some(to) = renames.get(name.as_str()) {
            *name = to.clone();
        }
    };
    for hand in hands.iter_mut() {
        hand.players.iter_mut().for_each(|p| rename(&mut p.name));
        hand.winners.iter_mut().for_each(rename);
        hand.actions.iter_mut().for_each(|a| rename(&mut a.player));
        if let Some(d) = hand.dealer_name.as_mut() {
            rename(d);
        }
        if let Some(h) = hand.hero_name.as_mut() {
            rename(h);
        }
    }
}
