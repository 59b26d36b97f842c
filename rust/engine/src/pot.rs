//! Pot Accountant: turns action lines into [`Action`]s with a running pot.
//!
//! Amounts in the log mean different things per verb. Posts, bets and calls
//! name the chips added by that action. Raises name the player's new total for
//! the street ("raises to 60"), so the chips added are the raise-to amount
//! minus what the player already committed on that street.

use crate::hand::{Action, ActionType, Street};
use crate::line::{action_verb, display_name, scan_amount, split_actor};

/// An action line reduced to actor, kind and raw number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLine {
    pub player: String,
    pub action_type: ActionType,
    pub raw_amount: u64,
}

/// Maps a verb (and for posts, the blind named after it) to an action type.
///
/// Returns `None` for verbs with no tracked meaning, such as straddle posts.
pub fn action_type(verb: &str, rest: &str) -> Option<ActionType> {
    match verb {
        "posts" if rest.contains("small blind") => Some(ActionType::PostSb),
        "posts" if rest.contains("big blind") => Some(ActionType::PostBb),
        "calls" => Some(ActionType::Call),
        "raises" => Some(ActionType::Raise),
        "bets" => Some(ActionType::Bet),
        "folds" => Some(ActionType::Fold),
        "checks" => Some(ActionType::Check),
        "shows" => Some(ActionType::ShowHand),
        "mucks" => Some(ActionType::Muck),
        _ => None,
    }
}

/// Reads an action line. Lines without a known verb yield `None`.
///
/// # Examples
///
/// ```
/// use riverlog_engine::hand::ActionType;
/// use riverlog_engine::pot::read_action;
///
/// let line = read_action("\"Bob @ k2\" raises to 1,200 and go all in").unwrap();
/// assert_eq!(line.player, "Bob");
/// assert_eq!(line.action_type, ActionType::Raise);
/// assert_eq!(line.raw_amount, 1200);
/// ```
pub fn read_action(entry: &str) -> Option<ActionLine> {
    let verb = action_verb(entry)?;
    let (actor, rest) = split_actor(entry)?;
    let action_type = action_type(verb, rest)?;
    // only amount-bearing verbs read a number; a shown `10♠` is not a bet
    let raw_amount = if action_type.adds_raw_amount() || action_type == ActionType::Raise {
        scan_amount(rest)
    } else {
        0
    };
    Some(ActionLine {
        player: display_name(actor),
        action_type,
        raw_amount,
    })
}

/// Chips `player` has put in on `street` so far.
///
/// Posts, bets and calls add to the running commitment; a raise replaces it
/// with its raise-to amount.
pub fn street_commitment(actions: &[Action], player: &str, street: Street) -> u64 {
    actions
        .iter()
        .filter(|a| a.player == player && a.street == street)
        .fold(0, |committed, a| match a.action_type {
            ActionType::Raise => a.amount,
            t if t.adds_raw_amount() => committed.saturating_add(a.amount),
            _ => committed,
        })
}

/// Chips an action adds to the pot. Raises below the prior commitment add 0.
pub fn pot_delta(
    actions: &[Action],
    street: Street,
    action_type: ActionType,
    player: &str,
    raw_amount: u64,
) -> u64 {
    match action_type {
        t if t.adds_raw_amount() => raw_amount,
        ActionType::Raise => {
            raw_amount.saturating_sub(street_commitment(actions, player, street))
        }
        _ => 0,
    }
}

/// Appends `line` as an action on `street` and returns the chips it added.
///
/// `potSizeAfter` continues from the previous action and is never reset
/// between streets. It saturates at `u64::MAX` rather than wrapping.
pub fn record_action(actions: &mut Vec<Action>, street: Street, line: ActionLine) -> u64 {
    let delta = pot_delta(
        actions,
        street,
        line.action_type,
        &line.player,
        line.raw_amount,
    );
    let pot_before = actions.last().map_or(0, |a| a.pot_size_after);
    actions.push(Action {
        street,
        action_type: line.action_type,
        player: line.player,
        amount: line.raw_amount,
        pot_size_after: pot_before.saturating_add(delta),
    });
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(actions: &mut Vec<Action>, street: Street, entry: &str) -> u64 {
        let line = read_action(entry).unwrap_or_else(|| panic!("not an action: {}", entry));
        record_action(actions, street, line)
    }

    #[test]
    fn raise_to_after_bet_adds_full_amount() {
        let mut actions = Vec::new();
        assert_eq!(act(&mut actions, Street::Flop, "\"A @ 1\" bets 10"), 10);
        assert_eq!(act(&mut actions, Street::Flop, "\"B @ 2\" raises to 30"), 30);
        assert_eq!(actions[1].pot_size_after, 40);
        assert_eq!(actions[1].amount, 30);
    }

    #[test]
    fn reraise_subtracts_own_street_commitment() {
        let mut actions = Vec::new();
        act(&mut actions, Street::Flop, "\"A @ 1\" bets 10");
        act(&mut actions, Street::Flop, "\"B @ 2\" raises to 30");
        // A already has 10 in
        assert_eq!(act(&mut actions, Street::Flop, "\"A @ 1\" raises to 90"), 80);
        // B's earlier raise resets its commitment to 30
        assert_eq!(act(&mut actions, Street::Flop, "\"B @ 2\" raises to 200"), 170);
        assert_eq!(actions.last().unwrap().pot_size_after, 10 + 30 + 80 + 170);
    }

    #[test]
    fn blinds_count_toward_preflop_raise() {
        let mut actions = Vec::new();
        act(&mut actions, Street::Preflop, "\"A @ 1\" posts a small blind of 10");
        act(&mut actions, Street::Preflop, "\"B @ 2\" posts a big blind of 20");
        assert_eq!(act(&mut actions, Street::Preflop, "\"A @ 1\" raises to 60"), 50);
        assert_eq!(actions[0].action_type, ActionType::PostSb);
        assert_eq!(actions[1].action_type, ActionType::PostBb);
        assert_eq!(actions[2].pot_size_after, 80);
    }

    #[test]
    fn new_street_resets_commitment_but_not_pot() {
        let mut actions = Vec::new();
        act(&mut actions, Street::Preflop, "\"A @ 1\" bets 50");
        assert_eq!(act(&mut actions, Street::Flop, "\"A @ 1\" raises to 40"), 40);
        assert_eq!(actions[1].pot_size_after, 90);
    }

    #[test]
    fn malformed_raise_floors_at_zero() {
        let mut actions = Vec::new();
        act(&mut actions, Street::Turn, "\"A @ 1\" bets 100");
        assert_eq!(act(&mut actions, Street::Turn, "\"A @ 1\" raises to 60"), 0);
        assert_eq!(actions[1].pot_size_after, 100);
    }

    #[test]
    fn checks_folds_and_shows_add_nothing() {
        let mut actions = Vec::new();
        act(&mut actions, Street::River, "\"A @ 1\" bets 25");
        assert_eq!(act(&mut actions, Street::River, "\"B @ 2\" checks"), 0);
        assert_eq!(act(&mut actions, Street::River, "\"B @ 2\" folds"), 0);
        assert_eq!(act(&mut actions, Street::River, "\"A @ 1\" shows a 10♠, 10♣."), 0);
        assert!(actions.iter().skip(1).all(|a| a.amount == 0));
        assert!(actions.iter().all(|a| a.pot_size_after == 25));
    }

    #[test]
    fn huge_amounts_saturate() {
        let mut actions = Vec::new();
        act(&mut actions, Street::Flop, "\"A @ 1\" bets 18446744073709551615");
        assert_eq!(act(&mut actions, Street::Flop, "\"B @ 2\" calls 5"), 5);
        assert_eq!(actions[1].pot_size_after, u64::MAX);
        act(&mut actions, Street::Flop, "\"A @ 1\" calls 7");
        assert_eq!(street_commitment(&actions, "A", Street::Flop), u64::MAX);
    }

    #[test]
    fn non_numeric_amount_defaults_to_zero() {
        let line = read_action("\"A @ 1\" calls lots").unwrap();
        assert_eq!(line.raw_amount, 0);
    }

    #[test]
    fn unknown_posts_are_skipped() {
        assert_eq!(read_action("\"A @ 1\" posts a straddle of 40"), None);
        assert_eq!(read_action("\"A @ 1\" stands up"), None);
    }
}
