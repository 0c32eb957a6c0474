//! Turn order: who moves next after a play or a pass.

use super::pile::clear_pile;
use super::state::{Hand, Round};
use crate::errors::domain::{DomainError, InvariantKind};

/// Can this hand take the next turn?
pub fn is_eligible(hand: &Hand) -> bool {
    !hand.has_passed && hand.is_in()
}

/// First eligible hand scanning cyclically from `from + 1`.
///
/// The scan covers every seat once, ending on `from` itself.
pub fn next_eligible(hands: &[Hand], from: usize) -> Option<usize> {
    let len = hands.len();
    (1..=len)
        .map(|step| (from + step) % len)
        .find(|&idx| is_eligible(&hands[idx]))
}

pub fn reset_passes(hands: &mut [Hand]) {
    for hand in hands {
        hand.has_passed = false;
    }
}

/// Hand the turn from `from` to the next mover and return its index.
///
/// If nobody is eligible every hand has declined the pile: pass flags are
/// reset and the pile is cleared before scanning again. If the mover owns
/// the play on top of the pile (or is the hand that just moved) the pile
/// went round uncontested and is cleared likewise.
pub fn advance_turn(round: &mut Round, from: usize) -> Result<usize, DomainError> {
    let next = match next_eligible(&round.hands, from) {
        Some(idx) => idx,
        None => {
            reset_passes(&mut round.hands);
            clear_pile(round);
            next_eligible(&round.hands, from).ok_or_else(|| {
                DomainError::invariant(
                    InvariantKind::NoEligiblePlayer,
                    format!(
                        "No eligible player after seat {from} in round {}",
                        round.round_no
                    ),
                )
            })?
        }
    };

    let owns_pile = round
        .last_turn()
        .is_some_and(|turn| turn.player_id == round.hands[next].player_id);
    if owns_pile || next == from {
        clear_pile(round);
        reset_passes(&mut round.hands);
    }

    for hand in round.hands.iter_mut() {
        hand.is_active = false;
    }
    round.hands[next].is_active = true;
    Ok(next)
}
