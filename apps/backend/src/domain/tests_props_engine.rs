//! Property-based tests for the round engine.
//!
//! Whole rounds are driven by a random legal-move bot; every intermediate
//! snapshot is checked for card conservation and a single active hand.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::player_view::PlayerView;
use crate::domain::round_lifecycle::{pass_cards, play_turn, start_first_round, start_new_round};
use crate::domain::rules::can_play;
use crate::domain::state::{Game, Round, Turn};
use crate::domain::test_gens::{self, epoch, game_with_players, hands_from_flags, TableSetup};
use crate::domain::test_prelude;
use crate::domain::turn_order::{is_eligible, next_eligible};
use crate::domain::{CardCatalog, PlayerId};

const STEP_LIMIT: usize = 20_000;

fn aliases(cards: &[crate::domain::Card]) -> Vec<String> {
    cards.iter().map(|c| c.alias()).collect()
}

/// Take one step: a pending pass if anyone owes cards, otherwise a random
/// legal move for the active hand. Passing is only chosen on a live pile.
fn step(round: &Round, game: &Game, rng: &mut ChaCha8Rng) -> Round {
    if let Some(owing) = round.hands.iter().find(|h| !h.ready_to_play) {
        let view = PlayerView::for_player(round, game, owing.player_id).unwrap();
        let duty = view.pass_obligation.clone().unwrap();
        let cards = if duty.high_cards {
            duty.suggested.clone()
        } else {
            view.hand[..duty.cards_owed].to_vec()
        };
        return pass_cards(round, game, owing.player_id, duty.receiver_id, &aliases(&cards))
            .unwrap()
            .round;
    }

    let active = round.active_hand_index().unwrap();
    let player: PlayerId = round.hands[active].player_id;
    let view = PlayerView::for_player(round, game, player).unwrap();
    let plays = view.legal_plays();
    let pile_live = view.play_to_beat.is_some();

    let chosen: Vec<String> = if pile_live && (plays.is_empty() || rng.random_bool(0.3)) {
        Vec::new()
    } else {
        let pick = rng.random_range(0..plays.len());
        aliases(&plays[pick])
    };
    play_turn(round, game, player, &chosen, epoch()).unwrap().round
}

fn check_snapshot(round: &Round, deck_size: usize) -> Result<(), TestCaseError> {
    prop_assert_eq!(round.card_count(), deck_size, "cards must be conserved");
    let active = round.hands.iter().filter(|h| h.is_active).count();
    prop_assert!(active <= 1, "at most one active hand, found {}", active);
    if round.is_active() {
        prop_assert_eq!(active, 1, "a live round always has a mover");
    }
    Ok(())
}

fn play_out(
    mut round: Round,
    game: &Game,
    rng: &mut ChaCha8Rng,
    deck_size: usize,
) -> Result<Round, TestCaseError> {
    for _ in 0..STEP_LIMIT {
        check_snapshot(&round, deck_size)?;
        if !round.is_active() {
            return Ok(round);
        }
        round = step(&round, game, rng);
    }
    Err(TestCaseError::fail("round did not finish"))
}

fn check_ranks(round: &Round) -> Result<(), TestCaseError> {
    let mut ranks: Vec<usize> = round
        .hands
        .iter()
        .map(|h| h.end_rank.map(usize::from))
        .collect::<Option<_>>()
        .ok_or_else(|| TestCaseError::fail("unranked hand at round end"))?;
    ranks.sort_unstable();
    prop_assert_eq!(ranks, (0..round.hands.len()).collect::<Vec<_>>());
    Ok(())
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Two full rounds (a deal and a re-seed with card passing) keep every
    /// card and end with contiguous ranks.
    #[test]
    fn prop_rounds_conserve_cards_and_rank_contiguously(setup in test_gens::table_setup()) {
        let TableSetup { players, config, seed } = setup;
        let mut game = game_with_players(players, config);
        let deck_size = usize::from(config.deck_count) * 52;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let first = start_first_round(&game, &mut rng, epoch()).unwrap();
        game.started_at = Some(epoch());
        let first = play_out(first, &game, &mut rng, deck_size)?;
        check_ranks(&first)?;

        let second = start_new_round(&first, &game, &mut rng, epoch()).unwrap();
        prop_assert_eq!(second.round_no, 2);
        let second = play_out(second, &game, &mut rng, deck_size)?;
        check_ranks(&second)?;
    }

    /// A lone power card is legal on any pile.
    #[test]
    fn prop_power_card_supremacy(
        previous in test_gens::uniform_set(),
        power in test_gens::card(),
    ) {
        let catalog = CardCatalog::new(power);
        let turn = Turn { cards: previous, player_id: 1, played_at: epoch(), took_the_pile: false };
        prop_assert!(can_play(&catalog, &[power], Some(&turn)));
        prop_assert!(can_play(&catalog, &[power], None));
    }

    /// `next_eligible` returns the first eligible seat after `from`, never
    /// jumping over an eligible one.
    #[test]
    fn prop_next_eligible_never_skips((flags, from) in test_gens::seat_flags()) {
        let hands = hands_from_flags(&flags);
        let len = hands.len();
        match next_eligible(&hands, from) {
            Some(next) => {
                prop_assert!(is_eligible(&hands[next]));
                let mut idx = (from + 1) % len;
                while idx != next {
                    prop_assert!(!is_eligible(&hands[idx]), "skipped eligible seat {}", idx);
                    idx = (idx + 1) % len;
                }
            }
            None => prop_assert!(hands.iter().all(|h| !is_eligible(h))),
        }
    }
}
