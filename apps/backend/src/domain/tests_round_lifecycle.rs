//! Round lifecycle scenarios: full plays through `play_turn`, `pass_cards`,
//! and the round transitions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::THREE_OF_SPADES;
use crate::domain::game_config::GameConfig;
use crate::domain::passing::suggest_pass;
use crate::domain::round_lifecycle::{
    pass_cards, play_turn, start_first_round, start_new_round, TurnOutcome,
};
use crate::domain::state::{FinishRank, Game, Hand, PlayerId, Round, RoundPhase};
use crate::domain::test_gens::{active_round, epoch, game_with_players, turn};
use crate::errors::domain::{InvariantKind, ValidationKind};

fn started(n: usize) -> Game {
    let mut game = game_with_players(n, GameConfig::default());
    game.started_at = Some(epoch());
    game
}

fn play(round: &Round, game: &Game, player: PlayerId, aliases: &[&str]) -> TurnOutcome {
    play_turn(round, game, player, aliases, epoch()).unwrap()
}

fn ended_round(ranks: &[FinishRank]) -> Round {
    Round {
        round_no: 1,
        hands: ranks
            .iter()
            .enumerate()
            .map(|(i, &rank)| {
                let mut h = Hand::new(i as PlayerId + 1, vec![]);
                h.end_rank = Some(rank);
                h
            })
            .collect(),
        active_pile: vec![],
        discard_pile: vec![],
        excess_cards: vec![],
        started_at: Some(epoch()),
        ended_at: Some(epoch()),
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(2024)
}

#[test]
fn lone_power_card_takes_the_pile_and_leads_again() {
    let game = started(4);
    let mut round = active_round(&[&["3C", "5H"], &["6H"], &["7H"], &["8H"]]);
    round.active_pile.push(turn(4, &["AS"]));

    let out = play(&round, &game, 1, &["3C"]);
    assert_eq!(
        out.log,
        vec![
            "P1 throws down: 3C".to_string(),
            "P1 takes the pile with the power card (3C)!".to_string(),
            "it's P1's turn!".to_string(),
        ]
    );
    assert!(out.round.active_pile.is_empty());
    assert_eq!(out.round.discard_pile.len(), 2);
    assert!(out.round.discard_pile[1].took_the_pile);
    assert!(out.round.hands[0].is_active);
    assert!(out.round.hands.iter().all(|h| !h.has_passed));
}

#[test]
fn going_out_on_the_power_card_hands_the_lead_on() {
    let game = started(4);
    let round = active_round(&[&["3C"], &["6H"], &["7H"], &["8H"]]);

    let out = play(&round, &game, 1, &["3C"]);
    assert_eq!(out.log[2], "P1 is out of cards!");
    assert_eq!(out.log[3], "it's P2's turn!");
    assert_eq!(out.round.hands[0].end_rank, Some(0));
    assert!(out.round.hands[1].is_active);
    assert!(out.round.active_pile.is_empty());
}

#[test]
fn going_out_on_an_explosion_lets_the_next_seat_lead() {
    let game = started(4);
    let round = active_round(&[&["7H", "7S", "9H"], &["7C", "7D"], &["5H"], &["4H"]]);

    let out = play(&round, &game, 1, &["7H", "7S"]);
    let out = play(&out.round, &game, 2, &["7C", "7D"]);
    assert_eq!(
        out.log,
        vec![
            "P2 throws down: 7C, 7D",
            "P2 takes the pile with 4 of a kind!",
            "P2 is out of cards!",
            "it's P3's turn!",
        ]
    );
    assert_eq!(out.round.hands[1].end_rank, Some(0));
    assert!(out.round.hands[2].is_active);
    assert!(out.round.active_pile.is_empty());
    assert!(out.round.hands.iter().all(|h| !h.has_passed));
}

#[test]
fn two_pairs_of_sevens_explode() {
    let game = started(4);
    let round = active_round(&[
        &["7H", "7S", "9H"],
        &["7C", "7D", "KH"],
        &["5H", "6H", "8H"],
        &["4H", "4S", "JH"],
    ]);

    let out = play(&round, &game, 1, &["7H", "7S"]);
    assert_eq!(out.log, vec!["P1 throws down: 7H, 7S", "it's P2's turn!"]);

    let out = play(&out.round, &game, 2, &["7C", "7D"]);
    assert_eq!(out.log[1], "P2 takes the pile with 4 of a kind!");
    assert_eq!(out.log[2], "it's P2's turn!");
    assert!(out.round.active_pile.is_empty());
    assert_eq!(out.round.discard_pile.len(), 2);
}

#[test]
fn explosions_can_be_disabled() {
    let mut game = started(4);
    game.config = game.config.with_explode_pile_count(0);
    let round = active_round(&[&["7H", "7S", "9H"], &["7C", "7D", "KH"], &["5H"], &["4H"]]);

    let out = play(&round, &game, 1, &["7H", "7S"]);
    let out = play(&out.round, &game, 2, &["7C", "7D"]);
    assert_eq!(out.round.active_pile.len(), 2);
    assert!(out.round.hands[2].is_active);
}

#[test]
fn finishing_order_becomes_ranks() {
    let game = started(3);
    let round = active_round(&[&["5H"], &["6H", "9S"], &["4H", "8S"]]);

    let out = play(&round, &game, 1, &["5H"]);
    assert_eq!(out.round.hands[0].end_rank, Some(0));
    assert!(out.round.hands[1].is_active);

    let out = play(&out.round, &game, 2, &["6H"]);
    let out = play(&out.round, &game, 3, &["8S"]);
    assert!(out.round.hands[1].is_active);

    let out = play(&out.round, &game, 2, &["9S"]);
    assert_eq!(out.log, vec!["P2 throws down: 9S", "P2 is out of cards!"]);
    assert_eq!(out.round.phase(), RoundPhase::Ended);
    let ranks: Vec<_> = out.round.hands.iter().map(|h| h.end_rank).collect();
    assert_eq!(ranks, vec![Some(0), Some(1), Some(2)]);
    assert!(out.round.hands.iter().all(|h| !h.is_active));
}

#[test]
fn passing_round_the_table_clears_for_the_owner() {
    let game = started(3);
    let round = active_round(&[&["KH", "4D"], &["6H", "9S"], &["4H", "8S"]]);

    let out = play(&round, &game, 1, &["KH"]);
    let out = play(&out.round, &game, 2, &[]);
    assert_eq!(out.log, vec!["P2 passes :(", "it's P3's turn!"]);
    let out = play(&out.round, &game, 3, &[]);
    assert_eq!(out.log[1], "it's P1's turn!");
    assert!(out.round.active_pile.is_empty());
    assert!(out.round.hands.iter().all(|h| !h.has_passed));
}

#[test]
fn out_of_turn_play_is_rejected_without_change() {
    let game = started(4);
    let round = active_round(&[&["5H"], &["6H"], &["7H"], &["8H"]]);
    let before = round.clone();

    let err = play_turn(&round, &game, 2, &["6H"], epoch()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(round, before);
}

#[test]
fn bad_plays_are_rejected() {
    let game = started(3);
    let mut round = active_round(&[&["5H", "6H"], &["6S"], &["7H"]]);
    round.active_pile.push(turn(3, &["9D"]));

    let err = play_turn(&round, &game, 1, &["6H"], epoch()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::IllegalPlay));

    let err = play_turn(&round, &game, 1, &["AS"], epoch()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CardNotInHand));

    let err = play_turn(&round, &game, 1, &["ZZ"], epoch()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::ParseCard));

    let err = play_turn(&round, &game, 42, &["5H"], epoch()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PlayerNotInRound));

    round.ended_at = Some(epoch());
    let err = play_turn(&round, &game, 1, &["5H"], epoch()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NoCurrentRound));
}

#[test]
fn first_round_is_led_by_the_three_of_spades() {
    let game = game_with_players(4, GameConfig::default());
    let round = start_first_round(&game, &mut rng(), epoch()).unwrap();

    assert_eq!(round.round_no, 1);
    assert!(round.is_active());
    assert_eq!(round.card_count(), 52);
    let active: Vec<_> = round.hands.iter().filter(|h| h.is_active).collect();
    assert_eq!(active.len(), 1);
    assert!(active[0].cards.contains(&THREE_OF_SPADES));
    assert!(round.hands.iter().all(|h| h.ready_to_play && h.start_rank.is_none()));
}

#[test]
fn first_round_checks_the_table() {
    let game = game_with_players(2, GameConfig::default());
    let err = start_first_round(&game, &mut rng(), epoch()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NotEnoughPlayers));

    let game = started(4);
    let err = start_first_round(&game, &mut rng(), epoch()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::GameAlreadyStarted));
}

#[test]
fn four_player_reseed_and_exchange() {
    let game = started(4);
    let previous = ended_round(&[0, 1, 2, 3]);
    let round = start_new_round(&previous, &game, &mut rng(), epoch()).unwrap();

    assert_eq!(round.round_no, 2);
    let starts: Vec<_> = round.hands.iter().map(|h| h.start_rank).collect();
    assert_eq!(starts, vec![Some(0), Some(1), Some(2), Some(3)]);
    assert!(round.hands.iter().all(|h| !h.ready_to_play));
    assert!(round.hands[3].is_active);

    let err = play_turn(&round, &game, 4, &[round.hands[3].cards[0].alias()], epoch())
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::AwaitingCardPass));

    let catalog = game.config.catalog();
    let aliases = |cards: Vec<crate::domain::Card>| -> Vec<String> {
        cards.iter().map(|c| c.alias()).collect()
    };

    let scum_gives = aliases(suggest_pass(&round.hands[3].cards, 2, &catalog));
    let out = pass_cards(&round, &game, 4, 1, &scum_gives).unwrap();
    assert_eq!(out.log, vec!["P4 passes 2 cards to P1"]);
    let round = out.round;

    let president_gives = aliases(round.hands[0].cards[..2].to_vec());
    let round = pass_cards(&round, &game, 1, 4, &president_gives).unwrap().round;

    let vice_gives = aliases(round.hands[1].cards[..1].to_vec());
    let round = pass_cards(&round, &game, 2, 3, &vice_gives).unwrap().round;

    let high_gives = aliases(suggest_pass(&round.hands[2].cards, 1, &catalog));
    let out = pass_cards(&round, &game, 3, 2, &high_gives).unwrap();
    assert_eq!(out.log, vec!["P3 passes 1 card to P2"]);
    let round = out.round;

    assert!(round.hands.iter().all(|h| h.ready_to_play && h.cards.len() == 13));
    assert_eq!(round.card_count(), 52);
    assert!(round.hands[3].is_active);
}

#[test]
fn three_player_reseed_has_a_neutral_middle() {
    let game = started(3);
    let previous = ended_round(&[2, 0, 1]);
    let round = start_new_round(&previous, &game, &mut rng(), epoch()).unwrap();

    let ready: Vec<_> = round.hands.iter().map(|h| h.ready_to_play).collect();
    assert_eq!(ready, vec![false, false, true]);
    assert!(round.hands[0].is_active);

    let catalog = game.config.catalog();
    let best: Vec<String> = suggest_pass(&round.hands[0].cards, 1, &catalog)
        .iter()
        .map(|c| c.alias())
        .collect();
    let err = pass_cards(&round, &game, 1, 3, &best).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::WrongPassRecipient));
    let round = pass_cards(&round, &game, 1, 2, &best).unwrap().round;
    assert_eq!(round.hands[0].cards.len(), 16);
    assert_eq!(round.hands[1].cards.len(), 18);
}

#[test]
fn five_and_six_player_reseeds() {
    let game = started(5);
    let round = start_new_round(&ended_round(&[0, 1, 2, 3, 4]), &game, &mut rng(), epoch()).unwrap();
    let ready: Vec<_> = round.hands.iter().map(|h| h.ready_to_play).collect();
    assert_eq!(ready, vec![false, false, true, false, false]);
    assert!(round.hands[4].is_active);

    let game = started(6);
    let round =
        start_new_round(&ended_round(&[5, 4, 3, 2, 1, 0]), &game, &mut rng(), epoch()).unwrap();
    let ready: Vec<_> = round.hands.iter().map(|h| h.ready_to_play).collect();
    assert_eq!(ready, vec![false, false, true, true, false, false]);
    assert!(round.hands[0].is_active);
}

#[test]
fn reseed_needs_a_finished_fully_ranked_round() {
    let game = started(4);
    let mut previous = ended_round(&[0, 1, 2, 3]);
    previous.ended_at = None;
    let err = start_new_round(&previous, &game, &mut rng(), epoch()).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::PreviousRoundUnterminated)
    );

    let mut previous = ended_round(&[0, 1, 2, 3]);
    previous.hands[2].end_rank = None;
    let err = start_new_round(&previous, &game, &mut rng(), epoch()).unwrap_err();
    assert_eq!(err.invariant_kind(), Some(&InvariantKind::MissingRank));
}

#[test]
fn reseeded_deal_is_reproducible() {
    let game = started(4);
    let previous = ended_round(&[0, 1, 2, 3]);
    let a = start_new_round(&previous, &game, &mut rng(), epoch()).unwrap();
    let b = start_new_round(&previous, &game, &mut rng(), epoch()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn passing_outside_a_live_round_is_rejected() {
    let game = started(4);
    let previous = ended_round(&[0, 1, 2, 3]);
    let err = pass_cards(&previous, &game, 4, 1, &["AS"]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NoCurrentRound));
}
