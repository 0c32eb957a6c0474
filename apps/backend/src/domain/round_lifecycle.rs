//! Round lifecycle: dealing, playing, passing, and re-seeding.
//!
//! Every operation takes the current snapshot by reference and returns a
//! fresh one. A failed operation leaves the caller's snapshot untouched.

use rand::Rng;
use time::OffsetDateTime;

use super::cards_parsing::try_parse_cards;
use super::cards_types::THREE_OF_SPADES;
use super::dealing::shuffle_and_deal;
use super::passing::{self, cards_owed};
use super::pile::{apply_play, clear_pile, detect_pile_clear, mark_others_passed};
use super::ranking::{finish_round, rank_hand, round_should_end};
use super::rules::{join_aliases, validate_play, MAX_PLAYERS, MIN_PLAYERS};
use super::state::{Game, Hand, PlayerId, Round};
use super::turn_order::advance_turn;
use crate::errors::domain::{DomainError, InvariantKind, ValidationKind};

/// A new round snapshot plus the action-log lines the move produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub round: Round,
    pub log: Vec<String>,
}

/// Deal a fresh, not-yet-started round to the game's players in seat order.
pub fn deal_new_round<R: Rng + ?Sized>(
    game: &Game,
    round_no: u32,
    rng: &mut R,
) -> Result<Round, DomainError> {
    game.config.validate()?;
    let catalog = game.config.catalog();
    let deal = shuffle_and_deal(&catalog, game.config.deck_count, game.players.len(), rng)?;

    let hands = game
        .players
        .iter()
        .zip(deal.hands)
        .map(|(player, cards)| Hand::new(player.id, cards))
        .collect();

    Ok(Round {
        round_no,
        hands,
        active_pile: Vec::new(),
        discard_pile: Vec::new(),
        excess_cards: deal.excess,
        started_at: None,
        ended_at: None,
    })
}

/// Deal and start the first round of a game.
///
/// The hand holding the three of spades leads. If every three of spades
/// ended up in the excess, the hand holding the lowest card leads instead.
pub fn start_first_round<R: Rng + ?Sized>(
    game: &Game,
    rng: &mut R,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    if game.started_at.is_some() {
        return Err(DomainError::validation(
            ValidationKind::GameAlreadyStarted,
            format!("Game {} has already started", game.id),
        ));
    }
    check_table_size(game)?;

    let mut round = deal_new_round(game, 1, rng)?;
    let starter = first_round_starter(&round, game)?;
    round.hands[starter].is_active = true;
    round.started_at = Some(now);
    Ok(round)
}

/// Play `aliases` for `player_id`, or pass when `aliases` is empty.
pub fn play_turn<S: AsRef<str>>(
    round: &Round,
    game: &Game,
    player_id: PlayerId,
    aliases: &[S],
    now: OffsetDateTime,
) -> Result<TurnOutcome, DomainError> {
    require_active(round)?;
    let idx = round
        .hand_index(player_id)
        .ok_or_else(|| not_in_round(player_id))?;
    let hand = &round.hands[idx];
    if !hand.is_active {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("It is not player {player_id}'s turn!"),
        ));
    }
    if !hand.ready_to_play {
        return Err(DomainError::validation(
            ValidationKind::AwaitingCardPass,
            format!("Player {player_id} must pass cards before playing"),
        ));
    }

    let catalog = game.config.catalog();
    let name = game.player_name(player_id);
    let mut next = round.clone();
    let mut log = Vec::new();

    if aliases.is_empty() {
        next.hands[idx].has_passed = true;
        log.push(format!("{name} passes :("));
    } else {
        let cards = try_parse_cards(aliases)?;
        validate_play(&catalog, &cards, next.last_turn())?;
        apply_play(&mut next, idx, &cards, now)?;
        log.push(format!("{name} throws down: {}", join_aliases(&cards)));

        if let Some(reason) =
            detect_pile_clear(&next.active_pile, &catalog, game.config.explode_pile_count)
        {
            clear_pile(&mut next);
            mark_others_passed(&mut next, player_id);
            log.push(format!("{name} takes the pile with {reason}!"));
        }

        if next.hands[idx].cards.is_empty() {
            rank_hand(&mut next, idx);
            log.push(format!("{name} is out of cards!"));
        }
    }

    next.hands[idx].is_active = false;

    if round_should_end(&next.hands) {
        finish_round(&mut next, now);
    } else {
        let mover = advance_turn(&mut next, idx)?;
        let mover_name = game.player_name(next.hands[mover].player_id);
        log.push(format!("it's {mover_name}'s turn!"));
    }

    Ok(TurnOutcome { round: next, log })
}

/// Hand the owed cards from `giver` to `receiver`.
pub fn pass_cards<S: AsRef<str>>(
    round: &Round,
    game: &Game,
    giver: PlayerId,
    receiver: PlayerId,
    aliases: &[S],
) -> Result<TurnOutcome, DomainError> {
    require_active(round)?;
    let cards = try_parse_cards(aliases)?;
    let mut next = round.clone();
    passing::pass_cards(&mut next, &game.config.catalog(), giver, receiver, &cards)?;

    let log = vec![format!(
        "{} passes {} card{} to {}",
        game.player_name(giver),
        cards.len(),
        if cards.len() == 1 { "" } else { "s" },
        game.player_name(receiver)
    )];
    Ok(TurnOutcome { round: next, log })
}

/// Deal the next round, seeding start ranks from the finished `previous`.
///
/// Players who owe cards start blocked until they pass. The worst-ranked
/// player leads.
pub fn start_new_round<R: Rng + ?Sized>(
    previous: &Round,
    game: &Game,
    rng: &mut R,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    if previous.ended_at.is_none() {
        return Err(DomainError::validation(
            ValidationKind::PreviousRoundUnterminated,
            format!("Round {} has not ended", previous.round_no),
        ));
    }
    check_table_size(game)?;

    let mut start_ranks = Vec::with_capacity(game.players.len());
    for player in &game.players {
        let rank = previous
            .hand(player.id)
            .and_then(|h| h.end_rank)
            .ok_or_else(|| {
                DomainError::invariant(
                    InvariantKind::MissingRank,
                    format!(
                        "player {} was not assigned a rank in round {}",
                        player.id, previous.round_no
                    ),
                )
            })?;
        start_ranks.push(rank);
    }

    let mut round = deal_new_round(game, previous.round_no + 1, rng)?;
    let hand_count = round.hands.len();
    for (hand, rank) in round.hands.iter_mut().zip(start_ranks) {
        hand.start_rank = Some(rank);
        hand.ready_to_play = cards_owed(rank, hand_count) == 0;
    }

    let leader = round
        .hands
        .iter()
        .enumerate()
        .max_by_key(|(_, h)| h.start_rank)
        .map(|(idx, _)| idx)
        .ok_or_else(|| {
            DomainError::invariant(InvariantKind::MissingRank, "round has no hands")
        })?;
    round.hands[leader].is_active = true;
    round.started_at = Some(now);
    Ok(round)
}

fn first_round_starter(round: &Round, game: &Game) -> Result<usize, DomainError> {
    if let Some(idx) = round
        .hands
        .iter()
        .position(|h| h.cards.contains(&THREE_OF_SPADES))
    {
        return Ok(idx);
    }

    let catalog = game.config.catalog();
    round
        .hands
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| {
            h.cards
                .iter()
                .map(|c| catalog.ordinal(*c))
                .min()
                .map(|low| (low, idx))
        })
        .min()
        .map(|(_, idx)| idx)
        .ok_or_else(|| {
            DomainError::invariant(
                InvariantKind::NoEligiblePlayer,
                "no hand holds any cards after the deal",
            )
        })
}

fn check_table_size(game: &Game) -> Result<(), DomainError> {
    let count = game.players.len();
    if count < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("At least {MIN_PLAYERS} players are needed, game {} has {count}", game.id),
        ));
    }
    if count > MAX_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::TooManyPlayers,
            format!("At most {MAX_PLAYERS} players can sit at one table"),
        ));
    }
    Ok(())
}

fn require_active(round: &Round) -> Result<(), DomainError> {
    if round.is_active() {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::NoCurrentRound,
            format!("Round {} is not in progress", round.round_no),
        ))
    }
}

fn not_in_round(player_id: PlayerId) -> DomainError {
    DomainError::validation(
        ValidationKind::PlayerNotInRound,
        format!("No hand found for player {player_id}!"),
    )
}
