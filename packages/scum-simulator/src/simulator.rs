//! In-memory game simulator.
//!
//! Drives the round engine directly, without repositories or a publisher, so
//! thousands of games run in seconds. Every seat is played by the same
//! simple bot: pass the suggested cards, then always throw the lowest legal
//! set and pass only when nothing beats the pile.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scum_backend::domain::{
    self, FinishRank, Game, GameConfig, Player, PlayerId, PlayerView, Round, TurnOutcome,
};
use scum_backend::errors::DomainError;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::{debug, trace};

/// Upper bound on engine calls within one round. A bot that always plays
/// when it can empties its hand long before this.
const MAX_STEPS_PER_ROUND: usize = 10_000;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("Domain error in round {round_no}: {source}")]
    Domain {
        round_no: u32,
        #[source]
        source: DomainError,
    },
    #[error("Round {round_no} did not finish within {steps} steps")]
    Stalled { round_no: u32, steps: usize },
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Summary of one finished round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub round_no: u32,
    /// Player ids from first out to last.
    pub finish_order: Vec<PlayerId>,
    /// Plays and passes, not counting card passing.
    pub turns: usize,
    pub pile_clears: usize,
    pub cards_passed: usize,
    pub log: Vec<String>,
}

/// Result of simulating a complete game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub players: Vec<Player>,
    pub rounds: Vec<RoundResult>,
}

impl GameResult {
    /// Final rank of each seat in each round, seat order.
    pub fn ranks_by_seat(&self) -> Vec<Vec<FinishRank>> {
        self.players
            .iter()
            .map(|p| {
                self.rounds
                    .iter()
                    .filter_map(|r| r.finish_order.iter().position(|id| *id == p.id))
                    .map(|pos| pos as FinishRank)
                    .collect()
            })
            .collect()
    }
}

pub struct Simulator {
    game: Game,
    rng: ChaCha8Rng,
    /// Simulated clock; advances one second per engine call.
    now: OffsetDateTime,
}

impl Simulator {
    pub fn new(player_count: usize, config: GameConfig, seed: u64) -> Self {
        let players = (1..=player_count)
            .map(|n| Player::new(n as PlayerId, format!("Bot {n}")))
            .collect();
        let now = OffsetDateTime::UNIX_EPOCH;
        Self {
            game: Game {
                id: 1,
                name: format!("simulation {seed}"),
                host_id: 1,
                config,
                players,
                created_at: now,
                started_at: None,
            },
            rng: ChaCha8Rng::seed_from_u64(seed),
            now,
        }
    }

    /// Play `rounds` consecutive rounds, re-seeding each from the last.
    pub fn simulate_game(mut self, rounds: u32) -> Result<GameResult, SimulatorError> {
        let mut results = Vec::with_capacity(rounds as usize);
        let mut round = domain::start_first_round(&self.game, &mut self.rng, self.now)
            .map_err(|source| SimulatorError::Domain { round_no: 1, source })?;
        self.game.started_at = Some(self.now);

        for n in 1..=rounds {
            if n > 1 {
                let now = self.tick();
                round = domain::start_new_round(&round, &self.game, &mut self.rng, now)
                    .map_err(|source| SimulatorError::Domain { round_no: n, source })?;
            }
            let (finished, result) = self.play_round(round)?;
            debug!(
                round_no = result.round_no,
                turns = result.turns,
                clears = result.pile_clears,
                "Round simulated"
            );
            results.push(result);
            round = finished;
        }

        Ok(GameResult {
            players: self.game.players,
            rounds: results,
        })
    }

    fn play_round(&mut self, mut round: Round) -> Result<(Round, RoundResult), SimulatorError> {
        let round_no = round.round_no;
        let mut log = Vec::new();
        let mut turns = 0;
        let mut cards_passed = 0;

        for _ in 0..MAX_STEPS_PER_ROUND {
            if !round.is_active() {
                let result = RoundResult {
                    round_no,
                    finish_order: finish_order(&round)?,
                    turns,
                    pile_clears: round.discard_pile.iter().filter(|t| t.took_the_pile).count(),
                    cards_passed,
                    log,
                };
                return Ok((round, result));
            }

            let outcome = if let Some((giver, receiver, cards)) = self.next_pass(&round)? {
                cards_passed += cards.len();
                domain::pass_cards(&round, &self.game, giver, receiver, &cards)
            } else {
                let (player_id, aliases) = self.next_play(&round)?;
                turns += 1;
                let now = self.tick();
                domain::play_turn(&round, &self.game, player_id, &aliases, now)
            };
            let TurnOutcome { round: next, log: lines } =
                outcome.map_err(|source| SimulatorError::Domain { round_no, source })?;
            for line in &lines {
                trace!(round_no, "{line}");
            }
            log.extend(lines);
            round = next;
        }

        Err(SimulatorError::Stalled {
            round_no,
            steps: MAX_STEPS_PER_ROUND,
        })
    }

    /// First seat still owing cards: lowest cards for the winners, the
    /// suggested highest cards for everyone else.
    fn next_pass(
        &self,
        round: &Round,
    ) -> Result<Option<(PlayerId, PlayerId, Vec<String>)>, SimulatorError> {
        for hand in round.hands.iter().filter(|h| !h.ready_to_play) {
            let view = self.view(round, hand.player_id)?;
            let Some(owed) = view.pass_obligation else {
                continue;
            };
            let cards = if owed.high_cards {
                owed.suggested
            } else {
                view.hand.iter().take(owed.cards_owed).copied().collect()
            };
            let aliases = cards.iter().map(|c| c.alias()).collect();
            return Ok(Some((hand.player_id, owed.receiver_id, aliases)));
        }
        Ok(None)
    }

    fn next_play(&self, round: &Round) -> Result<(PlayerId, Vec<String>), SimulatorError> {
        let idx = round.active_hand_index().ok_or_else(|| {
            SimulatorError::InvalidState(format!("No active hand in round {}", round.round_no))
        })?;
        let player_id = round.hands[idx].player_id;
        let view = self.view(round, player_id)?;
        let aliases = view
            .lowest_legal_play()
            .map(|cards| cards.iter().map(|c| c.alias()).collect())
            .unwrap_or_default();
        Ok((player_id, aliases))
    }

    fn view(&self, round: &Round, player_id: PlayerId) -> Result<PlayerView, SimulatorError> {
        PlayerView::for_player(round, &self.game, player_id).map_err(|source| {
            SimulatorError::Domain {
                round_no: round.round_no,
                source,
            }
        })
    }

    fn tick(&mut self) -> OffsetDateTime {
        self.now += Duration::seconds(1);
        self.now
    }
}

fn finish_order(round: &Round) -> Result<Vec<PlayerId>, SimulatorError> {
    let mut ranked = round
        .hands
        .iter()
        .map(|h| {
            h.end_rank.map(|rank| (rank, h.player_id)).ok_or_else(|| {
                SimulatorError::InvalidState(format!(
                    "Player {} finished round {} without a rank",
                    h.player_id, round.round_no
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    ranked.sort_unstable();
    Ok(ranked.into_iter().map(|(_, id)| id).collect())
}
