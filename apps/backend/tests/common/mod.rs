#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use scum_backend::config::EngineSettings;
use scum_backend::domain::{GameConfig, GameId, Player, PlayerId};
use scum_backend::error::AppError;
use scum_backend::realtime::{BroadcastBroker, UpdatePublisher};
use scum_backend::repos::{GameRepo, RoundRepo};
use scum_backend::services::GameFlowService;
use scum_backend::MemoryStore;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_SEED: u64 = 0x5c0f;

/// Service over a fresh in-memory store with a fixed deal seed.
pub fn seeded_service() -> (
    GameFlowService<MemoryStore, BroadcastBroker>,
    Arc<BroadcastBroker>,
) {
    let broker = Arc::new(BroadcastBroker::new(64));
    let settings = EngineSettings::default().with_deal_seed(TEST_SEED);
    let service = GameFlowService::new(Arc::new(MemoryStore::new()), broker.clone(), settings);
    (service, broker)
}

pub fn player(id: PlayerId) -> Player {
    Player::new(id, format!("P{id}"))
}

/// Create a game hosted by player 1 and seat players 2..=n.
pub async fn seat_table<S, P>(
    service: &GameFlowService<S, P>,
    n: PlayerId,
    config: GameConfig,
) -> Result<GameId, AppError>
where
    S: GameRepo + RoundRepo,
    P: UpdatePublisher,
{
    let game = service.create_game("table", player(1), config).await?;
    for id in 2..=n {
        service.add_player(game.value.id, player(id)).await?;
    }
    Ok(game.value.id)
}

/// Settle every outstanding card pass, then play the round out with the
/// lowest legal set for whoever is active.
pub async fn play_round_out<S, P>(
    service: &GameFlowService<S, P>,
    game_id: GameId,
) -> Result<(), AppError>
where
    S: GameRepo + RoundRepo,
    P: UpdatePublisher,
{
    for _ in 0..10_000 {
        let state = service.game_state(game_id).await?;
        let Some(round) = state.round else {
            return Ok(());
        };
        if !round.value.is_active() {
            return Ok(());
        }

        if let Some(giver) = round.value.hands.iter().find(|h| !h.ready_to_play) {
            let view = service.player_view(game_id, giver.player_id).await?;
            if let Some(owed) = view.pass_obligation {
                let cards = if owed.high_cards {
                    owed.suggested.clone()
                } else {
                    view.hand[..owed.cards_owed].to_vec()
                };
                let aliases: Vec<String> = cards.iter().map(|c| c.alias()).collect();
                service
                    .pass_cards(game_id, giver.player_id, owed.receiver_id, &aliases)
                    .await?;
                continue;
            }
        }

        let active = round
            .value
            .hands
            .iter()
            .find(|h| h.is_active)
            .map(|h| h.player_id)
            .expect("live round has an active hand");
        let view = service.player_view(game_id, active).await?;
        let aliases: Vec<String> = view
            .lowest_legal_play()
            .map(|cards| cards.iter().map(|c| c.alias()).collect())
            .unwrap_or_default();
        service.play_turn(game_id, active, &aliases).await?;
    }
    panic!("round in game {game_id} did not finish");
}
