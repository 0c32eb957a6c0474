//! Update fan-out: tell observers that a game changed.
//!
//! Publishing is fire-and-forget. Observers re-read state on notice, so a
//! lagging or absent receiver never blocks or fails the writer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::domain::GameId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    GameStateAvailable { game_id: GameId },
}

impl EventEnvelope {
    pub fn game_id(&self) -> GameId {
        match self {
            EventEnvelope::GameStateAvailable { game_id } => *game_id,
        }
    }
}

#[async_trait]
pub trait UpdatePublisher: Send + Sync {
    async fn publish(&self, game_id: GameId);
}

/// In-process publisher backed by a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastBroker {
    sender: broadcast::Sender<EventEnvelope>,
}

impl BroadcastBroker {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl UpdatePublisher for BroadcastBroker {
    async fn publish(&self, game_id: GameId) {
        let envelope = EventEnvelope::GameStateAvailable { game_id };
        match self.sender.send(envelope) {
            Ok(receivers) => debug!(game_id, receivers, "Published game update"),
            Err(_) => trace!(game_id, "No subscribers for game update"),
        }
    }
}

/// Publisher that drops every notice; for batch runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl UpdatePublisher for NoopPublisher {
    async fn publish(&self, _game_id: GameId) {}
}
