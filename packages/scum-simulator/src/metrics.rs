//! Metrics collection for simulation results.

use scum_backend::domain::{GameConfig, PlayerId};
use serde::Serialize;

use crate::simulator::{GameResult, RoundResult};

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_no: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: ConfigMetrics,
    pub duration_ms: f64,
    pub rounds: Vec<RoundMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigMetrics {
    pub players: usize,
    pub deck_count: u8,
    pub explode_pile_count: u8,
    pub power_card: String,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u32,
    pub finish_order: Vec<PlayerId>,
    pub turns: usize,
    pub pile_clears: usize,
    pub cards_passed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: usize,
    pub player_id: PlayerId,
    pub name: String,
    /// Rounds finished first.
    pub rounds_won: u32,
    /// Rounds finished last.
    pub rounds_lost: u32,
    pub avg_rank: f64,
}

/// One line of the CSV summary.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_no: u32,
    pub seed: u64,
    pub players: usize,
    pub rounds: usize,
    pub total_turns: usize,
    pub total_pile_clears: usize,
    /// Seat that won the most rounds; lowest seat on ties.
    pub top_seat: usize,
    pub duration_ms: f64,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        let top_seat = m
            .player_metrics
            .iter()
            .max_by(|a, b| a.rounds_won.cmp(&b.rounds_won).then(b.seat.cmp(&a.seat)))
            .map(|p| p.seat)
            .unwrap_or(0);
        Self {
            game_no: m.game_no,
            seed: m.seed,
            players: m.config.players,
            rounds: m.rounds.len(),
            total_turns: m.rounds.iter().map(|r| r.turns).sum(),
            total_pile_clears: m.rounds.iter().map(|r| r.pile_clears).sum(),
            top_seat,
            duration_ms: m.duration_ms,
        }
    }
}

pub fn build_game_metrics(
    game_no: u32,
    seed: u64,
    config: &GameConfig,
    total_games: u32,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let rounds = result.rounds.iter().map(build_round_metrics).collect();

    let player_count = result.players.len();
    let player_metrics = result
        .players
        .iter()
        .zip(result.ranks_by_seat())
        .enumerate()
        .map(|(seat, (player, ranks))| {
            let last = player_count.saturating_sub(1);
            let total: usize = ranks.iter().map(|r| usize::from(*r)).sum();
            PlayerMetrics {
                seat,
                player_id: player.id,
                name: player.name.clone(),
                rounds_won: ranks.iter().filter(|r| **r == 0).count() as u32,
                rounds_lost: ranks.iter().filter(|r| usize::from(**r) == last).count() as u32,
                avg_rank: if ranks.is_empty() {
                    0.0
                } else {
                    total as f64 / ranks.len() as f64
                },
            }
        })
        .collect();

    GameMetrics {
        game_no,
        seed,
        timestamp,
        config: ConfigMetrics {
            players: player_count,
            deck_count: config.deck_count,
            explode_pile_count: config.explode_pile_count,
            power_card: config.power_card_alias(),
            total_games,
        },
        duration_ms,
        rounds,
        player_metrics,
    }
}

fn build_round_metrics(round: &RoundResult) -> RoundMetrics {
    RoundMetrics {
        round_no: round.round_no,
        finish_order: round.finish_order.clone(),
        turns: round.turns,
        pile_clears: round.pile_clears,
        cards_passed: round.cards_passed,
    }
}
