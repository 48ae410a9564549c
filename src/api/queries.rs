use serde::{Deserialize, Serialize};

use crate::domain::round::RoundPhase;
use crate::domain::table::Table;
use crate::domain::{GameId, PlayerId};
use crate::engine::round::RoundEngine;

use super::dto::{PlayerViewDto, PlayerVisibleState};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Состояние игры глазами конкретного игрока.
    GetView {
        game_id: GameId,
        player_id: PlayerId,
    },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    View(PlayerVisibleState),
}

/// Собрать видимое игроку состояние на основе `Table` + опционального
/// `RoundEngine`. Правило видимости чужих карт: вскрытие/сравнение,
/// фолд или завершённый раунд. Свои карты игрок втёмную не видит.
pub fn build_player_view(
    table: &Table,
    engine: Option<&RoundEngine>,
    resolve_name: impl Fn(PlayerId) -> String,
    viewer: PlayerId,
) -> PlayerVisibleState {
    let phase = engine.map(|e| e.phase).unwrap_or(RoundPhase::Waiting);
    let resolved = matches!(phase, RoundPhase::Resolved);

    let mut players = Vec::new();
    let mut your_seat = None;

    for (idx, seat_opt) in table.seats.iter().enumerate() {
        if let Some(p) = seat_opt {
            let seat_index = idx as u8;
            if p.player_id == viewer {
                your_seat = Some(seat_index);
            }

            let own_visible = p.player_id == viewer && !p.is_blind;
            let public_visible = p.hand_revealed
                || matches!(p.status, crate::domain::player::PlayerStatus::Folded)
                || resolved;

            players.push(PlayerViewDto {
                player_id: p.player_id,
                display_name: resolve_name(p.player_id),
                seat_index,
                chips: p.chips,
                committed_bet: p.committed_bet,
                status: p.status,
                is_blind: p.is_blind,
                hand: if (own_visible || public_visible) && !p.hand.is_empty() {
                    Some(p.hand.clone())
                } else {
                    None
                },
            });
        }
    }

    PlayerVisibleState {
        game_id: table.id,
        name: table.name.clone(),
        phase,
        pot: engine
            .map(|e| e.pot.total)
            .unwrap_or(crate::domain::Chips::ZERO),
        current_bet: engine
            .map(|e| e.betting.current_bet)
            .unwrap_or(crate::domain::Chips::ZERO),
        rotation: engine.map(|e| e.betting.rotation_count).unwrap_or(0),
        is_swara: engine.map(|e| e.is_swara).unwrap_or(false),
        dealer_index: table.dealer_index,
        current_actor_seat: engine.and_then(|e| e.current_actor),
        your_seat,
        players,
    }
}
