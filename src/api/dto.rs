use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::PlayerStatus;
use crate::domain::round::{RoundPhase, RoundSummary};
use crate::domain::{GameId, PlayerId, SeatIndex};
use crate::engine::SubmitOutcome;

/// DTO игрока за столом. Карты присутствуют только если смотрящий
/// имеет право их видеть.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerViewDto {
    pub player_id: PlayerId,
    pub display_name: String,
    pub seat_index: SeatIndex,
    pub chips: Chips,
    pub committed_bet: Chips,
    pub status: PlayerStatus,
    pub is_blind: bool,
    pub hand: Option<Vec<Card>>,
}

/// Видимое конкретному игроку состояние игры.
///
/// Своя рука открыта, если игрок не втёмную; чужие — только после
/// вскрытия/сравнения, фолда или завершения раунда.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerVisibleState {
    pub game_id: GameId,
    pub name: String,
    pub phase: RoundPhase,
    pub pot: Chips,
    pub current_bet: Chips,
    pub rotation: u32,
    pub is_swara: bool,
    pub dealer_index: Option<SeatIndex>,
    pub current_actor_seat: Option<SeatIndex>,
    /// Место смотрящего (None, если его нет за столом).
    pub your_seat: Option<SeatIndex>,
    pub players: Vec<PlayerViewDto>,
}

/// Ответ на принятое действие: что изменилось после его применения.
/// Сериализацию для конкретного транспорта определяет транспортный слой.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundUpdate {
    /// Сводка завершившегося раунда (если действие его завершило).
    pub finished: Option<RoundSummary>,
    /// Состоялась ли пересдача свары.
    pub swara_dealt: bool,
    /// Начался ли автоматически следующий раунд.
    pub next_round_started: bool,
}

/// Помощник: итог движка -> DTO для клиента.
pub fn map_submit_outcome(outcome: SubmitOutcome) -> RoundUpdate {
    RoundUpdate {
        finished: outcome.finished,
        swara_dealt: outcome.swara_dealt,
        next_round_started: outcome.next_round_started,
    }
}
