use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::SeatIndex;
use crate::domain::{GameId, PlayerId, RoundId};

/// Фаза раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    /// Стол собран, раздача ещё не началась.
    Waiting,
    /// Анте собрано, идёт раздача карт.
    Dealing,
    /// Торговля по кругу.
    Betting,
    /// Ничья при сравнении: ждём решений по сваре (докупы / делёж).
    SwaraPending,
    /// Раунд завершён, банк распределён.
    Resolved,
}

/// Сила руки. Итог чистой функции подсчёта (0..34).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandScore(pub u32);

/// Результат конкретного игрока в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRoundResult {
    pub player_id: PlayerId,
    /// Итоговая сила руки (если дошёл до сравнения).
    pub score: Option<HandScore>,
    /// Сколько фишек получено из банка.
    pub winnings: Chips,
    /// Является ли игрок победителем (включая делёж свары).
    pub is_winner: bool,
}

/// Чем закончился раунд.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Остался единственный несбросившийся игрок.
    SingleSurvivor { seat: SeatIndex },
    /// Уникальный максимум при общем сравнении.
    BestScore { seat: SeatIndex, score: HandScore },
    /// Свара закончилась делёжкой банка.
    PotSplit { seats: Vec<SeatIndex>, share: Chips },
    /// Некому было играть (после анте остался максимум один плательщик).
    Voided,
}

/// Краткое описание завершённого раунда. Удобно для истории и фронта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub game_id: GameId,
    /// Сколько свара-циклов потребовалось (0 — обычный раунд).
    pub swara_cycles: u32,
    pub total_pot: Chips,
    pub outcome: RoundOutcome,
    pub results: Vec<PlayerRoundResult>,
}
