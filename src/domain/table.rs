use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::{PlayerStatus, SeatedPlayer};
use crate::domain::{GameId, RoundId};

/// Индекс места за столом (0..max_players-1).
pub type SeatIndex = u8;

/// Политика стоимости тёмной игры.
///
/// Конвенция в разных компаниях разная, поэтому это параметр конфига,
/// а не зашитая константа:
/// - тёмный игрок доплачивает `1/blind_call_divisor` разницы
///   (его взнос считается вдвойне);
/// - зрячий, уравнивающий ставку тёмного, платит
///   `sighted_call_multiplier` номинальной разницы;
/// - как только ставка превышает `base_bet * blind_clear_threshold_factor`,
///   тёмная игра заканчивается у всех.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindPolicy {
    pub blind_call_divisor: u64,
    pub sighted_call_multiplier: u64,
    pub blind_clear_threshold_factor: u64,
}

impl Default for BlindPolicy {
    fn default() -> Self {
        Self {
            blind_call_divisor: 2,
            sighted_call_multiplier: 2,
            blind_clear_threshold_factor: 2,
        }
    }
}

impl BlindPolicy {
    /// Порог ставки, после которого тёмная игра теряет смысл.
    pub fn blind_clear_threshold(&self, base_bet: Chips) -> Chips {
        base_bet.times(self.blind_clear_threshold_factor)
    }
}

/// Конфиг игры: размер стола, анте и лимиты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    /// Максимальное количество мест за столом (обычно 2–7).
    pub max_players: u8,
    /// Обязательное анте, оно же минимальная ставка.
    pub base_bet: Chips,
    /// Потолок ставки: рейзы выше обрезаются до него.
    pub max_bet: Chips,
    /// Стартовый стек каждого игрока.
    pub starting_chips: Chips,
    pub blind_policy: BlindPolicy,
}

impl GameConfig {
    pub fn new(max_players: u8, base_bet: Chips, max_bet: Chips, starting_chips: Chips) -> Self {
        Self {
            max_players,
            base_bet,
            max_bet,
            starting_chips,
            blind_policy: BlindPolicy::default(),
        }
    }
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: GameId,
    pub name: String,
    pub config: GameConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<SeatedPlayer>>,

    /// Место дилера. Выбирается один раз на игру (первый туз при сдаче
    /// по кругу) и дальше не двигается.
    pub dealer_index: Option<SeatIndex>,

    /// ID текущего раунда (если он идёт).
    pub current_round_id: Option<RoundId>,

    /// Идёт ли сейчас раунд (true), либо стол ждёт начала нового.
    pub round_in_progress: bool,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: GameId, name: String, config: GameConfig) -> Self {
        let seats = vec![None; config.max_players as usize];
        Self {
            id,
            name,
            config,
            seats,
            dealer_index: None,
            current_round_id: None,
            round_in_progress: false,
        }
    }

    pub fn max_players(&self) -> u8 {
        self.config.max_players
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Сколько игроков ещё не выбыло из текущего раунда.
    pub fn active_count(&self) -> usize {
        self.seats
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|p| matches!(p.status, PlayerStatus::Active))
            .count()
    }

    /// Сколько игроков ещё не вылетело из игры совсем.
    /// Busted — липкий статус: вылетевший на анте не возвращается.
    pub fn alive_count(&self) -> usize {
        self.seats
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|p| !matches!(p.status, PlayerStatus::Busted))
            .count()
    }

    pub fn seat(&self, index: SeatIndex) -> Option<&SeatedPlayer> {
        self.seats.get(index as usize).and_then(|s| s.as_ref())
    }

    pub fn seat_mut(&mut self, index: SeatIndex) -> Option<&mut SeatedPlayer> {
        self.seats.get_mut(index as usize).and_then(|s| s.as_mut())
    }
}
