use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::SeatIndex;
use crate::domain::PlayerId;

/// Базовый профиль игрока – то, что не зависит от конкретной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    /// Ходит ли за игрока автомат (решения принимает bot-политика).
    pub is_bot: bool,
}

/// Заявка на посадку игрока при старте игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSeed {
    pub name: String,
    pub chips: Chips,
    pub is_bot: bool,
}

/// Статус игрока в контексте текущего раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущем раунде.
    Active,
    /// Игрок сбросил карты (или проиграл вскрытие) и не участвует до конца раунда.
    Folded,
    /// Игрок вылетел: не смог оплатить обязательное анте.
    Busted,
}

/// Состояние игрока за столом.
///
/// Ростер мест фиксированный: при фолде игрока из вектора мест никто
/// не выкидывает, меняется только статус — ротация фильтрует по нему.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatedPlayer {
    pub player_id: PlayerId,
    /// Текущий стек фишек.
    pub chips: Chips,
    /// Сколько внесено в текущем круге ставок; обнуляется при новой раздаче.
    pub committed_bet: Chips,
    pub status: PlayerStatus,
    /// Играет ли втёмную (не видел своих карт, ставка считается вдвойне).
    pub is_blind: bool,
    /// Карты открыты для всех (вскрытие / общее сравнение).
    pub hand_revealed: bool,
    /// Рука: 0 или 3 карты.
    pub hand: Vec<Card>,
}

impl SeatedPlayer {
    pub fn new(player_id: PlayerId, chips: Chips) -> Self {
        Self {
            player_id,
            chips,
            committed_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            is_blind: false,
            hand_revealed: false,
            hand: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, PlayerStatus::Active)
    }

    /// Сброс к началу новой раздачи (карты, ставка, флаги).
    /// Статус выставляет engine — Busted остаётся Busted.
    pub fn reset_for_deal(&mut self) {
        self.committed_bet = Chips::ZERO;
        self.is_blind = false;
        self.hand_revealed = false;
        self.hand.clear();
    }
}

/// Причина выбытия игрока из раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DropReason {
    /// Добровольный фолд.
    Folded,
    /// Проиграл парное вскрытие.
    LostShowdown,
    /// Не хватило фишек на обязательный платёж по ходу торговли.
    ForcedFold,
    /// Не смог оплатить анте при старте раунда — в свару не возвращается.
    Insolvent,
}

/// Запись в реестре выбывших: снимок состояния на момент выбытия.
/// По нему свара решает, кому предлагать докуп.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DroppedPlayer {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub chips_at_drop: Chips,
    /// Всего внесено в банк этого раунда к моменту выбытия.
    pub contributed: Chips,
    pub reason: DropReason,
}

impl DroppedPlayer {
    /// Может ли этот игрок претендовать на докуп в свару.
    pub fn swara_eligible(&self) -> bool {
        !matches!(self.reason, DropReason::Insolvent)
    }
}
