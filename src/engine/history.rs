use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::DropReason;
use crate::domain::round::HandScore;
use crate::domain::{GameId, PlayerId, RoundId, SeatIndex};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoundEventKind {
    /// Новый раунд начался.
    RoundStarted {
        game_id: GameId,
        round_id: RoundId,
        dealer: SeatIndex,
    },

    /// Игрок внёс анте.
    AntePosted { seat: SeatIndex, amount: Chips },

    /// Игрок выбыл из раунда.
    PlayerDropped {
        seat: SeatIndex,
        player_id: PlayerId,
        reason: DropReason,
    },

    /// Игроку сданы карты.
    CardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Игрок заявил тёмную.
    BlindDeclared { seat: SeatIndex },

    /// Тёмный игрок посмотрел свои карты.
    HandSeen { seat: SeatIndex },

    /// Действие игрока с денежным эффектом.
    PlayerActed {
        player_id: PlayerId,
        seat: SeatIndex,
        action: PlayerActionKind,
        paid: Chips,
        new_chips: Chips,
        pot_after: Chips,
    },

    /// Ставка поднята.
    BetRaised { seat: SeatIndex, new_bet: Chips },

    /// Тёмная игра закончилась: ставка превысила порог.
    BlindsCleared { threshold: Chips },

    /// Круг ротации замкнулся.
    RotationCompleted { rotation: u32 },

    /// Парное вскрытие.
    ShowdownHeld {
        challenger: SeatIndex,
        opponent: SeatIndex,
        challenger_score: HandScore,
        opponent_score: HandScore,
        loser: SeatIndex,
    },

    /// Общее сравнение рук всех оставшихся.
    HandsCompared { scores: Vec<(SeatIndex, HandScore)> },

    /// Выплата из банка.
    PotAwarded {
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },

    /// Ничья: объявлена свара, перечислены претенденты на докуп.
    SwaraStarted {
        tied: Vec<SeatIndex>,
        offered: Vec<SeatIndex>,
    },

    /// Выбывший докупился в свару.
    SwaraJoined {
        seat: SeatIndex,
        player_id: PlayerId,
        fee: Chips,
    },

    /// Выбывший отказался от докупа (или не потянул взнос).
    SwaraDeclined { seat: SeatIndex, player_id: PlayerId },

    /// Пересдача свары состоялась.
    SwaraDealt { participants: Vec<SeatIndex> },

    /// Банк поделён между победителями свары.
    PotSplit { seats: Vec<SeatIndex>, share: Chips },

    /// Раунд завершён.
    RoundFinished { round_id: RoundId, game_id: GameId },
}

/// Событие в раунде с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Полная история раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }
}

impl Default for RoundHistory {
    fn default() -> Self {
        Self::new()
    }
}
