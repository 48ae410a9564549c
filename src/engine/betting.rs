use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::SeatedPlayer;
use crate::domain::table::BlindPolicy;

/// Состояние круга ставок текущего раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Анте, оно же стартовая ставка круга.
    pub base_bet: Chips,
    /// Потолок ставки.
    pub max_bet: Chips,
    /// Текущая целевая ставка. Внутри круга не убывает.
    pub current_bet: Chips,
    /// Была ли текущая ставка установлена тёмным игроком.
    pub current_bet_blind: bool,
    /// Сколько полных кругов ротации уже пройдено.
    pub rotation_count: u32,
    /// Был ли уже зрячий ход (после него тёмную заявить нельзя).
    pub anyone_acted_sighted: bool,
    /// Было ли вскрытие в текущем круге — такой круг не закрывает торговлю.
    pub showdown_in_rotation: bool,
}

impl BettingState {
    pub fn new(base_bet: Chips, max_bet: Chips) -> Self {
        Self {
            base_bet,
            max_bet,
            current_bet: base_bet,
            current_bet_blind: false,
            rotation_count: 0,
            anyone_acted_sighted: false,
            showdown_in_rotation: false,
        }
    }

    /// Сброс к пересдаче свары: ставка возвращается к анте,
    /// счётчики и флаги — к началу торговли.
    pub fn reset_for_swara(&mut self) {
        self.current_bet = self.base_bet;
        self.current_bet_blind = false;
        self.rotation_count = 0;
        self.anyone_acted_sighted = false;
        self.showdown_in_rotation = false;
    }

    /// Эффективная ставка игрока: у тёмного взнос считается вдвойне.
    pub fn effective_stake(player: &SeatedPlayer) -> Chips {
        if player.is_blind {
            player.committed_bet.doubled()
        } else {
            player.committed_bet
        }
    }

    /// Достаёт ли эффективная ставка игрока до текущей.
    pub fn is_matched(&self, player: &SeatedPlayer) -> bool {
        Self::effective_stake(player) >= self.current_bet
    }

    /// Недобор игрока до текущей ставки (в эффективных фишках).
    pub fn call_gap(&self, player: &SeatedPlayer) -> Chips {
        self.current_bet.saturating_sub(Self::effective_stake(player))
    }

    /// Сколько фишек реально заплатит игрок за Call.
    ///
    /// Тёмный платит долю недобора (его фишки считаются вдвойне),
    /// зрячий против тёмной ставки — кратно номиналу.
    pub fn call_payment(&self, player: &SeatedPlayer, policy: &BlindPolicy) -> Chips {
        let gap = self.call_gap(player);
        if gap.is_zero() {
            return Chips::ZERO;
        }
        if player.is_blind {
            gap.divided_by(policy.blind_call_divisor)
        } else if self.current_bet_blind {
            gap.times(policy.sighted_call_multiplier)
        } else {
            gap
        }
    }

    /// Обрезать запрошенный рейз потолком ставки.
    pub fn clamp_raise(&self, target: Chips) -> Chips {
        target.min(self.max_bet)
    }

    /// Сколько фишек заплатит игрок, поднимая до `target`
    /// (target уже обрезан потолком и больше текущей ставки).
    pub fn raise_payment(
        &self,
        player: &SeatedPlayer,
        target: Chips,
        policy: &BlindPolicy,
    ) -> Chips {
        let gap = target.saturating_sub(Self::effective_stake(player));
        if player.is_blind {
            gap.divided_by(policy.blind_call_divisor)
        } else {
            gap
        }
    }

    /// Зафиксировать новую ставку после рейза.
    pub fn on_raise(&mut self, new_bet: Chips, by_blind: bool) {
        self.current_bet = new_bet;
        self.current_bet_blind = by_blind;
    }
}
