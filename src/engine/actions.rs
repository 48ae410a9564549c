use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, SeatIndex};

/// Тип действия игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    /// Сбросить карты и выйти из раунда.
    Fold,
    /// Посмотреть свои карты (только для игравшего втёмную). Ход не тратит.
    See,
    /// Уравнять текущую ставку (доплатить разницу по политике тёмной игры).
    Call,
    /// Поднять ставку до указанной суммы (обрезается до max_bet).
    Raise(Chips),
    /// Заявить тёмную игру: ставка считается вдвойне, карты не смотрим.
    /// Доступно только первому после дилера и только до первого зрячего хода.
    Blind,
    /// Вскрыться с предыдущим по кругу игроком. При равенстве
    /// проигрывает вскрывающий.
    Showdown,
    /// Свара: согласиться поделить банк между победителями.
    SplitPot,
    /// Свара: докупиться за половину банка (выбывший) либо
    /// потребовать переигровку (победитель).
    JoinSwara,
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// Где он сидит (0..max_players-1).
    pub seat: SeatIndex,
    /// Само действие.
    pub kind: PlayerActionKind,
}
