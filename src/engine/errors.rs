use crate::domain::{PlayerId, SeatIndex};

use thiserror::Error;

/// Ошибки движка свары.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("В этом месте нет игрока")]
    EmptySeat,

    #[error("Игрок {0} не найден в игре")]
    PlayerNotInGame(PlayerId),

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("За столом нет свободных мест")]
    TableFull,

    #[error("Раунд уже идёт")]
    RoundAlreadyInProgress,

    #[error("Раунд не активен")]
    NoActiveRound,

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Недопустимое действие в текущем состоянии раунда")]
    IllegalAction,

    #[error("Недостаточно фишек для этого действия")]
    InsufficientChips,

    #[error("Для вскрытия нет подходящего соперника")]
    NoOpponentAvailable,

    #[error("В колоде не осталось карт")]
    DeckExhausted,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
