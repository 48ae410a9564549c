use serde::{Deserialize, Serialize};

use crate::domain::{GameId, PlayerId};
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / транспорту).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Игра не найдена.
    GameNotFound(GameId),

    /// Игрок не найден в игре.
    PlayerNotInGame(PlayerId),

    /// Действие отклонено движком: состояние не изменилось,
    /// игрок получает причину и повторяет ход.
    ActionRejected(String),

    /// Внутренняя ошибка.
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::PlayerNotInGame(id) => ApiError::PlayerNotInGame(id),
            EngineError::Internal(msg) => ApiError::Internal(msg.to_string()),
            other => ApiError::ActionRejected(other.to_string()),
        }
    }
}
