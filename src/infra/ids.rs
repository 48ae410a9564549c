use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::{GameId, PlayerId, RoundId};

/// Простая генерация ID на основе монотонных счётчиков.
/// Удобно для локальных запусков и тестов; транспорт может
/// передавать собственные ID снаружи.
#[derive(Debug)]
pub struct IdGenerator {
    game_counter: AtomicU64,
    player_counter: AtomicU64,
    round_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            game_counter: AtomicU64::new(1),
            player_counter: AtomicU64::new(1),
            round_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_game_id(&self) -> GameId {
        self.game_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_round_id(&self) -> RoundId {
        self.round_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Внешний "человекочитаемый" ID (идентификатор из хост-платформы).
/// Внутри движка всё равно используются числовые.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ExternalId(pub String);
