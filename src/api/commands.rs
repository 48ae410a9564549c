use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::PlayerSeed;
use crate::domain::table::{BlindPolicy, GameConfig};
use crate::domain::{GameId, PlayerId};
use crate::engine::actions::PlayerActionKind;

/// Команда верхнего уровня — всё, что меняет состояние.
///
/// Транспортный слой (чат-бот, веб-сокет, что угодно) маппит эти команды
/// на вызовы `Game::start` / `Game::submit_action`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Создать игру и посадить игроков.
    StartGame(StartGameCommand),

    /// Действие игрока в текущем раунде.
    SubmitAction(SubmitActionCommand),
}

/// Команда создания игры.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartGameCommand {
    pub game_id: GameId,
    /// Имя стола (отображается во фронте).
    pub name: String,
    /// Максимальное количество мест (2–7).
    pub max_players: u8,
    /// Анте / минимальная ставка.
    pub base_bet: Chips,
    /// Потолок ставки.
    pub max_bet: Chips,
    pub starting_chips: Chips,
    /// Кого сажаем.
    pub players: Vec<PlayerSeed>,
}

impl StartGameCommand {
    /// Конфиг стола из параметров команды (политика тёмной — по умолчанию).
    pub fn config(&self) -> GameConfig {
        GameConfig {
            max_players: self.max_players,
            base_bet: self.base_bet,
            max_bet: self.max_bet,
            starting_chips: self.starting_chips,
            blind_policy: BlindPolicy::default(),
        }
    }
}

/// Действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitActionCommand {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub action: PlayerActionKind,
}
