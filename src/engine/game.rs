use std::collections::HashMap;

use log::{debug, info};

use crate::domain::player::{PlayerProfile, PlayerSeed, SeatedPlayer};
use crate::domain::round::RoundSummary;
use crate::domain::table::{GameConfig, SeatIndex, Table};
use crate::domain::{GameId, PlayerId, RoundId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::history::{RoundEvent, RoundHistory};
use crate::engine::round::{self, RoundEngine, RoundStatus};
use crate::engine::swara;
use crate::engine::{NotificationSink, RandomSource};

/// Итог обработки действия для вызывающего кода.
#[derive(Debug, Default)]
pub struct SubmitOutcome {
    /// Сводка раунда, если действие его завершило.
    pub finished: Option<RoundSummary>,
    /// Состоялась ли пересдача свары.
    pub swara_dealt: bool,
    /// Запущен ли автоматически следующий раунд.
    pub next_round_started: bool,
}

/// Внешний драйвер игры: стол + текущий раунд + профили игроков.
///
/// Сигналы `RoundStatus::Resolved` / `RoundStatus::SwaraReady` обработчики
/// действий возвращают наружу — именно здесь, а не внутри них, начинаются
/// новые раунды и пересдачи. Уведомления уходят в sink после каждого
/// зафиксированного перехода; движок не ждёт доставки.
pub struct Game<R: RandomSource> {
    table: Table,
    engine: Option<RoundEngine>,
    profiles: HashMap<PlayerId, PlayerProfile>,
    rng: R,
    sink: Box<dyn NotificationSink>,
    next_round_id: RoundId,
}

impl<R: RandomSource> Game<R> {
    /// Запуск игры: посадить игроков, выбрать дилера, начать первый раунд.
    pub fn start(
        game_id: GameId,
        name: String,
        seeds: Vec<PlayerSeed>,
        config: GameConfig,
        rng: R,
        sink: Box<dyn NotificationSink>,
    ) -> Result<Self, EngineError> {
        if seeds.len() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }
        if seeds.len() > config.max_players as usize {
            return Err(EngineError::TableFull);
        }

        let mut table = Table::new(game_id, name, config);
        let mut profiles = HashMap::new();
        for (i, seed) in seeds.into_iter().enumerate() {
            let pid = (i + 1) as PlayerId;
            table.seats[i] = Some(SeatedPlayer::new(pid, seed.chips));
            profiles.insert(
                pid,
                PlayerProfile {
                    id: pid,
                    name: seed.name,
                    is_bot: seed.is_bot,
                },
            );
        }

        let mut game = Self {
            table,
            engine: None,
            profiles,
            rng,
            sink,
            next_round_id: 1,
        };
        if !game.start_next_round()? {
            return Err(EngineError::NotEnoughPlayers);
        }
        info!("игра {} запущена, игроков: {}", game_id, game.table.seated_count());
        Ok(game)
    }

    /// Действие игрока. Ошибка — это отказ: состояние не изменилось,
    /// ход будет повторён.
    pub fn submit_action(
        &mut self,
        player_id: PlayerId,
        kind: PlayerActionKind,
    ) -> Result<SubmitOutcome, EngineError> {
        let seat = self
            .seat_of(player_id)
            .ok_or(EngineError::PlayerNotInGame(player_id))?;

        let (status, swara_dealt, events) = {
            let engine = self.engine.as_mut().ok_or(EngineError::NoActiveRound)?;
            let seen = engine.history.events.len();

            let action = PlayerAction {
                player_id,
                seat,
                kind,
            };
            let mut status = round::apply_action(&mut self.table, engine, action)?;

            let mut swara_dealt = false;
            if matches!(status, RoundStatus::SwaraReady) {
                status = swara::deal_swara(&mut self.table, engine, &mut self.rng)?;
                swara_dealt = true;
            }

            let events: Vec<RoundEvent> = engine.history.events[seen..].to_vec();
            (status, swara_dealt, events)
        };

        for event in &events {
            self.sink.publish(event);
        }

        let mut outcome = SubmitOutcome {
            swara_dealt,
            ..SubmitOutcome::default()
        };

        match status {
            RoundStatus::Ongoing => {}
            RoundStatus::Resolved(summary) => {
                self.engine = None;
                outcome.finished = Some(summary);
                outcome.next_round_started = self.start_next_round()?;
            }
            RoundStatus::SwaraReady => {
                return Err(EngineError::Internal("свара не была пересдана"));
            }
        }

        Ok(outcome)
    }

    /// Начать следующий раунд, пока в игре есть двое не вылетевших.
    ///
    /// Раунды, схлопнувшиеся на анте (остался ≤1 плательщик), закрываются
    /// сразу — тогда пробуем ещё раз: каждый такой раунд навсегда
    /// переводит неплательщиков в Busted, так что цикл конечен.
    fn start_next_round(&mut self) -> Result<bool, EngineError> {
        loop {
            if self.table.alive_count() < 2 {
                debug!("игра {}: живых игроков меньше двух, игра окончена", self.table.id);
                return Ok(false);
            }

            let round_id = self.next_round_id;
            self.next_round_id += 1;

            let (engine, status) = round::start_round(&mut self.table, &mut self.rng, round_id)?;
            publish_all(self.sink.as_ref(), &engine.history, 0);

            match status {
                RoundStatus::Ongoing => {
                    self.engine = Some(engine);
                    return Ok(true);
                }
                RoundStatus::Resolved(_) => continue,
                RoundStatus::SwaraReady => {
                    return Err(EngineError::Internal("свара при старте раунда"));
                }
            }
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn round_engine(&self) -> Option<&RoundEngine> {
        self.engine.as_ref()
    }

    pub fn profile(&self, player_id: PlayerId) -> Option<&PlayerProfile> {
        self.profiles.get(&player_id)
    }

    /// Отображаемое имя игрока (для DTO/фронта).
    pub fn display_name(&self, player_id: PlayerId) -> String {
        self.profiles
            .get(&player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Player {}", player_id))
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.table
            .seats
            .iter()
            .enumerate()
            .find(|(_, s)| {
                s.as_ref()
                    .map(|p| p.player_id == player_id)
                    .unwrap_or(false)
            })
            .map(|(idx, _)| idx as SeatIndex)
    }

    /// Чей сейчас ход: (место, игрок).
    pub fn current_actor(&self) -> Option<(SeatIndex, PlayerId)> {
        let engine = self.engine.as_ref()?;
        let seat = engine.current_actor?;
        let player = self.table.seat(seat)?;
        Some((seat, player.player_id))
    }

    /// Игра окончена: раунд не идёт и второго живого игрока нет.
    pub fn is_over(&self) -> bool {
        self.engine.is_none() && self.table.alive_count() < 2
    }
}

fn publish_all(sink: &dyn NotificationSink, history: &RoundHistory, from: usize) {
    for event in &history.events[from..] {
        sink.publish(event);
    }
}
