use crate::domain::player::PlayerStatus;
use crate::domain::round::RoundPhase;
use crate::domain::table::{SeatIndex, Table};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::round::RoundEngine;
use crate::engine::turn::first_seat_after_dealer;

/// Проверка, может ли игрок на этом месте выполнить действие при текущем
/// состоянии раунда. Состояние не меняет: ошибка означает отказ с
/// нетронутым раундом и повтором хода.
pub fn validate_action(
    table: &Table,
    engine: &RoundEngine,
    seat: SeatIndex,
    action: &PlayerActionKind,
) -> Result<(), EngineError> {
    match engine.phase {
        RoundPhase::Betting => validate_betting_action(table, engine, seat, action),
        RoundPhase::SwaraPending => validate_swara_action(engine, seat, action),
        _ => Err(EngineError::IllegalAction),
    }
}

fn validate_betting_action(
    table: &Table,
    engine: &RoundEngine,
    seat: SeatIndex,
    action: &PlayerActionKind,
) -> Result<(), EngineError> {
    let player = table.seat(seat).ok_or(EngineError::EmptySeat)?;

    if !matches!(player.status, PlayerStatus::Active) {
        return Err(EngineError::IllegalAction);
    }

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::See => {
            // Смотреть карты имеет смысл только тёмному.
            if player.is_blind {
                Ok(())
            } else {
                Err(EngineError::IllegalAction)
            }
        }

        // Call с нулевым недобором — легальный «пропуск» хода.
        PlayerActionKind::Call => Ok(()),

        PlayerActionKind::Raise(target) => {
            let clamped = engine.betting.clamp_raise(*target);
            if clamped <= engine.betting.current_bet {
                return Err(EngineError::IllegalAction);
            }
            Ok(())
        }

        PlayerActionKind::Blind => {
            // Тёмную может заявить только первый после дилера,
            // пока никто не сходил по-зрячему.
            if player.is_blind
                || engine.betting.anyone_acted_sighted
                || engine.betting.rotation_count > 0
            {
                return Err(EngineError::IllegalAction);
            }
            match first_seat_after_dealer(table) {
                Some(first) if first == seat => Ok(()),
                _ => Err(EngineError::IllegalAction),
            }
        }

        PlayerActionKind::Showdown => {
            // Вскрытие доступно только после полного круга торговли.
            if engine.betting.rotation_count == 0 {
                return Err(EngineError::IllegalAction);
            }
            Ok(())
        }

        PlayerActionKind::SplitPot | PlayerActionKind::JoinSwara => {
            Err(EngineError::IllegalAction)
        }
    }
}

fn validate_swara_action(
    engine: &RoundEngine,
    seat: SeatIndex,
    action: &PlayerActionKind,
) -> Result<(), EngineError> {
    let swara = engine.swara.as_ref().ok_or(EngineError::NoActiveRound)?;

    let is_tied = swara.tied.contains(&seat);
    let is_offered = swara.pending_offers.contains(&seat);
    let offers_settled = swara.pending_offers.is_empty();
    let nobody_joined = swara.joiners.is_empty();

    match action {
        // Докуп выбывшего — пока его предложение открыто;
        // требование переигровки победителем — когда докупы закрыты впустую.
        PlayerActionKind::JoinSwara => {
            if is_offered || (is_tied && offers_settled && nobody_joined) {
                Ok(())
            } else {
                Err(EngineError::IllegalAction)
            }
        }

        // Fold в сваре — отказ выбывшего от докупа.
        PlayerActionKind::Fold => {
            if is_offered {
                Ok(())
            } else {
                Err(EngineError::IllegalAction)
            }
        }

        // Делёж доступен только победителям, когда кроме них никого
        // не осталось, и каждый голосует один раз.
        PlayerActionKind::SplitPot => {
            if is_tied && offers_settled && nobody_joined && !swara.split_votes.contains(&seat) {
                Ok(())
            } else {
                Err(EngineError::IllegalAction)
            }
        }

        _ => Err(EngineError::IllegalAction),
    }
}
