// src/bin/svara_dev_cli.rs

use svara_engine::api::{build_player_view, PlayerVisibleState};
use svara_engine::bot;
use svara_engine::domain::{Chips, GameConfig, PlayerId, PlayerSeed, SeatIndex};
use svara_engine::engine::{Game, PlayerActionKind};
use svara_engine::infra::{EnvIdentity, IdentityProvider, LogSink, SystemRng};

fn main() {
    env_logger::init();

    println!("svara_dev_cli: стартуем dev-прогон игры ботов…");

    let identity = EnvIdentity;
    let seeds = vec![
        PlayerSeed {
            name: identity.local_display_name(),
            chips: Chips::new(1000),
            is_bot: true,
        },
        PlayerSeed {
            name: "Игрок 2".to_string(),
            chips: Chips::new(1000),
            is_bot: true,
        },
        PlayerSeed {
            name: "Игрок 3".to_string(),
            chips: Chips::new(1000),
            is_bot: true,
        },
        PlayerSeed {
            name: "Игрок 4".to_string(),
            chips: Chips::new(1000),
            is_bot: true,
        },
    ];

    let config = GameConfig::new(7, Chips::new(10), Chips::new(200), Chips::new(1000));

    let mut game = match Game::start(
        1,
        "DEV TABLE".to_string(),
        seeds,
        config,
        SystemRng::default(),
        Box::new(LogSink),
    ) {
        Ok(g) => g,
        Err(e) => {
            println!("[CLI] ОШИБКА при старте игры: {e}");
            return;
        }
    };

    println!();
    println!("================ GAME SIMULATION =================");
    debug_print_state(&game);

    // Пейсинг ходов бота — забота вызывающего кода; в dev-CLI просто цикл.
    const MAX_STEPS: u32 = 2000;
    let mut bot_rng = SystemRng::default();
    let mut rounds_finished: u32 = 0;

    for step in 1..=MAX_STEPS {
        if game.is_over() {
            println!("[CLI] Игра окончена на шаге {step}.");
            break;
        }

        let Some((seat, player_id)) = pick_actor(&game) else {
            println!("[CLI] BUG: некому ходить, хотя игра не окончена.");
            break;
        };

        let Some(engine) = game.round_engine() else {
            println!("[CLI] BUG: нет активного раунда, хотя актёр есть.");
            break;
        };

        let Some(kind) = bot::choose_action(game.table(), engine, seat, &mut bot_rng) else {
            println!("[CLI] BUG: бот на месте {seat} не смог выбрать действие.");
            break;
        };

        println!(
            "[CLI][step={}] {} (место {}) -> {:?}",
            step,
            game.display_name(player_id),
            seat,
            kind
        );

        match game.submit_action(player_id, kind) {
            Err(e) => {
                // Отказ не фатален: состояние не изменилось, ход повторится.
                println!("[CLI] действие отклонено: {e}");
            }
            Ok(outcome) => {
                if outcome.swara_dealt {
                    println!("[CLI] *** СВАРА: пересдача состоялась ***");
                }
                if let Some(summary) = outcome.finished {
                    rounds_finished += 1;
                    println!("=== РАУНД {} ЗАВЕРШЁН ===", summary.round_id);
                    println!(
                        "банк={} исход={:?} свара-циклов={}",
                        summary.total_pot, summary.outcome, summary.swara_cycles
                    );
                    for r in &summary.results {
                        println!(
                            "  {} | выигрыш={} | победитель={}",
                            game.display_name(r.player_id),
                            r.winnings,
                            r.is_winner
                        );
                    }
                    debug_print_state(&game);
                }
            }
        }
    }

    println!();
    println!("[CLI] Сыграно раундов: {rounds_finished}. Итоговые стеки:");
    debug_print_state(&game);
    println!("[CLI] Завершение работы dev-CLI.");
}

/// Кому сейчас решать: в торговле — текущий игрок, в сваре — сначала
/// открытые предложения докупа, затем победители без голоса.
fn pick_actor(game: &Game<SystemRng>) -> Option<(SeatIndex, PlayerId)> {
    if let Some((seat, pid)) = game.current_actor() {
        return Some((seat, pid));
    }

    let engine = game.round_engine()?;
    let st = engine.swara.as_ref()?;

    let seat = st
        .pending_offers
        .first()
        .copied()
        .or_else(|| {
            st.tied
                .iter()
                .find(|&&s| !st.split_votes.contains(&s))
                .copied()
        })?;

    Some((seat, game.table().seat(seat)?.player_id))
}

// Печать состояния стола через API-слой (DTO) глазами первого игрока.
fn debug_print_state(game: &Game<SystemRng>) {
    let hero: PlayerId = 1;
    let dto: PlayerVisibleState = build_player_view(
        game.table(),
        game.round_engine(),
        |pid| game.display_name(pid),
        hero,
    );

    println!("================ TABLE STATE ================");
    println!(
        "game_id={} name={} phase={:?} swara={} pot={} current_bet={} круг={}",
        dto.game_id, dto.name, dto.phase, dto.is_swara, dto.pot, dto.current_bet, dto.rotation
    );
    println!(
        "dealer={:?} ходит={:?}",
        dto.dealer_index, dto.current_actor_seat
    );
    println!("игроки:");
    for p in &dto.players {
        let hand = p
            .hand
            .as_ref()
            .map(|cards| {
                cards
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_else(|| "??".to_string());
        println!(
            "  место {} | {} | стек={} | ставка={} | статус={:?} | тёмная={} | карты: {}",
            p.seat_index, p.display_name, p.chips, p.committed_bet, p.status, p.is_blind, hand
        );
    }
    println!("=============================================");
}
