use std::collections::HashMap;

use log::{debug, info, warn};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::player::{DropReason, PlayerStatus};
use crate::domain::round::{HandScore, PlayerRoundResult, RoundOutcome, RoundPhase, RoundSummary};
use crate::domain::table::{SeatIndex, Table};
use crate::domain::{GameId, RoundId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::history::{RoundEventKind, RoundHistory};
use crate::engine::pot::Pot;
use crate::engine::swara::{self, SwaraState};
use crate::engine::turn::{
    choose_dealer_by_first_ace, collect_active_seats_from, first_seat_after_dealer,
    next_active_seat, prev_active_seat, rotation_key,
};
use crate::engine::validation::validate_action;
use crate::engine::{shuffle, RandomSource};
use crate::scoring::score_hand;

/// Статус раунда для внешнего драйвера.
///
/// Обработчики действий сами раунды не перезапускают — они возвращают
/// сигнал, а внешний цикл (`Game`) решает, что делать дальше.
#[derive(Debug)]
pub enum RoundStatus {
    /// Раунд продолжается.
    Ongoing,
    /// Докупы в свару закрыты — драйвер должен вызвать `deal_swara`.
    SwaraReady,
    /// Раунд завершён, банк распределён.
    Resolved(RoundSummary),
}

/// Внутреннее состояние одного раунда.
pub struct RoundEngine {
    pub game_id: GameId,
    pub round_id: RoundId,
    pub deck: Deck,
    pub betting: BettingState,
    pub pot: Pot,
    /// Сколько всего фишек внёс каждый seat с начала раунда
    /// (анте + ставки + докупы в свару). Инвариант: сумма равна pot.
    pub contributions: HashMap<SeatIndex, Chips>,
    pub phase: RoundPhase,
    /// Идёт ли сейчас свара-переигровка.
    pub is_swara: bool,
    /// Сколько свара-циклов уже было в этом раунде.
    pub swara_cycles: u32,
    /// Чей сейчас ход (seat). None вне фазы торговли.
    pub current_actor: Option<SeatIndex>,
    /// Реестр выбывших — по нему свара предлагает докупы.
    pub dropped: Vec<crate::domain::player::DroppedPlayer>,
    /// Состояние свары (только в фазе SwaraPending).
    pub swara: Option<SwaraState>,
    /// Результаты последнего общего сравнения рук.
    pub last_compared: Vec<(SeatIndex, HandScore)>,
    /// История раунда.
    pub history: RoundHistory,
}

/// Старт нового раунда:
/// - при первом запуске выбирает дилера (первый туз по кругу);
/// - собирает анте, выкидывая неплатёжеспособных;
/// - раздаёт по три карты;
/// - настраивает торговлю и текущего игрока.
pub fn start_round<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    round_id: RoundId,
) -> Result<(RoundEngine, RoundStatus), EngineError> {
    if table.round_in_progress {
        return Err(EngineError::RoundAlreadyInProgress);
    }
    if table.alive_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    // Дилер выбирается один раз на игру и дальше не двигается.
    if table.dealer_index.is_none() {
        let dealer = choose_dealer_by_first_ace(table, rng)?;
        table.dealer_index = Some(dealer);
        info!("игра {}: дилер выбран, место {}", table.id, dealer);
    }
    let dealer = table
        .dealer_index
        .ok_or(EngineError::Internal("дилер не выбран"))?;

    // Сброс мест к новой раздаче. Вылетевшие (Busted) не возвращаются —
    // неплатёжеспособность по анте обнаружит сбор ниже.
    for seat_opt in table.seats.iter_mut() {
        if let Some(p) = seat_opt {
            p.reset_for_deal();
            if !matches!(p.status, PlayerStatus::Busted) {
                p.status = PlayerStatus::Active;
            }
        }
    }

    table.round_in_progress = true;
    table.current_round_id = Some(round_id);

    let mut deck = Deck::svara_36();
    shuffle(rng, &mut deck.cards);

    let mut engine = RoundEngine {
        game_id: table.id,
        round_id,
        deck,
        betting: BettingState::new(table.config.base_bet, table.config.max_bet),
        pot: Pot::new(),
        contributions: HashMap::new(),
        phase: RoundPhase::Dealing,
        is_swara: false,
        swara_cycles: 0,
        current_actor: None,
        dropped: Vec::new(),
        swara: None,
        last_compared: Vec::new(),
        history: RoundHistory::new(),
    };

    engine.history.push(RoundEventKind::RoundStarted {
        game_id: table.id,
        round_id,
        dealer,
    });

    // Анте с каждого; кто не может оплатить — выбывает до раздачи.
    let base = table.config.base_bet;
    let start = seat_after(dealer, table.max_players());
    for seat in collect_active_seats_from(table, start) {
        let chips = table.seat(seat).ok_or(EngineError::EmptySeat)?.chips;
        if chips < base {
            drop_player(table, &mut engine, seat, DropReason::Insolvent);
        } else {
            commit_chips(table, &mut engine, seat, base);
            engine
                .history
                .push(RoundEventKind::AntePosted { seat, amount: base });
        }
    }

    // Если после анте плательщиков не двое — раунд схлопывается сразу.
    if table.active_count() <= 1 {
        let status = resolve_void_start(table, &mut engine)?;
        return Ok((engine, status));
    }

    // Раздача: по одной карте за проход, три прохода, слева от дилера.
    let order = collect_active_seats_from(table, start);
    for _pass in 0..3 {
        for &seat in &order {
            let card = engine.deck.draw_one().ok_or(EngineError::DeckExhausted)?;
            table
                .seat_mut(seat)
                .ok_or(EngineError::EmptySeat)?
                .hand
                .push(card);
        }
    }
    for &seat in &order {
        let cards = table.seat(seat).ok_or(EngineError::EmptySeat)?.hand.clone();
        engine.history.push(RoundEventKind::CardsDealt { seat, cards });
    }

    engine.phase = RoundPhase::Betting;
    engine.current_actor = first_seat_after_dealer(table);

    debug!(
        "раунд {} начался: банк {}, ходит место {:?}",
        round_id, engine.pot.total, engine.current_actor
    );

    Ok((engine, RoundStatus::Ongoing))
}

/// Применить действие игрока. Действие либо целиком фиксируется в
/// состоянии раунда, либо отклоняется без изменений.
pub fn apply_action(
    table: &mut Table,
    engine: &mut RoundEngine,
    action: PlayerAction,
) -> Result<RoundStatus, EngineError> {
    if !table.round_in_progress {
        return Err(EngineError::NoActiveRound);
    }

    let seat_idx = action.seat as usize;
    if seat_idx >= table.seats.len() {
        return Err(EngineError::InvalidSeat(action.seat));
    }

    let player_ref = table.seats[seat_idx]
        .as_ref()
        .ok_or(EngineError::EmptySeat)?;

    if player_ref.player_id != action.player_id {
        return Err(EngineError::PlayerNotInGame(action.player_id));
    }

    // В торговле действует строго текущий игрок; в сваре очереди хода нет.
    if engine.phase == RoundPhase::Betting && engine.current_actor != Some(action.seat) {
        return Err(EngineError::NotPlayersTurn(action.player_id));
    }

    validate_action(table, engine, action.seat, &action.kind)?;

    let seat = action.seat;
    let policy = table.config.blind_policy;

    match action.kind {
        PlayerActionKind::Fold => match engine.phase {
            RoundPhase::Betting => {
                let was_blind = player_ref.is_blind;
                drop_player(table, engine, seat, DropReason::Folded);
                push_acted(table, engine, seat, PlayerActionKind::Fold, Chips::ZERO);
                if !was_blind {
                    engine.betting.anyone_acted_sighted = true;
                }
                advance_after(table, engine, seat)
            }
            RoundPhase::SwaraPending => swara::handle_decline(table, engine, seat),
            _ => Err(EngineError::IllegalAction),
        },

        PlayerActionKind::See => {
            if let Some(p) = table.seat_mut(seat) {
                p.is_blind = false;
            }
            engine.betting.anyone_acted_sighted = true;
            engine.history.push(RoundEventKind::HandSeen { seat });
            Ok(RoundStatus::Ongoing)
        }

        PlayerActionKind::Blind => {
            if let Some(p) = table.seat_mut(seat) {
                p.is_blind = true;
            }
            engine.history.push(RoundEventKind::BlindDeclared { seat });
            debug!("место {} играет втёмную", seat);
            Ok(RoundStatus::Ongoing)
        }

        PlayerActionKind::Call => {
            let (pay, chips, is_blind) = {
                let p = table.seat(seat).ok_or(EngineError::EmptySeat)?;
                (engine.betting.call_payment(p, &policy), p.chips, p.is_blind)
            };
            if pay > chips {
                forced_fold(table, engine, seat);
                return advance_after(table, engine, seat);
            }
            commit_chips(table, engine, seat, pay);
            push_acted(table, engine, seat, PlayerActionKind::Call, pay);
            if !is_blind {
                engine.betting.anyone_acted_sighted = true;
            }
            advance_after(table, engine, seat)
        }

        PlayerActionKind::Raise(target) => {
            let clamped = engine.betting.clamp_raise(target);
            let (pay, chips, was_blind) = {
                let p = table.seat(seat).ok_or(EngineError::EmptySeat)?;
                (
                    engine.betting.raise_payment(p, clamped, &policy),
                    p.chips,
                    p.is_blind,
                )
            };
            if pay > chips {
                forced_fold(table, engine, seat);
                return advance_after(table, engine, seat);
            }
            commit_chips(table, engine, seat, pay);
            engine.betting.on_raise(clamped, was_blind);
            push_acted(table, engine, seat, PlayerActionKind::Raise(clamped), pay);
            engine.history.push(RoundEventKind::BetRaised {
                seat,
                new_bet: clamped,
            });
            if !was_blind {
                engine.betting.anyone_acted_sighted = true;
            }

            // Выше порога тёмная игра теряет смысл — гасим флаги у всех.
            let threshold = policy.blind_clear_threshold(engine.betting.base_bet);
            if clamped > threshold {
                clear_blind_flags(table, engine, threshold);
            }

            advance_after(table, engine, seat)
        }

        PlayerActionKind::Showdown => {
            let opponent =
                prev_active_seat(table, seat).ok_or(EngineError::NoOpponentAvailable)?;

            let challenger_score = {
                let p = table.seat(seat).ok_or(EngineError::EmptySeat)?;
                score_hand(&p.hand)
            };
            let opponent_score = {
                let p = table.seat(opponent).ok_or(EngineError::EmptySeat)?;
                score_hand(&p.hand)
            };

            // Принудительное вскрытие публично: обе руки открываются.
            for s in [seat, opponent] {
                if let Some(p) = table.seat_mut(s) {
                    p.hand_revealed = true;
                }
            }

            // При равенстве проигрывает тот, кто вскрывал.
            let loser = if challenger_score > opponent_score {
                opponent
            } else {
                seat
            };

            engine.betting.showdown_in_rotation = true;
            engine.betting.anyone_acted_sighted = true;
            engine.history.push(RoundEventKind::ShowdownHeld {
                challenger: seat,
                opponent,
                challenger_score,
                opponent_score,
                loser,
            });
            info!(
                "вскрытие: место {} ({:?}) против места {} ({:?}), выбывает {}",
                seat, challenger_score, opponent, opponent_score, loser
            );
            drop_player(table, engine, loser, DropReason::LostShowdown);

            advance_after(table, engine, seat)
        }

        PlayerActionKind::SplitPot => swara::handle_split(table, engine, seat),

        PlayerActionKind::JoinSwara => swara::handle_join(table, engine, seat),
    }
}

/// Следующий seat по кругу без учёта статусов.
fn seat_after(seat: SeatIndex, max: u8) -> SeatIndex {
    ((seat as usize + 1) % max.max(1) as usize) as SeatIndex
}

/// Списать фишки и зачислить их в ставку/банк/взносы. Атомарно:
/// вызывающий код обязан заранее проверить платёжеспособность.
pub(crate) fn commit_chips(
    table: &mut Table,
    engine: &mut RoundEngine,
    seat: SeatIndex,
    amount: Chips,
) {
    if amount.is_zero() {
        return;
    }
    if let Some(p) = table.seat_mut(seat) {
        p.chips -= amount;
        p.committed_bet += amount;
    }
    engine.pot.add(amount);
    *engine.contributions.entry(seat).or_insert(Chips::ZERO) += amount;
}

/// Выбытие игрока из раунда со снимком в реестр выбывших.
pub(crate) fn drop_player(
    table: &mut Table,
    engine: &mut RoundEngine,
    seat: SeatIndex,
    reason: DropReason,
) {
    let Some(p) = table.seat_mut(seat) else {
        return;
    };
    p.status = match reason {
        DropReason::Insolvent => PlayerStatus::Busted,
        _ => PlayerStatus::Folded,
    };
    p.is_blind = false;
    let player_id = p.player_id;
    let chips_at_drop = p.chips;

    let contributed = engine
        .contributions
        .get(&seat)
        .copied()
        .unwrap_or(Chips::ZERO);
    engine.dropped.push(crate::domain::player::DroppedPlayer {
        seat,
        player_id,
        chips_at_drop,
        contributed,
        reason,
    });
    engine.history.push(RoundEventKind::PlayerDropped {
        seat,
        player_id,
        reason,
    });
    debug!("место {} выбыло из раунда: {:?}", seat, reason);
}

/// Платёж не по карману — действие превращается в вынужденный фолд.
fn forced_fold(table: &mut Table, engine: &mut RoundEngine, seat: SeatIndex) {
    info!("месту {} не хватило фишек на платёж — вынужденный фолд", seat);
    drop_player(table, engine, seat, DropReason::ForcedFold);
}

fn push_acted(
    table: &Table,
    engine: &mut RoundEngine,
    seat: SeatIndex,
    action: PlayerActionKind,
    paid: Chips,
) {
    if let Some(p) = table.seat(seat) {
        engine.history.push(RoundEventKind::PlayerActed {
            player_id: p.player_id,
            seat,
            action,
            paid,
            new_chips: p.chips,
            pot_after: engine.pot.total,
        });
    }
}

/// Передача хода после действия с проверкой замыкания круга.
fn advance_after(
    table: &mut Table,
    engine: &mut RoundEngine,
    from: SeatIndex,
) -> Result<RoundStatus, EngineError> {
    if table.active_count() <= 1 {
        return resolve_single_survivor(table, engine);
    }

    let next = next_active_seat(table, from, false)
        .ok_or(EngineError::Internal("не нашёлся следующий игрок"))?;

    // Круг замкнулся, если следующий игрок стоит в ротации не позже текущего.
    let wrapped = rotation_key(table, next) <= rotation_key(table, from);
    if wrapped {
        engine.betting.rotation_count += 1;
        engine.history.push(RoundEventKind::RotationCompleted {
            rotation: engine.betting.rotation_count,
        });
        debug!("круг {} завершён", engine.betting.rotation_count);

        if engine.betting.showdown_in_rotation {
            // Круг со вскрытием торговлю не закрывает.
            engine.betting.showdown_in_rotation = false;
        } else if all_active_matched(table, engine) || engine.betting.rotation_count >= 2 {
            return resolve_by_comparison(table, engine);
        }
    }

    engine.current_actor = Some(next);
    Ok(RoundStatus::Ongoing)
}

fn all_active_matched(table: &Table, engine: &RoundEngine) -> bool {
    table
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .filter(|p| p.is_active())
        .all(|p| engine.betting.is_matched(p))
}

/// Остался один несбросившийся — банк его.
fn resolve_single_survivor(
    table: &mut Table,
    engine: &mut RoundEngine,
) -> Result<RoundStatus, EngineError> {
    let seat = table
        .seats
        .iter()
        .enumerate()
        .find(|(_, s)| s.as_ref().map(|p| p.is_active()).unwrap_or(false))
        .map(|(idx, _)| idx as SeatIndex)
        .ok_or(EngineError::Internal("нет активных игроков"))?;

    let total = engine.pot.total;
    let amount = engine.pot.take_all();
    award(table, engine, seat, amount);
    info!("раунд {}: банк {} забирает место {}", engine.round_id, total, seat);

    close_round(table, engine);
    let summary = build_summary(
        table,
        engine,
        RoundOutcome::SingleSurvivor { seat },
        &[(seat, amount)],
        total,
    );
    Ok(RoundStatus::Resolved(summary))
}

/// Общее сравнение рук всех оставшихся: уникальный максимум забирает
/// банк, ничья уводит раунд в свару.
fn resolve_by_comparison(
    table: &mut Table,
    engine: &mut RoundEngine,
) -> Result<RoundStatus, EngineError> {
    let dealer = table
        .dealer_index
        .ok_or(EngineError::Internal("дилер не выбран"))?;
    let order = collect_active_seats_from(table, seat_after(dealer, table.max_players()));

    let mut scores: Vec<(SeatIndex, HandScore)> = Vec::with_capacity(order.len());
    for &seat in &order {
        let p = table.seat(seat).ok_or(EngineError::EmptySeat)?;
        scores.push((seat, score_hand(&p.hand)));
    }

    // Сравнение публичное — руки открываются.
    for &(seat, _) in &scores {
        if let Some(p) = table.seat_mut(seat) {
            p.hand_revealed = true;
        }
    }

    engine.history.push(RoundEventKind::HandsCompared {
        scores: scores.clone(),
    });
    engine.last_compared = scores.clone();

    let best = scores
        .iter()
        .map(|(_, s)| *s)
        .max()
        .ok_or(EngineError::Internal("сравнение без участников"))?;
    let winners: Vec<SeatIndex> = scores
        .iter()
        .filter(|(_, s)| *s == best)
        .map(|(seat, _)| *seat)
        .collect();

    if winners.len() == 1 {
        let seat = winners[0];
        let total = engine.pot.total;
        let amount = engine.pot.take_all();
        award(table, engine, seat, amount);
        info!(
            "раунд {}: место {} выигрывает сравнение ({:?}), банк {}",
            engine.round_id, seat, best, total
        );

        close_round(table, engine);
        let summary = build_summary(
            table,
            engine,
            RoundOutcome::BestScore { seat, score: best },
            &[(seat, amount)],
            total,
        );
        return Ok(RoundStatus::Resolved(summary));
    }

    info!(
        "раунд {}: ничья на {:?} между местами {:?} — свара",
        engine.round_id, best, winners
    );
    swara::enter_swara(table, engine, winners)
}

/// Выплата из банка с записью в историю.
pub(crate) fn award(table: &mut Table, engine: &mut RoundEngine, seat: SeatIndex, amount: Chips) {
    if let Some(p) = table.seat_mut(seat) {
        p.chips += amount;
        engine.history.push(RoundEventKind::PotAwarded {
            seat,
            player_id: p.player_id,
            amount,
        });
    }
}

/// Закрыть раунд: фазы, флаги стола, финальное событие.
pub(crate) fn close_round(table: &mut Table, engine: &mut RoundEngine) {
    engine.phase = RoundPhase::Resolved;
    engine.current_actor = None;
    table.round_in_progress = false;
    table.current_round_id = None;
    engine.history.push(RoundEventKind::RoundFinished {
        round_id: engine.round_id,
        game_id: engine.game_id,
    });
}

/// Итоговая сводка раунда по текущему столу и выплатам.
pub(crate) fn build_summary(
    table: &Table,
    engine: &RoundEngine,
    outcome: RoundOutcome,
    payouts: &[(SeatIndex, Chips)],
    total_pot: Chips,
) -> RoundSummary {
    let mut results = Vec::new();

    for (idx, seat_opt) in table.seats.iter().enumerate() {
        if let Some(p) = seat_opt.as_ref() {
            let seat = idx as SeatIndex;
            let score = engine
                .last_compared
                .iter()
                .find(|(s, _)| *s == seat)
                .map(|(_, sc)| *sc);
            let winnings = payouts
                .iter()
                .find(|(s, _)| *s == seat)
                .map(|(_, a)| *a)
                .unwrap_or(Chips::ZERO);
            results.push(PlayerRoundResult {
                player_id: p.player_id,
                score,
                winnings,
                is_winner: !winnings.is_zero(),
            });
        }
    }

    RoundSummary {
        round_id: engine.round_id,
        game_id: engine.game_id,
        swara_cycles: engine.swara_cycles,
        total_pot,
        outcome,
        results,
    }
}

/// После анте осталось меньше двух плательщиков: банк возвращается
/// единственному (если он есть), раунд закрывается, драйвер начнёт новый.
fn resolve_void_start(
    table: &mut Table,
    engine: &mut RoundEngine,
) -> Result<RoundStatus, EngineError> {
    let total = engine.pot.total;

    let survivor = table
        .seats
        .iter()
        .enumerate()
        .find(|(_, s)| s.as_ref().map(|p| p.is_active()).unwrap_or(false))
        .map(|(idx, _)| idx as SeatIndex);

    let mut payouts = Vec::new();
    if let Some(seat) = survivor {
        let amount = engine.pot.take_all();
        award(table, engine, seat, amount);
        payouts.push((seat, amount));
    }

    warn!(
        "раунд {}: после анте осталось ≤1 плательщика, раунд аннулирован",
        engine.round_id
    );

    close_round(table, engine);
    let summary = build_summary(table, engine, RoundOutcome::Voided, &payouts, total);
    Ok(RoundStatus::Resolved(summary))
}

/// Погасить тёмные флаги у всех: ставка превысила порог тёмной игры.
fn clear_blind_flags(table: &mut Table, engine: &mut RoundEngine, threshold: Chips) {
    for seat_opt in table.seats.iter_mut() {
        if let Some(p) = seat_opt {
            p.is_blind = false;
        }
    }
    engine.betting.current_bet_blind = false;
    engine
        .history
        .push(RoundEventKind::BlindsCleared { threshold });
    debug!("ставка превысила {} — тёмная игра закончена", threshold);
}
