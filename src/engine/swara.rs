use std::collections::HashMap;

use log::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::player::{DropReason, DroppedPlayer, PlayerStatus};
use crate::domain::round::{RoundOutcome, RoundPhase};
use crate::domain::table::{SeatIndex, Table};
use crate::engine::errors::EngineError;
use crate::engine::history::RoundEventKind;
use crate::engine::round::{
    award, build_summary, close_round, commit_chips, drop_player, RoundEngine, RoundStatus,
};
use crate::engine::turn::collect_active_seats_from;
use crate::engine::{shuffle, RandomSource};

/// Состояние свары между объявлением ничьей и пересдачей.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwaraState {
    /// Победители, поделившие максимум очков.
    pub tied: Vec<SeatIndex>,
    /// Выбывшие, успевшие докупиться.
    pub joiners: Vec<SeatIndex>,
    /// Выбывшие, чьё предложение о докупе ещё открыто.
    pub pending_offers: Vec<SeatIndex>,
    /// Голоса победителей за делёж банка.
    pub split_votes: Vec<SeatIndex>,
}

/// Вход в свару после ничьей при общем сравнении.
///
/// Проигравшие сравнение выбывают (и тоже получают право на докуп),
/// победителям сбрасываются флаги, выбывшим этого раунда с достаточным
/// стеком открываются предложения купить место за полбанка.
pub(crate) fn enter_swara(
    table: &mut Table,
    engine: &mut RoundEngine,
    winners: Vec<SeatIndex>,
) -> Result<RoundStatus, EngineError> {
    let losers: Vec<SeatIndex> = engine
        .last_compared
        .iter()
        .map(|(seat, _)| *seat)
        .filter(|seat| !winners.contains(seat))
        .collect();
    for seat in losers {
        drop_player(table, engine, seat, DropReason::LostShowdown);
    }

    for &seat in &winners {
        if let Some(p) = table.seat_mut(seat) {
            p.is_blind = false;
        }
    }

    let fee = engine.pot.total.halved();
    let offered = eligible_buyers(table, engine, fee);

    engine.history.push(RoundEventKind::SwaraStarted {
        tied: winners.clone(),
        offered: offered.clone(),
    });
    info!(
        "свара: победители {:?}, докуп за {} предложен {:?}",
        winners, fee, offered
    );

    engine.swara = Some(SwaraState {
        tied: winners,
        joiners: Vec::new(),
        pending_offers: offered,
        split_votes: Vec::new(),
    });
    engine.phase = RoundPhase::SwaraPending;
    engine.current_actor = None;

    Ok(RoundStatus::Ongoing)
}

/// Кому предлагать докуп: выбывшие этого раунда, кроме вылетевших на анте,
/// со стеком не меньше текущего взноса. Право определяет последняя запись
/// в реестре по каждому месту.
fn eligible_buyers(table: &Table, engine: &RoundEngine, fee: Chips) -> Vec<SeatIndex> {
    let mut last: HashMap<SeatIndex, &DroppedPlayer> = HashMap::new();
    for d in &engine.dropped {
        last.insert(d.seat, d);
    }

    let mut seats: Vec<SeatIndex> = last
        .into_values()
        .filter(|d| d.swara_eligible())
        .filter(|d| {
            table
                .seat(d.seat)
                .map(|p| p.status == PlayerStatus::Folded && p.chips >= fee)
                .unwrap_or(false)
        })
        .map(|d| d.seat)
        .collect();
    seats.sort_unstable();
    seats
}

/// JoinSwara: докуп выбывшего либо требование переигровки победителем.
pub(crate) fn handle_join(
    table: &mut Table,
    engine: &mut RoundEngine,
    seat: SeatIndex,
) -> Result<RoundStatus, EngineError> {
    let fee = engine.pot.total.halved();

    let is_offered = {
        let st = engine.swara.as_ref().ok_or(EngineError::NoActiveRound)?;
        st.pending_offers.contains(&seat)
    };

    if !is_offered {
        // Валидация уже проверила: это победитель требует переигровку.
        return Ok(RoundStatus::SwaraReady);
    }

    if let Some(st) = engine.swara.as_mut() {
        st.pending_offers.retain(|&s| s != seat);
    }

    let (chips, player_id) = {
        let p = table.seat(seat).ok_or(EngineError::EmptySeat)?;
        (p.chips, p.player_id)
    };

    if chips < fee {
        // Взнос подрос после чужих докупов — считаем это отказом, не ошибкой.
        engine
            .history
            .push(RoundEventKind::SwaraDeclined { seat, player_id });
        debug!("месту {} не хватило на докуп {} — отказ", seat, fee);
    } else {
        commit_chips(table, engine, seat, fee);
        if let Some(st) = engine.swara.as_mut() {
            st.joiners.push(seat);
        }
        engine.history.push(RoundEventKind::SwaraJoined {
            seat,
            player_id,
            fee,
        });
        info!("место {} докупилось в свару за {}", seat, fee);
    }

    maybe_ready(engine)
}

/// Отказ выбывшего от докупа.
pub(crate) fn handle_decline(
    table: &mut Table,
    engine: &mut RoundEngine,
    seat: SeatIndex,
) -> Result<RoundStatus, EngineError> {
    let player_id = table.seat(seat).ok_or(EngineError::EmptySeat)?.player_id;

    let st = engine.swara.as_mut().ok_or(EngineError::NoActiveRound)?;
    st.pending_offers.retain(|&s| s != seat);

    engine
        .history
        .push(RoundEventKind::SwaraDeclined { seat, player_id });

    maybe_ready(engine)
}

/// Когда предложения закрыты и есть хотя бы один докуп,
/// пересдача стартует без дополнительных решений.
fn maybe_ready(engine: &RoundEngine) -> Result<RoundStatus, EngineError> {
    let st = engine.swara.as_ref().ok_or(EngineError::NoActiveRound)?;
    if st.pending_offers.is_empty() && !st.joiners.is_empty() {
        Ok(RoundStatus::SwaraReady)
    } else {
        Ok(RoundStatus::Ongoing)
    }
}

/// Голос победителя за делёж. Банк делится, когда «за» все победители
/// и кроме них в сваре никого не осталось.
pub(crate) fn handle_split(
    table: &mut Table,
    engine: &mut RoundEngine,
    seat: SeatIndex,
) -> Result<RoundStatus, EngineError> {
    let all_voted = {
        let st = engine.swara.as_mut().ok_or(EngineError::NoActiveRound)?;
        if !st.split_votes.contains(&seat) {
            st.split_votes.push(seat);
        }
        st.tied.iter().all(|s| st.split_votes.contains(s))
    };

    if !all_voted {
        return Ok(RoundStatus::Ongoing);
    }

    let tied = engine
        .swara
        .as_ref()
        .ok_or(EngineError::NoActiveRound)?
        .tied
        .clone();

    let total = engine.pot.total;
    let (share, mut remainder) = engine.pot.split_even(tied.len());
    engine.pot.take_all();

    let mut payouts = Vec::with_capacity(tied.len());
    for &s in &tied {
        let mut prize = share;
        if remainder.0 > 0 {
            prize.0 += 1;
            remainder.0 -= 1;
        }
        award(table, engine, s, prize);
        payouts.push((s, prize));
    }

    engine.history.push(RoundEventKind::PotSplit {
        seats: tied.clone(),
        share,
    });
    info!("свара: банк {} поделён между {:?}", total, tied);

    close_round(table, engine);
    let summary = build_summary(
        table,
        engine,
        RoundOutcome::PotSplit { seats: tied, share },
        &payouts,
        total,
    );
    Ok(RoundStatus::Resolved(summary))
}

/// Пересдача свары: участники получают свежие руки, торговля начинается
/// заново от анте. Анте не взимается. Вызывается внешним драйвером,
/// потому что требует источник случайности.
pub fn deal_swara<R: RandomSource>(
    table: &mut Table,
    engine: &mut RoundEngine,
    rng: &mut R,
) -> Result<RoundStatus, EngineError> {
    if engine.phase != RoundPhase::SwaraPending {
        return Err(EngineError::IllegalAction);
    }
    let st = engine
        .swara
        .take()
        .ok_or(EngineError::Internal("нет состояния свары"))?;

    let mut participants: Vec<SeatIndex> = st.tied;
    participants.extend(st.joiners);
    participants.sort_unstable();

    engine.is_swara = true;
    engine.swara_cycles += 1;

    for &seat in &participants {
        if let Some(p) = table.seat_mut(seat) {
            p.reset_for_deal();
            p.status = PlayerStatus::Active;
        }
    }

    let mut deck = Deck::svara_36();
    shuffle(rng, &mut deck.cards);
    engine.deck = deck;

    let dealer = table
        .dealer_index
        .ok_or(EngineError::Internal("дилер не выбран"))?;
    let start = ((dealer as usize + 1) % table.max_players().max(1) as usize) as SeatIndex;
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

    engine.betting.reset_for_swara();
    engine.last_compared.clear();
    engine.phase = RoundPhase::Betting;
    engine.current_actor = order.first().copied();

    engine.history.push(RoundEventKind::SwaraDealt {
        participants: order.clone(),
    });
    info!(
        "свара-цикл {}: пересдача для {:?}, банк {}",
        engine.swara_cycles, order, engine.pot.total
    );

    Ok(RoundStatus::Ongoing)
}
