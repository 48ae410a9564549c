use crate::domain::card::Rank;
use crate::domain::deck::Deck;
use crate::domain::table::{SeatIndex, Table};
use crate::engine::errors::EngineError;
use crate::engine::{shuffle, RandomSource};

/// Найти следующее активное место по кругу (включая/исключая start).
pub fn next_active_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    if table.seats.is_empty() {
        return None;
    }

    let max = table.max_players() as usize;
    let mut idx = start as usize;

    if !include_start {
        idx = (idx + 1) % max;
        // Полный оборот без учёта стартового места.
        for _ in 0..max.saturating_sub(1) {
            if is_active(table, idx) {
                return Some(idx as SeatIndex);
            }
            idx = (idx + 1) % max;
        }
        return None;
    }

    for _ in 0..max {
        if is_active(table, idx) {
            return Some(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Предыдущее активное место по кругу (против хода раздачи), не считая start.
/// Это соперник для вскрытия.
pub fn prev_active_seat(table: &Table, start: SeatIndex) -> Option<SeatIndex> {
    let max = table.max_players() as usize;
    if max == 0 {
        return None;
    }

    let mut idx = start as usize;
    for _ in 0..max.saturating_sub(1) {
        idx = (idx + max - 1) % max;
        if is_active(table, idx) {
            return Some(idx as SeatIndex);
        }
    }

    None
}

/// Все активные места начиная с start (по кругу).
pub fn collect_active_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.max_players() as usize;
    let mut seats = Vec::new();

    if max == 0 {
        return seats;
    }

    let mut idx = start as usize;
    for _ in 0..max {
        if is_active(table, idx) {
            seats.push(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    seats
}

/// Первый активный игрок слева от дилера — с него начинается торговля.
pub fn first_seat_after_dealer(table: &Table) -> Option<SeatIndex> {
    let dealer = table.dealer_index?;
    next_active_seat(table, dealer, false)
}

/// Позиция места в порядке ротации, начинающейся сразу после дилера.
/// Используется для обнаружения замыкания круга.
pub fn rotation_key(table: &Table, seat: SeatIndex) -> usize {
    let max = (table.max_players() as usize).max(1);
    let dealer = table.dealer_index.unwrap_or(0) as usize;
    (seat as usize + max - (dealer + 1) % max) % max
}

/// Выбор дилера: свежую перетасованную колоду сдаём по кругу занятым
/// местам по одной карте; кому первому придёт туз — тот дилер.
pub fn choose_dealer_by_first_ace<R: RandomSource>(
    table: &Table,
    rng: &mut R,
) -> Result<SeatIndex, EngineError> {
    let occupied: Vec<SeatIndex> = table
        .seats
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_some())
        .map(|(idx, _)| idx as SeatIndex)
        .collect();

    if occupied.len() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let mut deck = Deck::svara_36();
    shuffle(rng, &mut deck.cards);

    for (i, card) in deck.cards.iter().rev().enumerate() {
        if card.rank == Rank::Ace {
            return Ok(occupied[i % occupied.len()]);
        }
    }

    // В колоде четыре туза — сюда попасть нельзя.
    Err(EngineError::Internal("в колоде не нашлось туза"))
}

fn is_active(table: &Table, idx: usize) -> bool {
    table
        .seats
        .get(idx)
        .and_then(|s| s.as_ref())
        .map(|p| p.is_active())
        .unwrap_or(false)
}
