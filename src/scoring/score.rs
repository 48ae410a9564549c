use crate::domain::card::{Card, Rank, Suit};
use crate::domain::round::HandScore;

/// Фиксированные очки за двух и более тузов.
pub const DOUBLE_ACE_SCORE: u32 = 22;

/// Фиксированные очки за три шестёрки — старшая комбинация игры.
pub const TRIPLE_SIX_SCORE: u32 = 34;

/// Номинал джокера при присоединении к масти.
pub const JOKER_VALUE: u32 = 11;

/// Главная функция: сила трёхкарточной руки.
///
/// Чистая, детерминированная, инвариантная к порядку карт. Порядок
/// проверок важен — выигрывает первое совпадение:
///   1) два и более туза → 22;
///   2) тройка (джокер достраивает пару) → 34 для шестёрок, иначе сумма;
///   3) максимум посуитных сумм, джокер идёт в самую населённую масть;
///   4) вырожденные руки (пустая / одинокий джокер).
pub fn score_hand(cards: &[Card]) -> HandScore {
    let aces = cards.iter().filter(|c| c.rank == Rank::Ace).count();
    if aces >= 2 {
        return HandScore(DOUBLE_ACE_SCORE);
    }

    let has_joker = cards.iter().any(|c| c.is_joker());
    let plain: Vec<&Card> = cards.iter().filter(|c| !c.is_joker()).collect();

    if let Some(score) = try_triple(&plain, has_joker, cards.len()) {
        return score;
    }

    suit_sum_score(&plain, has_joker)
}

/// Проверка на тройку: либо три одинаковых ранга, либо пара + джокер.
/// Джокер берёт номинал достроенного ранга.
fn try_triple(plain: &[&Card], has_joker: bool, total: usize) -> Option<HandScore> {
    if total != 3 || plain.is_empty() {
        return None;
    }

    let matched = plain[0].rank;
    if !plain.iter().all(|c| c.rank == matched) {
        return None;
    }

    let complete = plain.len() == 3 || (plain.len() == 2 && has_joker);
    if !complete {
        return None;
    }

    if matched == Rank::Six {
        Some(HandScore(TRIPLE_SIX_SCORE))
    } else {
        Some(HandScore(matched.value() * 3))
    }
}

/// Посуитные суммы. Джокер (11) присоединяется к масти, где больше всего
/// карт; при равенстве — к более дорогой, дальше по фиксированному
/// порядку мастей. Такой выбор не зависит от порядка карт в руке и
/// никогда не ухудшает результат игрока.
fn suit_sum_score(plain: &[&Card], has_joker: bool) -> HandScore {
    let mut sums = [0u32; 4];
    let mut counts = [0u8; 4];

    for card in plain {
        let idx = card.suit.index();
        sums[idx] += card.rank.value();
        counts[idx] += 1;
    }

    if has_joker {
        let mut best = 0usize;
        for idx in 1..Suit::ALL.len() {
            if (counts[idx], sums[idx]) > (counts[best], sums[best]) {
                best = idx;
            }
        }
        sums[best] += JOKER_VALUE;
    }

    // Пустая рука без джокера даёт 0, одинокий джокер — 11.
    HandScore(sums.into_iter().max().unwrap_or(0))
}
