use std::str::FromStr;

use svara_engine::domain::card::Card;
use svara_engine::domain::round::HandScore;
use svara_engine::scoring::{score_hand, DOUBLE_ACE_SCORE, JOKER_VALUE, TRIPLE_SIX_SCORE};

fn hand(s: &[&str]) -> Vec<Card> {
    s.iter()
        .map(|c| Card::from_str(c).expect("bad card literal"))
        .collect()
}

fn score(s: &[&str]) -> u32 {
    score_hand(&hand(s)).0
}

//
// Инвариантность к порядку карт.
//
#[test]
fn score_is_permutation_invariant() {
    let hands: Vec<Vec<&str>> = vec![
        vec!["Ah", "Ad", "9c"],
        vec!["7c", "7s", "7d"],
        vec!["6h", "6d", "6c"],
        vec!["7c", "9h", "Kh"],
        vec!["Ks", "Qs", "6d"],
        vec!["7c", "9h", "Ks"],
    ];

    for h in hands {
        let base = score(&h);
        // все 6 перестановок трёх карт
        let perms = [
            [h[0], h[1], h[2]],
            [h[0], h[2], h[1]],
            [h[1], h[0], h[2]],
            [h[1], h[2], h[0]],
            [h[2], h[0], h[1]],
            [h[2], h[1], h[0]],
        ];
        for p in perms {
            assert_eq!(score(&p), base, "перестановка {:?} дала другой счёт", p);
        }
    }
}

//
// Два туза — фиксированные 22, независимо от мастей и третьей карты.
//
#[test]
fn two_aces_score_fixed_22() {
    assert_eq!(score(&["Ah", "Ad", "9c"]), DOUBLE_ACE_SCORE);
    assert_eq!(score(&["As", "Ac", "6d"]), DOUBLE_ACE_SCORE);
    // Джокер при двух тузах не меняет дела.
    assert_eq!(score(&["Ah", "As", "7c"]), DOUBLE_ACE_SCORE);
    // И три туза — это тоже «два и более».
    assert_eq!(score(&["Ah", "Ad", "As"]), DOUBLE_ACE_SCORE);
}

//
// Тройки.
//
#[test]
fn triple_six_scores_34() {
    assert_eq!(score(&["6h", "6d", "6c"]), TRIPLE_SIX_SCORE);
    assert_eq!(score(&["6h", "6d", "6s"]), TRIPLE_SIX_SCORE);
}

#[test]
fn joker_completes_triple_sevens_by_value_sum() {
    // 7♣ — джокер, достраивает пару семёрок: сумма номиналов, не 34.
    assert_eq!(score(&["7c", "7s", "7d"]), 21);
}

#[test]
fn joker_completes_triple_of_sixes_as_34() {
    // Джокер достраивает пару шестёрок — совпавший ранг шестёрка.
    assert_eq!(score(&["7c", "6h", "6d"]), TRIPLE_SIX_SCORE);
}

#[test]
fn natural_triple_sums_values() {
    assert_eq!(score(&["Kh", "Kd", "Ks"]), 30);
    assert_eq!(score(&["9h", "9d", "9s"]), 27);
    // Семёрки без джокера (7♣ нет в руке) — обычная тройка.
    assert_eq!(score(&["7h", "7s", "7d"]), 21);
}

//
// Посуитные суммы и джокер.
//
#[test]
fn suited_cards_sum_within_suit() {
    // Туз и король червей: 11 + 10 = 21, бубновая шестёрка не при делах.
    assert_eq!(score(&["Ah", "Kh", "6d"]), 21);
    // Все три одной масти — полная сумма.
    assert_eq!(score(&["Ks", "Qs", "6s"]), 26);
}

#[test]
fn offsuit_hand_reduces_to_highest_card() {
    // Три разные масти без пар: каждая масть — одна карта,
    // итог равен номиналу самой дорогой.
    assert_eq!(score(&["6h", "9d", "Ks"]), 10);
    assert_eq!(score(&["8h", "9d", "6s"]), 9);
}

#[test]
fn joker_attaches_to_most_populated_suit() {
    // Две червы + джокер: 9 + 10 + 11 = 30.
    assert_eq!(score(&["7c", "9h", "Kh"]), 30);
}

#[test]
fn joker_tie_breaks_toward_richer_suit() {
    // По одной карте в черве и пике: джокер идёт к более дорогой (K > 9).
    assert_eq!(score(&["7c", "9h", "Ks"]), 10 + JOKER_VALUE);
}

#[test]
fn pair_without_joker_scores_by_suit_not_pair() {
    // Пара без масти и джокера ничего не стоит сверх старшей карты.
    assert_eq!(score(&["Kh", "Ks", "9d"]), 10);
}

//
// Тотальность: функция обязана вернуть счёт для любой тройки из колоды.
//
#[test]
fn score_is_total_over_all_deck_triples() {
    use svara_engine::domain::deck::Deck;

    let deck = Deck::svara_36();
    let cards = &deck.cards;
    let mut checked = 0u32;

    for a in 0..cards.len() {
        for b in (a + 1)..cards.len() {
            for c in (b + 1)..cards.len() {
                let s = score_hand(&[cards[a], cards[b], cards[c]]);
                assert!(s >= HandScore(6), "счёт не может быть ниже номинала карты");
                assert!(s <= HandScore(34), "максимум — три шестёрки");
                checked += 1;
            }
        }
    }

    // C(36,3) = 7140 комбинаций.
    assert_eq!(checked, 7140);
}

//
// Вырожденные случаи.
//
#[test]
fn degenerate_hands() {
    assert_eq!(score_hand(&[]), HandScore(0));
    // Одинокий джокер — 11.
    assert_eq!(score(&["7c"]), JOKER_VALUE);
}
