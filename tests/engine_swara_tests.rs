use std::str::FromStr;

use svara_engine::domain::{
    card::Card,
    chips::Chips,
    player::{PlayerStatus, SeatedPlayer},
    round::{RoundOutcome, RoundPhase},
    table::{GameConfig, Table},
};
use svara_engine::engine::{
    apply_action, deal_swara, start_round, EngineError, PlayerAction, PlayerActionKind,
    RoundEngine, RoundStatus,
};
use svara_engine::infra::{DeterministicRng, NoShuffleRng};

fn make_table(chips: &[u64]) -> Table {
    let config = GameConfig::new(7, Chips(50), Chips(500), Chips(1000));
    let mut table = Table::new(1, "SWARA".to_string(), config);
    for (i, &stack) in chips.iter().enumerate() {
        table.seats[i] = Some(SeatedPlayer::new((i + 1) as u64, Chips(stack)));
    }
    table
}

fn act(
    table: &mut Table,
    engine: &mut RoundEngine,
    seat: u8,
    kind: PlayerActionKind,
) -> Result<RoundStatus, EngineError> {
    let pid = table.seat(seat).unwrap().player_id;
    apply_action(
        table,
        engine,
        PlayerAction {
            player_id: pid,
            seat,
            kind,
        },
    )
}

fn set_hand(table: &mut Table, seat: u8, cards: &[&str]) {
    table.seat_mut(seat).unwrap().hand = cards
        .iter()
        .map(|c| Card::from_str(c).expect("bad card literal"))
        .collect();
}

fn assert_pot_invariant(engine: &RoundEngine) {
    let sum: u64 = engine.contributions.values().map(|c| c.0).sum();
    assert_eq!(engine.pot.total.0, sum);
}

/// Трое играют, место 2 сбрасывается, места 0 и 1 завязывают ничью
/// на 22 (по два туза). Раунд уходит в свару.
fn tie_after_fold() -> (Table, RoundEngine) {
    let mut table = make_table(&[1000, 1000, 1000]);
    table.dealer_index = Some(2);
    let mut rng = NoShuffleRng;
    let (mut engine, _) = start_round(&mut table, &mut rng, 1).expect("start_round failed");

    set_hand(&mut table, 0, &["Ah", "Ad", "9c"]); // 22
    set_hand(&mut table, 1, &["As", "Ac", "8d"]); // 22

    act(&mut table, &mut engine, 0, PlayerActionKind::Call).unwrap();
    act(&mut table, &mut engine, 1, PlayerActionKind::Call).unwrap();
    let status = act(&mut table, &mut engine, 2, PlayerActionKind::Fold).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));

    (table, engine)
}

//
// Ничья двух рук по 22 уводит раунд в свару; выбывшему с достаточным
// стеком предлагают докуп за полбанка.
//
#[test]
fn tie_at_double_aces_enters_swara_with_buy_back_offer() {
    let (table, engine) = tie_after_fold();

    assert_eq!(engine.phase, RoundPhase::SwaraPending);
    assert!(engine.current_actor.is_none());

    let st = engine.swara.as_ref().expect("нет состояния свары");
    assert_eq!(st.tied, vec![0, 1]);
    // Банк 150, взнос 75; у места 2 осталось 950 — предложение открыто.
    assert_eq!(st.pending_offers, vec![2]);
    assert!(st.joiners.is_empty());

    // Руки победителей открыты, тёмные флаги сброшены.
    for seat in [0u8, 1u8] {
        let p = table.seat(seat).unwrap();
        assert!(p.hand_revealed);
        assert!(!p.is_blind);
    }
}

//
// Докуп: половина текущего банка, затем пересдача без нового анте.
//
#[test]
fn buy_back_pays_half_pot_and_swara_redeals() {
    let (mut table, mut engine) = tie_after_fold();

    let status = act(&mut table, &mut engine, 2, PlayerActionKind::JoinSwara).unwrap();
    assert!(matches!(status, RoundStatus::SwaraReady));

    // 950 - 75 = 875; банк 150 + 75 = 225.
    assert_eq!(table.seat(2).unwrap().chips, Chips(875));
    assert_eq!(engine.pot.total, Chips(225));
    assert_pot_invariant(&engine);

    let mut rng = DeterministicRng::from_seed(7);
    let status = deal_swara(&mut table, &mut engine, &mut rng).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));

    assert!(engine.is_swara);
    assert_eq!(engine.swara_cycles, 1);
    assert_eq!(engine.phase, RoundPhase::Betting);
    assert_eq!(engine.betting.current_bet, Chips(50));

    // Свежие руки у всех участников, анте не взималось.
    for seat in [0u8, 1u8, 2u8] {
        let p = table.seat(seat).unwrap();
        assert_eq!(p.status, PlayerStatus::Active);
        assert_eq!(p.hand.len(), 3);
        assert_eq!(p.committed_bet, Chips::ZERO);
        assert!(!p.hand_revealed);
    }
    // Банк не изменился пересдачей.
    assert_eq!(engine.pot.total, Chips(225));
}

//
// Отказ выбывшего: победители решают сами — единогласный делёж.
//
#[test]
fn decline_then_unanimous_split_divides_pot() {
    let (mut table, mut engine) = tie_after_fold();

    // Отказ от докупа.
    let status = act(&mut table, &mut engine, 2, PlayerActionKind::Fold).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));
    assert!(engine.swara.as_ref().unwrap().pending_offers.is_empty());

    // Первый голос за делёж ничего не решает.
    let status = act(&mut table, &mut engine, 0, PlayerActionKind::SplitPot).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));

    // Второй — делит банк 150 на двоих.
    let status = act(&mut table, &mut engine, 1, PlayerActionKind::SplitPot).unwrap();
    match status {
        RoundStatus::Resolved(summary) => match summary.outcome {
            RoundOutcome::PotSplit { seats, share } => {
                assert_eq!(seats, vec![0, 1]);
                assert_eq!(share, Chips(75));
            }
            other => panic!("неожиданный исход: {:?}", other),
        },
        other => panic!("ожидался делёж, получили {:?}", other),
    }

    // 1000 - 50 + 75 = 1025 у каждого победителя.
    assert_eq!(table.seat(0).unwrap().chips, Chips(1025));
    assert_eq!(table.seat(1).unwrap().chips, Chips(1025));
    assert!(!table.round_in_progress);
}

//
// Любой победитель вправе потребовать переигровку вместо дележа.
//
#[test]
fn tied_winner_can_force_replay() {
    let (mut table, mut engine) = tie_after_fold();

    act(&mut table, &mut engine, 2, PlayerActionKind::Fold).unwrap();

    let status = act(&mut table, &mut engine, 0, PlayerActionKind::JoinSwara).unwrap();
    assert!(matches!(status, RoundStatus::SwaraReady));

    let mut rng = DeterministicRng::from_seed(11);
    deal_swara(&mut table, &mut engine, &mut rng).unwrap();

    // Переигровка только между победителями.
    assert_eq!(table.seat(0).unwrap().status, PlayerStatus::Active);
    assert_eq!(table.seat(1).unwrap().status, PlayerStatus::Active);
    assert_eq!(table.seat(2).unwrap().status, PlayerStatus::Folded);
}

//
// Делёж недоступен, пока предложения о докупе открыты.
//
#[test]
fn split_rejected_while_offers_pending() {
    let (mut table, mut engine) = tie_after_fold();

    let err = act(&mut table, &mut engine, 0, PlayerActionKind::SplitPot).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));
}

//
// Вылетевший на анте в свару не возвращается.
//
#[test]
fn insolvent_player_never_offered_buy_back() {
    let mut table = make_table(&[1000, 1000, 30]);
    table.dealer_index = Some(2);
    let mut rng = NoShuffleRng;
    let (mut engine, _) = start_round(&mut table, &mut rng, 1).expect("start_round failed");

    set_hand(&mut table, 0, &["Ah", "Ad", "9c"]); // 22
    set_hand(&mut table, 1, &["As", "Ac", "8d"]); // 22

    act(&mut table, &mut engine, 0, PlayerActionKind::Call).unwrap();
    act(&mut table, &mut engine, 1, PlayerActionKind::Call).unwrap();

    assert_eq!(engine.phase, RoundPhase::SwaraPending);
    let st = engine.swara.as_ref().unwrap();
    assert!(st.pending_offers.is_empty(), "вылетевшему докуп не предлагают");
}

//
// Выбывший без стека на взнос предложения не получает.
//
#[test]
fn poor_dropped_player_not_offered() {
    let mut table = make_table(&[1000, 1000, 120]);
    table.dealer_index = Some(2);
    let mut rng = NoShuffleRng;
    let (mut engine, _) = start_round(&mut table, &mut rng, 1).expect("start_round failed");

    set_hand(&mut table, 0, &["Ah", "Ad", "9c"]);
    set_hand(&mut table, 1, &["As", "Ac", "8d"]);

    act(&mut table, &mut engine, 0, PlayerActionKind::Call).unwrap();
    act(&mut table, &mut engine, 1, PlayerActionKind::Call).unwrap();
    // После анте у места 2 осталось 70 < 75 (полбанка) — без предложения.
    act(&mut table, &mut engine, 2, PlayerActionKind::Fold).unwrap();

    assert_eq!(engine.phase, RoundPhase::SwaraPending);
    let st = engine.swara.as_ref().unwrap();
    assert!(st.pending_offers.is_empty());
}

//
// Рекурсия: ничья в сваре запускает следующий цикл.
//
#[test]
fn swara_tie_recurses_into_next_cycle() {
    let (mut table, mut engine) = tie_after_fold();

    act(&mut table, &mut engine, 2, PlayerActionKind::Fold).unwrap();
    act(&mut table, &mut engine, 0, PlayerActionKind::JoinSwara).unwrap();

    let mut rng = DeterministicRng::from_seed(3);
    deal_swara(&mut table, &mut engine, &mut rng).unwrap();
    assert_eq!(engine.swara_cycles, 1);

    // Снова по два туза у обоих.
    set_hand(&mut table, 0, &["Ah", "Ad", "9c"]);
    set_hand(&mut table, 1, &["As", "Ac", "8d"]);

    // В сваре анте нет: каждый доплачивает до ставки 50.
    act(&mut table, &mut engine, 0, PlayerActionKind::Call).unwrap();
    let status = act(&mut table, &mut engine, 1, PlayerActionKind::Call).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));

    assert_eq!(engine.phase, RoundPhase::SwaraPending);
    assert_eq!(engine.pot.total, Chips(250));
    assert_pot_invariant(&engine);

    // Выбывший получает предложение заново — и снова отказывается.
    act(&mut table, &mut engine, 2, PlayerActionKind::Fold).unwrap();

    // Второй цикл.
    act(&mut table, &mut engine, 0, PlayerActionKind::JoinSwara).unwrap();
    deal_swara(&mut table, &mut engine, &mut rng).unwrap();
    assert_eq!(engine.swara_cycles, 2);
    assert!(engine.is_swara);
}

//
// Деньги свары в банке: сумма взносов сходится и после докупа.
//
#[test]
fn pot_invariant_holds_through_swara_buy_in() {
    let (mut table, mut engine) = tie_after_fold();
    assert_pot_invariant(&engine);

    act(&mut table, &mut engine, 2, PlayerActionKind::JoinSwara).unwrap();
    assert_pot_invariant(&engine);

    let mut rng = DeterministicRng::from_seed(5);
    deal_swara(&mut table, &mut engine, &mut rng).unwrap();
    assert_pot_invariant(&engine);
}
