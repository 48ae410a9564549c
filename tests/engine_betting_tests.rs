use svara_engine::domain::{
    chips::Chips,
    player::{DropReason, PlayerStatus, SeatedPlayer},
    table::{BlindPolicy, GameConfig, Table},
};
use svara_engine::engine::betting::BettingState;
use svara_engine::engine::{
    apply_action, start_round, EngineError, PlayerAction, PlayerActionKind, RoundEngine,
    RoundStatus,
};
use svara_engine::infra::NoShuffleRng;

fn make_table(chips: &[u64]) -> Table {
    // Анте 50, потолок 200: порог тёмной = 100.
    let config = GameConfig::new(7, Chips(50), Chips(200), Chips(1000));
    let mut table = Table::new(1, "BETS".to_string(), config);
    for (i, &stack) in chips.iter().enumerate() {
        table.seats[i] = Some(SeatedPlayer::new((i + 1) as u64, Chips(stack)));
    }
    table
}

fn started(chips: &[u64]) -> (Table, RoundEngine) {
    let mut table = make_table(chips);
    table.dealer_index = Some(2);
    let mut rng = NoShuffleRng;
    let (engine, status) = start_round(&mut table, &mut rng, 1).expect("start_round failed");
    assert!(matches!(status, RoundStatus::Ongoing));
    (table, engine)
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

fn assert_pot_invariant(engine: &RoundEngine) {
    let sum: u64 = engine.contributions.values().map(|c| c.0).sum();
    assert_eq!(engine.pot.total.0, sum);
}

//
// Рейз: обрезка потолком и монотонность ставки.
//
#[test]
fn raise_beyond_max_bet_is_clamped() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    let status = act(&mut table, &mut engine, 0, PlayerActionKind::Raise(Chips(5000))).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));

    // Ставка стала потолком, а не запрошенной суммой.
    assert_eq!(engine.betting.current_bet, Chips(200));

    // Доплата: 200 - 50 уже внесённых.
    let raiser = table.seat(0).unwrap();
    assert_eq!(raiser.committed_bet, Chips(200));
    assert_eq!(raiser.chips, Chips(800));
    assert_pot_invariant(&engine);
}

#[test]
fn raise_not_exceeding_current_bet_rejected() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    let err = act(&mut table, &mut engine, 0, PlayerActionKind::Raise(Chips(40))).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));

    // Состояние не тронуто, ход не ушёл.
    assert_eq!(engine.betting.current_bet, Chips(50));
    assert_eq!(engine.current_actor, Some(0));
}

//
// Неподъёмный платёж — всегда вынужденный фолд, никогда не минус.
//
#[test]
fn unaffordable_call_converts_to_forced_fold() {
    let (mut table, mut engine) = started(&[1000, 100, 1000]);

    // Место 0 поднимает до 200.
    act(&mut table, &mut engine, 0, PlayerActionKind::Raise(Chips(200))).unwrap();

    // У места 1 осталось 50 — доплата 150 не по карману.
    let status = act(&mut table, &mut engine, 1, PlayerActionKind::Call).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));

    let broke = table.seat(1).unwrap();
    assert_eq!(broke.status, PlayerStatus::Folded);
    assert_eq!(broke.chips, Chips(50), "фишки не ушли в минус и не списаны");

    let drop = engine.dropped.last().unwrap();
    assert_eq!(drop.seat, 1);
    assert_eq!(drop.reason, DropReason::ForcedFold);
    assert_pot_invariant(&engine);
}

//
// Политика тёмной игры: математика платежей.
//
#[test]
fn blind_caller_pays_half_of_the_gap() {
    let policy = BlindPolicy::default();
    let mut betting = BettingState::new(Chips(50), Chips(500));
    betting.current_bet = Chips(100);

    let mut player = SeatedPlayer::new(1, Chips(1000));
    player.is_blind = true;
    player.committed_bet = Chips::ZERO;

    // Недобор 100, тёмный платит половину.
    assert_eq!(betting.call_payment(&player, &policy), Chips(50));

    // Его же взнос считается вдвойне: после анте 50 недобора нет.
    player.committed_bet = Chips(50);
    assert_eq!(betting.call_payment(&player, &policy), Chips::ZERO);
    assert!(betting.is_matched(&player));
}

#[test]
fn sighted_caller_pays_double_against_blind_bet() {
    let policy = BlindPolicy::default();
    let mut betting = BettingState::new(Chips(50), Chips(500));
    betting.current_bet = Chips(100);
    betting.current_bet_blind = true;

    let mut player = SeatedPlayer::new(1, Chips(1000));
    player.committed_bet = Chips(50);

    // Номинальная разница 50, зрячий против тёмной ставки платит вдвое.
    assert_eq!(betting.call_payment(&player, &policy), Chips(100));
}

#[test]
fn plain_call_pays_the_nominal_gap() {
    let policy = BlindPolicy::default();
    let mut betting = BettingState::new(Chips(50), Chips(500));
    betting.current_bet = Chips(150);

    let mut player = SeatedPlayer::new(1, Chips(1000));
    player.committed_bet = Chips(50);

    assert_eq!(betting.call_payment(&player, &policy), Chips(100));
}

//
// Заявка тёмной: кто и когда.
//
#[test]
fn blind_only_for_first_seat_after_dealer() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    // Первый после дилера (место 0) может.
    let status = act(&mut table, &mut engine, 0, PlayerActionKind::Blind).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));
    assert!(table.seat(0).unwrap().is_blind);
    // Заявка не тратит ход.
    assert_eq!(engine.current_actor, Some(0));
}

#[test]
fn blind_rejected_after_sighted_action() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    // Место 0 сходило по-зрячему.
    act(&mut table, &mut engine, 0, PlayerActionKind::Call).unwrap();

    // Теперь тёмную не заявить даже первому после дилера в новом круге.
    engine.current_actor = Some(0);
    let err = act(&mut table, &mut engine, 0, PlayerActionKind::Blind).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));
}

#[test]
fn blind_rejected_for_wrong_seat() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    engine.current_actor = Some(1);
    let err = act(&mut table, &mut engine, 1, PlayerActionKind::Blind).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));
}

//
// See: тёмный смотрит карты, ход остаётся за ним.
//
#[test]
fn see_clears_blind_flag_without_spending_turn() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    act(&mut table, &mut engine, 0, PlayerActionKind::Blind).unwrap();
    let status = act(&mut table, &mut engine, 0, PlayerActionKind::See).unwrap();
    assert!(matches!(status, RoundStatus::Ongoing));

    let p = table.seat(0).unwrap();
    assert!(!p.is_blind);
    assert_eq!(engine.current_actor, Some(0));

    // Повторно смотреть нечего.
    let err = act(&mut table, &mut engine, 0, PlayerActionKind::See).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));
}

//
// Рейз выше порога гасит тёмные флаги у всех.
//
#[test]
fn raise_past_threshold_clears_all_blind_flags() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    act(&mut table, &mut engine, 0, PlayerActionKind::Blind).unwrap();
    act(&mut table, &mut engine, 0, PlayerActionKind::Call).unwrap();
    assert!(table.seat(0).unwrap().is_blind);

    // Порог = 50 * 2 = 100; рейз до 150 выводит всех из тёмной.
    act(&mut table, &mut engine, 1, PlayerActionKind::Raise(Chips(150))).unwrap();

    assert!(!table.seat(0).unwrap().is_blind);
    assert!(!engine.betting.current_bet_blind);
}

//
// Замыкание круга при несравнявшихся ставках: второй круг сравнивает всех.
//
#[test]
fn second_wrap_forces_comparison_with_mismatched_bets() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    // Круг 1: два колла и рейз в конце — сравнение не наступает.
    act(&mut table, &mut engine, 0, PlayerActionKind::Call).unwrap();
    act(&mut table, &mut engine, 1, PlayerActionKind::Call).unwrap();
    act(&mut table, &mut engine, 2, PlayerActionKind::Raise(Chips(100))).unwrap();
    assert_eq!(engine.betting.rotation_count, 1);
    assert!(matches!(engine.phase, svara_engine::domain::round::RoundPhase::Betting));

    // Круг 2: коллы и снова рейз в конце — но второй wrap сравнивает
    // принудительно, даже при несравнявшихся ставках.
    act(&mut table, &mut engine, 0, PlayerActionKind::Call).unwrap();
    act(&mut table, &mut engine, 1, PlayerActionKind::Call).unwrap();
    let status = act(&mut table, &mut engine, 2, PlayerActionKind::Raise(Chips(150))).unwrap();

    match status {
        RoundStatus::Resolved(_) => {}
        other => panic!("ожидалось принудительное сравнение, получили {:?}", other),
    }
}

//
// Ставка внутри круга не убывает.
//
#[test]
fn current_bet_is_monotonic_within_round() {
    let (mut table, mut engine) = started(&[1000, 1000, 1000]);

    let mut last = engine.betting.current_bet;
    let actions: Vec<(u8, PlayerActionKind)> = vec![
        (0, PlayerActionKind::Call),
        (1, PlayerActionKind::Raise(Chips(100))),
        (2, PlayerActionKind::Call),
        (0, PlayerActionKind::Raise(Chips(150))),
    ];

    for (seat, kind) in actions {
        act(&mut table, &mut engine, seat, kind).unwrap();
        assert!(engine.betting.current_bet >= last);
        last = engine.betting.current_bet;
        assert_pot_invariant(&engine);
    }
}
