//! Движок свары: анте, торговля, вскрытия, свара.
//!
//! Высокоуровневый объект: `RoundEngine` (+ `Game` как внешний драйвер).
//! Основные операции:
//!   - `start_round` – запустить новый раунд (анте + раздача);
//!   - `apply_action` – применить действие игрока;
//!   - `deal_swara` – пересдать карты участникам свары.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game;
pub mod history;
pub mod pot;
pub mod round;
pub mod swara;
pub mod turn;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::EngineError;
pub use game::{Game, SubmitOutcome};
pub use history::{RoundEvent, RoundEventKind, RoundHistory};
pub use pot::Pot;
pub use round::{apply_action, start_round, RoundEngine, RoundStatus};
pub use swara::{deal_swara, SwaraState};

/// Источник случайности для движка.
/// Реализации живут в infra (обёртки над `rand`).
pub trait RandomSource {
    /// Равномерное целое в диапазоне [0, bound); для bound == 0 возвращает 0.
    fn next_int(&mut self, bound: usize) -> usize;
}

/// Перемешивание Фишера–Йетса: обходим индексы с конца,
/// меняя i со случайно выбранным j из [0, i].
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_int(i + 1);
        slice.swap(i, j);
    }
}

/// Приёмник уведомлений о событиях раунда.
///
/// Fire-and-forget: движок вызывает `publish` после каждого зафиксированного
/// перехода состояния и не зависит от успеха доставки. Транспорт/фронт
/// решают сами, что с событием делать.
pub trait NotificationSink {
    fn publish(&self, event: &RoundEvent);
}

/// Разделяемый приёмник (Arc) — тоже приёмник.
impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    fn publish(&self, event: &RoundEvent) {
        (**self).publish(event);
    }
}
