use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Банк раунда.
///
/// Инвариант движка: `total` всегда равен сумме всех взносов
/// (`RoundEngine::contributions`) с начала раунда, включая докупы в свару.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self { total: Chips::ZERO }
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Забрать весь банк (выплата единственному победителю).
    pub fn take_all(&mut self) -> Chips {
        let total = self.total;
        self.total = Chips::ZERO;
        total
    }

    /// Делёж банка на n равных долей: (доля, остаток).
    /// Остаток раздаётся по фишке начиная с первого места.
    pub fn split_even(&self, n: usize) -> (Chips, Chips) {
        if n == 0 {
            return (Chips::ZERO, self.total);
        }
        let share = Chips(self.total.0 / n as u64);
        let remainder = Chips(self.total.0 % n as u64);
        (share, remainder)
    }
}

impl Default for Pot {
    fn default() -> Self {
        Self::new()
    }
}
