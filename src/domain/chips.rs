use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Количество фишек. Обёртка над u64, чтобы не путать с обычными числами.
/// Отрицательного баланса не существует по построению типа.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u64) -> Self {
        Chips(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Безопасное вычитание, не даёт уйти в минус.
    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    /// Половина суммы (целочисленно). Используется тёмной ставкой и
    /// взносом за вход в свару.
    pub fn halved(self) -> Chips {
        Chips(self.0 / 2)
    }

    /// Удвоенная сумма (с насыщением).
    pub fn doubled(self) -> Chips {
        Chips(self.0.saturating_mul(2))
    }

    /// Умножение на небольшой коэффициент политики.
    pub fn times(self, factor: u64) -> Chips {
        Chips(self.0.saturating_mul(factor))
    }

    /// Деление на коэффициент политики; divisor = 0 трактуем как 1.
    pub fn divided_by(self, divisor: u64) -> Chips {
        Chips(self.0 / divisor.max(1))
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}
