use crate::engine::RandomSource;

/// Явный дискретный сэмплер по объявленному списку пар (значение, вес).
///
/// Никаких неявных кумулятивных проходов по месту использования:
/// распределение собирается один раз, нулевые веса отбрасываются.
#[derive(Clone, Debug)]
pub struct WeightedSampler<T> {
    items: Vec<(T, u32)>,
    total: u64,
}

impl<T> WeightedSampler<T> {
    /// None, если после отбрасывания нулевых весов выбирать не из чего.
    pub fn new(items: Vec<(T, u32)>) -> Option<Self> {
        let items: Vec<(T, u32)> = items.into_iter().filter(|(_, w)| *w > 0).collect();
        if items.is_empty() {
            return None;
        }
        let total = items.iter().map(|(_, w)| *w as u64).sum();
        Some(Self { items, total })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Выбрать элемент пропорционально весам.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &T {
        let mut roll = rng.next_int(self.total as usize) as u64;
        for (item, weight) in &self.items {
            let w = *weight as u64;
            if roll < w {
                return item;
            }
            roll -= w;
        }
        // roll всегда в [0, total) — цикл вернёт элемент раньше.
        &self.items[self.items.len() - 1].0
    }
}
