use crate::engine::RandomSource;

/// Системный RNG поверх `rand::thread_rng`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn next_int(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        use rand::Rng;
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    /// Из 32-байтового seed (см. `RngSeed`).
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::from_seed(bytes),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_int(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        use rand::Rng;
        self.inner.gen_range(0..bound)
    }
}

/// RNG-заглушка: возвращает максимум диапазона, из-за чего обмен
/// Фишера–Йетса всегда меняет карту саму с собой. Колода остаётся
/// в каноническом порядке — удобно для тестов.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShuffleRng;

impl RandomSource for NoShuffleRng {
    fn next_int(&mut self, bound: usize) -> usize {
        bound.saturating_sub(1)
    }
}
