//! RngSeed — доменно-разделённый seed для RNG раздач.
//!
//! Позволяет:
//!   - хранить базовый seed (u64 или [u8;32])
//!   - делать детерминированное hash-reseeding:
//!         new = H(domain || old || game_id || round_id || cycle)
//!   - создавать DeterministicRng из seed
//!
//! Фундамент воспроизводимых раздач: один базовый seed — одна и та же
//! последовательность колод во всех раундах и свара-циклах.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Создать seed из 32 байт.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Доменное хэш-расширение с включением контекста:
    ///   - game_id
    ///   - round_id
    ///   - cycle (номер свара-цикла внутри раунда)
    pub fn derive(&self, game_id: u64, round_id: u64, cycle: u64) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"SVARA_ENGINE_RNG_V1");
        hasher.update(self.bytes);
        hasher.update(game_id.to_le_bytes());
        hasher.update(round_id.to_le_bytes());
        hasher.update(cycle.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    /// Создать DeterministicRng из seed.
    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_bytes(self.bytes)
    }
}
