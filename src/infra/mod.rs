//! Инфраструктурный слой вокруг движка свары:
//! - генерация ID;
//! - RNG-реализации для движка и воспроизводимые seed'ы;
//! - поставщик имени локального игрока (мост к хост-платформе);
//! - приёмники уведомлений о событиях раунда.

pub mod identity;
pub mod ids;
pub mod notify;
pub mod rng;
pub mod rng_seed;

pub use identity::*;
pub use ids::*;
pub use notify::*;
pub use rng::*;
pub use rng_seed::RngSeed;
