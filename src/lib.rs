//! Движок карточной игры «Свара»: трёхкарточные руки, торговля с тёмными
//! ставками, принудительные вскрытия и переигровка при ничьей (свара).
//!
//! Слои:
//! - `domain` — значения: карты, колода, фишки, игроки, стол;
//! - `scoring` — чистый подсчёт силы руки;
//! - `engine` — конечный автомат раунда и внешний драйвер `Game`;
//! - `bot` — политика весов + дискретный сэмплер для автоматических игроков;
//! - `api` — команды, DTO и видимые игрокам срезы состояния;
//! - `infra` — RNG, seed'ы, ID, имена, приёмники уведомлений.
//!
//! Рендеринг, транспорт и пауза перед ходом бота — забота вызывающего кода.

pub mod api;
pub mod bot;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod scoring;
