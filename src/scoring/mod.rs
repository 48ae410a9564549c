//! Модуль подсчёта силы трёхкарточных рук свары.
//!
//! Основная функция:
//!   `score_hand(&[Card]) -> HandScore`

pub mod score;

pub use score::{score_hand, DOUBLE_ACE_SCORE, JOKER_VALUE, TRIPLE_SIX_SCORE};
