//! Автоматический игрок.
//!
//! Политика (чистая функция весов) отделена от сэмплера (явное дискретное
//! распределение). Решение синхронно и не трогает состояние раунда —
//! паузы «на подумать» делает вызывающий код.

pub mod policy;
pub mod sampler;

pub use policy::{action_weights, BotContext};
pub use sampler::WeightedSampler;

use crate::domain::round::RoundPhase;
use crate::domain::table::{SeatIndex, Table};
use crate::engine::actions::PlayerActionKind;
use crate::engine::round::RoundEngine;
use crate::engine::turn::{first_seat_after_dealer, prev_active_seat};
use crate::engine::RandomSource;
use crate::scoring::score_hand;

/// Выбрать действие за игрока на указанном месте.
/// None — в текущем состоянии месту нечего решать.
pub fn choose_action<R: RandomSource>(
    table: &Table,
    engine: &RoundEngine,
    seat: SeatIndex,
    rng: &mut R,
) -> Option<PlayerActionKind> {
    let player = table.seat(seat)?;

    match engine.phase {
        RoundPhase::Betting => {
            let policy = table.config.blind_policy;
            let ctx = BotContext {
                score: if player.is_blind {
                    None
                } else {
                    Some(score_hand(&player.hand))
                },
                rotation: engine.betting.rotation_count,
                to_call: engine.betting.call_payment(player, &policy),
                chips: player.chips,
                current_bet: engine.betting.current_bet,
                base_bet: engine.betting.base_bet,
                can_showdown: engine.betting.rotation_count >= 1
                    && prev_active_seat(table, seat).is_some(),
                can_blind: !player.is_blind
                    && !engine.betting.anyone_acted_sighted
                    && engine.betting.rotation_count == 0
                    && first_seat_after_dealer(table) == Some(seat),
            };

            let sampler = WeightedSampler::new(action_weights(&ctx))?;
            Some(sampler.sample(rng).clone())
        }

        RoundPhase::SwaraPending => {
            let st = engine.swara.as_ref()?;

            if st.pending_offers.contains(&seat) {
                // Докупаемся, только если взнос не съедает половину стека.
                let fee = engine.pot.total.halved();
                if player.chips >= fee.doubled() {
                    Some(PlayerActionKind::JoinSwara)
                } else {
                    Some(PlayerActionKind::Fold)
                }
            } else if st.tied.contains(&seat)
                && st.pending_offers.is_empty()
                && st.joiners.is_empty()
                && !st.split_votes.contains(&seat)
            {
                let sampler = WeightedSampler::new(vec![
                    (PlayerActionKind::JoinSwara, 75),
                    (PlayerActionKind::SplitPot, 25),
                ])?;
                Some(sampler.sample(rng).clone())
            } else {
                None
            }
        }

        _ => None,
    }
}
