use crate::domain::chips::Chips;
use crate::domain::round::HandScore;
use crate::engine::actions::PlayerActionKind;

/// Всё, что политика знает о ситуации. Собирается из состояния раунда,
/// сама политика — чистая функция контекста.
#[derive(Clone, Debug)]
pub struct BotContext {
    /// Сила руки; None — играем втёмную и карт не видели.
    pub score: Option<HandScore>,
    /// Номер круга торговли.
    pub rotation: u32,
    /// Реальная доплата за Call с учётом политики тёмной игры.
    pub to_call: Chips,
    pub chips: Chips,
    pub current_bet: Chips,
    pub base_bet: Chips,
    /// Доступно ли вскрытие (прошёл круг и есть соперник).
    pub can_showdown: bool,
    /// Доступна ли заявка тёмной.
    pub can_blind: bool,
}

/// Веса действий для текущей ситуации.
///
/// Сильная рука давит ставкой и тянется к вскрытию, средняя уравнивает,
/// слабая чаще сбрасывает. Чем дольше торговля, тем желаннее вскрытие.
pub fn action_weights(ctx: &BotContext) -> Vec<(PlayerActionKind, u32)> {
    let mut weights: Vec<(PlayerActionKind, u32)> = Vec::new();

    match ctx.score {
        None => {
            // Втёмную: чаще всего посмотреть карты, изредка тянуть дальше.
            weights.push((PlayerActionKind::See, 65));
            weights.push((PlayerActionKind::Call, 25));
            weights.push((PlayerActionKind::Fold, 10));
        }
        Some(score) => {
            let raise_to = ctx.current_bet + ctx.base_bet;
            let showdown_urge = 10 + 10 * ctx.rotation.min(3);

            if score.0 >= 25 {
                weights.push((PlayerActionKind::Raise(raise_to), 45));
                weights.push((PlayerActionKind::Call, 35));
                if ctx.can_showdown {
                    weights.push((PlayerActionKind::Showdown, showdown_urge + 10));
                }
            } else if score.0 >= 18 {
                weights.push((PlayerActionKind::Call, 60));
                weights.push((PlayerActionKind::Raise(raise_to), 15));
                weights.push((PlayerActionKind::Fold, 10));
                if ctx.can_showdown {
                    weights.push((PlayerActionKind::Showdown, showdown_urge));
                }
            } else {
                // Слабая рука: доигрывать дорого — сбрасываем чаще,
                // чем дороже доплата относительно стека.
                let fold_w = if ctx.to_call > ctx.chips.halved() { 70 } else { 40 };
                weights.push((PlayerActionKind::Fold, fold_w));
                weights.push((PlayerActionKind::Call, 40));
                if ctx.can_showdown {
                    weights.push((PlayerActionKind::Showdown, 5));
                }
            }
        }
    }

    if ctx.can_blind {
        weights.push((PlayerActionKind::Blind, 10));
    }

    weights.retain(|(_, w)| *w > 0);
    weights
}
