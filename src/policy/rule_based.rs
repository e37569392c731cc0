//! Fixed-rule policy.

use crate::context::{ActionKey, GameContext, TurnState};
use crate::error::EngineError;
use crate::options::{EngineOptions, ValuationMode};
use crate::valuator::{Evaluation, Valuator};

use super::{PassGuard, Policy, can_draw_one, settle};

/// Applies fixed rules to probability scores.
///
/// 1. Take from the most promising opponent if that beats drawing one card.
/// 2. Otherwise draw the fewest cards whose probability reaches
///    `target_probability`, or the most cards allowed if none does.
/// 3. Pass only when nothing else is legal.
#[derive(Debug, Clone)]
pub struct RuleBasedPolicy {
    valuator: Valuator,
    guard: PassGuard,
}

impl RuleBasedPolicy {
    /// Creates the policy; the valuation mode in `options` is overridden.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let guard = PassGuard::new(options.max_consecutive_passes);
        Self {
            valuator: Valuator::new(options.with_mode(ValuationMode::Probability)),
            guard,
        }
    }

    fn apply_rules(&self, scores: &Evaluation) -> ActionKey {
        let value = |action: &ActionKey| scores.get(action).map_or(0.0, |e| e.value);

        let best_take = scores
            .iter()
            .filter(|(action, _)| action.is_take())
            .fold(None::<(ActionKey, f64)>, |best, (&action, estimate)| match best {
                Some((_, value)) if value >= estimate.value => best,
                _ => Some((action, estimate.value)),
            });
        let draws: alloc::vec::Vec<ActionKey> =
            scores.keys().copied().filter(|action| action.is_draw()).collect();

        if let Some((take, take_value)) = best_take {
            let draw_one = if draws.is_empty() {
                0.0
            } else {
                value(&ActionKey::Draw(1))
            };
            if take_value > draw_one || draws.is_empty() {
                return take;
            }
        }

        let target = self.valuator.options().target_probability;
        draws
            .iter()
            .copied()
            .find(|action| value(action) >= target)
            .or_else(|| draws.last().copied())
            .unwrap_or(ActionKey::Pass)
    }
}

impl Policy for RuleBasedPolicy {
    fn name(&self) -> &'static str {
        "Rule-based Strategy"
    }

    fn choose_action(
        &mut self,
        context: &GameContext,
        turn: TurnState,
    ) -> Result<ActionKey, EngineError> {
        let candidates = self.valuator.candidate_actions(context, turn);
        let scores = self.valuator.evaluate(context, &candidates)?;
        let choice = self.apply_rules(&scores);
        Ok(settle(&mut self.guard, &scores, choice, turn))
    }

    fn continue_draw(&mut self, context: &GameContext) -> Result<bool, EngineError> {
        if !can_draw_one(context, self.valuator.options()) {
            return Ok(false);
        }
        let estimate = self.valuator.evaluate_action(context, ActionKey::Draw(1))?;
        Ok(estimate.value >= self.valuator.options().target_probability)
    }
}
