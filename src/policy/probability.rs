//! Probability-maximizing policy.

use crate::context::{ActionKey, GameContext, TurnState};
use crate::error::EngineError;
use crate::options::{EngineOptions, ValuationMode};
use crate::valuator::Valuator;

use super::{PassGuard, Policy, best_action, can_draw_one, settle};

/// Picks the action most likely to produce a valid group.
///
/// Passes when no action reaches `min_probability`.
#[derive(Debug, Clone)]
pub struct ProbabilityPolicy {
    valuator: Valuator,
    guard: PassGuard,
}

impl ProbabilityPolicy {
    /// Creates the policy; the valuation mode in `options` is overridden.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let guard = PassGuard::new(options.max_consecutive_passes);
        Self {
            valuator: Valuator::new(options.with_mode(ValuationMode::Probability)),
            guard,
        }
    }
}

impl Policy for ProbabilityPolicy {
    fn name(&self) -> &'static str {
        "Probability Strategy"
    }

    fn choose_action(
        &mut self,
        context: &GameContext,
        turn: TurnState,
    ) -> Result<ActionKey, EngineError> {
        let candidates = self.valuator.candidate_actions(context, turn);
        let scores = self.valuator.evaluate(context, &candidates)?;

        let choice = match best_action(&scores, false) {
            Some(action)
                if scores[&action].value >= self.valuator.options().min_probability =>
            {
                action
            }
            _ => ActionKey::Pass,
        };

        Ok(settle(&mut self.guard, &scores, choice, turn))
    }

    fn continue_draw(&mut self, context: &GameContext) -> Result<bool, EngineError> {
        if !can_draw_one(context, self.valuator.options()) {
            return Ok(false);
        }
        let estimate = self.valuator.evaluate_action(context, ActionKey::Draw(1))?;
        Ok(estimate.value >= self.valuator.options().min_probability)
    }
}
