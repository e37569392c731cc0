//! Expectation-maximizing policy.

use crate::context::{ActionKey, GameContext, TurnState};
use crate::error::EngineError;
use crate::options::{EngineOptions, ValuationMode};
use crate::valuator::Valuator;

use super::{PassGuard, Policy, can_draw_one, maximize};

/// Picks the action with the highest expected net hand reduction.
///
/// Pass scores zero, so the policy passes when every action is expected to
/// grow the hand, until the pass limit forces it to act.
#[derive(Debug, Clone)]
pub struct ExpectationPolicy {
    valuator: Valuator,
    guard: PassGuard,
}

impl ExpectationPolicy {
    /// Creates the policy; the valuation mode in `options` is overridden.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let guard = PassGuard::new(options.max_consecutive_passes);
        Self {
            valuator: Valuator::new(options.with_mode(ValuationMode::Expectation)),
            guard,
        }
    }
}

impl Policy for ExpectationPolicy {
    fn name(&self) -> &'static str {
        "Calculating Strategy"
    }

    fn choose_action(
        &mut self,
        context: &GameContext,
        turn: TurnState,
    ) -> Result<ActionKey, EngineError> {
        maximize(&self.valuator, &mut self.guard, context, turn)
    }

    /// Keeps drawing while one more card is expected to discard at least
    /// one card.
    fn continue_draw(&mut self, context: &GameContext) -> Result<bool, EngineError> {
        if !can_draw_one(context, self.valuator.options()) {
            return Ok(false);
        }
        Ok(self.valuator.draw_one_gain(context)? >= 1.0)
    }
}
