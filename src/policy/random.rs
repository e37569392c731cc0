//! Uniformly random policy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::context::{ActionKey, GameContext, TurnState};
use crate::error::EngineError;
use crate::options::EngineOptions;
use crate::valuator::Valuator;

use super::{PassGuard, Policy, can_draw_one};

/// Picks uniformly among the legal actions.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    valuator: Valuator,
    guard: PassGuard,
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Creates the policy, seeded from `options.seed`.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let guard = PassGuard::new(options.max_consecutive_passes);
        let rng = ChaCha8Rng::seed_from_u64(options.seed);
        Self {
            valuator: Valuator::new(options),
            guard,
            rng,
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random Strategy"
    }

    fn choose_action(
        &mut self,
        context: &GameContext,
        turn: TurnState,
    ) -> Result<ActionKey, EngineError> {
        context.validate()?;
        let mut candidates = self.valuator.candidate_actions(context, turn);
        let choice = candidates[self.rng.random_range(0..candidates.len())];

        if self.guard.admit(choice, turn) {
            return Ok(choice);
        }

        candidates.retain(|action| *action != ActionKey::Pass);
        if candidates.is_empty() {
            return Ok(ActionKey::Pass);
        }
        Ok(candidates[self.rng.random_range(0..candidates.len())])
    }

    fn continue_draw(&mut self, context: &GameContext) -> Result<bool, EngineError> {
        Ok(can_draw_one(context, self.valuator.options()) && self.rng.random_bool(0.5))
    }
}
