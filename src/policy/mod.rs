//! Decision policies for automated players.
//!
//! A policy turns the valuator's scores into one action. All policies share
//! the same rules: candidates are pruned by [`Valuator::candidate_actions`]
//! (hand-size cap, small opponent hands, deck size), ties resolve to the
//! first action in [`ActionKey`] order, and a policy that has already passed
//! `max_consecutive_passes` turns in a row must act instead of passing again.

use alloc::boxed::Box;
use core::fmt;

use crate::context::{ActionKey, GameContext, TurnState};
use crate::error::EngineError;
use crate::options::EngineOptions;
use crate::valuator::{Evaluation, Valuator};

mod expectation;
mod probability;
mod random;
mod rule_based;

pub use expectation::ExpectationPolicy;
pub use probability::ProbabilityPolicy;
pub use random::RandomPolicy;
pub use rule_based::RuleBasedPolicy;

/// Chooses actions for an automated player.
pub trait Policy {
    /// Human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Chooses the next action of the turn.
    ///
    /// With a fresh `turn` this is the first action; [`ActionKey::Pass`]
    /// skips the turn. After a draw or a take, [`ActionKey::Pass`] ends the
    /// turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the context breaks the card bookkeeping
    /// invariants (see [`Valuator::evaluate`]).
    fn choose_action(
        &mut self,
        context: &GameContext,
        turn: TurnState,
    ) -> Result<ActionKey, EngineError>;

    /// Decides whether to draw one more card after a draw.
    ///
    /// Only for a step-by-step draw, where cards are drawn one at a time
    /// instead of the count chosen by [`Policy::choose_action`]. A turn that
    /// chose [`ActionKey::Draw`] draws exactly that many cards and does not
    /// ask.
    ///
    /// # Errors
    ///
    /// Returns an error if the context breaks the card bookkeeping
    /// invariants.
    fn continue_draw(&mut self, context: &GameContext) -> Result<bool, EngineError>;
}

/// Available policy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// [`RandomPolicy`].
    Random,
    /// [`ExpectationPolicy`].
    Expectation,
    /// [`ProbabilityPolicy`].
    Probability,
    /// [`RuleBasedPolicy`].
    RuleBased,
}

impl Strategy {
    /// All strategies.
    pub const ALL: [Self; 4] = [
        Self::Random,
        Self::Expectation,
        Self::Probability,
        Self::RuleBased,
    ];

    /// Looks a strategy up by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(name))
    }

    /// Short name of the strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Expectation => "expectation",
            Self::Probability => "probability",
            Self::RuleBased => "rule-based",
        }
    }

    /// Builds a policy of this kind.
    #[must_use]
    pub fn build(self, options: EngineOptions) -> Box<dyn Policy + Send> {
        match self {
            Self::Random => Box::new(RandomPolicy::new(options)),
            Self::Expectation => Box::new(ExpectationPolicy::new(options)),
            Self::Probability => Box::new(ProbabilityPolicy::new(options)),
            Self::RuleBased => Box::new(RuleBasedPolicy::new(options)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Tracks consecutive passes and vetoes one pass too many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassGuard {
    passes: u32,
    limit: u32,
}

impl PassGuard {
    /// Allows `limit` consecutive passes.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self { passes: 0, limit }
    }

    /// Consecutive passes recorded so far.
    #[must_use]
    pub const fn passes(&self) -> u32 {
        self.passes
    }

    /// Records `choice` and returns whether it stands.
    ///
    /// Only first actions count: passing after a draw or take just ends the
    /// turn. A rejected pass resets the counter, and the caller re-picks
    /// without pass.
    pub const fn admit(&mut self, choice: ActionKey, turn: TurnState) -> bool {
        if !turn.is_fresh() {
            return true;
        }
        if !matches!(choice, ActionKey::Pass) {
            self.passes = 0;
            return true;
        }
        if self.passes >= self.limit {
            self.passes = 0;
            return false;
        }
        self.passes += 1;
        true
    }
}

/// Highest-scoring action, first in key order on ties.
pub(crate) fn best_action(scores: &Evaluation, include_pass: bool) -> Option<ActionKey> {
    let mut best: Option<(ActionKey, f64)> = None;
    for (&action, estimate) in scores {
        if action == ActionKey::Pass && !include_pass {
            continue;
        }
        if best.is_none_or(|(_, value)| estimate.value > value) {
            best = Some((action, estimate.value));
        }
    }
    best.map(|(action, _)| action)
}

/// Picks the best action and applies the pass limit.
pub(crate) fn maximize(
    valuator: &Valuator,
    guard: &mut PassGuard,
    context: &GameContext,
    turn: TurnState,
) -> Result<ActionKey, EngineError> {
    let candidates = valuator.candidate_actions(context, turn);
    let scores = valuator.evaluate(context, &candidates)?;
    let choice = best_action(&scores, true).unwrap_or(ActionKey::Pass);
    Ok(settle(guard, &scores, choice, turn))
}

/// Applies the pass limit to `choice`, re-picking from `scores` if needed.
pub(crate) fn settle(
    guard: &mut PassGuard,
    scores: &Evaluation,
    choice: ActionKey,
    turn: TurnState,
) -> ActionKey {
    if guard.admit(choice, turn) {
        return choice;
    }
    let forced = best_action(scores, false).unwrap_or(ActionKey::Pass);
    log::debug!("pass limit reached, choosing {forced} instead");
    forced
}

/// Room and cards left for one more drawn card.
pub(crate) fn can_draw_one(context: &GameContext, options: &EngineOptions) -> bool {
    context.deck_size() > 0 && context.hand().len() < options.max_hand_size
}
