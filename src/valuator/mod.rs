//! Probability and expectation scores for candidate actions.
//!
//! Every action branch (draw 1, draw 2, draw 3, take from each opponent)
//! works on its own copy of the acting player's hand, so branches share
//! nothing mutable and run in parallel when the `std` feature is enabled.
//!
//! Single-card outcomes (draw 1, take) are weighted by value multiplicity
//! and are always exact. Multi-card draws enumerate combinations of the
//! remaining deck instances; above the sampling threshold a uniform sample
//! of distinct combinations stands in for the full space and the estimate is
//! tagged [`Exactness::Sampled`].

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use rayon::prelude::*;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::{Card, DISTINCT_CARDS};
use crate::collection::Collection;
use crate::context::{ActionKey, GameContext, TurnState};
use crate::discard::find_best_discard_with_options;
use crate::error::EngineError;
use crate::options::{EngineOptions, ValuationMode};
use crate::result::{Estimate, Exactness};

mod combinations;
mod sampling;

pub use combinations::{Combinations, Plan, binomial, unrank};
pub use sampling::{mean_relative_error, relative_error};

/// Largest number of cards a single draw action may take.
pub const MAX_DRAW: u8 = 3;

/// Scores per candidate action, in tie-break order.
pub type Evaluation = BTreeMap<ActionKey, Estimate>;

/// Scores every legal first action of a turn.
///
/// # Errors
///
/// See [`Valuator::evaluate_actions`].
pub fn evaluate_actions(
    context: &GameContext,
    options: &EngineOptions,
) -> Result<Evaluation, EngineError> {
    Valuator::new(options.clone()).evaluate_actions(context)
}

/// Computes probability or expectation scores for candidate actions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Valuator {
    options: EngineOptions,
}

impl Valuator {
    /// Creates a valuator.
    #[must_use]
    pub const fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Returns a valuator scoring in `mode` with otherwise equal options.
    #[must_use]
    pub fn with_mode(&self, mode: ValuationMode) -> Self {
        Self::new(self.options.clone().with_mode(mode))
    }

    /// Lists the actions the acting player may still choose.
    ///
    /// A draw of `k` cards needs `k` cards in the deck and room for them
    /// under the hand-size cap. A take needs room for one card and an
    /// opponent holding at least `min_take_hand_size` cards. Pass is always
    /// listed.
    #[must_use]
    pub fn candidate_actions(&self, context: &GameContext, turn: TurnState) -> Vec<ActionKey> {
        let hand = context.hand().len();
        let cap = self.options.max_hand_size;
        let mut actions = Vec::new();

        if turn.allows(ActionKey::Draw(1)) {
            for count in 1..=MAX_DRAW {
                let count_cards = count as usize;
                if count_cards <= context.deck_size() && hand + count_cards <= cap {
                    actions.push(ActionKey::Draw(count));
                }
            }
        }

        if turn.allows(ActionKey::Take(0)) && hand < cap {
            for (index, opponent) in context.opponents().iter().enumerate() {
                if opponent.len() >= self.options.min_take_hand_size {
                    actions.push(ActionKey::Take(index));
                }
            }
        }

        actions.push(ActionKey::Pass);
        actions
    }

    /// Scores every legal first action of a turn.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if the context holds more
    /// than two copies of some card value, or [`EngineError::Card`] if a card
    /// has an invalid rank.
    pub fn evaluate_actions(&self, context: &GameContext) -> Result<Evaluation, EngineError> {
        let actions = self.candidate_actions(context, TurnState::fresh());
        self.evaluate(context, &actions)
    }

    /// Scores the given actions.
    ///
    /// Actions whose outcome space is empty (drawing more cards than the
    /// deck holds, taking from an empty or unknown hand) score zero.
    ///
    /// # Errors
    ///
    /// See [`Valuator::evaluate_actions`].
    pub fn evaluate(
        &self,
        context: &GameContext,
        actions: &[ActionKey],
    ) -> Result<Evaluation, EngineError> {
        context.validate()?;
        let base = Collection::from(context.hand());

        #[cfg(feature = "std")]
        let scored: Vec<(ActionKey, Estimate)> = actions
            .par_iter()
            .map(|&action| {
                self.branch(context, &base, action)
                    .map(|estimate| (action, estimate))
            })
            .collect::<Result<_, EngineError>>()?;

        #[cfg(all(not(feature = "std"), feature = "alloc"))]
        let scored: Vec<(ActionKey, Estimate)> = actions
            .iter()
            .map(|&action| {
                self.branch(context, &base, action)
                    .map(|estimate| (action, estimate))
            })
            .collect::<Result<_, EngineError>>()?;

        for (action, estimate) in &scored {
            log::debug!("{action}: {:.4} ({:?})", estimate.value, estimate.exactness);
        }

        Ok(scored.into_iter().collect())
    }

    /// Scores a single action.
    ///
    /// # Errors
    ///
    /// See [`Valuator::evaluate_actions`].
    pub fn evaluate_action(
        &self,
        context: &GameContext,
        action: ActionKey,
    ) -> Result<Estimate, EngineError> {
        context.validate()?;
        self.branch(context, &Collection::from(context.hand()), action)
    }

    /// Expected number of cards discarded after drawing exactly one more
    /// card, without subtracting the drawn card.
    ///
    /// # Errors
    ///
    /// See [`Valuator::evaluate_actions`].
    pub fn draw_one_gain(&self, context: &GameContext) -> Result<f64, EngineError> {
        context.validate()?;
        let expectation = self.with_mode(ValuationMode::Expectation);
        let base = Collection::from(context.hand());
        Ok(expectation.single_card(&base, context.deck())?.value)
    }

    fn branch(
        &self,
        context: &GameContext,
        base: &Collection,
        action: ActionKey,
    ) -> Result<Estimate, EngineError> {
        if !has_outcomes(context, action) {
            return Ok(Estimate::exact(0.0));
        }

        let estimate = match action {
            ActionKey::Draw(1) => self.single_card(base, context.deck())?,
            ActionKey::Draw(count) => {
                self.multi_card(base, context.deck(), count as usize, action)?
            }
            ActionKey::Take(index) => {
                self.single_card(base, context.opponent(index).unwrap_or_default())?
            }
            ActionKey::Pass => Estimate::exact(0.0),
        };

        Ok(self.net(estimate, action))
    }

    /// Subtracts the cards gained by the action in expectation mode.
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    fn net(&self, estimate: Estimate, action: ActionKey) -> Estimate {
        match self.options.mode {
            ValuationMode::Probability => estimate,
            ValuationMode::Expectation => Estimate {
                value: estimate.value - action.cost() as f64,
                exactness: estimate.exactness,
            },
        }
    }

    /// Score of the hand after the candidate cards are added.
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    fn score(&self, hand: &Collection) -> Result<f64, EngineError> {
        if !hand.exists_valid_group() {
            return Ok(0.0);
        }
        match self.options.mode {
            ValuationMode::Probability => Ok(1.0),
            ValuationMode::Expectation => {
                let discard = find_best_discard_with_options(hand, &self.options.solver)?;
                Ok(discard.total as f64)
            }
        }
    }

    /// One card drawn uniformly from `source`, weighted by value
    /// multiplicity.
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    fn single_card(&self, base: &Collection, source: &[Card]) -> Result<Estimate, EngineError> {
        if source.is_empty() {
            return Ok(Estimate::exact(0.0));
        }

        let mut multiplicity = [0usize; DISTINCT_CARDS];
        let mut values = Vec::new();
        for card in source {
            let slot = &mut multiplicity[card.value_index()];
            if *slot == 0 {
                values.push(*card);
            }
            *slot += 1;
        }

        let mut hand = base.clone();
        let mut weighted = 0.0;
        for card in values {
            hand.push(card);
            let score = self.score(&hand)?;
            hand.pop();
            weighted += multiplicity[card.value_index()] as f64 * score;
        }

        Ok(Estimate::exact(weighted / source.len() as f64))
    }

    /// `count` distinct deck instances drawn together.
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for combination counts"
    )]
    fn multi_card(
        &self,
        base: &Collection,
        deck: &[Card],
        count: usize,
        action: ActionKey,
    ) -> Result<Estimate, EngineError> {
        let plan = Plan::choose(
            deck.len(),
            count,
            self.options.sampling_threshold,
            self.options.sample_size,
        );

        let mut memo: HashMap<Vec<usize>, f64> = HashMap::new();
        let mut hand = base.clone();
        let mut evaluate = |combination: &[usize]| -> Result<f64, EngineError> {
            let mut key: Vec<usize> = combination
                .iter()
                .map(|&index| deck[index].value_index())
                .collect();
            key.sort_unstable();
            if let Some(&score) = memo.get(&key) {
                return Ok(score);
            }

            for &index in combination {
                hand.push(deck[index]);
            }
            let score = self.score(&hand);
            for _ in combination {
                hand.pop();
            }
            let score = score?;
            memo.insert(key, score);
            Ok(score)
        };

        match plan {
            Plan::Exhaustive { total } => {
                if total == 0 {
                    return Ok(Estimate::exact(0.0));
                }
                let mut sum = 0.0;
                for combination in Combinations::new(deck.len(), count) {
                    sum += evaluate(&combination)?;
                }
                Ok(Estimate::exact(sum / total as f64))
            }
            Plan::Sampled { total, sampled } => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.branch_seed(action));
                let picks = rand::seq::index::sample(&mut rng, total as usize, sampled as usize);

                let mut sum = 0.0;
                for rank in picks.iter() {
                    sum += evaluate(&unrank(deck.len(), count, rank as u64))?;
                }

                // sample mean: each outcome stands in for total / sampled
                // equally likely combinations
                Ok(Estimate {
                    value: sum / sampled as f64,
                    exactness: Exactness::Sampled { sampled, total },
                })
            }
        }
    }

    /// Per-branch seed, independent of evaluation order.
    fn branch_seed(&self, action: ActionKey) -> u64 {
        let salt = match action {
            ActionKey::Draw(count) => u64::from(count),
            ActionKey::Take(index) => 0x100 + index as u64,
            ActionKey::Pass => 0,
        };
        self.options
            .seed
            .wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Whether the action has at least one outcome to score.
fn has_outcomes(context: &GameContext, action: ActionKey) -> bool {
    match action {
        ActionKey::Draw(count) => count > 0 && context.deck_size() >= count as usize,
        ActionKey::Take(index) => context.opponent(index).is_some_and(|hand| !hand.is_empty()),
        ActionKey::Pass => false,
    }
}
