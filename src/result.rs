//! Result types for discard and valuation queries.

extern crate alloc;

use alloc::vec::Vec;

use crate::collection::ValidGroup;

/// How a discard was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardOutcome {
    /// The hand holds no valid group.
    Nothing,
    /// No two groups compete for a card; every group is discarded.
    Disjoint,
    /// Conflicting groups were packed by the exact solver.
    Optimal,
    /// The exact solve ran out of budget. The discard is valid but may not
    /// be the largest possible.
    Fallback,
}

/// Groups chosen for discarding in one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discard {
    /// The groups, one entry per physical group (a group held twice appears
    /// twice).
    pub groups: Vec<ValidGroup>,
    /// Hand positions of each group's cards; pairwise disjoint.
    pub positions: Vec<Vec<usize>>,
    /// Total number of cards discarded.
    pub total: usize,
    /// How the discard was obtained.
    pub outcome: DiscardOutcome,
}

impl Discard {
    /// A discard of nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            groups: Vec::new(),
            positions: Vec::new(),
            total: 0,
            outcome: DiscardOutcome::Nothing,
        }
    }

    /// Returns whether nothing is discarded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns whether the discard is known to be the largest possible.
    #[must_use]
    pub const fn is_optimal(&self) -> bool {
        !matches!(self.outcome, DiscardOutcome::Fallback)
    }

    /// Splits the discard into its groups and the discarded card count.
    #[must_use]
    pub fn into_parts(self) -> (Vec<ValidGroup>, usize) {
        (self.groups, self.total)
    }
}

/// Whether an estimate was computed exactly or from a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exactness {
    /// Every outcome was evaluated.
    Exact,
    /// A uniform sample of outcomes was evaluated and scaled up.
    Sampled {
        /// Outcomes evaluated.
        sampled: u64,
        /// Outcomes in the full space.
        total: u64,
    },
}

/// A score for one candidate action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Probability or expectation, depending on the valuation mode.
    pub value: f64,
    /// How the value was obtained.
    pub exactness: Exactness,
}

impl Estimate {
    /// An exactly computed value.
    #[must_use]
    pub const fn exact(value: f64) -> Self {
        Self {
            value,
            exactness: Exactness::Exact,
        }
    }

    /// Returns whether the value came from sampling.
    #[must_use]
    pub const fn is_sampled(&self) -> bool {
        matches!(self.exactness, Exactness::Sampled { .. })
    }
}
