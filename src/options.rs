//! Engine configuration options.

/// Scoring used by the action valuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ValuationMode {
    /// Probability that the resulting hand holds any valid group.
    #[default]
    Probability,
    /// Expected number of cards discarded afterwards, minus the cards
    /// gained by the action.
    Expectation,
}

/// Limits for the exact set-packing solve behind the discard optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolverOptions {
    /// Maximum number of search nodes before the solve is abandoned and the
    /// optimizer falls back to an approximate discard.
    pub node_limit: u64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            node_limit: 200_000,
        }
    }
}

impl SolverOptions {
    /// Sets the node limit.
    ///
    /// # Example
    ///
    /// ```
    /// use notty::SolverOptions;
    ///
    /// let options = SolverOptions::default().with_node_limit(500);
    /// assert_eq!(options.node_limit, 500);
    /// ```
    #[must_use]
    pub const fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }
}

/// Configuration for the action valuator and the decision policies.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use notty::{EngineOptions, ValuationMode};
///
/// let options = EngineOptions::default()
///     .with_mode(ValuationMode::Expectation)
///     .with_sampling_threshold(5_000)
///     .with_sample_size(2_000)
///     .with_seed(9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Scoring mode.
    pub mode: ValuationMode,
    /// Combination count above which multi-card draws are sampled instead of
    /// enumerated.
    pub sampling_threshold: u64,
    /// Number of combinations evaluated when sampling. Zero disables
    /// sampling.
    pub sample_size: usize,
    /// Seed for sampling and for randomized policies.
    pub seed: u64,
    /// Maximum hand size. Actions that would exceed it are not considered.
    pub max_hand_size: usize,
    /// Smallest opponent hand a card may be taken from.
    pub min_take_hand_size: usize,
    /// Consecutive passes allowed before a policy is forced to act.
    pub max_consecutive_passes: u32,
    /// Below this best probability the probability policy passes.
    pub min_probability: f64,
    /// Probability the rule-based policy aims for when choosing a draw count.
    pub target_probability: f64,
    /// Discard optimizer limits.
    pub solver: SolverOptions,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            mode: ValuationMode::Probability,
            sampling_threshold: 2_000,
            sample_size: 1_000,
            seed: 0,
            max_hand_size: 20,
            min_take_hand_size: 3,
            max_consecutive_passes: 1,
            min_probability: 0.1,
            target_probability: 0.5,
            solver: SolverOptions::default(),
        }
    }
}

impl EngineOptions {
    /// Sets the scoring mode.
    ///
    /// # Example
    ///
    /// ```
    /// use notty::{EngineOptions, ValuationMode};
    ///
    /// let options = EngineOptions::default().with_mode(ValuationMode::Expectation);
    /// assert_eq!(options.mode, ValuationMode::Expectation);
    /// ```
    #[must_use]
    pub const fn with_mode(mut self, mode: ValuationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the combination count above which draws are sampled.
    ///
    /// # Example
    ///
    /// ```
    /// use notty::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_sampling_threshold(u64::MAX);
    /// assert_eq!(options.sampling_threshold, u64::MAX);
    /// ```
    #[must_use]
    pub const fn with_sampling_threshold(mut self, threshold: u64) -> Self {
        self.sampling_threshold = threshold;
        self
    }

    /// Sets the number of sampled combinations.
    ///
    /// # Example
    ///
    /// ```
    /// use notty::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_sample_size(250);
    /// assert_eq!(options.sample_size, 250);
    /// ```
    #[must_use]
    pub const fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the maximum hand size.
    ///
    /// # Example
    ///
    /// ```
    /// use notty::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_max_hand_size(15);
    /// assert_eq!(options.max_hand_size, 15);
    /// ```
    #[must_use]
    pub const fn with_max_hand_size(mut self, max_hand_size: usize) -> Self {
        self.max_hand_size = max_hand_size;
        self
    }

    /// Sets the smallest opponent hand a card may be taken from.
    #[must_use]
    pub const fn with_min_take_hand_size(mut self, min_take_hand_size: usize) -> Self {
        self.min_take_hand_size = min_take_hand_size;
        self
    }

    /// Sets how many consecutive passes are allowed.
    #[must_use]
    pub const fn with_max_consecutive_passes(mut self, passes: u32) -> Self {
        self.max_consecutive_passes = passes;
        self
    }

    /// Sets the probability below which the probability policy passes.
    #[must_use]
    pub const fn with_min_probability(mut self, probability: f64) -> Self {
        self.min_probability = probability;
        self
    }

    /// Sets the probability the rule-based policy aims for.
    #[must_use]
    pub const fn with_target_probability(mut self, probability: f64) -> Self {
        self.target_probability = probability;
        self
    }

    /// Sets the discard optimizer limits.
    ///
    /// # Example
    ///
    /// ```
    /// use notty::{EngineOptions, SolverOptions};
    ///
    /// let options = EngineOptions::default()
    ///     .with_solver(SolverOptions::default().with_node_limit(10_000));
    /// assert_eq!(options.solver.node_limit, 10_000);
    /// ```
    #[must_use]
    pub const fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }
}
