//! Error types for engine operations.

use thiserror::Error;

use crate::card::Card;
use crate::solver::Selection;

/// Errors that can occur when building a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    /// Rank outside `1..=10`.
    #[error("invalid card rank {0}")]
    InvalidRank(u8),
}

/// Errors returned by the discard optimizer and the action valuator.
///
/// These indicate broken bookkeeping upstream of the engine (deck or hand
/// management), not a recoverable game situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A hand holds more copies of a card value than the deck contains.
    #[error("hand holds {count} copies of {card}, at most 2 exist")]
    InvariantViolation {
        /// The over-represented card value.
        card: Card,
        /// How many copies were observed.
        count: usize,
    },
    /// A card has a rank outside `1..=10`.
    #[error(transparent)]
    Card(#[from] CardError),
}

/// Errors that can occur while solving a set-packing problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The node budget ran out before optimality was proven.
    ///
    /// Carries the best feasible selection found so far.
    #[error("set packing search stopped after {nodes} nodes")]
    Timeout {
        /// Nodes explored before stopping.
        nodes: u64,
        /// Best feasible selection found before stopping.
        incumbent: Selection,
    },
    /// A candidate refers to an item with no capacity entry.
    #[error("candidate refers to unknown item {0}")]
    UnknownItem(usize),
}
