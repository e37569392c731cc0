//! Decision core for the Notty card game, with optional `no_std` support.
//!
//! Notty is played with 80 cards: four colors, ranks 1 to 10, two copies of
//! each. Players draw from the deck or take a random card from an opponent,
//! then discard valid groups (runs of one color, or one rank across distinct
//! colors). The first player to empty their hand wins.
//!
//! The crate provides:
//!
//! - group detection over a hand ([`Collection`]),
//! - the maximum discard a hand allows ([`find_best_discard`]),
//! - probability and expectation scores for candidate actions
//!   ([`Valuator`]),
//! - decision policies built on those scores ([`Policy`], [`Strategy`]).
//!
//! # Example
//!
//! ```
//! use notty::{Card, Collection, Color, find_best_discard};
//!
//! let hand: Collection = [
//!     Card::new(Color::Red, 4),
//!     Card::new(Color::Red, 5),
//!     Card::new(Color::Red, 6),
//!     Card::new(Color::Blue, 9),
//! ]
//! .into_iter()
//! .collect();
//!
//! let discard = find_best_discard(&hand).unwrap();
//! assert_eq!(discard.total, 3);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod collection;
pub mod context;
pub mod discard;
pub mod error;
pub mod options;
pub mod policy;
pub mod result;
pub mod solver;
pub mod valuator;

// Re-export main types
pub use card::{COPIES_PER_CARD, Card, Color, DECK_SIZE, MAX_RANK, MIN_RANK, full_deck, shuffled_deck};
pub use collection::{Collection, GroupKind, MIN_GROUP_SIZE, ValidGroup, ValueCounts};
pub use context::{ActionKey, GameContext, TurnState};
pub use discard::{find_best_discard, find_best_discard_with, find_best_discard_with_options};
pub use error::{CardError, EngineError, SolverError};
pub use options::{EngineOptions, SolverOptions, ValuationMode};
pub use policy::{
    ExpectationPolicy, PassGuard, Policy, ProbabilityPolicy, RandomPolicy, RuleBasedPolicy,
    Strategy,
};
pub use result::{Discard, DiscardOutcome, Estimate, Exactness};
pub use solver::{BranchAndBound, Candidate, Selection, SetPacking};
pub use valuator::{Evaluation, MAX_DRAW, Valuator, evaluate_actions, mean_relative_error, relative_error};
