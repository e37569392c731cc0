//! Maximum-weight set packing.
//!
//! The discard optimizer reduces "which groups to lay down" to a packing
//! problem: every candidate group uses a set of card values, every value has
//! a capacity (how many copies the hand holds), and the goal is to pick
//! candidates, each up to its copy limit, maximizing the number of cards
//! used without exceeding any capacity.
//!
//! The problem is NP-hard in general. Hands are capped at 20 cards, which
//! keeps candidate lists in the low hundreds, and [`BranchAndBound`] solves
//! them exactly well within its node budget in practice. The [`SetPacking`]
//! trait lets callers plug in another exact solver (an integer programming
//! backend, for instance) without touching the optimizer.

use alloc::vec::Vec;

use crate::error::SolverError;
use crate::options::SolverOptions;

/// A candidate set: the items it uses and how many times it may be picked.
///
/// The weight of a candidate is the number of items it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    members: Vec<usize>,
    copies: u8,
}

impl Candidate {
    /// Creates a candidate over distinct `members`, pickable up to `copies`
    /// times.
    #[must_use]
    pub const fn new(members: Vec<usize>, copies: u8) -> Self {
        Self { members, copies }
    }

    /// Item indices used by one copy of the candidate.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Maximum number of copies that may be picked.
    #[must_use]
    pub const fn copies(&self) -> u8 {
        self.copies
    }

    /// Weight of one copy.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.members.len()
    }
}

/// How many copies of each candidate were picked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    counts: Vec<u8>,
    weight: usize,
}

impl Selection {
    /// A selection of nothing over `len` candidates.
    #[must_use]
    pub fn empty(len: usize) -> Self {
        Self {
            counts: alloc::vec![0; len],
            weight: 0,
        }
    }

    /// Picked copies per candidate, in input order.
    #[must_use]
    pub fn counts(&self) -> &[u8] {
        &self.counts
    }

    /// Total weight of the picked copies.
    #[must_use]
    pub const fn weight(&self) -> usize {
        self.weight
    }

    /// Returns whether the selection respects every capacity and copy limit.
    #[must_use]
    pub fn is_feasible(&self, candidates: &[Candidate], capacities: &[u8]) -> bool {
        if self.counts.len() != candidates.len() {
            return false;
        }

        let mut usage = alloc::vec![0usize; capacities.len()];
        for (candidate, &count) in candidates.iter().zip(&self.counts) {
            if count > candidate.copies {
                return false;
            }
            for &member in &candidate.members {
                match usage.get_mut(member) {
                    Some(used) => *used += count as usize,
                    None => return false,
                }
            }
        }

        usage
            .iter()
            .zip(capacities)
            .all(|(&used, &capacity)| used <= capacity as usize)
    }
}

/// An exact solver for maximum-weight set packing.
pub trait SetPacking {
    /// Picks candidates maximizing total weight subject to `capacities`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Timeout`] with the best selection found so far
    /// if the solver gives up before proving optimality, or
    /// [`SolverError::UnknownItem`] if a candidate names an item without a
    /// capacity.
    fn solve_set_packing(
        &self,
        candidates: &[Candidate],
        capacities: &[u8],
    ) -> Result<Selection, SolverError>;
}

/// Depth-first branch and bound with a node budget.
///
/// Candidates are explored heaviest first, trying the largest feasible copy
/// count before smaller ones, so good incumbents appear early. A branch is
/// cut when the current weight plus the smaller of the remaining candidate
/// weight and the remaining item capacity cannot beat the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchAndBound {
    node_limit: u64,
}

impl BranchAndBound {
    /// Creates a solver that explores at most `node_limit` nodes.
    #[must_use]
    pub const fn new(node_limit: u64) -> Self {
        Self { node_limit }
    }

    /// Creates a solver from solver options.
    #[must_use]
    pub const fn from_options(options: &SolverOptions) -> Self {
        Self::new(options.node_limit)
    }
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self::from_options(&SolverOptions::default())
    }
}

impl SetPacking for BranchAndBound {
    fn solve_set_packing(
        &self,
        candidates: &[Candidate],
        capacities: &[u8],
    ) -> Result<Selection, SolverError> {
        for candidate in candidates {
            if let Some(&item) = candidate.members.iter().find(|&&m| m >= capacities.len()) {
                return Err(SolverError::UnknownItem(item));
            }
        }

        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by_key(|&index| core::cmp::Reverse(candidates[index].weight()));

        let mut suffix = alloc::vec![0usize; order.len() + 1];
        for (depth, &index) in order.iter().enumerate().rev() {
            let candidate = &candidates[index];
            suffix[depth] = suffix[depth + 1] + candidate.weight() * candidate.copies as usize;
        }

        let mut search = Search {
            candidates,
            order: &order,
            suffix: &suffix,
            remaining: capacities.to_vec(),
            remaining_total: capacities.iter().map(|&c| c as usize).sum(),
            counts: alloc::vec![0; candidates.len()],
            weight: 0,
            best: Selection::empty(candidates.len()),
            nodes: 0,
            node_limit: self.node_limit,
            exhausted: false,
        };
        search.descend(0);

        log::trace!(
            "set packing: {} candidates, {} nodes, weight {}",
            candidates.len(),
            search.nodes,
            search.best.weight
        );

        if search.exhausted {
            return Err(SolverError::Timeout {
                nodes: search.nodes,
                incumbent: search.best,
            });
        }
        Ok(search.best)
    }
}

struct Search<'a> {
    candidates: &'a [Candidate],
    order: &'a [usize],
    suffix: &'a [usize],
    remaining: Vec<u8>,
    remaining_total: usize,
    counts: Vec<u8>,
    weight: usize,
    best: Selection,
    nodes: u64,
    node_limit: u64,
    exhausted: bool,
}

impl Search<'_> {
    fn descend(&mut self, depth: usize) {
        if self.exhausted {
            return;
        }
        self.nodes += 1;
        if self.nodes > self.node_limit {
            self.exhausted = true;
            return;
        }

        if self.weight > self.best.weight {
            self.best = Selection {
                counts: self.counts.clone(),
                weight: self.weight,
            };
        }

        if depth == self.order.len() {
            return;
        }

        let bound = self.weight + self.suffix[depth].min(self.remaining_total);
        if bound <= self.best.weight {
            return;
        }

        let candidates = self.candidates;
        let index = self.order[depth];
        let candidate = &candidates[index];
        let feasible = candidate
            .members
            .iter()
            .map(|&member| self.remaining[member])
            .min()
            .unwrap_or(0)
            .min(candidate.copies);

        for count in (0..=feasible).rev() {
            self.apply(index, count, false);
            self.descend(depth + 1);
            self.apply(index, count, true);
            if self.exhausted {
                return;
            }
        }
    }

    fn apply(&mut self, index: usize, count: u8, undo: bool) {
        if count == 0 {
            return;
        }
        let candidates = self.candidates;
        let candidate = &candidates[index];
        let used = candidate.weight() * count as usize;

        for &member in &candidate.members {
            if undo {
                self.remaining[member] += count;
            } else {
                self.remaining[member] -= count;
            }
        }

        if undo {
            self.counts[index] -= count;
            self.weight -= used;
            self.remaining_total += used;
        } else {
            self.counts[index] += count;
            self.weight += used;
            self.remaining_total -= used;
        }
    }
}
