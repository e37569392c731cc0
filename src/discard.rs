//! Best-discard selection.
//!
//! Picks the combination of valid groups that removes the most cards from a
//! hand in one turn without using any card instance twice.

use alloc::vec::Vec;

use crate::card::DISTINCT_CARDS;
use crate::collection::{Collection, ValidGroup, ValueCounts};
use crate::error::{EngineError, SolverError};
use crate::options::SolverOptions;
use crate::result::{Discard, DiscardOutcome};
use crate::solver::{BranchAndBound, Candidate, SetPacking};

/// Finds the largest conflict-free discard using the default solver limits.
///
/// # Errors
///
/// Returns [`EngineError::InvariantViolation`] if the hand holds more than
/// two copies of a card value, or [`EngineError::Card`] if a card has an
/// invalid rank.
///
/// # Example
///
/// ```
/// use notty::{Card, Collection, Color, find_best_discard};
///
/// let hand: Vec<Card> = [1, 2, 3, 1, 2, 3]
///     .into_iter()
///     .map(|rank| Card::new(Color::Red, rank))
///     .collect();
/// let discard = find_best_discard(&Collection::from(hand)).unwrap();
/// assert_eq!(discard.total, 6);
/// assert_eq!(discard.groups.len(), 2);
/// ```
pub fn find_best_discard(collection: &Collection) -> Result<Discard, EngineError> {
    find_best_discard_with(collection, &BranchAndBound::default())
}

/// Finds the largest conflict-free discard with the given solver options.
///
/// # Errors
///
/// See [`find_best_discard`].
pub fn find_best_discard_with_options(
    collection: &Collection,
    options: &SolverOptions,
) -> Result<Discard, EngineError> {
    find_best_discard_with(collection, &BranchAndBound::from_options(options))
}

/// Finds the largest conflict-free discard, packing conflicting groups with
/// `solver`.
///
/// If the solver gives up, the result is the better of its incumbent and the
/// single largest group, tagged [`DiscardOutcome::Fallback`].
///
/// # Errors
///
/// See [`find_best_discard`].
pub fn find_best_discard_with<S>(collection: &Collection, solver: &S) -> Result<Discard, EngineError>
where
    S: SetPacking + ?Sized,
{
    let counts = collection.counts()?;
    let groups = collection.all_valid_groups();
    if groups.is_empty() {
        return Ok(Discard::empty());
    }

    let copies: Vec<u8> = groups
        .iter()
        .map(|group| group_copies(group, &counts))
        .collect();

    let mut usage = [0u8; DISTINCT_CARDS];
    for (group, &copy) in groups.iter().zip(&copies) {
        for card in group.cards() {
            usage[card.value_index()] = usage[card.value_index()].saturating_add(copy);
        }
    }

    if usage
        .iter()
        .zip(counts.as_slice())
        .all(|(used, held)| used <= held)
    {
        let chosen = expand(&groups, &copies);
        if let Some(discard) = assemble(collection, chosen, DiscardOutcome::Disjoint) {
            return Ok(discard);
        }
    }

    let candidates: Vec<Candidate> = groups
        .iter()
        .zip(&copies)
        .map(|(group, &copy)| {
            Candidate::new(
                group.cards().iter().map(|card| card.value_index()).collect(),
                copy,
            )
        })
        .collect();

    let (selection, outcome) = match solver.solve_set_packing(&candidates, counts.as_slice()) {
        Ok(selection) => (Some(selection), DiscardOutcome::Optimal),
        Err(SolverError::Timeout { nodes, incumbent }) => {
            log::warn!(
                "discard solve stopped after {nodes} nodes, falling back (incumbent {})",
                incumbent.weight()
            );
            (Some(incumbent), DiscardOutcome::Fallback)
        }
        Err(err) => {
            log::warn!("discard solve failed: {err}, falling back");
            (None, DiscardOutcome::Fallback)
        }
    };

    let selection = selection.filter(|s| s.is_feasible(&candidates, counts.as_slice()));
    let largest = groups.iter().map(ValidGroup::len).max().unwrap_or(0);

    if let Some(selection) = selection {
        if outcome == DiscardOutcome::Optimal || selection.weight() >= largest {
            let chosen = expand(&groups, selection.counts());
            if let Some(discard) = assemble(collection, chosen, outcome) {
                return Ok(discard);
            }
        }
    }

    Ok(largest_only(collection, &groups))
}

/// How many times a group can be formed from the held copies.
fn group_copies(group: &ValidGroup, counts: &ValueCounts) -> u8 {
    group
        .cards()
        .iter()
        .map(|card| counts.get(*card))
        .min()
        .unwrap_or(0)
}

fn expand(groups: &[ValidGroup], counts: &[u8]) -> Vec<ValidGroup> {
    groups
        .iter()
        .zip(counts)
        .flat_map(|(group, &count)| core::iter::repeat_n(group, count as usize))
        .cloned()
        .collect()
}

fn assemble(collection: &Collection, groups: Vec<ValidGroup>, outcome: DiscardOutcome) -> Option<Discard> {
    let positions = collection.resolve_all(&groups)?;
    let total = groups.iter().map(ValidGroup::len).sum();

    log::debug!(
        "best discard: {} groups, {total} cards ({outcome:?})",
        groups.len()
    );

    Some(Discard {
        groups,
        positions,
        total,
        outcome,
    })
}

fn largest_only(collection: &Collection, groups: &[ValidGroup]) -> Discard {
    // groups are sorted largest first
    groups
        .first()
        .cloned()
        .and_then(|group| assemble(collection, alloc::vec![group], DiscardOutcome::Fallback))
        .unwrap_or_else(Discard::empty)
}
