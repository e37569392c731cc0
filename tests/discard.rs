//! Discard optimizer integration tests.

use std::collections::HashSet;

use notty::{
    BranchAndBound, Candidate, Card, Collection, Color, DiscardOutcome, EngineError, Selection,
    SetPacking, SolverError, SolverOptions, find_best_discard, find_best_discard_with,
    find_best_discard_with_options, shuffled_deck,
};

const fn card(color: Color, rank: u8) -> Card {
    Card::new(color, rank)
}

/// A rank-5 rainbow in every color plus a red run through the same red 5.
fn rainbow_against_run() -> Collection {
    Collection::from(vec![
        card(Color::Blue, 5),
        card(Color::Green, 5),
        card(Color::Yellow, 5),
        card(Color::Red, 5),
        card(Color::Red, 6),
        card(Color::Red, 7),
    ])
}

fn assert_consistent(hand: &Collection, discard: &notty::Discard) {
    let mut seen = HashSet::new();
    for (group, positions) in discard.groups.iter().zip(&discard.positions) {
        assert_eq!(group.len(), positions.len());
        let cards: Vec<Card> = positions.iter().map(|&p| hand.cards()[p]).collect();
        assert!(Collection::from(cards).is_valid_group());
        for &position in positions {
            assert!(seen.insert(position), "position {position} used twice");
        }
    }
    assert_eq!(seen.len(), discard.total);
}

#[test]
fn empty_and_groupless_hands_discard_nothing() {
    let discard = find_best_discard(&Collection::new()).unwrap();
    assert!(discard.is_empty());
    assert_eq!(discard.outcome, DiscardOutcome::Nothing);

    let hand = Collection::from(vec![
        card(Color::Red, 1),
        card(Color::Blue, 4),
        card(Color::Green, 9),
    ]);
    let discard = find_best_discard(&hand).unwrap();
    assert_eq!(discard.total, 0);
    assert!(discard.positions.is_empty());
}

#[test]
fn duplicated_run_is_discarded_twice() {
    let hand: Collection = [1, 2, 3, 1, 2, 3]
        .into_iter()
        .map(|rank| card(Color::Red, rank))
        .collect();
    let discard = find_best_discard(&hand).unwrap();
    assert_eq!(discard.total, 6);
    assert_eq!(discard.groups.len(), 2);
    assert_eq!(discard.outcome, DiscardOutcome::Disjoint);
    assert_consistent(&hand, &discard);
}

#[test]
fn conflicting_groups_are_packed_optimally() {
    let hand = rainbow_against_run();
    let discard = find_best_discard(&hand).unwrap();
    assert_eq!(discard.total, 6);
    assert_eq!(discard.groups.len(), 2);
    assert_eq!(discard.outcome, DiscardOutcome::Optimal);
    assert!(discard.is_optimal());
    assert_consistent(&hand, &discard);
}

#[test]
fn solver_timeout_falls_back_to_largest_group() {
    let hand = rainbow_against_run();
    let discard =
        find_best_discard_with_options(&hand, &SolverOptions::default().with_node_limit(0))
            .unwrap();
    assert_eq!(discard.outcome, DiscardOutcome::Fallback);
    assert!(!discard.is_optimal());
    assert_eq!(discard.total, 4);
    assert_consistent(&hand, &discard);
}

struct FailingSolver;

impl SetPacking for FailingSolver {
    fn solve_set_packing(
        &self,
        _candidates: &[Candidate],
        _capacities: &[u8],
    ) -> Result<Selection, SolverError> {
        Err(SolverError::UnknownItem(99))
    }
}

#[test]
fn solver_errors_fall_back_to_largest_group() {
    let hand = rainbow_against_run();
    let discard = find_best_discard_with(&hand, &FailingSolver).unwrap();
    assert_eq!(discard.outcome, DiscardOutcome::Fallback);
    assert_eq!(discard.total, 4);
}

#[test]
fn discard_is_at_least_largest_group_on_random_hands() {
    for seed in 0..40 {
        let deck = shuffled_deck(seed);
        let hand = Collection::from(&deck[..14]);
        let discard = find_best_discard(&hand).unwrap();
        let largest = hand.largest_valid_group().map_or(0, |g| g.len());
        assert!(discard.total >= largest, "seed {seed}");
        assert!(discard.total <= hand.len());
        assert_consistent(&hand, &discard);
    }
}

/// Exhaustive packing over every multiset of groups that fits the hand.
fn brute_force_total(groups: &[Vec<usize>], from: usize, counts: &mut [u8; 40]) -> usize {
    let mut best = 0;
    for (index, group) in groups.iter().enumerate().skip(from) {
        if group.iter().any(|&value| counts[value] == 0) {
            continue;
        }
        for &value in group {
            counts[value] -= 1;
        }
        best = best.max(group.len() + brute_force_total(groups, index, counts));
        for &value in group {
            counts[value] += 1;
        }
    }
    best
}

#[test]
fn dense_hands_match_brute_force_packing() {
    for size in [12, 15, 17] {
        for seed in 0..25 {
            let pool: Vec<Card> = shuffled_deck(seed)
                .into_iter()
                .filter(|c| c.rank <= 5)
                .collect();
            let hand = Collection::from(&pool[..size]);

            let mut counts = [0u8; 40];
            for card in hand.cards() {
                counts[card.value_index()] += 1;
            }
            let groups: Vec<Vec<usize>> = hand
                .all_valid_groups()
                .iter()
                .map(|g| g.cards().iter().map(|c| c.value_index()).collect())
                .collect();

            let discard = find_best_discard(&hand).unwrap();
            assert_ne!(discard.outcome, DiscardOutcome::Fallback);
            assert_eq!(
                discard.total,
                brute_force_total(&groups, 0, &mut counts),
                "size {size}, seed {seed}"
            );
            assert_consistent(&hand, &discard);
        }
    }
}

#[test]
fn discard_removes_cleanly_from_hand() {
    let mut hand = rainbow_against_run().with_cards(&[card(Color::Yellow, 10)]);
    let discard = find_best_discard(&hand).unwrap();
    let positions: Vec<usize> = discard.positions.concat();
    let removed = hand.remove_positions(&positions);
    assert_eq!(removed.len(), 6);
    assert_eq!(hand.cards(), &[card(Color::Yellow, 10)]);
}

#[test]
fn broken_hand_is_rejected() {
    let hand = Collection::from(vec![card(Color::Green, 4); 3]);
    assert!(matches!(
        find_best_discard(&hand),
        Err(EngineError::InvariantViolation { count: 3, .. })
    ));
}

#[test]
fn branch_and_bound_respects_capacities() {
    let candidates = vec![
        Candidate::new(vec![0, 1, 2], 1),
        Candidate::new(vec![2, 3, 4], 1),
        Candidate::new(vec![3, 4, 5], 1),
    ];
    let capacities = [1; 6];
    let selection = BranchAndBound::default()
        .solve_set_packing(&candidates, &capacities)
        .unwrap();
    assert_eq!(selection.weight(), 6);
    assert_eq!(selection.counts(), &[1, 0, 1]);
    assert!(selection.is_feasible(&candidates, &capacities));

    let unknown = [Candidate::new(vec![7], 1)];
    assert_eq!(
        BranchAndBound::default().solve_set_packing(&unknown, &capacities),
        Err(SolverError::UnknownItem(7))
    );
}
