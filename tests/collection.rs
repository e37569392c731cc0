//! Group detection integration tests.

use notty::{
    Card, CardError, Collection, Color, EngineError, GroupKind, MIN_GROUP_SIZE, ValidGroup,
    full_deck, shuffled_deck,
};

const fn card(color: Color, rank: u8) -> Card {
    Card::new(color, rank)
}

fn collection(cards: &[Card]) -> Collection {
    Collection::from(cards)
}

#[test]
fn small_collections_hold_no_group() {
    let two = collection(&[card(Color::Red, 1), card(Color::Red, 2)]);
    assert!(!two.is_valid_group());
    assert!(!two.exists_valid_group());
    assert!(two.largest_valid_group().is_none());
    assert!(two.all_valid_groups().is_empty());
    assert!(Collection::new().all_valid_groups_with_largest_length().is_empty());
}

#[test]
fn whole_collection_validity() {
    let run = collection(&[
        card(Color::Blue, 6),
        card(Color::Blue, 4),
        card(Color::Blue, 5),
    ]);
    assert!(run.is_valid_group());

    let rainbow = collection(&[
        card(Color::Red, 8),
        card(Color::Green, 8),
        card(Color::Yellow, 8),
        card(Color::Blue, 8),
    ]);
    assert!(rainbow.is_valid_group());

    let gap = collection(&[
        card(Color::Blue, 4),
        card(Color::Blue, 5),
        card(Color::Blue, 7),
    ]);
    assert!(!gap.is_valid_group());

    let repeated_color = collection(&[
        card(Color::Red, 8),
        card(Color::Red, 8),
        card(Color::Green, 8),
    ]);
    assert!(!repeated_color.is_valid_group());

    let mixed = collection(&[
        card(Color::Red, 1),
        card(Color::Red, 2),
        card(Color::Red, 3),
        card(Color::Blue, 9),
    ]);
    assert!(!mixed.is_valid_group());
    assert!(mixed.exists_valid_group());
}

#[test]
fn largest_group_prefers_run_on_ties() {
    let hand = collection(&[
        card(Color::Yellow, 7),
        card(Color::Green, 7),
        card(Color::Red, 7),
        card(Color::Blue, 1),
        card(Color::Blue, 2),
        card(Color::Blue, 3),
    ]);
    let largest = hand.largest_valid_group().unwrap();
    assert_eq!(largest.kind(), GroupKind::Run);
    assert_eq!(
        largest.cards(),
        &[card(Color::Blue, 1), card(Color::Blue, 2), card(Color::Blue, 3)]
    );
    assert_round_trips(&hand, &largest);

    let bigger_rainbow = hand.with_cards(&[card(Color::Blue, 7)]);
    let largest = bigger_rainbow.largest_valid_group().unwrap();
    assert_eq!(largest.kind(), GroupKind::Rainbow);
    assert_eq!(largest.len(), 4);
    assert_round_trips(&bigger_rainbow, &largest);
}

#[test]
fn largest_run_keeps_first_color_on_ties() {
    let hand = collection(&[
        card(Color::Green, 2),
        card(Color::Green, 3),
        card(Color::Green, 4),
        card(Color::Red, 8),
        card(Color::Red, 9),
        card(Color::Red, 10),
    ]);
    let largest = hand.largest_valid_group().unwrap();
    assert_eq!(largest.cards()[0], card(Color::Red, 8));
}

#[test]
fn all_groups_include_sub_runs_and_sub_rainbows() {
    let run = collection(&[
        card(Color::Red, 1),
        card(Color::Red, 2),
        card(Color::Red, 3),
        card(Color::Red, 4),
    ]);
    let groups = run.all_valid_groups();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].len(), 4);
    assert_eq!(groups[1].cards()[0], card(Color::Red, 1));
    assert_eq!(groups[2].cards()[0], card(Color::Red, 2));

    let rainbow = collection(&[
        card(Color::Red, 5),
        card(Color::Blue, 5),
        card(Color::Green, 5),
        card(Color::Yellow, 5),
    ]);
    let groups = rainbow.all_valid_groups();
    assert_eq!(groups.len(), 5);
    assert_eq!(groups[0].len(), 4);
    assert!(groups.iter().all(|g| g.kind() == GroupKind::Rainbow));
    assert!(groups[1..].iter().all(|g| g.len() == 3));
}

#[test]
fn all_groups_are_sorted_and_deduplicated() {
    let hand = collection(&[
        card(Color::Red, 1),
        card(Color::Red, 2),
        card(Color::Red, 3),
        card(Color::Red, 1),
        card(Color::Red, 2),
        card(Color::Red, 3),
        card(Color::Blue, 3),
        card(Color::Green, 3),
    ]);
    let groups = hand.all_valid_groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].kind(), GroupKind::Run);
    assert_eq!(groups[1].kind(), GroupKind::Rainbow);

    let mut sorted = groups.clone();
    sorted.sort();
    assert_eq!(groups, sorted);
}

#[test]
fn largest_length_groups_are_maximal() {
    let hand = collection(&[
        card(Color::Red, 1),
        card(Color::Red, 2),
        card(Color::Red, 3),
        card(Color::Red, 4),
        card(Color::Red, 6),
        card(Color::Red, 7),
        card(Color::Red, 8),
        card(Color::Blue, 4),
        card(Color::Green, 4),
    ]);
    let groups = hand.all_valid_groups_with_largest_length();
    let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    assert_eq!(sizes, vec![4, 3, 3]);
    assert_eq!(groups[2].kind(), GroupKind::Rainbow);
}

fn assert_round_trips(hand: &Collection, group: &ValidGroup) {
    assert!(group.len() >= MIN_GROUP_SIZE, "{group:?}");
    assert!(Collection::from(group).is_valid_group(), "{group:?}");
    let positions = hand.resolve(group).unwrap();
    let resolved: Vec<Card> = positions.iter().map(|&p| hand.cards()[p]).collect();
    assert_eq!(resolved, group.cards());
}

#[test]
fn every_enumerated_group_is_valid() {
    for seed in 0..20 {
        let deck = shuffled_deck(seed);
        for size in 3..=20 {
            let hand = Collection::from(&deck[..size]);
            let all = hand.all_valid_groups();
            for group in &all {
                assert_round_trips(&hand, group);
            }

            let maximal = hand.all_valid_groups_with_largest_length();
            for group in &maximal {
                assert_round_trips(&hand, group);
                assert!(all.contains(group));
            }

            let largest = hand.largest_valid_group();
            if let Some(group) = &largest {
                assert_round_trips(&hand, group);
            }
            assert_eq!(hand.exists_valid_group(), !all.is_empty(), "seed {seed}, size {size}");
            assert_eq!(
                largest.map(|g| g.len()),
                all.iter().map(ValidGroup::len).max(),
                "seed {seed}, size {size}"
            );
        }
    }

    let stepped: Collection = full_deck().into_iter().step_by(3).collect();
    for group in stepped.all_valid_groups() {
        assert_round_trips(&stepped, &group);
    }
}

#[test]
fn resolve_picks_first_unused_instances() {
    let hand = collection(&[
        card(Color::Red, 1),
        card(Color::Red, 2),
        card(Color::Red, 1),
        card(Color::Red, 3),
        card(Color::Red, 2),
        card(Color::Red, 3),
    ]);
    let group = hand.largest_valid_group().unwrap();
    assert_eq!(hand.resolve(&group), Some(vec![0, 1, 3]));

    let twice = vec![group.clone(), group.clone()];
    assert_eq!(
        hand.resolve_all(&twice),
        Some(vec![vec![0, 1, 3], vec![2, 4, 5]])
    );

    let thrice = vec![group.clone(), group.clone(), group];
    assert_eq!(hand.resolve_all(&thrice), None);
}

#[test]
fn remove_positions_returns_removed_cards() {
    let mut hand = collection(&[
        card(Color::Red, 1),
        card(Color::Blue, 2),
        card(Color::Green, 3),
        card(Color::Yellow, 4),
    ]);
    let removed = hand.remove_positions(&[3, 1, 1, 9]);
    assert_eq!(removed, vec![card(Color::Blue, 2), card(Color::Yellow, 4)]);
    assert_eq!(hand.cards(), &[card(Color::Red, 1), card(Color::Green, 3)]);
}

#[test]
fn counts_reject_broken_hands() {
    let hand = collection(&[
        card(Color::Red, 1),
        card(Color::Red, 1),
        card(Color::Red, 1),
    ]);
    assert_eq!(
        hand.counts(),
        Err(EngineError::InvariantViolation {
            card: card(Color::Red, 1),
            count: 3,
        })
    );

    let bad_rank = collection(&[card(Color::Red, 11)]);
    assert_eq!(
        bad_rank.counts(),
        Err(EngineError::Card(CardError::InvalidRank(11)))
    );
    assert_eq!(Card::try_new(Color::Red, 0), Err(CardError::InvalidRank(0)));
}
