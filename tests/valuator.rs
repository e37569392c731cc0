//! Action valuation integration tests.

#![allow(clippy::float_cmp)]

use notty::{
    ActionKey, Card, Color, EngineError, EngineOptions, Exactness, GameContext, TurnState,
    ValuationMode, Valuator, evaluate_actions, mean_relative_error, relative_error, shuffled_deck,
};
use notty::valuator::{Combinations, Plan, binomial, unrank};

const fn card(color: Color, rank: u8) -> Card {
    Card::new(color, rank)
}

/// Red 1 and 2 in hand; the deck holds the red 3 and a dead card.
fn near_run() -> GameContext {
    GameContext::new(
        vec![card(Color::Red, 1), card(Color::Red, 2)],
        vec![vec![
            card(Color::Green, 5),
            card(Color::Green, 6),
            card(Color::Green, 7),
        ]],
        vec![card(Color::Red, 3), card(Color::Blue, 9)],
    )
}

fn probability() -> Valuator {
    Valuator::new(EngineOptions::default())
}

fn expectation() -> Valuator {
    Valuator::new(EngineOptions::default().with_mode(ValuationMode::Expectation))
}

#[test]
fn candidate_actions_follow_deck_size() {
    let actions = probability().candidate_actions(&near_run(), TurnState::fresh());
    assert_eq!(
        actions,
        vec![ActionKey::Draw(1), ActionKey::Draw(2), ActionKey::Take(0), ActionKey::Pass]
    );
}

#[test]
fn candidate_actions_respect_hand_cap_and_small_opponents() {
    let context = GameContext::new(
        vec![card(Color::Red, 1), card(Color::Red, 2), card(Color::Blue, 4)],
        vec![
            vec![card(Color::Green, 5), card(Color::Green, 6)],
            vec![
                card(Color::Yellow, 1),
                card(Color::Yellow, 2),
                card(Color::Yellow, 3),
            ],
        ],
        shuffled_deck(1)
            .into_iter()
            .filter(|c| c.color == Color::Blue && c.rank > 5)
            .collect(),
    );

    let capped = Valuator::new(EngineOptions::default().with_max_hand_size(4));
    assert_eq!(
        capped.candidate_actions(&context, TurnState::fresh()),
        vec![ActionKey::Draw(1), ActionKey::Take(1), ActionKey::Pass]
    );

    let full = Valuator::new(EngineOptions::default().with_max_hand_size(3));
    assert_eq!(
        full.candidate_actions(&context, TurnState::fresh()),
        vec![ActionKey::Pass]
    );

    let after_draw = TurnState::fresh().after(ActionKey::Draw(2));
    assert_eq!(
        probability().candidate_actions(&context, after_draw),
        vec![ActionKey::Take(1), ActionKey::Pass]
    );

    let after_both = after_draw.after(ActionKey::Take(1));
    assert_eq!(
        probability().candidate_actions(&context, after_both),
        vec![ActionKey::Pass]
    );
}

#[test]
fn probability_scores_single_and_multi_card_draws() {
    let scores = probability().evaluate_actions(&near_run()).unwrap();
    assert_eq!(scores[&ActionKey::Draw(1)].value, 0.5);
    assert_eq!(scores[&ActionKey::Draw(2)].value, 1.0);
    assert_eq!(scores[&ActionKey::Take(0)].value, 0.0);
    assert_eq!(scores[&ActionKey::Pass].value, 0.0);
    assert!(scores.values().all(|e| e.exactness == Exactness::Exact));
}

#[test]
fn expectation_subtracts_gained_cards() {
    let scores = expectation().evaluate_actions(&near_run()).unwrap();
    assert_eq!(scores[&ActionKey::Draw(1)].value, 0.5);
    assert_eq!(scores[&ActionKey::Draw(2)].value, 1.0);
    assert_eq!(scores[&ActionKey::Take(0)].value, -1.0);
    assert_eq!(scores[&ActionKey::Pass].value, 0.0);

    assert_eq!(expectation().draw_one_gain(&near_run()).unwrap(), 1.5);
}

#[test]
fn impossible_actions_score_zero() {
    let context = near_run();
    let valuator = expectation();
    assert_eq!(
        valuator.evaluate_action(&context, ActionKey::Draw(3)).unwrap().value,
        0.0
    );
    assert_eq!(
        valuator.evaluate_action(&context, ActionKey::Take(4)).unwrap().value,
        0.0
    );
}

#[test]
fn take_is_weighted_by_duplicate_copies() {
    let context = GameContext::new(
        vec![card(Color::Red, 1), card(Color::Red, 2)],
        vec![vec![
            card(Color::Red, 3),
            card(Color::Red, 3),
            card(Color::Blue, 9),
        ]],
        Vec::new(),
    );
    let estimate = probability()
        .evaluate_action(&context, ActionKey::Take(0))
        .unwrap();
    assert!((estimate.value - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn probabilities_stay_in_range_on_random_deals() {
    for seed in 0..8 {
        let deck = shuffled_deck(seed);
        let context = GameContext::new(
            deck[..6].to_vec(),
            vec![deck[6..12].to_vec(), deck[12..14].to_vec()],
            deck[14..].to_vec(),
        );
        let options = EngineOptions::default().with_seed(seed);
        let scores = evaluate_actions(&context, &options).unwrap();
        assert!(!scores.contains_key(&ActionKey::Take(1)));
        for (action, estimate) in &scores {
            assert!(
                (0.0..=1.0).contains(&estimate.value),
                "seed {seed}, {action}: {}",
                estimate.value
            );
        }

        let expected = evaluate_actions(
            &context,
            &options.clone().with_mode(ValuationMode::Expectation),
        )
        .unwrap();
        assert_eq!(expected[&ActionKey::Pass].value, 0.0);
        assert!(expected[&ActionKey::Draw(1)].value >= -1.0);
    }
}

#[test]
fn large_draws_are_sampled_and_close_to_exact() {
    let deck = shuffled_deck(3);
    let context = GameContext::new(deck[..7].to_vec(), Vec::new(), deck[7..37].to_vec());

    let sampled = probability()
        .evaluate_action(&context, ActionKey::Draw(3))
        .unwrap();
    assert_eq!(
        sampled.exactness,
        Exactness::Sampled {
            sampled: 1_000,
            total: 4_060,
        }
    );
    assert!(sampled.is_sampled());

    let exact = Valuator::new(EngineOptions::default().with_sampling_threshold(u64::MAX))
        .evaluate_action(&context, ActionKey::Draw(3))
        .unwrap();
    assert!(!exact.is_sampled());
    assert!(
        (sampled.value - exact.value).abs() < 0.08,
        "sampled {} vs exact {}",
        sampled.value,
        exact.value
    );

    let again = probability()
        .evaluate_action(&context, ActionKey::Draw(3))
        .unwrap();
    assert_eq!(sampled, again);
}

#[test]
fn sampling_error_shrinks_with_sample_size() {
    let mean_error = |sample_size: usize| {
        let pairs: Vec<(f64, f64)> = (0..6)
            .map(|seed| {
                let deck = shuffled_deck(seed);
                let context =
                    GameContext::new(deck[..7].to_vec(), Vec::new(), deck[7..37].to_vec());
                let options = EngineOptions::default()
                    .with_seed(seed)
                    .with_sample_size(sample_size);
                let sampled = Valuator::new(options.clone())
                    .evaluate_action(&context, ActionKey::Draw(3))
                    .unwrap();
                let exact = Valuator::new(options.with_sampling_threshold(u64::MAX))
                    .evaluate_action(&context, ActionKey::Draw(3))
                    .unwrap();
                (sampled.value, exact.value)
            })
            .collect();
        mean_relative_error(&pairs)
    };

    assert!(mean_error(2_000) < mean_error(50));
}

#[test]
fn zero_sample_size_never_samples() {
    let deck = shuffled_deck(3);
    let context = GameContext::new(deck[..7].to_vec(), Vec::new(), deck[7..37].to_vec());

    let estimate = Valuator::new(EngineOptions::default().with_sample_size(0))
        .evaluate_action(&context, ActionKey::Draw(3))
        .unwrap();
    assert_eq!(estimate.exactness, Exactness::Exact);

    assert_eq!(Plan::choose(30, 3, 2_000, 0), Plan::Exhaustive { total: 4_060 });
    assert_eq!(
        Plan::choose(30, 3, 2_000, 1),
        Plan::Sampled {
            total: 4_060,
            sampled: 1,
        }
    );
}

#[test]
fn unrank_follows_lexicographic_order() {
    let all: Vec<Vec<usize>> = Combinations::new(6, 3).collect();
    assert_eq!(all.len() as u64, binomial(6, 3));
    for (rank, combination) in all.iter().enumerate() {
        assert_eq!(&unrank(6, 3, rank as u64), combination);
    }
}

#[test]
fn relative_error_helpers() {
    assert_eq!(relative_error(1.5, 1.0), 50.0);
    assert_eq!(relative_error(0.5, 0.0), 100.0);
    assert_eq!(mean_relative_error(&[(1.5, 1.0), (2.0, 2.0)]), 25.0);
    assert_eq!(mean_relative_error(&[]), 0.0);
}

#[test]
fn broken_bookkeeping_is_rejected() {
    let context = GameContext::new(
        vec![card(Color::Red, 1), card(Color::Red, 1)],
        Vec::new(),
        vec![card(Color::Red, 1)],
    );
    assert!(matches!(
        probability().evaluate_actions(&context),
        Err(EngineError::InvariantViolation { count: 3, .. })
    ));

    let bad_rank = GameContext::new(vec![card(Color::Red, 12)], Vec::new(), Vec::new());
    assert!(matches!(
        bad_rank.validate(),
        Err(EngineError::Card(_))
    ));
}
