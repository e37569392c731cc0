//! CLI Notty example: automated players play a full game.
//!
//! Usage: `cargo run --example cli_notty -- [seed] [strategy ...]`

#![allow(clippy::missing_docs_in_private_items)]

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use notty::{
    ActionKey, Card, Collection, Color, EngineOptions, GameContext, Policy, Strategy,
    TurnState, find_best_discard, shuffled_deck,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const INITIAL_HAND: usize = 7;
const MAX_ROUNDS: usize = 100;

struct Player {
    strategy: Strategy,
    policy: Box<dyn Policy + Send>,
    hand: Vec<Card>,
}

fn main() {
    let mut args = env::args().skip(1);
    let seed = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        });

    let mut strategies: Vec<Strategy> = args.filter_map(|arg| Strategy::from_name(&arg)).collect();
    if strategies.len() < 2 {
        strategies = Strategy::ALL.to_vec();
    }

    println!("Notty CLI example (seed {seed})");

    let mut deck = shuffled_deck(seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut players: Vec<Player> = strategies
        .iter()
        .zip(0u64..)
        .map(|(&strategy, index)| Player {
            strategy,
            policy: strategy.build(EngineOptions::default().with_seed(seed.wrapping_add(index))),
            hand: deck.split_off(deck.len() - INITIAL_HAND),
        })
        .collect();

    for player in &players {
        println!("{:<12} {}", player.strategy, format_hand(&player.hand));
    }

    for round in 1..=MAX_ROUNDS {
        println!("\n-- Round {round} ({} cards in deck) --", deck.len());

        for seat in 0..players.len() {
            if let Err(err) = play_turn(&mut players, seat, &mut deck, &mut rng) {
                println!("Engine error: {err}");
                return;
            }

            if players[seat].hand.is_empty() {
                println!("\n{} wins in round {round}.", players[seat].strategy);
                return;
            }
        }
    }

    println!("\nNo winner after {MAX_ROUNDS} rounds.");
    for player in &players {
        println!("{:<12} {} cards left", player.strategy, player.hand.len());
    }
}

fn play_turn(
    players: &mut [Player],
    seat: usize,
    deck: &mut Vec<Card>,
    rng: &mut ChaCha8Rng,
) -> Result<(), notty::EngineError> {
    let mut turn = TurnState::fresh();

    loop {
        let context = context_for(players, seat, deck);
        let action = players[seat].policy.choose_action(&context, turn)?;
        let name = players[seat].strategy;

        match action {
            ActionKey::Pass => {
                if turn.is_fresh() {
                    println!("{name:<12} passes");
                }
                break;
            }
            ActionKey::Draw(count) => {
                let drawn = draw(deck, &mut players[seat].hand, usize::from(count));
                println!("{name:<12} draws {drawn}");
            }
            ActionKey::Take(index) => {
                let target = opponent_seat(seat, index, players.len());
                let victim = &mut players[target].hand;
                let position = rng.random_range(0..victim.len());
                let card = victim.remove(position);
                println!(
                    "{name:<12} takes {} from {}",
                    format_card(card),
                    players[target].strategy
                );
                players[seat].hand.push(card);
            }
        }

        turn = turn.after(action);
    }

    discard(&mut players[seat])
}

fn discard(player: &mut Player) -> Result<(), notty::EngineError> {
    let mut hand = Collection::from(player.hand.clone());
    let best = find_best_discard(&hand)?;
    if best.is_empty() {
        return Ok(());
    }

    let positions: Vec<usize> = best.positions.concat();
    let removed = hand.remove_positions(&positions);
    player.hand = hand.cards().to_vec();
    println!(
        "{:<12} discards {} ({} left)",
        player.strategy,
        format_hand(&removed),
        player.hand.len()
    );
    Ok(())
}

fn context_for(players: &[Player], seat: usize, deck: &[Card]) -> GameContext {
    let opponents = (0..players.len() - 1)
        .map(|index| players[opponent_seat(seat, index, players.len())].hand.clone())
        .collect();
    GameContext::new(players[seat].hand.clone(), opponents, deck.to_vec())
}

/// Opponents are indexed in seat order starting after the acting player.
const fn opponent_seat(seat: usize, index: usize, players: usize) -> usize {
    (seat + index + 1) % players
}

fn draw(deck: &mut Vec<Card>, hand: &mut Vec<Card>, count: usize) -> usize {
    let count = count.min(deck.len());
    hand.extend(deck.drain(deck.len() - count..));
    count
}

fn format_hand(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards
        .iter()
        .map(|card| format_card(*card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: Card) -> String {
    let (letter, color_code) = match card.color {
        Color::Red => ("R", "31"),
        Color::Blue => ("B", "34"),
        Color::Green => ("G", "32"),
        Color::Yellow => ("Y", "33"),
    };
    colorize(&format!("{letter}{}", card.rank), color_code)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}
