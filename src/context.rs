//! Game snapshots and action keys consumed by the valuator and policies.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use crate::card::{COPIES_PER_CARD, Card, DISTINCT_CARDS, MAX_RANK, MIN_RANK};
use crate::error::{CardError, EngineError};

/// A candidate action for the acting player.
///
/// The derived order is the tie-break order used by every policy: draws by
/// ascending count, then takes by opponent index, then pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKey {
    /// Draw this many cards (1 to 3) from the deck.
    Draw(u8),
    /// Take one random card from the opponent at this index.
    Take(usize),
    /// Do nothing this turn (or end the turn after a first action).
    Pass,
}

impl ActionKey {
    /// Number of cards the action adds to the hand.
    #[must_use]
    pub const fn cost(self) -> usize {
        match self {
            Self::Draw(count) => count as usize,
            Self::Take(_) => 1,
            Self::Pass => 0,
        }
    }

    /// Returns whether the action draws from the deck.
    #[must_use]
    pub const fn is_draw(self) -> bool {
        matches!(self, Self::Draw(_))
    }

    /// Returns whether the action takes from an opponent.
    #[must_use]
    pub const fn is_take(self) -> bool {
        matches!(self, Self::Take(_))
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw(count) => write!(f, "draw {count}"),
            Self::Take(opponent) => write!(f, "take from opponent {opponent}"),
            Self::Pass => f.write_str("pass"),
        }
    }
}

/// What the acting player has already done this turn.
///
/// A turn allows one draw (of 1 to 3 cards) and one take, in either order.
/// Passing as the first action ends the turn without either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnState {
    /// A draw has been made.
    pub drawn: bool,
    /// A card has been taken from an opponent.
    pub taken: bool,
}

impl TurnState {
    /// State at the start of a turn.
    #[must_use]
    pub const fn fresh() -> Self {
        Self {
            drawn: false,
            taken: false,
        }
    }

    /// Returns whether no action has been made yet.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        !self.drawn && !self.taken
    }

    /// State after performing `action`.
    #[must_use]
    pub const fn after(mut self, action: ActionKey) -> Self {
        match action {
            ActionKey::Draw(_) => self.drawn = true,
            ActionKey::Take(_) => self.taken = true,
            ActionKey::Pass => {}
        }
        self
    }

    /// Returns whether `action` may still be chosen this turn.
    #[must_use]
    pub const fn allows(&self, action: ActionKey) -> bool {
        match action {
            ActionKey::Draw(_) => !self.drawn,
            ActionKey::Take(_) => !self.taken,
            ActionKey::Pass => true,
        }
    }
}

/// Read-only snapshot of the game from the acting player's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameContext {
    hand: Vec<Card>,
    opponents: Vec<Vec<Card>>,
    deck: Vec<Card>,
}

impl GameContext {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(hand: Vec<Card>, opponents: Vec<Vec<Card>>, deck: Vec<Card>) -> Self {
        Self {
            hand,
            opponents,
            deck,
        }
    }

    /// The acting player's hand.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Every opponent's hand, by opponent index.
    #[must_use]
    pub fn opponents(&self) -> &[Vec<Card>] {
        &self.opponents
    }

    /// One opponent's hand.
    #[must_use]
    pub fn opponent(&self, index: usize) -> Option<&[Card]> {
        self.opponents.get(index).map(Vec::as_slice)
    }

    /// Cards remaining in the deck.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// Number of cards remaining in the deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Checks the card bookkeeping across hand, opponents, and deck.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if some card value appears
    /// more than twice in total, or [`EngineError::Card`] if a card has an
    /// invalid rank.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut counts = [0usize; DISTINCT_CARDS];
        let all = self
            .hand
            .iter()
            .chain(self.opponents.iter().flatten())
            .chain(self.deck.iter());

        for card in all {
            if card.rank < MIN_RANK || card.rank > MAX_RANK {
                return Err(CardError::InvalidRank(card.rank).into());
            }
            let count = &mut counts[card.value_index()];
            *count += 1;
            if *count > COPIES_PER_CARD {
                return Err(EngineError::InvariantViolation {
                    card: *card,
                    count: *count,
                });
            }
        }

        Ok(())
    }
}
