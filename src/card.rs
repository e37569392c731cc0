//! Card types and deck utilities.

use alloc::vec::Vec;
use core::fmt;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::error::CardError;

/// Card color.
///
/// The declaration order is the canonical color order used for grouping and
/// for the ordering of enumerated groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// Red.
    Red,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
}

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Blue, Self::Green, Self::Yellow];

    /// Position of the color in [`Color::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase color name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Notty card: a color and a rank.
///
/// Cards are plain values. Two cards with the same color and rank are equal
/// even when they are different physical copies; a [`Collection`] tells the
/// copies apart by position.
///
/// [`Collection`]: crate::Collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    /// The color of the card.
    pub color: Color,
    /// The rank of the card (1..=10).
    pub rank: u8,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Use [`Card::try_new`]
    /// for input that has not been checked yet.
    #[must_use]
    pub const fn new(color: Color, rank: u8) -> Self {
        Self { color, rank }
    }

    /// Creates a new card, rejecting ranks outside `1..=MAX_RANK`.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::InvalidRank`] if the rank is out of range.
    pub const fn try_new(color: Color, rank: u8) -> Result<Self, CardError> {
        if rank < MIN_RANK || rank > MAX_RANK {
            return Err(CardError::InvalidRank(rank));
        }
        Ok(Self { color, rank })
    }

    /// Dense index of the card value in `0..DISTINCT_CARDS`.
    ///
    /// Only meaningful for cards with a valid rank.
    #[must_use]
    pub const fn value_index(self) -> usize {
        self.color.index() * MAX_RANK as usize + (self.rank as usize - 1)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.rank)
    }
}

/// Lowest card rank.
pub const MIN_RANK: u8 = 1;

/// Highest card rank.
pub const MAX_RANK: u8 = 10;

/// Number of physical copies of each card value in the deck.
pub const COPIES_PER_CARD: usize = 2;

/// Number of distinct card values.
pub const DISTINCT_CARDS: usize = Color::ALL.len() * MAX_RANK as usize;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = DISTINCT_CARDS * COPIES_PER_CARD;

/// Builds an unshuffled full deck: two copies of every color and rank.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);

    for color in Color::ALL {
        for rank in MIN_RANK..=MAX_RANK {
            for _ in 0..COPIES_PER_CARD {
                cards.push(Card::new(color, rank));
            }
        }
    }

    cards
}

/// Builds a full deck shuffled with the given seed.
///
/// # Example
///
/// ```
/// use notty::{DECK_SIZE, shuffled_deck};
///
/// let deck = shuffled_deck(7);
/// assert_eq!(deck.len(), DECK_SIZE);
/// assert_eq!(deck, shuffled_deck(7));
/// ```
#[must_use]
pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cards = full_deck();
    cards.shuffle(&mut rng);
    cards
}
