//! Card collections and valid group detection.
//!
//! A [`Collection`] is an ordered list of card instances: a hand, or a
//! hypothetical hand with drawn cards appended. Instances are told apart by
//! their position, so a hand may hold both copies of the same card value.
//!
//! Groups are found by value. Cards are bucketed into two small bitmask
//! tables, ranks present per color and colors present per rank, and runs and
//! rainbows are read off those tables. Mapping a group back to positions is
//! a separate step ([`Collection::resolve`], [`Collection::resolve_all`]).

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::card::{COPIES_PER_CARD, Card, Color, DISTINCT_CARDS, MAX_RANK, MIN_RANK};
use crate::error::{CardError, EngineError};

/// Smallest number of cards in a valid group.
pub const MIN_GROUP_SIZE: usize = 3;

/// Kind of a valid group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKind {
    /// Same color, consecutive ranks.
    Run,
    /// Same rank, distinct colors.
    Rainbow,
}

/// A set of card values forming a run or a rainbow.
///
/// Cards of a run are stored by ascending rank; cards of a rainbow by
/// ascending color.
///
/// Groups are totally ordered: larger groups first, then runs before
/// rainbows, then runs by color and starting rank and rainbows by rank and
/// color list. Every enumeration in this module returns groups in that
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidGroup {
    kind: GroupKind,
    cards: Vec<Card>,
}

impl ValidGroup {
    fn run(color: Color, first: u8, last: u8) -> Self {
        Self {
            kind: GroupKind::Run,
            cards: (first..=last).map(|rank| Card::new(color, rank)).collect(),
        }
    }

    fn rainbow(rank: u8, colors: u8) -> Self {
        Self {
            kind: GroupKind::Rainbow,
            cards: Color::ALL
                .into_iter()
                .filter(|color| colors & color_bit(*color) != 0)
                .map(|color| Card::new(color, rank))
                .collect(),
        }
    }

    /// Returns the kind of the group.
    #[must_use]
    pub const fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Returns the card values of the group.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always `false`: a valid group holds at least three cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Consumes the group and returns its cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    fn rank(&self) -> u8 {
        self.cards.first().map_or(0, |card| card.rank)
    }
}

impl Ord for ValidGroup {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .len()
            .cmp(&self.len())
            .then(self.kind.cmp(&other.kind))
            .then_with(|| match self.kind {
                GroupKind::Run => self.cards.cmp(&other.cards),
                GroupKind::Rainbow => self
                    .rank()
                    .cmp(&other.rank())
                    .then_with(|| self.cards.cmp(&other.cards)),
            })
    }
}

impl PartialOrd for ValidGroup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Number of instances held for every card value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCounts {
    counts: [u8; DISTINCT_CARDS],
}

impl ValueCounts {
    /// Returns how many instances of `card` are held.
    #[must_use]
    pub const fn get(&self, card: Card) -> u8 {
        self.counts[card.value_index()]
    }

    /// Returns the counts indexed by [`Card::value_index`].
    #[must_use]
    pub const fn as_slice(&self) -> &[u8; DISTINCT_CARDS] {
        &self.counts
    }
}

const fn color_bit(color: Color) -> u8 {
    1 << color.index()
}

const fn rank_in_range(rank: u8) -> bool {
    rank >= MIN_RANK && rank <= MAX_RANK
}

/// Bitmask tables: ranks present per color, colors present per rank.
struct Layout {
    ranks_by_color: [u16; 4],
    colors_by_rank: [u8; MAX_RANK as usize + 1],
}

impl Layout {
    fn new(cards: &[Card]) -> Self {
        let mut layout = Self {
            ranks_by_color: [0; 4],
            colors_by_rank: [0; MAX_RANK as usize + 1],
        };

        for card in cards.iter().filter(|card| rank_in_range(card.rank)) {
            layout.ranks_by_color[card.color.index()] |= 1 << card.rank;
            layout.colors_by_rank[card.rank as usize] |= color_bit(card.color);
        }

        layout
    }

    /// Maximal runs of consecutive ranks for a color, as `(first, last)`.
    fn segments(&self, color: Color) -> Vec<(u8, u8)> {
        let mask = self.ranks_by_color[color.index()];
        let mut segments = Vec::new();
        let mut start: Option<u8> = None;

        for rank in MIN_RANK..=MAX_RANK + 1 {
            let present = rank <= MAX_RANK && mask & (1 << rank) != 0;
            match (present, start) {
                (true, None) => start = Some(rank),
                (false, Some(first)) => {
                    segments.push((first, rank - 1));
                    start = None;
                }
                _ => {}
            }
        }

        segments
    }

    fn has_run(&self) -> bool {
        self.ranks_by_color
            .iter()
            .any(|&mask| mask & (mask >> 1) & (mask >> 2) != 0)
    }

    fn has_rainbow(&self) -> bool {
        self.colors_by_rank
            .iter()
            .any(|mask| mask.count_ones() as usize >= MIN_GROUP_SIZE)
    }

    fn rainbow_ranks(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (MIN_RANK..=MAX_RANK)
            .map(|rank| (rank, self.colors_by_rank[rank as usize]))
            .filter(|(_, mask)| mask.count_ones() as usize >= MIN_GROUP_SIZE)
    }
}

const fn segment_len(first: u8, last: u8) -> usize {
    (last - first) as usize + 1
}

/// An ordered collection of card instances.
///
/// # Example
///
/// ```
/// use notty::{Card, Collection, Color};
///
/// let hand = [
///     Card::new(Color::Red, 4),
///     Card::new(Color::Red, 5),
///     Card::new(Color::Red, 6),
///     Card::new(Color::Blue, 9),
/// ];
/// let collection = Collection::from(&hand[..]);
/// assert!(collection.exists_valid_group());
/// assert_eq!(collection.largest_valid_group().map(|g| g.len()), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    cards: Vec<Card>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Returns the card instances in order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of card instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Appends a card instance.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes and returns the last card instance.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Returns a copy of the collection with `extra` appended.
    #[must_use]
    pub fn with_cards(&self, extra: &[Card]) -> Self {
        let mut cards = Vec::with_capacity(self.cards.len() + extra.len());
        cards.extend_from_slice(&self.cards);
        cards.extend_from_slice(extra);
        Self { cards }
    }

    /// Removes the instances at `positions` and returns them in position
    /// order. Out-of-range and repeated positions are ignored.
    pub fn remove_positions(&mut self, positions: &[usize]) -> Vec<Card> {
        let mut marked = alloc::vec![false; self.cards.len()];
        for &position in positions {
            if let Some(slot) = marked.get_mut(position) {
                *slot = true;
            }
        }

        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.cards.len());
        for (card, remove) in self.cards.iter().zip(marked) {
            if remove {
                removed.push(*card);
            } else {
                kept.push(*card);
            }
        }
        self.cards = kept;
        removed
    }

    /// Counts the instances of every card value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if a value appears more
    /// than twice, or [`EngineError::Card`] if a card has an invalid rank.
    pub fn counts(&self) -> Result<ValueCounts, EngineError> {
        let mut counts = [0u8; DISTINCT_CARDS];

        for card in &self.cards {
            if !rank_in_range(card.rank) {
                return Err(CardError::InvalidRank(card.rank).into());
            }
            let slot = &mut counts[card.value_index()];
            *slot += 1;
            if *slot as usize > COPIES_PER_CARD {
                return Err(EngineError::InvariantViolation {
                    card: *card,
                    count: *slot as usize,
                });
            }
        }

        Ok(ValueCounts { counts })
    }

    /// Returns whether the whole collection is exactly one run or one
    /// rainbow.
    #[must_use]
    pub fn is_valid_group(&self) -> bool {
        if self.cards.len() < MIN_GROUP_SIZE
            || !self.cards.iter().all(|card| rank_in_range(card.rank))
        {
            return false;
        }

        let first = self.cards[0];

        if self.cards.iter().all(|card| card.color == first.color) {
            let mut ranks: Vec<u8> = self.cards.iter().map(|card| card.rank).collect();
            ranks.sort_unstable();
            return ranks.windows(2).all(|pair| pair[0] + 1 == pair[1]);
        }

        if self.cards.iter().all(|card| card.rank == first.rank) {
            let mut seen = 0u8;
            for card in &self.cards {
                let bit = color_bit(card.color);
                if seen & bit != 0 {
                    return false;
                }
                seen |= bit;
            }
            return true;
        }

        false
    }

    /// Returns whether some subset of the collection forms a valid group.
    #[must_use]
    pub fn exists_valid_group(&self) -> bool {
        if self.cards.len() < MIN_GROUP_SIZE {
            return false;
        }
        let layout = Layout::new(&self.cards);
        layout.has_run() || layout.has_rainbow()
    }

    /// Returns the single largest valid group.
    ///
    /// The longest run is found first, scanning colors in canonical order
    /// and keeping the first strictly longer run. A rainbow replaces it only
    /// when strictly larger, so an equal-size run wins.
    #[must_use]
    pub fn largest_valid_group(&self) -> Option<ValidGroup> {
        let layout = Layout::new(&self.cards);
        let mut best: Option<ValidGroup> = None;
        let mut best_len = MIN_GROUP_SIZE - 1;

        for color in Color::ALL {
            for (first, last) in layout.segments(color) {
                let len = segment_len(first, last);
                if len > best_len {
                    best_len = len;
                    best = Some(ValidGroup::run(color, first, last));
                }
            }
        }

        for (rank, colors) in layout.rainbow_ranks() {
            let len = colors.count_ones() as usize;
            if len > best_len {
                best_len = len;
                best = Some(ValidGroup::rainbow(rank, colors));
            }
        }

        best
    }

    /// Enumerates every valid group, not only maximal ones.
    ///
    /// Each color contributes every window of three or more consecutive
    /// ranks; each rank contributes every combination of three or more of
    /// its colors. Groups are value sets: a group is listed once even when
    /// the hand could form it twice.
    #[must_use]
    pub fn all_valid_groups(&self) -> Vec<ValidGroup> {
        let layout = Layout::new(&self.cards);
        let mut groups = Vec::new();

        for color in Color::ALL {
            for (first, last) in layout.segments(color) {
                if segment_len(first, last) < MIN_GROUP_SIZE {
                    continue;
                }
                for start in first..=last - 2 {
                    for end in start + 2..=last {
                        groups.push(ValidGroup::run(color, start, end));
                    }
                }
            }
        }

        for (rank, colors) in layout.rainbow_ranks() {
            // every sub-mask of the present colors with at least three bits
            let mut subset = colors;
            while subset != 0 {
                if subset.count_ones() as usize >= MIN_GROUP_SIZE {
                    groups.push(ValidGroup::rainbow(rank, subset));
                }
                subset = (subset - 1) & colors;
            }
        }

        groups.sort();
        groups
    }

    /// Returns the maximal group of every locus: the full length of each
    /// consecutive rank segment per color, and all present colors per rank.
    #[must_use]
    pub fn all_valid_groups_with_largest_length(&self) -> Vec<ValidGroup> {
        let layout = Layout::new(&self.cards);
        let mut groups = Vec::new();

        for color in Color::ALL {
            for (first, last) in layout.segments(color) {
                if segment_len(first, last) >= MIN_GROUP_SIZE {
                    groups.push(ValidGroup::run(color, first, last));
                }
            }
        }

        for (rank, colors) in layout.rainbow_ranks() {
            groups.push(ValidGroup::rainbow(rank, colors));
        }

        groups.sort();
        groups
    }

    /// Maps a group to instance positions.
    ///
    /// Each card value takes the first position holding an equal card that
    /// this group has not used yet. Returns `None` if the collection lacks a
    /// card of the group.
    #[must_use]
    pub fn resolve(&self, group: &ValidGroup) -> Option<Vec<usize>> {
        let mut used = alloc::vec![false; self.cards.len()];
        self.resolve_into(group, &mut used)
    }

    /// Maps several groups to pairwise disjoint instance positions, using
    /// the same first-unused rule as [`Collection::resolve`] across all of
    /// them.
    ///
    /// Returns `None` if the groups need more instances than the collection
    /// holds.
    #[must_use]
    pub fn resolve_all(&self, groups: &[ValidGroup]) -> Option<Vec<Vec<usize>>> {
        let mut used = alloc::vec![false; self.cards.len()];
        groups
            .iter()
            .map(|group| self.resolve_into(group, &mut used))
            .collect()
    }

    fn resolve_into(&self, group: &ValidGroup, used: &mut [bool]) -> Option<Vec<usize>> {
        let mut positions = Vec::with_capacity(group.len());

        for wanted in group.cards() {
            let position = self
                .cards
                .iter()
                .zip(used.iter())
                .position(|(card, taken)| !taken && card == wanted)?;
            used[position] = true;
            positions.push(position);
        }

        Some(positions)
    }
}

impl From<&[Card]> for Collection {
    fn from(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }
}

impl From<Vec<Card>> for Collection {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl FromIterator<Card> for Collection {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl From<&ValidGroup> for Collection {
    fn from(group: &ValidGroup) -> Self {
        Self::from(group.cards())
    }
}
