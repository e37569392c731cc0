//! Combination counting, enumeration, and unranking.

use alloc::vec::Vec;

/// Binomial coefficient `C(n, k)`, saturating at `u64::MAX`.
#[must_use]
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        // exact at every step: result * (n - i) is divisible by (i + 1)
        result = match result.checked_mul((n - i) as u64) {
            Some(product) => product / (i as u64 + 1),
            None => return u64::MAX,
        };
    }
    result
}

/// Lexicographic iterator over the `k`-subsets of `0..n`.
pub struct Combinations {
    n: usize,
    current: Vec<usize>,
    done: bool,
}

impl Combinations {
    /// Starts at `[0, 1, .., k - 1]`.
    #[must_use]
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current.clone();

        let k = self.current.len();
        let mut slot = k;
        while slot > 0 {
            slot -= 1;
            if self.current[slot] < self.n - k + slot {
                self.current[slot] += 1;
                for next in slot + 1..k {
                    self.current[next] = self.current[next - 1] + 1;
                }
                return Some(item);
            }
        }

        self.done = true;
        Some(item)
    }
}

/// The `rank`-th `k`-subset of `0..n` in lexicographic order.
///
/// # Panics
///
/// Panics if `rank` is not below `binomial(n, k)`.
#[must_use]
pub fn unrank(n: usize, k: usize, mut rank: u64) -> Vec<usize> {
    let mut combination = Vec::with_capacity(k);
    let mut start = 0;

    for slot in 0..k {
        let remaining = k - slot - 1;
        let mut element = start;
        loop {
            // subsets continuing the prefix with `element`
            let count = binomial(n - element - 1, remaining);
            if rank < count {
                break;
            }
            rank -= count;
            element += 1;
        }
        combination.push(element);
        start = element + 1;
    }

    combination
}

/// How the outcome space of a multi-card draw is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Every combination is evaluated.
    Exhaustive {
        /// Number of combinations.
        total: u64,
    },
    /// A uniform sample of distinct combinations is evaluated.
    Sampled {
        /// Number of combinations.
        total: u64,
        /// Number of sampled combinations.
        sampled: u64,
    },
}

impl Plan {
    /// Chooses exhaustive enumeration up to `threshold` combinations and
    /// sampling `sample_size` combinations beyond it. A `sample_size` of
    /// zero never samples.
    #[must_use]
    pub fn choose(n: usize, k: usize, threshold: u64, sample_size: usize) -> Self {
        let total = binomial(n, k);
        let sampled = sample_size as u64;
        if total > threshold && sampled > 0 && sampled < total {
            Self::Sampled { total, sampled }
        } else {
            Self::Exhaustive { total }
        }
    }
}
