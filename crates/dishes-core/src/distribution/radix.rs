//! Mixed-radix encoding of distributions.
//!
//! Ordinal `i` is read as a `dishes`-digit number in base `people`, most
//! significant digit first. Digit `d` is the person assigned dish `d`.

use std::iter::FusedIterator;
use std::ops::Range;

use super::Distribution;
use crate::error::{DishesError, Result};
use crate::index::PreferenceIndex;

/// Bijection between `[0, people^dishes)` and all distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedRadix {
    base: usize,
    width: usize,
    total: u64,
}

impl MixedRadix {
    /// Creates the encoding for `people` people and `dishes` dishes.
    ///
    /// # Errors
    ///
    /// Returns [`DishesError::SearchSpaceTooLarge`] if `people^dishes`
    /// does not fit in a `u64`.
    ///
    /// # Panics
    ///
    /// Panics if `people` is zero; an index always has at least one person.
    pub fn new(people: usize, dishes: usize) -> Result<Self> {
        assert!(people > 0, "mixed radix needs at least one person");

        let too_large = || DishesError::SearchSpaceTooLarge { people, dishes };
        let total = if people == 1 {
            1
        } else {
            let exp = u32::try_from(dishes).map_err(|_| too_large())?;
            (people as u64).checked_pow(exp).ok_or_else(too_large)?
        };

        Ok(Self {
            base: people,
            width: dishes,
            total,
        })
    }

    /// Creates the encoding matching an index's shape.
    pub fn for_index(index: &PreferenceIndex) -> Result<Self> {
        Self::new(index.people_count(), index.dish_count())
    }

    /// Number of people, the radix of every digit.
    #[inline]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Number of dishes, the digit count.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of distinct distributions, `people^dishes`.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Writes the digits of `ordinal` into `digits`.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= total()` or `digits.len() != width()`.
    pub fn decode_into(&self, ordinal: u64, digits: &mut [usize]) {
        assert!(
            ordinal < self.total,
            "ordinal {ordinal} out of range 0..{}",
            self.total
        );
        assert_eq!(digits.len(), self.width, "digit buffer has wrong width");

        let base = self.base as u64;
        let mut rest = ordinal;
        for slot in digits.iter_mut().rev() {
            *slot = (rest % base) as usize;
            rest /= base;
        }
    }

    /// Decodes `ordinal` into its distribution.
    pub fn decode(&self, ordinal: u64) -> Distribution {
        let mut digits = vec![0; self.width];
        self.decode_into(ordinal, &mut digits);
        Distribution(digits)
    }

    /// Encodes a distribution back into its ordinal.
    ///
    /// # Panics
    ///
    /// Panics if the distribution has the wrong length or a digit is not a
    /// valid person ordinal.
    pub fn encode(&self, distribution: &Distribution) -> u64 {
        assert_eq!(
            distribution.len(),
            self.width,
            "distribution has wrong length"
        );
        let base = self.base as u64;
        distribution.as_slice().iter().fold(0, |acc, &digit| {
            assert!(digit < self.base, "digit {digit} out of range 0..{}", self.base);
            acc * base + digit as u64
        })
    }

    /// Enumerates every distribution in ascending ordinal order.
    pub fn enumerate(&self) -> DistributionEnumerator {
        self.enumerate_range(0..self.total)
    }

    /// Enumerates the distributions whose ordinals fall in `range`.
    ///
    /// The range is clamped to `[0, total())`.
    pub fn enumerate_range(&self, range: Range<u64>) -> DistributionEnumerator {
        let end = range.end.min(self.total);
        let next = range.start.min(end);
        let mut digits = vec![0; self.width];
        if next < end {
            self.decode_into(next, &mut digits);
        }
        DistributionEnumerator {
            base: self.base,
            digits,
            next,
            end,
        }
    }
}

/// Lazy, forward-only iterator over `(ordinal, distribution)` pairs.
///
/// Advances like an odometer: each step increments the last digit and
/// carries, so no ordinal is ever re-divided.
#[derive(Debug, Clone)]
pub struct DistributionEnumerator {
    base: usize,
    digits: Vec<usize>,
    next: u64,
    end: u64,
}

impl DistributionEnumerator {
    /// Ordinal of the next distribution to be yielded.
    pub fn position(&self) -> u64 {
        self.next
    }

    /// Number of distributions still to be yielded.
    pub fn remaining(&self) -> u64 {
        self.end - self.next
    }

    fn advance(&mut self) {
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.base {
                return;
            }
            *digit = 0;
        }
    }
}

impl Iterator for DistributionEnumerator {
    type Item = (u64, Distribution);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let ordinal = self.next;
        let distribution = Distribution(self.digits.clone());
        self.next += 1;
        if self.next < self.end {
            self.advance();
        }
        Some((ordinal, distribution))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for DistributionEnumerator {}
