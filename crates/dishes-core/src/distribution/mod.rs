//! Distributions of dishes to people.
//!
//! A [`Distribution`] assigns every dish to exactly one person. The space
//! of all distributions is enumerated through [`MixedRadix`], which maps
//! each ordinal in `[0, people^dishes)` to one distribution.

mod radix;

use std::fmt;

use crate::index::PreferenceIndex;

pub use radix::{DistributionEnumerator, MixedRadix};

/// One total assignment of dishes to people.
///
/// Entry `d` is the ordinal of the person who receives dish `d`. A person
/// may receive any number of dishes, including none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Distribution(Vec<usize>);

impl Distribution {
    pub fn new(assignment: Vec<usize>) -> Self {
        Self(assignment)
    }

    /// Returns the person ordinal assigned to each dish.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Returns the number of dishes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the person who receives `dish`.
    #[inline]
    pub fn person_of(&self, dish: usize) -> usize {
        self.0[dish]
    }

    /// Iterates over the dishes assigned to `person`, in dish ordinal order.
    pub fn dishes_of(&self, person: usize) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(move |&(_, &p)| p == person)
            .map(|(d, _)| d)
    }

    /// Returns true if this distribution fits an index with the given shape.
    pub fn fits(&self, people: usize, dishes: usize) -> bool {
        self.0.len() == dishes && self.0.iter().all(|&p| p < people)
    }

    /// Resolves ordinals to names, grouped by person.
    ///
    /// Every person of the index appears once, in ordinal order, with the
    /// dishes they receive in dish ordinal order.
    ///
    /// # Panics
    ///
    /// Panics if the distribution does not fit the index.
    pub fn group_by_person<'a>(&self, index: &'a PreferenceIndex) -> Vec<(&'a str, Vec<&'a str>)> {
        assert!(
            self.fits(index.people_count(), index.dish_count()),
            "distribution {self} does not fit {} people and {} dishes",
            index.people_count(),
            index.dish_count()
        );

        let mut groups: Vec<(&str, Vec<&str>)> = index
            .people()
            .iter()
            .map(|p| (p.as_str(), Vec::new()))
            .collect();
        for (dish, &person) in self.0.iter().enumerate() {
            groups[person].1.push(index.dish(dish));
        }
        groups
    }
}

impl From<Vec<usize>> for Distribution {
    fn from(assignment: Vec<usize>) -> Self {
        Self(assignment)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests;
