//! Dense preference index.
//!
//! Maps person and dish names to stable ordinals and builds the rating
//! matrix the enumerator and scorer work on. Both name lists are sorted
//! lexicographically, so the same input always yields the same ordinals.

use std::collections::BTreeSet;

use crate::error::{DishesError, Result};
use crate::matrix::PreferenceMatrix;
use crate::preferences::{Preferences, Rating};

/// Ordinal-indexed view of a preference set.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceIndex {
    people: Vec<String>,
    dishes: Vec<String>,
    matrix: PreferenceMatrix,
}

impl PreferenceIndex {
    /// Builds the index from sparse preferences.
    ///
    /// The dish list is the union of every dish any person rated. Pairs
    /// missing from the input rate zero.
    ///
    /// # Errors
    ///
    /// Returns [`DishesError::EmptyPreferences`] if no person is present.
    pub fn build(prefs: &Preferences) -> Result<Self> {
        if prefs.is_empty() {
            return Err(DishesError::EmptyPreferences);
        }

        let people: Vec<String> = prefs.iter().map(|(p, _)| p.to_string()).collect();
        let dishes: Vec<String> = prefs
            .iter()
            .flat_map(|(_, ratings)| ratings.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect();

        let mut matrix = PreferenceMatrix::zeros(people.len(), dishes.len());
        for (p, person) in people.iter().enumerate() {
            for (d, dish) in dishes.iter().enumerate() {
                if let Some(rating) = prefs.rating(person, dish) {
                    matrix.set(p, d, rating);
                }
            }
        }

        Ok(Self {
            people,
            dishes,
            matrix,
        })
    }

    /// Returns a copy of this index with a normalized matrix.
    pub fn normalized(&self) -> Self {
        Self {
            people: self.people.clone(),
            dishes: self.dishes.clone(),
            matrix: self.matrix.normalized(),
        }
    }

    pub fn people(&self) -> &[String] {
        &self.people
    }

    pub fn dishes(&self) -> &[String] {
        &self.dishes
    }

    pub fn people_count(&self) -> usize {
        self.people.len()
    }

    pub fn dish_count(&self) -> usize {
        self.dishes.len()
    }

    /// Returns the name of the person with the given ordinal.
    pub fn person(&self, ordinal: usize) -> &str {
        &self.people[ordinal]
    }

    /// Returns the name of the dish with the given ordinal.
    pub fn dish(&self, ordinal: usize) -> &str {
        &self.dishes[ordinal]
    }

    /// Looks up the ordinal of a person by name.
    pub fn person_ordinal(&self, name: &str) -> Option<usize> {
        self.people
            .binary_search_by(|p| p.as_str().cmp(name))
            .ok()
    }

    /// Looks up the ordinal of a dish by name.
    pub fn dish_ordinal(&self, name: &str) -> Option<usize> {
        self.dishes
            .binary_search_by(|d| d.as_str().cmp(name))
            .ok()
    }

    pub fn matrix(&self) -> &PreferenceMatrix {
        &self.matrix
    }

    /// Returns the rating of person `person` for dish `dish` (ordinals).
    pub fn rating(&self, person: usize, dish: usize) -> Rating {
        self.matrix.get(person, dish)
    }
}
