//! Sparse preference input.
//!
//! Preferences arrive as a JSON object mapping each person to an object
//! mapping dish names to numeric ratings:
//!
//! ```
//! use dishes_core::Preferences;
//!
//! let prefs = Preferences::from_json_str(r#"{
//!     "Alice": {"Pizza": 5, "Salad": 1},
//!     "Bob":   {"Pizza": 2, "Salad": 4.5}
//! }"#).unwrap();
//!
//! assert_eq!(prefs.person_count(), 2);
//! assert_eq!(prefs.rating("Bob", "Salad"), Some(4.5));
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DishesError, Result};

/// Numeric weight of one (person, dish) pair. May be negative or zero.
pub type Rating = f64;

/// Ratings of one person, keyed by dish name.
pub type DishRatings = BTreeMap<String, Rating>;

/// Sparse person → dish → rating mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Preferences {
    people: BTreeMap<String, DishRatings>,
}

impl Preferences {
    /// Creates an empty preference set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads preferences from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DishesError::Io`] if the file cannot be read,
    /// [`DishesError::Parse`] if it is not a well-formed preference object,
    /// and [`DishesError::EmptyPreferences`] if it names no people.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DishesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parses preferences from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let prefs: Self = serde_json::from_str(s)?;
        if prefs.is_empty() {
            return Err(DishesError::EmptyPreferences);
        }
        Ok(prefs)
    }

    /// Sets the rating of `person` for `dish`, registering either if new.
    pub fn with_rating(
        mut self,
        person: impl Into<String>,
        dish: impl Into<String>,
        rating: Rating,
    ) -> Self {
        self.insert(person, dish, rating);
        self
    }

    /// Sets the rating of `person` for `dish`.
    pub fn insert(&mut self, person: impl Into<String>, dish: impl Into<String>, rating: Rating) {
        self.people
            .entry(person.into())
            .or_default()
            .insert(dish.into(), rating);
    }

    /// Registers a person without any ratings.
    pub fn insert_person(&mut self, person: impl Into<String>) {
        self.people.entry(person.into()).or_default();
    }

    /// Returns the rating of `person` for `dish`, if present in the input.
    pub fn rating(&self, person: &str, dish: &str) -> Option<Rating> {
        self.people.get(person)?.get(dish).copied()
    }

    /// Returns the ratings of one person.
    pub fn dishes_of(&self, person: &str) -> Option<&DishRatings> {
        self.people.get(person)
    }

    /// Iterates over people and their ratings in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DishRatings)> {
        self.people.iter().map(|(p, d)| (p.as_str(), d))
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

impl FromIterator<(String, DishRatings)> for Preferences {
    fn from_iter<I: IntoIterator<Item = (String, DishRatings)>>(iter: I) -> Self {
        Self {
            people: iter.into_iter().collect(),
        }
    }
}
