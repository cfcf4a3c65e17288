//! Dishes Core - Core types for fair dish distribution
//!
//! This crate provides the building blocks of the exhaustive search:
//! - Preference loading and the dense preference index
//! - Row normalization into relative weights
//! - Mixed-radix enumeration of every distribution
//! - Fairness-adjusted scoring of one distribution

pub mod distribution;
pub mod error;
pub mod index;
pub mod matrix;
pub mod normalize;
pub mod preferences;
pub mod score;

pub use distribution::{Distribution, DistributionEnumerator, MixedRadix};
pub use error::{DishesError, Result};
pub use index::PreferenceIndex;
pub use matrix::PreferenceMatrix;
pub use normalize::normalize_row;
pub use preferences::{DishRatings, Preferences, Rating};
pub use score::{ScoreBreakdown, Solution, SolutionScorer};
