//! Error types for dish distribution

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for dish distribution operations
#[derive(Debug, Error)]
pub enum DishesError {
    /// The preference source could not be read
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preference source is not a well-formed person → dish → rating object
    #[error("failed to parse preferences: {0}")]
    Parse(#[from] serde_json::Error),

    /// The preference mapping names no people
    #[error("preferences are empty")]
    EmptyPreferences,

    /// `people^dishes` does not fit the enumeration index
    #[error("search space too large: {people}^{dishes} distributions exceed u64")]
    SearchSpaceTooLarge { people: usize, dishes: usize },

    /// Solving was cancelled through a cancellation token
    #[error("solving was cancelled")]
    Cancelled,

    /// Solving hit the configured time limit
    #[error("time limit of {0:?} exceeded")]
    TimeLimitExceeded(Duration),

    /// Solving hit the configured distribution limit
    #[error("distribution limit of {0} reached")]
    DistributionLimitReached(u64),

    /// Error in solver configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for dish distribution operations
pub type Result<T> = std::result::Result<T, DishesError>;
