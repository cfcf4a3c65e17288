//! Configuration system for the dish distribution solver.
//!
//! Load solver configuration from TOML or YAML files to control the
//! result count, normalization, concurrency, and termination without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use dishes_config::{SolverConfig, WorkerCount};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     top_k = 3
//!     normalize = true
//!     worker_count = { count = 4 }
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.top_k, 3);
//! assert_eq!(config.worker_count, WorkerCount::Count(4));
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use dishes_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! assert_eq!(config.top_k, 10);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of best solutions reported.
pub const DEFAULT_TOP_K: usize = 10;

/// Default capacity, in batches, of each pipeline channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default number of distributions per batch.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Number of best solutions to keep. Zero skips solving entirely.
    pub top_k: usize,

    /// Whether to normalize every person's ratings before scoring.
    pub normalize: bool,

    /// Number of scorer threads.
    pub worker_count: WorkerCount,

    /// Capacity, in batches, of each bounded pipeline channel.
    pub channel_capacity: usize,

    /// Number of distributions per batch sent between pipeline stages.
    pub batch_size: usize,

    /// Termination configuration.
    pub termination: Option<TerminationConfig>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            normalize: false,
            worker_count: WorkerCount::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            batch_size: DEFAULT_BATCH_SIZE,
            termination: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML or YAML file, chosen by extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, everything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values a file cannot express as invalid through types alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.worker_count == WorkerCount::Count(0) {
            return Err(ConfigError::Invalid(
                "worker_count must be at least 1; use `none` for sequential solving".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the number of best solutions to keep.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Enables or disables rating normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets the scorer thread count.
    pub fn with_worker_count(mut self, worker_count: WorkerCount) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Sets the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the channel capacity.
    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum number of distributions to generate.
    ///
    /// Counted as the enumerator produces them, before scoring.
    pub fn with_distribution_limit(mut self, limit: u64) -> Self {
        self.termination = Some(TerminationConfig {
            distribution_count_limit: Some(limit),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the distribution count limit, if configured.
    pub fn distribution_limit(&self) -> Option<u64> {
        self.termination
            .as_ref()
            .and_then(|t| t.distribution_count_limit)
    }
}

/// Scorer thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// One worker per available CPU.
    #[default]
    Auto,

    /// No worker threads; score on the calling thread.
    None,

    /// Specific number of worker threads.
    Count(usize),
}

impl WorkerCount {
    /// Resolves to an actual thread count; zero means sequential.
    pub fn resolve(&self) -> usize {
        match self {
            WorkerCount::Auto => std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1),
            WorkerCount::None => 0,
            WorkerCount::Count(n) => *n,
        }
    }
}

impl std::fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerCount::Auto => write!(f, "auto"),
            WorkerCount::None => write!(f, "none"),
            WorkerCount::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Termination configuration.
///
/// Any limit that is hit aborts solving with an error; the exhaustive
/// search never reports a partial ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum number of distributions to generate.
    pub distribution_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    ///
    /// Seconds and minutes add up, saturating at `u64::MAX` seconds. A
    /// total of zero means no limit.
    pub fn time_limit(&self) -> Option<Duration> {
        let minutes = self.minutes_spent_limit.unwrap_or(0).saturating_mul(60);
        let seconds = self.seconds_spent_limit.unwrap_or(0).saturating_add(minutes);
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}
