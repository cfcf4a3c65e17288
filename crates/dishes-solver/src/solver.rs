//! Solver facade.
//!
//! Logging levels:
//! - **INFO**: Solve start/end, normalization, early termination
//! - **DEBUG**: Progress once per second
//! - **TRACE**: Pipeline stage shutdown

use dishes_config::SolverConfig;
use dishes_core::{MixedRadix, PreferenceIndex, Result, Solution};
use tracing::info;

use crate::pipeline::Pipeline;
use crate::statistics::{SolverStatistics, StatisticsCollector};
use crate::termination::{
    CancellationToken, DistributionCountTermination, ExternalTermination, OrTermination,
    TimeTermination,
};

/// Result of a completed solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The best solutions, best first. At most `top_k` long.
    pub solutions: Vec<Solution>,
    /// Statistics of the run.
    pub statistics: SolverStatistics,
}

impl SolveResult {
    fn empty() -> Self {
        Self {
            solutions: Vec::new(),
            statistics: SolverStatistics::empty(),
        }
    }

    /// Returns the best solution, if any.
    pub fn best(&self) -> Option<&Solution> {
        self.solutions.first()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

/// Exhaustive fair distribution solver.
///
/// Visits every distribution of dishes to people, scores it and keeps the
/// `top_k` best.
///
/// # Example
///
/// ```
/// use dishes_config::SolverConfig;
/// use dishes_core::{PreferenceIndex, Preferences};
/// use dishes_solver::Solver;
///
/// let prefs = Preferences::new()
///     .with_rating("Alice", "Pizza", 5.0)
///     .with_rating("Alice", "Salad", 1.0)
///     .with_rating("Bob", "Pizza", 2.0)
///     .with_rating("Bob", "Salad", 4.0);
/// let index = PreferenceIndex::build(&prefs).unwrap();
///
/// let result = Solver::new(SolverConfig::new().with_top_k(1)).solve(&index).unwrap();
/// let best = result.best().unwrap();
/// assert_eq!(best.score(), 8.0);
/// assert_eq!(best.distribution().as_slice(), &[0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    token: CancellationToken,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            token: CancellationToken::new(),
        }
    }

    /// Uses `token` to cancel solving from another thread.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Returns a handle that cancels this solver's runs.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the distribution problem described by `index`.
    ///
    /// # Errors
    ///
    /// - [`DishesError::SearchSpaceTooLarge`] if `people^dishes` overflows `u64`
    /// - [`DishesError::Cancelled`] if the cancellation token fired
    /// - [`DishesError::TimeLimitExceeded`] if the time limit elapsed
    /// - [`DishesError::DistributionLimitReached`] if the distribution limit was hit
    ///
    /// [`DishesError::SearchSpaceTooLarge`]: dishes_core::DishesError::SearchSpaceTooLarge
    /// [`DishesError::Cancelled`]: dishes_core::DishesError::Cancelled
    /// [`DishesError::TimeLimitExceeded`]: dishes_core::DishesError::TimeLimitExceeded
    /// [`DishesError::DistributionLimitReached`]: dishes_core::DishesError::DistributionLimitReached
    pub fn solve(&self, index: &PreferenceIndex) -> Result<SolveResult> {
        let top_k = self.config.top_k;
        if top_k == 0 {
            info!(event = "solve_skipped", top_k = 0u64);
            return Ok(SolveResult::empty());
        }

        let radix = MixedRadix::for_index(index)?;

        let normalized;
        let index = if self.config.normalize {
            info!(event = "normalize", people_count = index.people_count() as u64);
            normalized = index.normalized();
            &normalized
        } else {
            index
        };

        let termination = self.build_termination();
        let workers = self.config.worker_count.resolve();
        let stats = StatisticsCollector::new();

        info!(
            event = "solve_start",
            people_count = index.people_count() as u64,
            dish_count = index.dish_count() as u64,
            search_space = radix.total(),
            worker_count = workers as u64,
            top_k = top_k as u64,
        );

        let pipeline = Pipeline {
            matrix: index.matrix(),
            radix,
            top_k,
            batch_size: self.config.batch_size.max(1),
            channel_capacity: self.config.channel_capacity.max(1),
            termination: &termination,
            stats: &stats,
        };
        let outcome = if workers == 0 {
            pipeline.run_sequential()
        } else {
            pipeline.run_parallel(workers)
        };

        let heap = match outcome {
            Ok(heap) => heap,
            Err(reason) => {
                info!(
                    event = "solve_terminated",
                    reason = %reason,
                    steps = stats.current_scored(),
                );
                return Err(reason.into());
            }
        };

        let statistics = stats.into_statistics(radix.total(), workers);
        let solutions = heap.into_sorted_vec();
        let score = solutions
            .first()
            .map(|s| format!("{}", s.score()))
            .unwrap_or_else(|| "none".to_string());
        info!(
            event = "solve_end",
            steps = statistics.distributions_scored,
            duration_ms = statistics.duration.as_millis() as u64,
            speed = statistics.speed(),
            score = %score,
        );

        Ok(SolveResult {
            solutions,
            statistics,
        })
    }

    fn build_termination(&self) -> OrTermination {
        let mut termination =
            OrTermination::new().with(ExternalTermination::new(self.token.clone()));
        if let Some(limit) = self.config.time_limit() {
            termination = termination.with(TimeTermination::new(limit));
        }
        if let Some(limit) = self.config.distribution_limit() {
            termination = termination.with(DistributionCountTermination::new(limit));
        }
        termination
    }
}
