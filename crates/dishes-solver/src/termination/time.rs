//! Wall-clock limit.

use std::time::Duration;

use super::{Termination, TerminationReason};
use crate::statistics::StatisticsCollector;

/// Fires once the run has lasted `limit`, measured from the creation of the
/// statistics collector.
///
/// ```
/// use std::time::Duration;
/// use dishes_solver::termination::{Termination, TerminationReason, TimeTermination};
/// use dishes_solver::StatisticsCollector;
///
/// let stats = StatisticsCollector::new();
/// assert_eq!(TimeTermination::minutes(5).check(&stats), None);
/// assert_eq!(
///     TimeTermination::new(Duration::ZERO).check(&stats),
///     Some(TerminationReason::TimeLimit(Duration::ZERO)),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn minutes(mins: u64) -> Self {
        Self::new(Duration::from_secs(mins.saturating_mul(60)))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn check(&self, stats: &StatisticsCollector) -> Option<TerminationReason> {
        if stats.elapsed() < self.limit {
            return None;
        }
        Some(TerminationReason::TimeLimit(self.limit))
    }
}
