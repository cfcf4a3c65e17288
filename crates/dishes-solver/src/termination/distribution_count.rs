//! Distribution count termination.

use super::{Termination, TerminationReason};
use crate::statistics::StatisticsCollector;

/// Terminates once the enumerator has produced `limit` distributions.
///
/// Guards against search spaces that fit in a `u64` but would take far
/// too long to visit.
#[derive(Debug, Clone)]
pub struct DistributionCountTermination {
    limit: u64,
}

impl DistributionCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for DistributionCountTermination {
    fn check(&self, stats: &StatisticsCollector) -> Option<TerminationReason> {
        (stats.current_generated() >= self.limit)
            .then_some(TerminationReason::DistributionLimit(self.limit))
    }
}
