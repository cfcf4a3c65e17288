//! Termination conditions for the exhaustive search.
//!
//! The search normally visits the whole space. A termination aborts it
//! early; the run then fails with the matching error instead of
//! reporting a partial ranking.

mod composite;
mod distribution_count;
mod external;
mod time;

use std::fmt::{self, Debug};
use std::time::Duration;

use dishes_core::DishesError;

use crate::statistics::StatisticsCollector;

pub use composite::OrTermination;
pub use distribution_count::DistributionCountTermination;
pub use external::{CancellationToken, ExternalTermination};
pub use time::TimeTermination;

/// Why a search stopped before visiting the whole space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A cancellation token was triggered.
    Cancelled,
    /// The time limit elapsed.
    TimeLimit(Duration),
    /// The distribution limit was reached.
    DistributionLimit(u64),
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Cancelled => write!(f, "cancelled"),
            TerminationReason::TimeLimit(limit) => write!(f, "time limit {:?}", limit),
            TerminationReason::DistributionLimit(limit) => {
                write!(f, "distribution limit {}", limit)
            }
        }
    }
}

impl From<TerminationReason> for DishesError {
    fn from(reason: TerminationReason) -> Self {
        match reason {
            TerminationReason::Cancelled => DishesError::Cancelled,
            TerminationReason::TimeLimit(limit) => DishesError::TimeLimitExceeded(limit),
            TerminationReason::DistributionLimit(limit) => {
                DishesError::DistributionLimitReached(limit)
            }
        }
    }
}

/// Trait for determining when to stop solving.
///
/// Checked by every pipeline stage between batches, possibly from several
/// threads at once.
pub trait Termination: Send + Sync + Debug {
    /// Returns the reason to stop, or `None` to keep going.
    fn check(&self, stats: &StatisticsCollector) -> Option<TerminationReason>;

    /// Returns true if solving should terminate.
    fn is_terminated(&self, stats: &StatisticsCollector) -> bool {
        self.check(stats).is_some()
    }
}

/// A termination that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn check(&self, _stats: &StatisticsCollector) -> Option<TerminationReason> {
        None
    }
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn check(&self, stats: &StatisticsCollector) -> Option<TerminationReason> {
        (**self).check(stats)
    }
}
