//! Solver statistics collection and reporting.
//!
//! Tracks how far the pipeline got: distributions generated by the
//! enumerator, scored by the workers, and offered to the top-K heap.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

/// Complete statistics for a solver run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverStatistics {
    /// Total time spent solving.
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Size of the search space, `people^dishes`.
    pub search_space: u64,
    /// Number of scorer threads; zero for sequential solving.
    pub worker_count: usize,
    /// Distributions produced by the enumerator.
    pub distributions_generated: u64,
    /// Distributions scored.
    pub distributions_scored: u64,
    /// Solutions offered to the top-K heap.
    pub solutions_selected: u64,
    /// Offers that entered the heap.
    pub heap_insertions: u64,
}

impl SolverStatistics {
    /// Statistics of a run that did no work.
    pub fn empty() -> Self {
        Self {
            duration: Duration::ZERO,
            search_space: 0,
            worker_count: 0,
            distributions_generated: 0,
            distributions_scored: 0,
            solutions_selected: 0,
            heap_insertions: 0,
        }
    }

    /// Returns the scoring throughput in distributions per second.
    pub fn speed(&self) -> u64 {
        per_second(self.distributions_scored, self.duration)
    }

    /// Returns true if every distribution of the search space was scored.
    pub fn is_complete(&self) -> bool {
        self.solutions_selected == self.search_space
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

pub(crate) fn per_second(count: u64, elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        (count as f64 / secs) as u64
    } else {
        0
    }
}

/// Thread-safe collector for solver statistics.
///
/// Every pipeline stage records into the same collector. After solving,
/// call `into_statistics()` to get the final `SolverStatistics`.
#[derive(Debug)]
pub struct StatisticsCollector {
    /// When solving started.
    start_time: Instant,
    generated: AtomicU64,
    scored: AtomicU64,
    selected: AtomicU64,
    inserted: AtomicU64,
}

impl StatisticsCollector {
    /// Creates a new statistics collector.
    ///
    /// The start time is recorded when this is called.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            generated: AtomicU64::new(0),
            scored: AtomicU64::new(0),
            selected: AtomicU64::new(0),
            inserted: AtomicU64::new(0),
        }
    }

    /// Records a batch of distributions leaving the enumerator.
    pub fn record_generated(&self, count: u64) {
        self.generated.fetch_add(count, Ordering::Relaxed);
    }

    /// Records a batch of scored distributions.
    pub fn record_scored(&self, count: u64) {
        self.scored.fetch_add(count, Ordering::Relaxed);
    }

    /// Records one solution offered to the heap.
    pub fn record_selected(&self, inserted: bool) {
        self.selected.fetch_add(1, Ordering::Relaxed);
        if inserted {
            self.inserted.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn current_generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    pub fn current_scored(&self) -> u64 {
        self.scored.load(Ordering::Relaxed)
    }

    pub fn current_selected(&self) -> u64 {
        self.selected.load(Ordering::Relaxed)
    }

    /// Converts this collector into final statistics.
    pub fn into_statistics(self, search_space: u64, worker_count: usize) -> SolverStatistics {
        self.snapshot(search_space, worker_count)
    }

    /// Takes a snapshot of current statistics without consuming the collector.
    pub fn snapshot(&self, search_space: u64, worker_count: usize) -> SolverStatistics {
        SolverStatistics {
            duration: self.start_time.elapsed(),
            search_space,
            worker_count,
            distributions_generated: self.generated.load(Ordering::Relaxed),
            distributions_scored: self.scored.load(Ordering::Relaxed),
            solutions_selected: self.selected.load(Ordering::Relaxed),
            heap_insertions: self.inserted.load(Ordering::Relaxed),
        }
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}
