//! Enumerate → score → select pipeline.
//!
//! The parallel pipeline runs three kinds of stages connected by bounded
//! channels:
//!
//! ```text
//! producer ──batches──▶ scorer workers (N) ──scored batches──▶ selector
//! ```
//!
//! The producer is the only enumerator and the selector, running on the
//! calling thread, is the only owner of the [`SolutionHeap`]. Full channels
//! block the upstream stage. When a termination fires, the stage that saw
//! it raises the shared [`StopSignal`]; every stage then drops its channel
//! ends and the rest of the pipeline unwinds through disconnection.

use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender};
use dishes_core::{Distribution, MixedRadix, PreferenceMatrix, Solution, SolutionScorer};
use tracing::{debug, trace};

use crate::statistics::{per_second, StatisticsCollector};
use crate::termination::{Termination, TerminationReason};
use crate::top_k::SolutionHeap;

type DistributionBatch = Vec<(u64, Distribution)>;
type SolutionBatch = Vec<Solution>;

/// Interval between progress events.
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// First-wins record of why the pipeline stopped early.
#[derive(Debug, Default)]
pub(crate) struct StopSignal {
    reason: OnceLock<TerminationReason>,
}

impl StopSignal {
    pub(crate) fn trigger(&self, reason: TerminationReason) {
        let _ = self.reason.set(reason);
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.reason.get().is_some()
    }

    pub(crate) fn reason(&self) -> Option<TerminationReason> {
        self.reason.get().copied()
    }
}

/// Everything one pipeline run shares across its stages.
pub(crate) struct Pipeline<'a> {
    pub matrix: &'a PreferenceMatrix,
    pub radix: MixedRadix,
    pub top_k: usize,
    pub batch_size: usize,
    pub channel_capacity: usize,
    pub termination: &'a dyn Termination,
    pub stats: &'a StatisticsCollector,
}

impl Pipeline<'_> {
    /// Runs every stage on the calling thread.
    pub(crate) fn run_sequential(&self) -> Result<SolutionHeap, TerminationReason> {
        let mut heap = SolutionHeap::with_capacity(self.top_k);
        let mut scorer = SolutionScorer::new(self.matrix);
        let mut progress = ProgressLogger::new();
        let mut enumerator = self.radix.enumerate();

        while enumerator.remaining() > 0 {
            if let Some(reason) = self.termination.check(self.stats) {
                return Err(reason);
            }

            let mut count = 0u64;
            for (ordinal, distribution) in enumerator.by_ref().take(self.batch_size) {
                let inserted = heap.push(scorer.solve(ordinal, distribution));
                self.stats.record_selected(inserted);
                count += 1;
            }
            self.stats.record_generated(count);
            self.stats.record_scored(count);
            progress.tick(self.stats, &heap);
        }

        Ok(heap)
    }

    /// Runs the producer and `workers` scorer threads, selecting on the
    /// calling thread.
    pub(crate) fn run_parallel(&self, workers: usize) -> Result<SolutionHeap, TerminationReason> {
        assert!(workers > 0, "parallel pipeline needs at least one worker");

        let signal = StopSignal::default();
        let (batch_tx, batch_rx) = channel::bounded::<DistributionBatch>(self.channel_capacity);
        let (solution_tx, solution_rx) = channel::bounded::<SolutionBatch>(self.channel_capacity);

        let heap = thread::scope(|s| {
            let signal = &signal;

            s.spawn(move || self.produce(batch_tx, signal));
            for worker in 0..workers {
                let batch_rx = batch_rx.clone();
                let solution_tx = solution_tx.clone();
                s.spawn(move || self.score(worker, batch_rx, solution_tx, signal));
            }
            // Workers own the remaining ends; the selector must see disconnection.
            drop(batch_rx);
            drop(solution_tx);

            self.select(solution_rx, signal)
        });

        match signal.reason() {
            Some(reason) if self.stats.current_selected() < self.radix.total() => Err(reason),
            _ => Ok(heap),
        }
    }

    fn produce(&self, tx: Sender<DistributionBatch>, signal: &StopSignal) {
        let mut enumerator = self.radix.enumerate();
        loop {
            if signal.is_stopped() {
                return;
            }
            if enumerator.remaining() == 0 {
                trace!(event = "producer_done", position = enumerator.position());
                return;
            }
            if let Some(reason) = self.termination.check(self.stats) {
                signal.trigger(reason);
                return;
            }

            let batch: DistributionBatch = enumerator.by_ref().take(self.batch_size).collect();
            self.stats.record_generated(batch.len() as u64);
            if tx.send(batch).is_err() {
                return;
            }
        }
    }

    fn score(
        &self,
        worker: usize,
        rx: Receiver<DistributionBatch>,
        tx: Sender<SolutionBatch>,
        signal: &StopSignal,
    ) {
        let mut scorer = SolutionScorer::new(self.matrix);
        for batch in rx.iter() {
            if signal.is_stopped() {
                break;
            }
            let solutions: SolutionBatch = batch
                .into_iter()
                .map(|(ordinal, distribution)| scorer.solve(ordinal, distribution))
                .collect();
            self.stats.record_scored(solutions.len() as u64);
            if tx.send(solutions).is_err() {
                break;
            }
        }
        trace!(event = "worker_done", worker = worker as u64);
    }

    fn select(&self, rx: Receiver<SolutionBatch>, signal: &StopSignal) -> SolutionHeap {
        let mut heap = SolutionHeap::with_capacity(self.top_k);
        let mut progress = ProgressLogger::new();

        for batch in rx.iter() {
            for solution in batch {
                let inserted = heap.push(solution);
                self.stats.record_selected(inserted);
            }
            // Once everything is generated the remaining tail is bounded by
            // the channel capacities; let it finish.
            if self.stats.current_generated() < self.radix.total() {
                if let Some(reason) = self.termination.check(self.stats) {
                    signal.trigger(reason);
                    break;
                }
            }
            progress.tick(self.stats, &heap);
        }

        heap
    }
}

/// Emits a `progress` event at most once per interval.
struct ProgressLogger {
    last: Instant,
}

impl ProgressLogger {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn tick(&mut self, stats: &StatisticsCollector, heap: &SolutionHeap) {
        if self.last.elapsed() < PROGRESS_INTERVAL {
            return;
        }
        self.last = Instant::now();

        let scored = stats.current_scored();
        let best = heap
            .best()
            .map(|s| format!("{}", s.score()))
            .unwrap_or_else(|| "none".to_string());
        debug!(
            event = "progress",
            steps = scored,
            speed = per_second(scored, stats.elapsed()),
            score = best,
        );
    }
}
