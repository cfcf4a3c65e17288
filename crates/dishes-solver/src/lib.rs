//! Exhaustive solver for fair dish distribution.
//!
//! This crate provides:
//! - [`Solver`]: enumerates, scores and ranks every distribution
//! - [`SolutionHeap`]: bounded top-K selection
//! - Termination conditions for cancellation and limits
//! - Statistics collection

mod pipeline;
pub mod solver;
pub mod statistics;
pub mod termination;
pub mod top_k;

pub use solver::{SolveResult, Solver};
pub use statistics::{SolverStatistics, StatisticsCollector};
pub use termination::{
    CancellationToken, DistributionCountTermination, ExternalTermination, NoTermination,
    OrTermination, Termination, TerminationReason, TimeTermination,
};
pub use top_k::SolutionHeap;
