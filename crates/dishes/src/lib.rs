//! Exhaustive fair dish distribution.
//!
//! Given each person's rating of each dish, finds the assignments of every
//! dish to exactly one person that maximize total utility minus a fairness
//! penalty, returning the best `K` in rank order.
//!
//! # Quick Start
//!
//! ```
//! use dishes::{PreferenceIndex, Preferences, Solver, SolverConfig};
//!
//! let prefs = Preferences::from_json_str(r#"{
//!     "Alice": {"Pizza": 5, "Salad": 1},
//!     "Bob":   {"Pizza": 2, "Salad": 4}
//! }"#).unwrap();
//! let index = PreferenceIndex::build(&prefs).unwrap();
//!
//! let result = Solver::new(SolverConfig::new().with_top_k(1)).solve(&index).unwrap();
//! let text = dishes::report::to_text(&index, &result.solutions);
//! assert_eq!(text, "#1\nAlice: [Pizza], Bob: [Salad]\nscore: 8\n");
//! ```

pub mod report;

pub use dishes_config::{ConfigError, SolverConfig, TerminationConfig, WorkerCount};
pub use dishes_core::{
    normalize_row, DishesError, Distribution, DistributionEnumerator, MixedRadix, PreferenceIndex,
    PreferenceMatrix, Preferences, Rating, Result, ScoreBreakdown, Solution, SolutionScorer,
};
pub use dishes_solver::{
    CancellationToken, SolutionHeap, SolveResult, Solver, SolverStatistics, TerminationReason,
};

pub use dishes_console as console;
