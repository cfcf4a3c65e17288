//! Fairness-adjusted scoring of distributions.
//!
//! The score of a distribution is its total utility minus the sum of
//! absolute deviations of each person's utility from the mean:
//!
//! ```text
//! total   = Σ_d matrix[person(d)][d]
//! mean    = total / people
//! penalty = Σ_p |total(p) - mean|
//! score   = total - penalty
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::distribution::Distribution;
use crate::matrix::PreferenceMatrix;

/// Reusable scorer bound to one matrix.
///
/// Holds a per-person scratch buffer so scoring does not allocate. Each
/// worker owns its own scorer; the matrix is shared read-only.
#[derive(Debug, Clone)]
pub struct SolutionScorer<'a> {
    matrix: &'a PreferenceMatrix,
    per_person: Vec<f64>,
}

impl<'a> SolutionScorer<'a> {
    /// # Panics
    ///
    /// Panics if the matrix has no people.
    pub fn new(matrix: &'a PreferenceMatrix) -> Self {
        assert!(matrix.people_count() > 0, "cannot score without people");
        Self {
            matrix,
            per_person: vec![0.0; matrix.people_count()],
        }
    }

    pub fn matrix(&self) -> &'a PreferenceMatrix {
        self.matrix
    }

    /// Scores one assignment given as person ordinals per dish.
    ///
    /// # Panics
    ///
    /// Panics if the assignment length differs from the dish count or an
    /// entry is not a valid person ordinal.
    pub fn score(&mut self, assignment: &[usize]) -> f64 {
        assert_eq!(
            assignment.len(),
            self.matrix.dish_count(),
            "distribution has wrong length"
        );

        self.per_person.fill(0.0);
        let mut total = 0.0;
        for (dish, &person) in assignment.iter().enumerate() {
            let rating = self.matrix.get(person, dish);
            total += rating;
            self.per_person[person] += rating;
        }

        let mean = total / self.per_person.len() as f64;
        let penalty: f64 = self.per_person.iter().map(|t| (t - mean).abs()).sum();
        total - penalty
    }

    /// Scores a distribution into a [`Solution`].
    pub fn solve(&mut self, ordinal: u64, distribution: Distribution) -> Solution {
        let score = self.score(distribution.as_slice());
        Solution::new(ordinal, distribution, score)
    }
}

/// Every intermediate quantity of one score computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub total_utility: f64,
    pub per_person: Vec<f64>,
    pub mean: f64,
    pub fairness_penalty: f64,
    pub score: f64,
}

impl ScoreBreakdown {
    /// Computes the breakdown of `distribution` against `matrix`.
    pub fn compute(matrix: &PreferenceMatrix, distribution: &Distribution) -> Self {
        assert_eq!(
            distribution.len(),
            matrix.dish_count(),
            "distribution has wrong length"
        );

        // Summed in dish order, exactly as `SolutionScorer::score` does.
        let mut per_person = vec![0.0; matrix.people_count()];
        let mut total_utility = 0.0;
        for (dish, &person) in distribution.as_slice().iter().enumerate() {
            let rating = matrix.get(person, dish);
            total_utility += rating;
            per_person[person] += rating;
        }
        let mean = total_utility / matrix.people_count() as f64;
        let fairness_penalty = per_person.iter().map(|t| (t - mean).abs()).sum();

        Self {
            total_utility,
            per_person,
            mean,
            fairness_penalty,
            score: total_utility - fairness_penalty,
        }
    }
}

/// A scored distribution.
///
/// `ordinal` is the enumeration index the distribution was decoded from.
/// It breaks score ties: the lower ordinal ranks higher.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    ordinal: u64,
    distribution: Distribution,
    score: f64,
}

impl Solution {
    pub fn new(ordinal: u64, distribution: Distribution, score: f64) -> Self {
        Self {
            ordinal,
            distribution,
            score,
        }
    }

    #[inline]
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    #[inline]
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn into_distribution(self) -> Distribution {
        self.distribution
    }

    /// Ranks two solutions: `Greater` means `self` is the better one.
    ///
    /// Higher scores win; equal scores prefer the lower ordinal. A NaN
    /// score, from ratings whose sums overflow, ranks below every number.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        let by_score = match (self.score.is_nan(), other.score.is_nan()) {
            (false, false) => self.score.total_cmp(&other.score),
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        };
        by_score.then_with(|| other.ordinal.cmp(&self.ordinal))
    }

    pub fn is_better_than(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Greater
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.ordinal, self.distribution, self.score)
    }
}
