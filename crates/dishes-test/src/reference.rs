//! Naive reference ranking.
//!
//! Decodes and fully scores every ordinal, then sorts. Slow and
//! allocation-heavy, but simple enough to trust.

use dishes_core::{MixedRadix, PreferenceMatrix, ScoreBreakdown, Solution};

/// Ranks every distribution over `matrix`, best first.
///
/// Returns `(ordinal, score)` pairs in [`Solution::rank_cmp`] order, so
/// ties keep ascending ordinal order and NaN scores come last.
pub fn rank_all(matrix: &PreferenceMatrix) -> Vec<(u64, f64)> {
    let radix = MixedRadix::new(matrix.people_count(), matrix.dish_count())
        .expect("reference ranking needs a search space that fits u64");
    let mut ranked: Vec<Solution> = (0..radix.total())
        .map(|ordinal| {
            let distribution = radix.decode(ordinal);
            let score = ScoreBreakdown::compute(matrix, &distribution).score;
            Solution::new(ordinal, distribution, score)
        })
        .collect();
    ranked.sort_by(|a, b| b.rank_cmp(a));
    ranked.iter().map(|s| (s.ordinal(), s.score())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alice_bob_reference() {
        let m = PreferenceMatrix::from_rows(&[[5.0, 1.0], [2.0, 4.0]]);
        assert_eq!(rank_all(&m), vec![(1, 8.0), (2, 2.0), (0, 0.0), (3, 0.0)]);
    }
}
