//! Row normalization into relative weights.
//!
//! Normalizing turns each person's ratings into non-negative weights that
//! sum to one, so people who rate on a wider scale do not dominate the
//! fairness penalty.

use crate::matrix::PreferenceMatrix;
use crate::preferences::Rating;

/// Normalizes one person's ratings.
///
/// Negative rows are shifted up so the minimum becomes zero. A row that
/// sums to zero after that is shifted by one more. Every entry is then
/// divided by the row sum.
///
/// ```
/// use dishes_core::normalize_row;
///
/// assert_eq!(normalize_row(&[3.0, 1.0]), vec![0.75, 0.25]);
/// assert_eq!(normalize_row(&[-1.0, 1.0]), vec![0.0, 1.0]);
/// assert_eq!(normalize_row(&[0.0, 0.0]), vec![0.5, 0.5]);
/// ```
pub fn normalize_row(row: &[Rating]) -> Vec<Rating> {
    if row.is_empty() {
        return Vec::new();
    }

    let min = row.iter().copied().fold(Rating::INFINITY, Rating::min);
    let mut sum: Rating = row.iter().sum();
    let mut shift = 0.0;

    if min < 0.0 {
        shift = -min;
        sum += shift * row.len() as Rating;
    }
    if sum == 0.0 {
        shift += 1.0;
        sum += row.len() as Rating;
    }

    row.iter().map(|&r| (r + shift) / sum).collect()
}

impl PreferenceMatrix {
    /// Returns a copy of this matrix with every row normalized.
    pub fn normalized(&self) -> PreferenceMatrix {
        let rows: Vec<Vec<Rating>> = self.rows().map(normalize_row).collect();
        if rows.is_empty() {
            return PreferenceMatrix::zeros(0, self.dish_count());
        }
        PreferenceMatrix::from_rows(&rows)
    }
}
