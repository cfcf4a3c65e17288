//! Dense rating matrix.

use std::fmt;

use crate::preferences::Rating;

/// Dense person × dish rating matrix, stored row-major.
///
/// Row `p` holds every rating of person `p`; column `d` every rating of
/// dish `d`. The shape is fixed at construction.
#[derive(Clone, PartialEq)]
pub struct PreferenceMatrix {
    people: usize,
    dishes: usize,
    ratings: Vec<Rating>,
}

impl PreferenceMatrix {
    /// Creates a matrix of the given shape filled with zero ratings.
    pub fn zeros(people: usize, dishes: usize) -> Self {
        Self {
            people,
            dishes,
            ratings: vec![0.0; people * dishes],
        }
    }

    /// Creates a matrix from rows of equal width.
    ///
    /// # Panics
    ///
    /// Panics if the rows are ragged.
    pub fn from_rows<R: AsRef<[Rating]>>(rows: &[R]) -> Self {
        let dishes = rows.first().map_or(0, |r| r.as_ref().len());
        let mut ratings = Vec::with_capacity(rows.len() * dishes);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), dishes, "ragged preference matrix row");
            ratings.extend_from_slice(row);
        }
        Self {
            people: rows.len(),
            dishes,
            ratings,
        }
    }

    #[inline]
    pub fn people_count(&self) -> usize {
        self.people
    }

    #[inline]
    pub fn dish_count(&self) -> usize {
        self.dishes
    }

    /// Returns the rating of `person` for `dish`.
    #[inline]
    pub fn get(&self, person: usize, dish: usize) -> Rating {
        debug_assert!(person < self.people && dish < self.dishes);
        self.ratings[person * self.dishes + dish]
    }

    pub(crate) fn set(&mut self, person: usize, dish: usize, rating: Rating) {
        self.ratings[person * self.dishes + dish] = rating;
    }

    /// Returns every rating of one person.
    #[inline]
    pub fn row(&self, person: usize) -> &[Rating] {
        let start = person * self.dishes;
        &self.ratings[start..start + self.dishes]
    }

    /// Iterates over the rows in person ordinal order.
    pub fn rows(&self) -> impl Iterator<Item = &[Rating]> {
        (0..self.people).map(move |p| self.row(p))
    }
}

impl fmt::Debug for PreferenceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}
