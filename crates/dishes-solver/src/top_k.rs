//! Bounded top-K selection.
//!
//! [`SolutionHeap`] is an array-backed binary min-heap whose root is the
//! worst retained solution. Once full, a new solution either replaces the
//! root or is discarded, so memory never exceeds the configured capacity.

use std::cmp::Ordering;

use dishes_core::Solution;

/// Upper bound on the up-front allocation; larger heaps grow on demand.
const MAX_PREALLOCATED: usize = 4096;

/// Keeps the `capacity` best solutions seen so far.
///
/// Ranking follows [`Solution::rank_cmp`]: higher score first, then lower
/// ordinal. The retained set therefore depends only on which solutions
/// were pushed, never on the order they arrived in.
///
/// # Example
///
/// ```
/// use dishes_core::{Distribution, Solution};
/// use dishes_solver::SolutionHeap;
///
/// let mut heap = SolutionHeap::with_capacity(2);
/// for (ordinal, score) in [(0, 1.0), (1, 5.0), (2, 3.0), (3, 0.5)] {
///     heap.push(Solution::new(ordinal, Distribution::new(vec![]), score));
/// }
///
/// let scores: Vec<f64> = heap.into_sorted_vec().iter().map(|s| s.score()).collect();
/// assert_eq!(scores, vec![5.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SolutionHeap {
    solutions: Vec<Solution>,
    capacity: usize,
}

impl SolutionHeap {
    /// Creates an empty heap that retains at most `capacity` solutions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            solutions: Vec::with_capacity(capacity.min(MAX_PREALLOCATED)),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.solutions.len() >= self.capacity
    }

    /// Returns the worst retained solution, the next one to be evicted.
    #[inline]
    pub fn worst(&self) -> Option<&Solution> {
        self.solutions.first()
    }

    /// Returns the best retained solution.
    ///
    /// Linear in the heap size.
    pub fn best(&self) -> Option<&Solution> {
        self.solutions.iter().max_by(|a, b| a.rank_cmp(b))
    }

    /// Offers a solution; returns true if it was retained.
    ///
    /// Below capacity every solution is retained. At capacity the solution
    /// must rank strictly better than the current worst to evict it.
    pub fn push(&mut self, solution: Solution) -> bool {
        if self.capacity == 0 {
            return false;
        }

        if self.solutions.len() < self.capacity {
            self.solutions.push(solution);
            self.sift_up(self.solutions.len() - 1);
            return true;
        }

        if solution.is_better_than(&self.solutions[0]) {
            self.solutions[0] = solution;
            self.sift_down(0);
            true
        } else {
            false
        }
    }

    /// Removes and returns the worst retained solution.
    pub fn pop_worst(&mut self) -> Option<Solution> {
        let last = self.solutions.pop()?;
        if self.solutions.is_empty() {
            return Some(last);
        }
        let worst = std::mem::replace(&mut self.solutions[0], last);
        self.sift_down(0);
        Some(worst)
    }

    /// Iterates over the retained solutions in heap order.
    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter()
    }

    /// Consumes the heap, returning the retained solutions best first.
    pub fn into_sorted_vec(mut self) -> Vec<Solution> {
        let mut sorted = Vec::with_capacity(self.solutions.len());
        while let Some(solution) = self.pop_worst() {
            sorted.push(solution);
        }
        sorted.reverse();
        sorted
    }

    #[inline]
    fn is_worse(&self, a: usize, b: usize) -> bool {
        self.solutions[a].rank_cmp(&self.solutions[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.is_worse(i, parent) {
                break;
            }
            self.solutions.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.solutions.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut worst = i;

            if left < len && self.is_worse(left, worst) {
                worst = left;
            }
            if right < len && self.is_worse(right, worst) {
                worst = right;
            }
            if worst == i {
                break;
            }
            self.solutions.swap(i, worst);
            i = worst;
        }
    }
}

impl Extend<Solution> for SolutionHeap {
    fn extend<I: IntoIterator<Item = Solution>>(&mut self, iter: I) {
        for solution in iter {
            self.push(solution);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishes_core::Distribution;

    fn solution(ordinal: u64, score: f64) -> Solution {
        Solution::new(ordinal, Distribution::new(vec![ordinal as usize]), score)
    }

    fn scores(solutions: &[Solution]) -> Vec<f64> {
        solutions.iter().map(|s| s.score()).collect()
    }

    // Small deterministic generator so the stream has no visible pattern.
    fn pseudo_scores(n: u64) -> Vec<f64> {
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                ((state >> 33) % 50) as f64 - 25.0
            })
            .collect()
    }

    #[test]
    fn test_keeps_k_best_sorted() {
        let stream = pseudo_scores(500);
        for k in [1, 2, 7, 50, 500] {
            let mut heap = SolutionHeap::with_capacity(k);
            for (i, &s) in stream.iter().enumerate() {
                heap.push(solution(i as u64, s));
                assert!(heap.len() <= k);
            }

            let mut expected: Vec<Solution> = stream
                .iter()
                .enumerate()
                .map(|(i, &s)| solution(i as u64, s))
                .collect();
            expected.sort_by(|a, b| b.rank_cmp(a));
            expected.truncate(k);

            assert_eq!(heap.into_sorted_vec(), expected, "k = {k}");
        }
    }

    #[test]
    fn test_capacity_larger_than_stream() {
        let mut heap = SolutionHeap::with_capacity(10);
        heap.extend([solution(0, 2.0), solution(1, -1.0), solution(2, 4.0)]);

        assert!(!heap.is_full());
        assert_eq!(scores(&heap.into_sorted_vec()), vec![4.0, 2.0, -1.0]);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut heap = SolutionHeap::with_capacity(0);
        assert!(!heap.push(solution(0, 100.0)));
        assert!(heap.is_empty());
        assert!(heap.into_sorted_vec().is_empty());
    }

    #[test]
    fn test_worse_solution_is_discarded_when_full() {
        let mut heap = SolutionHeap::with_capacity(2);
        assert!(heap.push(solution(0, 3.0)));
        assert!(heap.push(solution(1, 5.0)));
        assert_eq!(heap.worst().unwrap().score(), 3.0);

        assert!(!heap.push(solution(2, 1.0)));
        assert!(heap.push(solution(3, 4.0)));
        assert_eq!(heap.worst().unwrap().score(), 4.0);
        assert_eq!(heap.best().unwrap().score(), 5.0);
    }

    #[test]
    fn test_ties_prefer_lower_ordinal_regardless_of_arrival() {
        let mut forward = SolutionHeap::with_capacity(2);
        let mut backward = SolutionHeap::with_capacity(2);
        let stream: Vec<Solution> = (0..6).map(|i| solution(i, 1.0)).collect();

        forward.extend(stream.iter().cloned());
        backward.extend(stream.iter().rev().cloned());

        let forward: Vec<u64> = forward.into_sorted_vec().iter().map(|s| s.ordinal()).collect();
        let backward: Vec<u64> = backward.into_sorted_vec().iter().map(|s| s.ordinal()).collect();
        assert_eq!(forward, vec![0, 1]);
        assert_eq!(backward, vec![0, 1]);
    }

    #[test]
    fn test_pop_worst_in_order() {
        let mut heap = SolutionHeap::with_capacity(4);
        heap.extend([
            solution(0, 2.0),
            solution(1, 9.0),
            solution(2, -3.0),
            solution(3, 5.0),
        ]);

        let popped: Vec<f64> = std::iter::from_fn(|| heap.pop_worst())
            .map(|s| s.score())
            .collect();
        assert_eq!(popped, vec![-3.0, 2.0, 5.0, 9.0]);
        assert!(heap.pop_worst().is_none());
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let heap = SolutionHeap::with_capacity(usize::MAX);
        assert_eq!(heap.capacity(), usize::MAX);
        assert!(heap.is_empty());
    }
}
