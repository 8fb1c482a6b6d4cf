//! Solution type: a tour plus the nodes left out of it.

use crate::distance::CostMatrix;
use crate::error::{Result, SearchError};

/// Smallest tour the local-search moves are defined on.
pub const MIN_TOUR_LEN: usize = 3;

/// A candidate solution: a closed tour over the selected nodes and the
/// complementary unselected set.
///
/// The tour is cyclic: its last node connects back to the first. The order
/// of `unselected` carries no meaning, but positions in it (slots) identify
/// inter-route moves. Both buffers are owned separately, so moves can
/// borrow them mutably at the same time without aliasing.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::models::Solution;
///
/// let sol = Solution::new(vec![0, 2, 4], vec![1, 3, 5]);
/// assert_eq!(sol.len(), 3);
/// assert_eq!(sol.node_count(), 6);
/// assert!(sol.validate(6).is_ok());
/// assert!(sol.validate(7).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    tour: Vec<usize>,
    unselected: Vec<usize>,
}

impl Solution {
    /// Creates a solution from a tour and its unselected complement.
    ///
    /// No validation is performed; see [`Solution::validate`].
    pub fn new(tour: Vec<usize>, unselected: Vec<usize>) -> Self {
        Self { tour, unselected }
    }

    /// Selected nodes in visiting order.
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Nodes not in the tour.
    pub fn unselected(&self) -> &[usize] {
        &self.unselected
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.tour.len()
    }

    /// Returns `true` if the tour is empty.
    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }

    /// Number of nodes covered by the tour and the unselected set.
    pub fn node_count(&self) -> usize {
        self.tour.len() + self.unselected.len()
    }

    /// Total cost of the closed tour under `matrix`.
    pub fn score(&self, matrix: &CostMatrix) -> f64 {
        matrix.score(&self.tour)
    }

    /// Checks that tour and unselected set partition `0..size`.
    pub fn validate(&self, size: usize) -> Result<()> {
        let mut seen = vec![false; size];
        for &node in self.tour.iter().chain(self.unselected.iter()) {
            if node >= size {
                return Err(SearchError::NodeOutOfRange { node, size });
            }
            if seen[node] {
                return Err(SearchError::DuplicateNode { node });
            }
            seen[node] = true;
        }
        let covered = self.node_count();
        if covered != size {
            return Err(SearchError::IncompleteCover { covered, size });
        }
        Ok(())
    }

    /// Checks every precondition a descent has on this solution.
    pub fn check_searchable(&self, matrix: &CostMatrix) -> Result<()> {
        if self.node_count() != matrix.size() {
            return Err(SearchError::SizeMismatch {
                matrix: matrix.size(),
                solution: self.node_count(),
            });
        }
        self.validate(matrix.size())?;
        if self.tour.len() < MIN_TOUR_LEN {
            return Err(SearchError::TourTooShort {
                len: self.tour.len(),
                min: MIN_TOUR_LEN,
            });
        }
        Ok(())
    }

    /// Consumes the solution, returning `(tour, unselected)`.
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.tour, self.unselected)
    }

    /// Mutable views of both buffers at once.
    pub(crate) fn parts_mut(&mut self) -> (&mut [usize], &mut [usize]) {
        (&mut self.tour, &mut self.unselected)
    }
}
