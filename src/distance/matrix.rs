//! Dense cost matrix.

use crate::error::{Result, SearchError};
use crate::models::Node;

/// A dense n×n cost matrix stored in row-major order.
///
/// Entry `(i, j)` is the cost of travelling from `i` to `j` *and* visiting
/// `j`: the rounded Euclidean distance plus the visitation cost of the
/// destination. Summing entries around a closed tour therefore yields the
/// full objective, edges and node costs together.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::models::Node;
/// use u_selective_tsp::distance::CostMatrix;
///
/// let nodes = vec![
///     Node::new(0.0, 0.0, 1.0),
///     Node::new(3.0, 4.0, 10.0),
///     Node::new(6.0, 8.0, 20.0),
/// ];
/// let dm = CostMatrix::from_nodes(&nodes);
/// assert_eq!(dm.get(0, 1), 15.0);
/// assert_eq!(dm.get(1, 0), 6.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a cost matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the matrix from node coordinates and visitation costs.
    ///
    /// Distances are rounded to the nearest integer (halves away from zero)
    /// before the destination's cost is added.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in 0..n {
                let d = nodes[i].distance_to(&nodes[j]).round();
                dm.set(i, j, d + nodes[j].cost());
            }
        }
        dm
    }

    /// Creates a cost matrix from explicit rows.
    ///
    /// Returns [`SearchError::NonSquareMatrix`] if any row's length differs
    /// from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(SearchError::NonSquareMatrix {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self { data, size })
    }

    /// Returns the cost of moving from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost of moving from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row of costs out of `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Total cost of the closed tour `tour[0] → … → tour[n-1] → tour[0]`.
    ///
    /// An empty tour costs nothing; a single node pays its self-loop entry.
    pub fn score(&self, tour: &[usize]) -> f64 {
        if tour.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        for w in tour.windows(2) {
            total += self.get(w[0], w[1]);
        }
        total + self.get(tour[tour.len() - 1], tour[0])
    }

    /// Returns the `k` nodes reachable from `from` at the lowest cost,
    /// excluding `from` itself, cheapest first.
    ///
    /// Ties are broken by node id so the result is deterministic.
    pub fn nearest(&self, from: usize, k: usize) -> Vec<usize> {
        let mut others: Vec<usize> = (0..self.size).filter(|&j| j != from).collect();
        others.sort_by(|&a, &b| {
            self.get(from, a)
                .total_cmp(&self.get(from, b))
                .then(a.cmp(&b))
        });
        others.truncate(k);
        others
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_nodes() -> Vec<Node> {
        let points = [(0.0, 0.0), (0.0, 2.0), (1.0, 0.0), (1.0, 2.0), (2.0, 0.0), (2.0, 2.0)];
        let costs = [-1.0, 0.0, 1.0, 2.0, 3.0, 1.0];
        points
            .iter()
            .zip(costs)
            .map(|(&(x, y), c)| Node::new(x, y, c))
            .collect()
    }

    #[test]
    fn test_from_nodes_rounds_and_adds_cost() {
        let dm = CostMatrix::from_nodes(&toy_nodes());
        assert_eq!(dm.size(), 6);
        // dist(0, 3) = sqrt(5) ≈ 2.236 → 2, plus cost(3) = 2
        assert_eq!(dm.get(0, 3), 4.0);
        // dist(3, 0) → 2, plus cost(0) = -1
        assert_eq!(dm.get(3, 0), 1.0);
        // self-loop is the node cost alone
        assert_eq!(dm.get(4, 4), 3.0);
    }

    #[test]
    fn test_score_toy_tour() {
        let dm = CostMatrix::from_nodes(&toy_nodes());
        assert_eq!(dm.score(&[0, 1, 3, 5, 4, 2]), 14.0);
        assert_eq!(dm.score(&[0, 1, 2, 5, 4, 3]), 18.0);
    }

    #[test]
    fn test_score_is_rotation_invariant() {
        let dm = CostMatrix::from_nodes(&toy_nodes());
        let a = dm.score(&[0, 1, 3, 5, 4, 2]);
        let b = dm.score(&[5, 4, 2, 0, 1, 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_degenerate_tours() {
        let dm = CostMatrix::from_nodes(&toy_nodes());
        assert_eq!(dm.score(&[]), 0.0);
        assert_eq!(dm.score(&[4]), 3.0);
    }

    #[test]
    fn test_from_rows() {
        let dm = CostMatrix::from_rows(&[vec![0.0, 5.0], vec![6.0, 0.0]]).expect("square");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 6.0);
        assert_eq!(dm.row(1), &[6.0, 0.0]);
    }

    #[test]
    fn test_from_rows_not_square() {
        let err = CostMatrix::from_rows(&[vec![0.0, 1.0], vec![2.0]]).unwrap_err();
        assert_eq!(
            err,
            SearchError::NonSquareMatrix {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_set_get() {
        let mut dm = CostMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }

    #[test]
    fn test_nearest() {
        let dm = CostMatrix::from_nodes(&toy_nodes());
        // From 0: D[0][1] = 2, D[0][2] = 2, D[0][3] = 4, D[0][4] = 5, D[0][5] = 4
        assert_eq!(dm.nearest(0, 2), vec![1, 2]);
        assert_eq!(dm.nearest(0, 4), vec![1, 2, 3, 5]);
        assert_eq!(dm.nearest(0, 10).len(), 5);
        assert!(dm.nearest(0, 0).is_empty());
    }
}
