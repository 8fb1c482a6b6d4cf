//! Candidate neighbor lists.

use super::CostMatrix;

/// For every node, its `k` cheapest other nodes under a cost matrix.
///
/// Built once per search and read-only afterwards. Candidate-restricted
/// descents only hypothesize new edges between a node and the members of
/// its list.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::models::Node;
/// use u_selective_tsp::distance::{CandidateLists, CostMatrix};
///
/// let nodes: Vec<Node> = (0..5).map(|i| Node::new(i as f64, 0.0, 0.0)).collect();
/// let dm = CostMatrix::from_nodes(&nodes);
/// let lists = CandidateLists::new(&dm, 2);
/// assert_eq!(lists.neighbors(0), &[1, 2]);
/// assert_eq!(lists.neighbors(2), &[1, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct CandidateLists {
    lists: Vec<Vec<usize>>,
    k: usize,
}

impl CandidateLists {
    /// Precomputes the `k` nearest neighbors of every node.
    ///
    /// `k` is clamped to `size - 1`.
    pub fn new(matrix: &CostMatrix, k: usize) -> Self {
        let k = k.min(matrix.size().saturating_sub(1));
        let lists = (0..matrix.size()).map(|a| matrix.nearest(a, k)).collect();
        Self { lists, k }
    }

    /// Candidate neighbors of `node`, cheapest first.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.lists[node]
    }

    /// Length of every list.
    pub fn k(&self) -> usize {
        self.k
    }
}
