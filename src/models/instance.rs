//! Problem instance.

use rand::Rng;

use crate::constructive::random_start;
use crate::distance::CostMatrix;
use crate::error::{Result, SearchError};

use super::{Node, Solution};

/// A selective TSP instance: nodes, their cost matrix, and the number of
/// nodes a tour must visit (half of all nodes, rounded down).
///
/// # Examples
///
/// ```
/// use u_selective_tsp::models::Instance;
///
/// let inst = Instance::from_points(
///     &[(0.0, 0.0), (0.0, 2.0), (1.0, 0.0), (1.0, 2.0), (2.0, 0.0), (2.0, 2.0)],
///     &[-1.0, 0.0, 1.0, 2.0, 3.0, 1.0],
/// )
/// .unwrap();
/// assert_eq!(inst.size(), 6);
/// assert_eq!(inst.solution_size(), 3);
/// assert_eq!(inst.matrix().score(&[0, 1, 3, 5, 4, 2]), 14.0);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    nodes: Vec<Node>,
    matrix: CostMatrix,
    solution_size: usize,
}

impl Instance {
    /// Builds an instance, precomputing its cost matrix.
    pub fn new(nodes: Vec<Node>) -> Self {
        let matrix = CostMatrix::from_nodes(&nodes);
        let solution_size = nodes.len() / 2;
        Self {
            nodes,
            matrix,
            solution_size,
        }
    }

    /// Builds an instance from parallel coordinate and cost slices.
    pub fn from_points(points: &[(f64, f64)], costs: &[f64]) -> Result<Self> {
        if points.len() != costs.len() {
            return Err(SearchError::LengthMismatch {
                points: points.len(),
                costs: costs.len(),
            });
        }
        let nodes = points
            .iter()
            .zip(costs)
            .map(|(&(x, y), &cost)| Node::new(x, y, cost))
            .collect();
        Ok(Self::new(nodes))
    }

    /// All nodes, indexed by node id.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes a tour visits.
    pub fn solution_size(&self) -> usize {
        self.solution_size
    }

    /// Cost matrix with visitation costs baked in.
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// Draws a uniformly random solution of the required size.
    ///
    /// Same as [`random_start`] with this instance's sizes.
    pub fn random_start<R: Rng>(&self, rng: &mut R) -> Result<Solution> {
        random_start(self.size(), self.solution_size, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let inst = Instance::from_points(&[(0.0, 0.0), (3.0, 4.0)], &[1.0, 2.0]).expect("valid");
        assert_eq!(inst.size(), 2);
        assert_eq!(inst.solution_size(), 1);
        assert_eq!(inst.nodes()[1].cost(), 2.0);
        // round(5) + cost of destination
        assert_eq!(inst.matrix().get(0, 1), 7.0);
        assert_eq!(inst.matrix().get(1, 0), 6.0);
    }

    #[test]
    fn test_from_points_length_mismatch() {
        let err = Instance::from_points(&[(0.0, 0.0)], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, SearchError::LengthMismatch { points: 1, costs: 2 });
    }

    #[test]
    fn test_solution_size_rounds_down() {
        let nodes = (0..7).map(|i| Node::new(i as f64, 0.0, 0.0)).collect();
        let inst = Instance::new(nodes);
        assert_eq!(inst.solution_size(), 3);
    }

    #[test]
    fn test_random_start_is_valid() {
        let nodes = (0..10).map(|i| Node::new(i as f64, 1.0, 0.0)).collect();
        let inst = Instance::new(nodes);
        let mut rng = u_numflow::random::create_rng(42);
        let sol = inst.random_start(&mut rng).expect("valid sizes");
        assert_eq!(sol.len(), 5);
        assert!(sol.validate(10).is_ok());
    }
}
