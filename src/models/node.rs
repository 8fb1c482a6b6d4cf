//! Node type.

use serde::{Deserialize, Serialize};

/// A node of a selective TSP instance.
///
/// Nodes are identified by their index in the instance. Each has planar
/// coordinates and a fixed cost paid whenever the node is visited. Costs
/// may be negative.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::models::Node;
///
/// let a = Node::new(0.0, 0.0, 5.0);
/// let b = Node::new(3.0, 4.0, -1.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// assert_eq!(b.cost(), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    x: f64,
    y: f64,
    cost: f64,
}

impl Node {
    /// Creates a new node.
    pub fn new(x: f64, y: f64, cost: f64) -> Self {
        Self { x, y, cost }
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Cost paid for visiting this node.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_new() {
        let n = Node::new(10.0, 20.0, 3.0);
        assert_eq!(n.x(), 10.0);
        assert_eq!(n.y(), 20.0);
        assert_eq!(n.cost(), 3.0);
    }

    #[test]
    fn test_node_distance() {
        let a = Node::new(0.0, 0.0, 0.0);
        let b = Node::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_node_distance_to_self() {
        let a = Node::new(1.5, -2.0, 9.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
