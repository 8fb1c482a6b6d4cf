//! Repair operator for LNS.

use rand::Rng;
use u_metaheur::alns::RepairOperator;

use crate::distance::CostMatrix;
use crate::models::Solution;

/// Cheapest and second cheapest insertion of `node` into `tour`, as
/// `(position, best_cost, second_cost)`.
///
/// Inserting at `position` places the node between `tour[position - 1]`
/// and `tour[position]` (cyclically). A single-node tour has one edge, the
/// self-loop, so both costs are equal.
fn insertion_costs(tour: &[usize], node: usize, matrix: &CostMatrix) -> (usize, f64, f64) {
    let n = tour.len();
    let mut best = (0, f64::INFINITY);
    let mut second = f64::INFINITY;
    for p in 0..n {
        let a = tour[p];
        let b = tour[(p + 1) % n];
        let cost = matrix.get(a, node) + matrix.get(node, b) - matrix.get(a, b);
        if cost < best.1 {
            second = best.1;
            best = (p + 1, cost);
        } else if cost < second {
            second = cost;
        }
    }
    if !second.is_finite() {
        second = best.1;
    }
    (best.0, best.1, second)
}

/// Weighted 2-regret insertion up to a target tour size.
///
/// While the tour is short, every unselected node is scored by
/// `w * regret - (1 - w) * best_cost`, where `best_cost` is its cheapest
/// insertion and `regret` the gap to the second cheapest. The node with the
/// highest score is inserted at its cheapest position. An empty tour is
/// seeded with the node of lowest self-loop cost.
///
/// # Examples
///
/// ```
/// use u_metaheur::alns::RepairOperator;
/// use u_selective_tsp::lns::WeightedRegretInsertion;
/// use u_selective_tsp::models::{Instance, Solution};
///
/// let inst = Instance::from_points(
///     &[(0.0, 0.0), (0.0, 2.0), (1.0, 0.0), (1.0, 2.0), (2.0, 0.0), (2.0, 2.0)],
///     &[-1.0, 0.0, 1.0, 2.0, 3.0, 1.0],
/// )
/// .unwrap();
/// let op = WeightedRegretInsertion::new(inst.matrix().clone(), 3);
/// let partial = Solution::new(vec![0], vec![1, 2, 3, 4, 5]);
/// let mut rng = u_numflow::random::create_rng(42);
/// let repaired = op.repair(&partial, &mut rng);
/// assert_eq!(repaired.len(), 3);
/// assert!(repaired.validate(6).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct WeightedRegretInsertion {
    matrix: CostMatrix,
    target_size: usize,
    regret_weight: f64,
}

impl WeightedRegretInsertion {
    /// Creates the operator with an even regret/cost weighting.
    pub fn new(matrix: CostMatrix, target_size: usize) -> Self {
        Self {
            matrix,
            target_size,
            regret_weight: 0.5,
        }
    }

    /// Sets the weight of regret against insertion cost.
    pub fn with_regret_weight(mut self, weight: f64) -> Self {
        self.regret_weight = weight;
        self
    }

    /// Tour size the operator repairs up to.
    pub fn target_size(&self) -> usize {
        self.target_size
    }
}

impl RepairOperator<Solution> for WeightedRegretInsertion {
    fn name(&self) -> &str {
        "weighted_regret_insertion"
    }

    fn repair<R: Rng>(&self, solution: &Solution, _rng: &mut R) -> Solution {
        let (mut tour, mut unselected) = solution.clone().into_parts();
        let w = self.regret_weight;

        if tour.is_empty() && self.target_size > 0 && !unselected.is_empty() {
            let mut seed_slot = 0;
            for (k, &v) in unselected.iter().enumerate() {
                let u = unselected[seed_slot];
                if self.matrix.get(v, v) < self.matrix.get(u, u) {
                    seed_slot = k;
                }
            }
            tour.push(unselected.swap_remove(seed_slot));
        }

        while tour.len() < self.target_size && !unselected.is_empty() {
            let mut chosen = (0, 0);
            let mut best_score = f64::NEG_INFINITY;
            for (k, &v) in unselected.iter().enumerate() {
                let (position, best_cost, second_cost) = insertion_costs(&tour, v, &self.matrix);
                let score = w * (second_cost - best_cost) - (1.0 - w) * best_cost;
                if score > best_score {
                    best_score = score;
                    chosen = (k, position);
                }
            }
            let (slot, position) = chosen;
            let node = unselected.swap_remove(slot);
            tour.insert(position, node);
        }

        Solution::new(tour, unselected)
    }
}
