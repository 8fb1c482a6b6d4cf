//! Steepest descent: scan the full neighborhood, keep the best move.
//!
//! # Complexity
//!
//! O(n²) intra-route plus O(n · |unselected|) inter-route moves per scan.

use crate::distance::CostMatrix;
use crate::models::Solution;
use crate::moves::{inter_moves, intra_moves, IntraMove, Move, IMPROVEMENT_EPS};

/// Best improving move of `solution`, or `None` at a local optimum.
///
/// Ties keep the first move found: intra-route moves in `(i, j)` order,
/// then inter-route moves in `(position, slot)` order.
pub(super) fn best_move(solution: &Solution, matrix: &CostMatrix, intra: IntraMove) -> Option<Move> {
    let n = solution.len();
    let slots = solution.unselected().len();

    let mut best: Option<Move> = None;
    let mut best_delta = -IMPROVEMENT_EPS;
    for mv in intra_moves(n, intra).chain(inter_moves(n, slots)) {
        let delta = mv.delta(matrix, solution);
        if delta < best_delta {
            best_delta = delta;
            best = Some(mv);
        }
    }
    best
}
