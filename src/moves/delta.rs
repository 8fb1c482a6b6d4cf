//! O(1) delta formulas for every move type.
//!
//! Each function returns the change in tour cost the move would cause,
//! without touching the tour. Negative means the move improves the tour.
//! Positions are taken modulo the tour length, so the first and last
//! positions are neighbors.
//!
//! The cost matrix bakes the destination's visitation cost into every
//! entry. Edge reversal flips the direction of the segment's interior
//! edges, so the reversal formulas pick the orientation in which the
//! visitation costs cancel; they are exact whenever the distance part of
//! the matrix is symmetric (always the case for [`CostMatrix::from_nodes`]).

use crate::distance::CostMatrix;

use super::{next, prev};

/// Delta of swapping the nodes at tour positions `i` and `j`.
///
/// Adjacent positions share an edge, which must be neither removed nor
/// added twice; they use the three-edge formula. Symmetric in `i` and `j`.
pub fn intra_node_exchange_delta(matrix: &CostMatrix, tour: &[usize], i: usize, j: usize) -> f64 {
    let n = tour.len();
    if i == j {
        return 0.0;
    }
    let d = |x: usize, y: usize| matrix.get(x, y);

    // Order the pair so that the result does not depend on argument order.
    let (i, j) = if next(i, n) == j {
        (i, j)
    } else if next(j, n) == i {
        (j, i)
    } else {
        (i.min(j), i.max(j))
    };

    let a = tour[i];
    let b = tour[j];
    let a_prev = tour[prev(i, n)];
    let b_next = tour[next(j, n)];

    if next(i, n) == j {
        // a_prev → a → b → b_next  becomes  a_prev → b → a → b_next
        return d(a_prev, b) + d(b, a) + d(a, b_next) - d(a_prev, a) - d(a, b) - d(b, b_next);
    }

    let a_next = tour[next(i, n)];
    let b_prev = tour[prev(j, n)];
    d(a_prev, b) + d(b, a_next) + d(b_prev, a) + d(a, b_next)
        - d(a_prev, a)
        - d(a, a_next)
        - d(b_prev, b)
        - d(b, b_next)
}

/// Delta of the 2-opt move removing the edges leaving positions `i` and `j`
/// and reversing the segment between them.
///
/// New edges are `tour[i] – tour[j]` and `tour[i+1] – tour[j+1]`. When the
/// two edges coincide or touch, the move changes nothing and the delta is
/// exactly zero.
pub fn intra_edge_exchange_delta(matrix: &CostMatrix, tour: &[usize], i: usize, j: usize) -> f64 {
    let n = tour.len();
    if edges_touch(i, j, n) {
        return 0.0;
    }
    let a = tour[i];
    let b = tour[j];
    let a_next = tour[next(i, n)];
    let b_next = tour[next(j, n)];
    matrix.get(b_next, a_next) + matrix.get(a, b) - matrix.get(a, a_next) - matrix.get(b_next, b)
}

/// Delta of replacing the node at tour position `i` with `unselected[k]`.
pub fn inter_node_exchange_delta(
    matrix: &CostMatrix,
    tour: &[usize],
    i: usize,
    unselected: &[usize],
    k: usize,
) -> f64 {
    let n = tour.len();
    let a = tour[i];
    let a_prev = tour[prev(i, n)];
    let a_next = tour[next(i, n)];
    let node = unselected[k];
    matrix.get(a_prev, node) + matrix.get(node, a_next) - matrix.get(a_prev, a) - matrix.get(a, a_next)
}

/// 2-opt delta anchored after `i`: creates the edge `tour[i] → tour[j]` by
/// removing the edges leaving both positions.
///
/// Same move as [`intra_edge_exchange_delta`]`(i, j)`.
pub fn intra_edge_exchange_delta_next(
    matrix: &CostMatrix,
    tour: &[usize],
    i: usize,
    j: usize,
) -> f64 {
    intra_edge_exchange_delta(matrix, tour, i, j)
}

/// 2-opt delta anchored before `i`: creates the edge `tour[j] – tour[i]` by
/// removing the edges entering both positions.
///
/// Same move as [`intra_edge_exchange_delta`]`(i - 1, j - 1)`.
pub fn intra_edge_exchange_delta_prev(
    matrix: &CostMatrix,
    tour: &[usize],
    i: usize,
    j: usize,
) -> f64 {
    let n = tour.len();
    if edges_touch(i, j, n) {
        return 0.0;
    }
    let a = tour[i];
    let b = tour[j];
    let a_prev = tour[prev(i, n)];
    let b_prev = tour[prev(j, n)];
    matrix.get(b, a) + matrix.get(a_prev, b_prev) - matrix.get(a_prev, a) - matrix.get(b, b_prev)
}

/// Inter-route delta anchored after `i`: the successor of `tour[i]` is
/// replaced by `unselected[k]`, creating the edge `tour[i] → unselected[k]`.
///
/// Same move as [`inter_node_exchange_delta`]`(i + 1, k)`.
pub fn inter_node_exchange_delta_next(
    matrix: &CostMatrix,
    tour: &[usize],
    i: usize,
    unselected: &[usize],
    k: usize,
) -> f64 {
    let n = tour.len();
    let a = tour[i];
    let a_next = tour[next(i, n)];
    let a_next_next = tour[next(next(i, n), n)];
    let node = unselected[k];
    matrix.get(a, node) + matrix.get(node, a_next_next)
        - matrix.get(a, a_next)
        - matrix.get(a_next, a_next_next)
}

/// Inter-route delta anchored before `i`: the predecessor of `tour[i]` is
/// replaced by `unselected[k]`, creating the edge `unselected[k] → tour[i]`.
///
/// Same move as [`inter_node_exchange_delta`]`(i - 1, k)`.
pub fn inter_node_exchange_delta_prev(
    matrix: &CostMatrix,
    tour: &[usize],
    i: usize,
    unselected: &[usize],
    k: usize,
) -> f64 {
    let n = tour.len();
    let a = tour[i];
    let a_prev = tour[prev(i, n)];
    let a_prev_prev = tour[prev(prev(i, n), n)];
    let node = unselected[k];
    matrix.get(a_prev_prev, node) + matrix.get(node, a)
        - matrix.get(a_prev_prev, a_prev)
        - matrix.get(a_prev, a)
}

/// Whether the edges leaving positions `i` and `j` are the same edge or
/// share a node.
fn edges_touch(i: usize, j: usize, n: usize) -> bool {
    i == j || next(i, n) == j || next(j, n) == i
}
