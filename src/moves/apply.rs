//! In-place move application.

use super::{next, prev};

/// Swaps the nodes at tour positions `i` and `j`.
pub fn intra_node_exchange(tour: &mut [usize], i: usize, j: usize) {
    tour.swap(i, j);
}

/// Applies the 2-opt move on the edges leaving positions `i` and `j`:
/// reverses positions `i+1 ..= j`, walking cyclically.
///
/// The reversed segment may wrap around the end of the tour. When the
/// edges touch or coincide the tour is left unchanged.
pub fn intra_edge_exchange(tour: &mut [usize], i: usize, j: usize) {
    let n = tour.len();
    if n == 0 {
        return;
    }
    let len = (j + n - i) % n;
    let mut left = next(i, n);
    let mut right = j;
    for _ in 0..len / 2 {
        tour.swap(left, right);
        left = next(left, n);
        right = prev(right, n);
    }
}

/// Replaces the node at tour position `i` with `unselected[k]`; the
/// displaced node takes slot `k`.
pub fn inter_node_exchange(tour: &mut [usize], i: usize, unselected: &mut [usize], k: usize) {
    std::mem::swap(&mut tour[i], &mut unselected[k]);
}
