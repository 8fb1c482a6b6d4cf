//! Candidate-edge steepest descent.
//!
//! Instead of scanning every pair of positions, each tour node `a` only
//! considers moves that introduce an edge between `a` and one of its
//! nearest neighbors `b`. When `b` is in the tour this is an intra-route
//! move; when `b` is unselected it is an inter-route exchange replacing
//! the tour node next to `a`. Both sides of `a` are tried.
//!
//! # Complexity
//!
//! O(n · k) per scan for candidate lists of length `k`, plus O(n) to index
//! the current positions.

use crate::distance::{CandidateLists, CostMatrix};
use crate::models::Solution;
use crate::moves::{Anchor, IntraMove, Move, IMPROVEMENT_EPS};

const ABSENT: usize = usize::MAX;

/// Best improving candidate move, or `None` if no candidate move improves.
pub(super) fn best_move(
    solution: &Solution,
    matrix: &CostMatrix,
    intra: IntraMove,
    candidates: &CandidateLists,
) -> Option<Move> {
    let tour = solution.tour();
    let unselected = solution.unselected();
    let n = tour.len();

    let mut tour_pos = vec![ABSENT; matrix.size()];
    for (i, &node) in tour.iter().enumerate() {
        tour_pos[node] = i;
    }
    let mut slot_of = vec![ABSENT; matrix.size()];
    for (k, &node) in unselected.iter().enumerate() {
        slot_of[node] = k;
    }

    let mut best: Option<Move> = None;
    let mut best_delta = -IMPROVEMENT_EPS;
    for (i, &a) in tour.iter().enumerate() {
        for &b in candidates.neighbors(a) {
            for anchor in Anchor::BOTH {
                let (mv, delta) = if tour_pos[b] != ABSENT {
                    let j = tour_pos[b];
                    match intra {
                        IntraMove::EdgeExchange => (
                            anchor.intra_edge(i, j, n),
                            anchor.intra_edge_delta(matrix, tour, i, j),
                        ),
                        IntraMove::NodeExchange => {
                            let mv = anchor.intra_node(i, j, n);
                            (mv, mv.delta(matrix, solution))
                        }
                    }
                } else if slot_of[b] != ABSENT {
                    let k = slot_of[b];
                    (
                        anchor.inter_node(i, k, n),
                        anchor.inter_node_delta(matrix, tour, i, unselected, k),
                    )
                } else {
                    continue;
                };
                if delta < best_delta {
                    best_delta = delta;
                    best = Some(mv);
                }
            }
        }
    }
    best
}
