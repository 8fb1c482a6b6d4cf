//! Neighborhood moves on a selective tour.
//!
//! Three move types are defined on a [`Solution`]:
//!
//! - **Intra-route node exchange**: swap the nodes at two tour positions.
//! - **Intra-route edge exchange** (2-opt): remove two tour edges and
//!   reconnect by reversing the segment between them.
//! - **Inter-route node exchange**: replace a tour node with an unselected
//!   one.
//!
//! [`delta`] scores a move in O(1) without applying it; [`apply`] performs
//! it in place. A move counts as improving only if its delta is below
//! `-IMPROVEMENT_EPS`.

pub mod apply;
pub mod delta;

use serde::{Deserialize, Serialize};

use crate::distance::CostMatrix;
use crate::models::Solution;

/// A move must lower the score by more than this to count as improving.
pub const IMPROVEMENT_EPS: f64 = 1e-10;

/// Which intra-route move family a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntraMove {
    /// Swap the nodes at two positions.
    NodeExchange,
    /// 2-opt segment reversal.
    #[default]
    EdgeExchange,
}

/// A single move, identified by tour positions and unselected slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Swap the nodes at positions `i` and `j`.
    IntraNode { i: usize, j: usize },
    /// Remove the edges leaving positions `i` and `j`, reversing
    /// `i+1 ..= j`.
    IntraEdge { i: usize, j: usize },
    /// Replace the node at `position` with the unselected node in `slot`.
    InterNode { position: usize, slot: usize },
}

impl Move {
    /// Score change this move would cause on `solution`.
    pub fn delta(&self, matrix: &CostMatrix, solution: &Solution) -> f64 {
        let tour = solution.tour();
        match *self {
            Move::IntraNode { i, j } => delta::intra_node_exchange_delta(matrix, tour, i, j),
            Move::IntraEdge { i, j } => delta::intra_edge_exchange_delta(matrix, tour, i, j),
            Move::InterNode { position, slot } => delta::inter_node_exchange_delta(
                matrix,
                tour,
                position,
                solution.unselected(),
                slot,
            ),
        }
    }

    /// Applies this move to `solution` in place.
    pub fn apply(&self, solution: &mut Solution) {
        let (tour, unselected) = solution.parts_mut();
        match *self {
            Move::IntraNode { i, j } => apply::intra_node_exchange(tour, i, j),
            Move::IntraEdge { i, j } => apply::intra_edge_exchange(tour, i, j),
            Move::InterNode { position, slot } => {
                apply::inter_node_exchange(tour, position, unselected, slot)
            }
        }
    }

    /// Returns `true` for moves that keep the selected set unchanged.
    pub fn is_intra(&self) -> bool {
        !matches!(self, Move::InterNode { .. })
    }
}

/// Side of a tour position on which a candidate edge is created.
///
/// Candidate-driven searches look for moves that introduce the edge between
/// a tour node and one of its nearest neighbors. The neighbor can end up
/// either right after the node or right before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The new edge enters `tour[i]`.
    Prev,
    /// The new edge leaves `tour[i]`.
    Next,
}

impl Anchor {
    /// Both anchors, in scan order.
    pub const BOTH: [Anchor; 2] = [Anchor::Next, Anchor::Prev];

    /// 2-opt move creating the edge between positions `i` and `j` on this
    /// side. `n` is the tour length.
    pub fn intra_edge(self, i: usize, j: usize, n: usize) -> Move {
        match self {
            Anchor::Next => Move::IntraEdge { i, j },
            Anchor::Prev => Move::IntraEdge {
                i: prev(i, n),
                j: prev(j, n),
            },
        }
    }

    /// Node swap that brings the node at `j` next to position `i` on this
    /// side.
    pub fn intra_node(self, i: usize, j: usize, n: usize) -> Move {
        match self {
            Anchor::Next => Move::IntraNode { i: next(i, n), j },
            Anchor::Prev => Move::IntraNode { i: prev(i, n), j },
        }
    }

    /// Inter-route move placing the unselected node in `slot` next to
    /// position `i` on this side.
    pub fn inter_node(self, i: usize, slot: usize, n: usize) -> Move {
        let position = match self {
            Anchor::Next => next(i, n),
            Anchor::Prev => prev(i, n),
        };
        Move::InterNode { position, slot }
    }

    /// Anchored 2-opt delta; equals the delta of [`Anchor::intra_edge`].
    pub fn intra_edge_delta(self, matrix: &CostMatrix, tour: &[usize], i: usize, j: usize) -> f64 {
        match self {
            Anchor::Next => delta::intra_edge_exchange_delta_next(matrix, tour, i, j),
            Anchor::Prev => delta::intra_edge_exchange_delta_prev(matrix, tour, i, j),
        }
    }

    /// Anchored inter-route delta; equals the delta of
    /// [`Anchor::inter_node`].
    pub fn inter_node_delta(
        self,
        matrix: &CostMatrix,
        tour: &[usize],
        i: usize,
        unselected: &[usize],
        slot: usize,
    ) -> f64 {
        match self {
            Anchor::Next => delta::inter_node_exchange_delta_next(matrix, tour, i, unselected, slot),
            Anchor::Prev => delta::inter_node_exchange_delta_prev(matrix, tour, i, unselected, slot),
        }
    }
}

/// All intra-route moves of one family on a tour of length `n`.
///
/// Node exchanges are the pairs `i < j`; edge exchanges skip pairs of
/// adjacent edges, which are no-ops.
pub fn intra_moves(n: usize, intra: IntraMove) -> impl Iterator<Item = Move> {
    let gap = match intra {
        IntraMove::NodeExchange => 1,
        IntraMove::EdgeExchange => 2,
    };
    (0..n).flat_map(move |i| {
        (i + gap..n).map(move |j| match intra {
            IntraMove::NodeExchange => Move::IntraNode { i, j },
            IntraMove::EdgeExchange => Move::IntraEdge { i, j },
        })
    })
}

/// All inter-route moves for a tour of length `n` and `slots` unselected
/// nodes.
pub fn inter_moves(n: usize, slots: usize) -> impl Iterator<Item = Move> {
    (0..n).flat_map(move |position| (0..slots).map(move |slot| Move::InterNode { position, slot }))
}

#[inline]
pub(crate) fn next(i: usize, n: usize) -> usize {
    if i + 1 == n {
        0
    } else {
        i + 1
    }
}

#[inline]
pub(crate) fn prev(i: usize, n: usize) -> usize {
    if i == 0 {
        n - 1
    } else {
        i - 1
    }
}
