//! Node-identity moves and the min-delta priority queue holding them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::distance::CostMatrix;
use crate::moves::IMPROVEMENT_EPS;

/// A move described by the nodes it touches rather than their positions.
///
/// Positions shift as other moves are applied; node identities do not, so
/// a queued move stays meaningful until one of its edges disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LazyMove {
    /// Remove edges `a – a_next` and `b – b_next`, add `a – b` and
    /// `a_next – b_next`.
    EdgeExchange {
        a: usize,
        a_next: usize,
        b: usize,
        b_next: usize,
    },
    /// Replace `node`, currently between `prev` and `next`, with the
    /// unselected node `incoming`.
    InterNode {
        prev: usize,
        node: usize,
        next: usize,
        incoming: usize,
    },
}

impl LazyMove {
    /// Score change of this move when its edges are oriented as written.
    pub fn delta(&self, matrix: &CostMatrix) -> f64 {
        let d = |x: usize, y: usize| matrix.get(x, y);
        match *self {
            LazyMove::EdgeExchange {
                a,
                a_next,
                b,
                b_next,
            } => d(b_next, a_next) + d(a, b) - d(a, a_next) - d(b_next, b),
            LazyMove::InterNode {
                prev,
                node,
                next,
                incoming,
            } => d(prev, incoming) + d(incoming, next) - d(prev, node) - d(node, next),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct QueuedMove {
    delta: f64,
    mv: LazyMove,
}

// Reversed so that `BinaryHeap` pops the most negative delta first.
impl Ord for QueuedMove {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .delta
            .total_cmp(&self.delta)
            .then_with(|| other.mv.cmp(&self.mv))
    }
}

impl PartialOrd for QueuedMove {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedMove {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedMove {}

/// Priority queue of improving moves, most improving first.
#[derive(Debug, Default)]
pub(super) struct MoveQueue {
    heap: BinaryHeap<QueuedMove>,
    evaluations: usize,
}

impl MoveQueue {
    /// Evaluates `mv` and queues it if it improves.
    pub fn offer(&mut self, matrix: &CostMatrix, mv: LazyMove) {
        self.evaluations += 1;
        let delta = mv.delta(matrix);
        if delta < -IMPROVEMENT_EPS {
            self.push(mv, delta);
        }
    }

    /// Queues `mv` with an already known delta.
    pub fn push(&mut self, mv: LazyMove, delta: f64) {
        self.heap.push(QueuedMove { delta, mv });
    }

    pub fn pop(&mut self) -> Option<(LazyMove, f64)> {
        self.heap.pop().map(|q| (q.mv, q.delta))
    }

    /// Records a delta computed outside [`MoveQueue::offer`].
    pub fn count_evaluation(&mut self) {
        self.evaluations += 1;
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: usize, b: usize) -> LazyMove {
        LazyMove::EdgeExchange {
            a,
            a_next: a + 1,
            b,
            b_next: b + 1,
        }
    }

    #[test]
    fn test_pops_most_negative_first() {
        let mut queue = MoveQueue::default();
        queue.push(edge(0, 2), -1.0);
        queue.push(edge(0, 3), -5.0);
        queue.push(edge(1, 3), -3.0);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some((edge(0, 3), -5.0)));
        assert_eq!(queue.pop(), Some((edge(1, 3), -3.0)));
        assert_eq!(queue.pop(), Some((edge(0, 2), -1.0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_offer_skips_non_improving() {
        let rows = vec![
            vec![0.0, 1.0, 9.0, 9.0],
            vec![1.0, 0.0, 9.0, 9.0],
            vec![9.0, 9.0, 0.0, 1.0],
            vec![9.0, 9.0, 1.0, 0.0],
        ];
        let dm = CostMatrix::from_rows(&rows).expect("square");
        let mut queue = MoveQueue::default();
        // Removing the two cheap edges 0-1, 2-3 for two expensive ones.
        queue.offer(
            &dm,
            LazyMove::EdgeExchange {
                a: 0,
                a_next: 1,
                b: 2,
                b_next: 3,
            },
        );
        assert_eq!(queue.len(), 0);
        // The reverse trade improves.
        queue.offer(
            &dm,
            LazyMove::EdgeExchange {
                a: 0,
                a_next: 2,
                b: 1,
                b_next: 3,
            },
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.evaluations(), 2);
    }

    #[test]
    fn test_inter_node_delta() {
        let rows = vec![
            vec![0.0, 2.0, 3.0, 1.0],
            vec![2.0, 0.0, 4.0, 1.0],
            vec![3.0, 4.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0, 0.0],
        ];
        let dm = CostMatrix::from_rows(&rows).expect("square");
        let mv = LazyMove::InterNode {
            prev: 0,
            node: 1,
            next: 2,
            incoming: 3,
        };
        // 1 + 1 - 2 - 4
        assert_eq!(mv.delta(&dm), -4.0);
    }
}
