//! Lazy incremental local search.
//!
//! Steepest descent re-evaluates the whole neighborhood after every move,
//! although a move only changes a handful of edges. The lazy search
//! evaluates everything once, keeps the improving moves in a priority
//! queue keyed by delta, and after each applied move evaluates only the
//! moves that involve something the move created.
//!
//! Queued moves are stored by node identity ([`LazyMove`]) and resolved
//! against two indices when popped:
//!
//! - [`EdgeIndex`]: tour position of every directed tour edge,
//! - [`UnselectedIndex`]: slot of every unselected node.
//!
//! A popped move falls in one of three cases. It is *stale* when one of
//! its removed edges no longer exists (in either direction) or its
//! incoming node has been selected; it is dropped. It is *deferred* when
//! both edges exist but with opposite relative direction, so the 2-opt
//! would split the tour; it is put aside and re-queued after the next
//! applied move, since a later reversal may flip one edge without creating
//! any new one. Otherwise it is *applicable*: its positions are read from
//! the indices and its delta is recomputed on the positional move before
//! it is applied.
//!
//! The move universe is 2-opt plus inter-route exchange. Both indices are
//! updated for the touched edges only.
//!
//! Delta evaluation assumes the distance part of the cost matrix is
//! symmetric, as it is for matrices built from coordinates. For other
//! matrices the recomputed positional delta still guards every applied
//! move, so the score never increases.

mod index;
mod queue;

pub use index::{EdgeIndex, UnselectedIndex};
pub use queue::LazyMove;

use tracing::{debug, trace};

use crate::distance::CostMatrix;
use crate::error::Result;
use crate::models::Solution;
use crate::moves::{next, prev, Move, IMPROVEMENT_EPS};

use queue::MoveQueue;

/// Result of a lazy descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LazyOutcome {
    /// Moves applied.
    pub iterations: usize,
    /// Delta evaluations, including the initial scan.
    pub evaluations: usize,
    /// Queued moves discarded because their edges or incoming node were gone.
    pub stale: usize,
    /// Final score.
    pub score: f64,
}

enum Resolution {
    Stale,
    Deferred,
    Applicable(Move),
}

/// A lazy descent in progress over a borrowed solution.
///
/// Most callers want [`lazy_descend`]; the stepwise interface exists for
/// inspection between moves.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::local_search::LazySearch;
/// use u_selective_tsp::models::{Instance, Solution};
///
/// let inst = Instance::from_points(
///     &[(0.0, 0.0), (0.0, 2.0), (1.0, 0.0), (1.0, 2.0), (2.0, 0.0), (2.0, 2.0)],
///     &[-1.0, 0.0, 1.0, 2.0, 3.0, 1.0],
/// )
/// .unwrap();
/// let mut sol = Solution::new(vec![3, 4, 5], vec![0, 1, 2]);
/// let mut search = LazySearch::new(&mut sol, inst.matrix()).unwrap();
/// while search.step().is_some() {
///     assert!(search.is_consistent());
/// }
/// let outcome = search.finish();
/// assert_eq!(outcome.score, sol.score(inst.matrix()));
/// ```
pub struct LazySearch<'a> {
    matrix: &'a CostMatrix,
    solution: &'a mut Solution,
    edges: EdgeIndex,
    slots: UnselectedIndex,
    queue: MoveQueue,
    deferred: Vec<(LazyMove, f64)>,
    iterations: usize,
    stale: usize,
}

impl<'a> LazySearch<'a> {
    /// Validates `solution`, builds the indices and queues every improving
    /// move.
    pub fn new(solution: &'a mut Solution, matrix: &'a CostMatrix) -> Result<Self> {
        solution.check_searchable(matrix)?;
        let size = matrix.size();
        let edges = EdgeIndex::from_tour(solution.tour(), size);
        let slots = UnselectedIndex::from_unselected(solution.unselected(), size);
        let mut search = Self {
            matrix,
            solution,
            edges,
            slots,
            queue: MoveQueue::default(),
            deferred: Vec::new(),
            iterations: 0,
            stale: 0,
        };
        search.initial_scan();
        Ok(search)
    }

    /// The solution in its current state.
    pub fn solution(&self) -> &Solution {
        &*self.solution
    }

    /// Moves waiting in the queue.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Applies the next applicable improving move and returns it, or `None`
    /// once the queue is exhausted.
    pub fn step(&mut self) -> Option<Move> {
        while let Some((lazy, queued_delta)) = self.queue.pop() {
            let mv = match self.resolve(&lazy) {
                Resolution::Stale => {
                    self.stale += 1;
                    continue;
                }
                Resolution::Deferred => {
                    self.deferred.push((lazy, queued_delta));
                    continue;
                }
                Resolution::Applicable(mv) => mv,
            };

            let delta = mv.delta(self.matrix, &*self.solution);
            self.queue.count_evaluation();
            if (delta - queued_delta).abs() > IMPROVEMENT_EPS {
                if delta < -IMPROVEMENT_EPS {
                    self.queue.push(lazy, delta);
                }
                continue;
            }
            if delta >= -IMPROVEMENT_EPS {
                continue;
            }

            self.apply(mv);
            self.iterations += 1;
            trace!(event = "lazy_move", step = self.iterations, ?mv, delta);

            for (m, d) in self.deferred.drain(..) {
                self.queue.push(m, d);
            }
            return Some(mv);
        }
        None
    }

    /// Runs to exhaustion.
    pub fn run(mut self) -> LazyOutcome {
        while self.step().is_some() {}
        self.finish()
    }

    /// Stops the search and reports its counters.
    pub fn finish(self) -> LazyOutcome {
        let score = self.solution.score(self.matrix);
        let outcome = LazyOutcome {
            iterations: self.iterations,
            evaluations: self.queue.evaluations(),
            stale: self.stale,
            score,
        };
        debug!(
            event = "lazy_descent_end",
            iterations = outcome.iterations,
            evaluations = outcome.evaluations,
            stale = outcome.stale,
            score,
        );
        outcome
    }

    /// Returns `true` if both indices match a rebuild from the current
    /// solution.
    pub fn is_consistent(&self) -> bool {
        let size = self.matrix.size();
        self.edges == EdgeIndex::from_tour(self.solution.tour(), size)
            && self.slots == UnselectedIndex::from_unselected(self.solution.unselected(), size)
    }

    fn resolve(&self, lazy: &LazyMove) -> Resolution {
        match *lazy {
            LazyMove::EdgeExchange {
                a,
                a_next,
                b,
                b_next,
            } => {
                let forward_1 = self.edges.get(a, a_next);
                let reverse_1 = self.edges.get(a_next, a);
                let forward_2 = self.edges.get(b, b_next);
                let reverse_2 = self.edges.get(b_next, b);
                match (forward_1, reverse_1, forward_2, reverse_2) {
                    (None, None, _, _) | (_, _, None, None) => Resolution::Stale,
                    (Some(i), _, Some(j), _) => Resolution::Applicable(Move::IntraEdge { i, j }),
                    (_, Some(j), _, Some(i)) => Resolution::Applicable(Move::IntraEdge { i, j }),
                    _ => Resolution::Deferred,
                }
            }
            LazyMove::InterNode {
                prev,
                node,
                next,
                incoming,
            } => {
                let Some(slot) = self.slots.get(incoming) else {
                    return Resolution::Stale;
                };
                let forward = self.edges.get(prev, node).and(self.edges.get(node, next));
                let backward = self.edges.get(next, node).and(self.edges.get(node, prev));
                match forward.or(backward) {
                    Some(position) => Resolution::Applicable(Move::InterNode { position, slot }),
                    None => Resolution::Stale,
                }
            }
        }
    }

    fn apply(&mut self, mv: Move) {
        let n = self.solution.len();
        match mv {
            Move::IntraEdge { i, j } => {
                let span = (j + n - i) % n + 1;
                self.clear_edges(i, span);
                mv.apply(self.solution);
                self.index_edges(i, span);

                self.offer_edge_moves(i);
                self.offer_edge_moves(j);
                for p in [i, next(i, n), j, next(j, n)] {
                    self.offer_triple(p);
                }
            }
            Move::InterNode { position, slot } => {
                let before = prev(position, n);
                let removed = self.solution.tour()[position];
                let incoming = self.solution.unselected()[slot];
                self.clear_edges(before, 2);
                mv.apply(self.solution);
                self.index_edges(before, 2);
                self.slots.clear(incoming);
                self.slots.set(removed, slot);

                self.offer_edge_moves(before);
                self.offer_edge_moves(position);
                for p in [before, position, next(position, n)] {
                    self.offer_triple(p);
                }
                self.offer_incoming(removed);
            }
            Move::IntraNode { .. } => {
                // Outside the lazy move universe; rebuild the edge index.
                mv.apply(self.solution);
                self.edges = EdgeIndex::from_tour(self.solution.tour(), self.matrix.size());
            }
        }
    }

    /// Forgets `count` consecutive tour edges starting at position `start`.
    fn clear_edges(&mut self, start: usize, count: usize) {
        let tour = self.solution.tour();
        let n = tour.len();
        for k in 0..count {
            let p = (start + k) % n;
            self.edges.clear(tour[p], tour[next(p, n)]);
        }
    }

    /// Records `count` consecutive tour edges starting at position `start`.
    fn index_edges(&mut self, start: usize, count: usize) {
        let tour = self.solution.tour();
        let n = tour.len();
        for k in 0..count {
            let p = (start + k) % n;
            self.edges.set(tour[p], tour[next(p, n)], p);
        }
    }

    fn initial_scan(&mut self) {
        let tour = self.solution.tour();
        let n = tour.len();
        for i in 0..n {
            for j in i + 2..n {
                if next(j, n) == i {
                    continue;
                }
                offer_edge_pair(&mut self.queue, self.matrix, tour, i, j);
            }
        }
        for p in 0..n {
            self.offer_triple(p);
        }
    }

    /// Queues 2-opt moves pairing the edge at position `p` with every edge
    /// it shares no node with.
    fn offer_edge_moves(&mut self, p: usize) {
        let tour = self.solution.tour();
        let n = tour.len();
        for q in 0..n {
            if q == p || next(q, n) == p || next(p, n) == q {
                continue;
            }
            offer_edge_pair(&mut self.queue, self.matrix, tour, p, q);
        }
    }

    /// Queues exchanges of the node at position `p` with every unselected
    /// node.
    fn offer_triple(&mut self, p: usize) {
        let tour = self.solution.tour();
        let n = tour.len();
        let (prev, node, next) = (tour[prev(p, n)], tour[p], tour[next(p, n)]);
        for &incoming in self.solution.unselected() {
            self.queue.offer(
                self.matrix,
                LazyMove::InterNode {
                    prev,
                    node,
                    next,
                    incoming,
                },
            );
        }
    }

    /// Queues exchanges bringing `incoming` into every tour position.
    fn offer_incoming(&mut self, incoming: usize) {
        let tour = self.solution.tour();
        let n = tour.len();
        for p in 0..n {
            self.queue.offer(
                self.matrix,
                LazyMove::InterNode {
                    prev: tour[prev(p, n)],
                    node: tour[p],
                    next: tour[next(p, n)],
                    incoming,
                },
            );
        }
    }
}

/// Queues both reconnections of the non-adjacent edges at positions `p`
/// and `q`.
fn offer_edge_pair(queue: &mut MoveQueue, matrix: &CostMatrix, tour: &[usize], p: usize, q: usize) {
    let n = tour.len();
    let (a, a_next) = (tour[p], tour[next(p, n)]);
    let (b, b_next) = (tour[q], tour[next(q, n)]);
    queue.offer(
        matrix,
        LazyMove::EdgeExchange {
            a,
            a_next,
            b,
            b_next,
        },
    );
    queue.offer(
        matrix,
        LazyMove::EdgeExchange {
            a,
            a_next,
            b: b_next,
            b_next: b,
        },
    );
}

/// Descends `solution` in place with the lazy incremental search.
///
/// Fails before touching the solution under the same preconditions as
/// [`descend`](super::descend).
pub fn lazy_descend(solution: &mut Solution, matrix: &CostMatrix) -> Result<LazyOutcome> {
    Ok(LazySearch::new(solution, matrix)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::is_local_optimum;
    use crate::models::Node;
    use crate::moves::IntraMove;

    fn scattered(n: usize, seed: u64) -> CostMatrix {
        use rand::Rng;
        let mut rng = u_numflow::random::create_rng(seed);
        let nodes: Vec<Node> = (0..n)
            .map(|_| {
                Node::new(
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..30.0),
                )
            })
            .collect();
        CostMatrix::from_nodes(&nodes)
    }

    #[test]
    fn test_lazy_reaches_full_scan_optimum() {
        for seed in 0..5 {
            let dm = scattered(20, seed);
            let mut sol = Solution::new((0..10).collect(), (10..20).collect());
            let before = sol.score(&dm);
            let out = lazy_descend(&mut sol, &dm).expect("valid");
            assert!(out.score <= before);
            assert!((out.score - sol.score(&dm)).abs() < 1e-9);
            assert!(sol.validate(20).is_ok());
            assert!(is_local_optimum(&sol, &dm, IntraMove::EdgeExchange), "seed {seed}");
        }
    }

    #[test]
    fn test_indices_consistent_after_every_move() {
        let dm = scattered(16, 7);
        let mut sol = Solution::new(vec![0, 5, 10, 15, 3, 8, 13, 2], vec![1, 4, 6, 7, 9, 11, 12, 14]);
        let mut search = LazySearch::new(&mut sol, &dm).expect("valid");
        assert!(search.is_consistent());
        let mut last = search.solution().score(&dm);
        while search.step().is_some() {
            assert!(search.is_consistent());
            let score = search.solution().score(&dm);
            assert!(score < last);
            last = score;
        }
        assert_eq!(search.queued(), 0);
    }

    #[test]
    fn test_lazy_on_local_optimum_applies_nothing() {
        let nodes: Vec<Node> = (0..6).map(|i| Node::new(i as f64, 0.0, 0.0)).collect();
        let dm = CostMatrix::from_nodes(&nodes);
        let mut sol = Solution::new(vec![0, 1, 2], vec![3, 4, 5]);
        let out = lazy_descend(&mut sol, &dm).expect("valid");
        assert_eq!(out.iterations, 0);
        assert_eq!(sol.tour(), &[0, 1, 2]);
    }

    #[test]
    fn test_lazy_rejects_short_tour() {
        let dm = scattered(4, 1);
        let mut sol = Solution::new(vec![0, 1], vec![2, 3]);
        assert!(lazy_descend(&mut sol, &dm).is_err());
    }

    #[test]
    fn test_stale_move_dropped() {
        let dm = scattered(8, 3);
        let mut sol = Solution::new(vec![0, 1, 2, 3], vec![4, 5, 6, 7]);
        let search = LazySearch::new(&mut sol, &dm).expect("valid");
        // 0 – 2 is not a tour edge in either direction.
        let missing = LazyMove::EdgeExchange {
            a: 0,
            a_next: 2,
            b: 1,
            b_next: 3,
        };
        assert!(matches!(search.resolve(&missing), Resolution::Stale));
        let selected = LazyMove::InterNode {
            prev: 0,
            node: 1,
            next: 2,
            incoming: 3,
        };
        assert!(matches!(search.resolve(&selected), Resolution::Stale));
    }

    #[test]
    fn test_resolve_orientations() {
        let dm = scattered(8, 3);
        let mut sol = Solution::new(vec![0, 1, 2, 3, 4, 5], vec![6, 7]);
        let search = LazySearch::new(&mut sol, &dm).expect("valid");

        let forward = LazyMove::EdgeExchange {
            a: 0,
            a_next: 1,
            b: 3,
            b_next: 4,
        };
        assert!(matches!(
            search.resolve(&forward),
            Resolution::Applicable(Move::IntraEdge { i: 0, j: 3 })
        ));

        let backward = LazyMove::EdgeExchange {
            a: 1,
            a_next: 0,
            b: 4,
            b_next: 3,
        };
        assert!(matches!(
            search.resolve(&backward),
            Resolution::Applicable(Move::IntraEdge { i: 3, j: 0 })
        ));

        let crossed = LazyMove::EdgeExchange {
            a: 0,
            a_next: 1,
            b: 4,
            b_next: 3,
        };
        assert!(matches!(search.resolve(&crossed), Resolution::Deferred));

        let reversed_triple = LazyMove::InterNode {
            prev: 3,
            node: 2,
            next: 1,
            incoming: 7,
        };
        assert!(matches!(
            search.resolve(&reversed_triple),
            Resolution::Applicable(Move::InterNode { position: 2, slot: 1 })
        ));
    }
}
