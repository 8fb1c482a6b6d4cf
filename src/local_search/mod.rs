//! Local search descents over the selective-tour neighborhoods.
//!
//! - [`Strategy::Steepest`]: evaluate every move, apply the best
//! - [`Strategy::Greedy`]: evaluate moves in random order, apply the first
//!   improving one
//! - [`Strategy::CandidateSteepest`]: steepest over moves that introduce an
//!   edge to one of a node's nearest neighbors
//! - [`lazy`]: incremental steepest-like search driven by a priority queue
//! - [`multi_start`]: repeated random start plus descent
//!
//! Every descent combines one intra-route family ([`IntraMove`]) with the
//! inter-route exchange, and stops at the first scan that finds no move
//! with delta below `-IMPROVEMENT_EPS`.

mod candidate;
mod greedy;
pub mod lazy;
mod multi_start;
mod steepest;

pub use lazy::{lazy_descend, LazyMove, LazyOutcome, LazySearch};
pub use multi_start::{multi_start_local_search, MultiStartOutcome};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::{CandidateLists, CostMatrix};
use crate::error::{Result, SearchError};
use crate::models::Solution;
use crate::moves::{IntraMove, Move};

/// How a descent picks the move to apply in each scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Best move over the full neighborhood.
    #[default]
    Steepest,
    /// First improving move in a random order.
    Greedy,
    /// Best move among those creating an edge to one of the `neighbors`
    /// cheapest successors of a tour node.
    CandidateSteepest {
        /// Candidate list length per node.
        neighbors: usize,
    },
}

/// Result of a single descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentOutcome {
    /// Neighborhood scans performed, including the final one that found no
    /// improving move.
    pub iterations: usize,
    /// Moves applied.
    pub moves_applied: usize,
    /// Score of the local optimum.
    pub score: f64,
}

/// A configured descent, reusable across many solutions of one instance.
///
/// Candidate lists are computed once at construction, so drivers that
/// descend repeatedly (ILS, LNS, multi-start) pay for them only once.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::local_search::{LocalSearch, Strategy};
/// use u_selective_tsp::models::{Instance, Solution};
/// use u_selective_tsp::moves::IntraMove;
///
/// let inst = Instance::from_points(
///     &[(0.0, 0.0), (0.0, 2.0), (1.0, 0.0), (1.0, 2.0), (2.0, 0.0), (2.0, 2.0)],
///     &[-1.0, 0.0, 1.0, 2.0, 3.0, 1.0],
/// )
/// .unwrap();
/// let search = LocalSearch::new(inst.matrix(), Strategy::Steepest, IntraMove::EdgeExchange);
///
/// let mut sol = Solution::new(vec![3, 4, 5], vec![0, 1, 2]);
/// let before = sol.score(inst.matrix());
/// let mut rng = u_numflow::random::create_rng(42);
/// let outcome = search.run(&mut sol, inst.matrix(), &mut rng).unwrap();
/// assert!(outcome.score < before);
/// assert_eq!(outcome.score, sol.score(inst.matrix()));
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch {
    strategy: Strategy,
    intra: IntraMove,
    candidates: Option<CandidateLists>,
}

impl LocalSearch {
    /// Prepares a descent for instances scored by `matrix`.
    pub fn new(matrix: &CostMatrix, strategy: Strategy, intra: IntraMove) -> Self {
        let candidates = match strategy {
            Strategy::CandidateSteepest { neighbors } => Some(CandidateLists::new(matrix, neighbors)),
            Strategy::Steepest | Strategy::Greedy => None,
        };
        Self {
            strategy,
            intra,
            candidates,
        }
    }

    /// Move selection strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Intra-route move family.
    pub fn intra(&self) -> IntraMove {
        self.intra
    }

    /// Descends `solution` to a local optimum in place.
    ///
    /// Fails before touching the solution if it does not partition the
    /// matrix's nodes, if its tour is shorter than three nodes, or if a
    /// candidate strategy asks for zero neighbors. `rng` is only consumed
    /// by [`Strategy::Greedy`].
    pub fn run<R: Rng>(
        &self,
        solution: &mut Solution,
        matrix: &CostMatrix,
        rng: &mut R,
    ) -> Result<DescentOutcome> {
        solution.check_searchable(matrix)?;
        if let Strategy::CandidateSteepest { neighbors: 0 } = self.strategy {
            return Err(SearchError::InvalidParameter {
                name: "neighbors",
                reason: "candidate lists must hold at least one node".to_string(),
            });
        }

        let mut iterations = 0;
        let mut moves_applied = 0;
        loop {
            iterations += 1;
            let found = self.find_move(solution, matrix, rng);
            match found {
                Some(mv) => {
                    mv.apply(solution);
                    moves_applied += 1;
                }
                None => break,
            }
        }

        let score = solution.score(matrix);
        debug!(
            event = "descent_end",
            strategy = ?self.strategy,
            iterations,
            moves_applied,
            score,
        );
        Ok(DescentOutcome {
            iterations,
            moves_applied,
            score,
        })
    }

    fn find_move<R: Rng>(&self, solution: &Solution, matrix: &CostMatrix, rng: &mut R) -> Option<Move> {
        match (&self.strategy, &self.candidates) {
            (Strategy::Greedy, _) => greedy::first_improving(solution, matrix, self.intra, rng),
            (Strategy::CandidateSteepest { .. }, Some(candidates)) => {
                candidate::best_move(solution, matrix, self.intra, candidates)
            }
            _ => steepest::best_move(solution, matrix, self.intra),
        }
    }
}

/// Descends `solution` to a local optimum with a one-off [`LocalSearch`].
///
/// # Examples
///
/// ```
/// use u_selective_tsp::local_search::{descend, Strategy};
/// use u_selective_tsp::models::{Instance, Solution};
/// use u_selective_tsp::moves::IntraMove;
///
/// let inst = Instance::from_points(
///     &[(0.0, 0.0), (0.0, 2.0), (1.0, 0.0), (1.0, 2.0), (2.0, 0.0), (2.0, 2.0)],
///     &[-1.0, 0.0, 1.0, 2.0, 3.0, 1.0],
/// )
/// .unwrap();
/// let mut sol = Solution::new(vec![0, 1, 2], vec![3, 4, 5]);
/// let mut rng = u_numflow::random::create_rng(7);
/// let outcome = descend(&mut sol, inst.matrix(), Strategy::Greedy, IntraMove::NodeExchange, &mut rng)
///     .unwrap();
/// assert!(outcome.iterations >= 1);
/// ```
pub fn descend<R: Rng>(
    solution: &mut Solution,
    matrix: &CostMatrix,
    strategy: Strategy,
    intra: IntraMove,
    rng: &mut R,
) -> Result<DescentOutcome> {
    LocalSearch::new(matrix, strategy, intra).run(solution, matrix, rng)
}

/// Returns `true` if no move of the given family, nor any inter-route
/// exchange, improves `solution`.
pub fn is_local_optimum(solution: &Solution, matrix: &CostMatrix, intra: IntraMove) -> bool {
    steepest::best_move(solution, matrix, intra).is_none()
}
