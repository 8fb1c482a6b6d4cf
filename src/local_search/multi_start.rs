//! Multi-start local search.
//!
//! Draws independent random starting solutions, descends each one, and
//! keeps the best local optimum. The baseline against which the
//! perturbation-based drivers are measured.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::constructive::random_start;
use crate::distance::CostMatrix;
use crate::error::{Result, SearchError};
use crate::models::Solution;

use super::LocalSearch;

/// Result of [`multi_start_local_search`].
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStartOutcome {
    /// Best local optimum found.
    pub best: Solution,
    /// Its score.
    pub best_score: f64,
    /// Descent scans summed over all starts.
    pub total_iterations: usize,
}

/// Runs `starts` random restarts of `search` and keeps the best result.
///
/// Returns [`SearchError::InvalidParameter`] if `starts` is zero.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::local_search::{multi_start_local_search, LocalSearch, Strategy};
/// use u_selective_tsp::models::Instance;
/// use u_selective_tsp::moves::IntraMove;
///
/// let inst = Instance::from_points(
///     &[(0.0, 0.0), (0.0, 2.0), (1.0, 0.0), (1.0, 2.0), (2.0, 0.0), (2.0, 2.0)],
///     &[-1.0, 0.0, 1.0, 2.0, 3.0, 1.0],
/// )
/// .unwrap();
/// let search = LocalSearch::new(inst.matrix(), Strategy::Steepest, IntraMove::EdgeExchange);
/// let mut rng = u_numflow::random::create_rng(42);
/// let out = multi_start_local_search(inst.matrix(), inst.solution_size(), 5, &search, &mut rng)
///     .unwrap();
/// assert_eq!(out.best.len(), 3);
/// assert_eq!(out.best_score, out.best.score(inst.matrix()));
/// ```
pub fn multi_start_local_search<R: Rng>(
    matrix: &CostMatrix,
    solution_size: usize,
    starts: usize,
    search: &LocalSearch,
    rng: &mut R,
) -> Result<MultiStartOutcome> {
    if starts == 0 {
        return Err(SearchError::InvalidParameter {
            name: "starts",
            reason: "at least one start is required".to_string(),
        });
    }
    let started = Instant::now();
    info!(event = "msls_start", starts, solution_size);

    let mut best = random_start(matrix.size(), solution_size, rng)?;
    let first = search.run(&mut best, matrix, rng)?;
    let mut best_score = first.score;
    let mut total_iterations = first.iterations;
    for start in 1..starts {
        let mut solution = random_start(matrix.size(), solution_size, rng)?;
        let outcome = search.run(&mut solution, matrix, rng)?;
        total_iterations += outcome.iterations;
        if outcome.score < best_score {
            debug!(event = "new_best", start, score = outcome.score);
            best = solution;
            best_score = outcome.score;
        }
    }

    info!(
        event = "msls_end",
        starts,
        total_iterations,
        score = best_score,
        duration_ms = started.elapsed().as_millis() as u64,
    );
    Ok(MultiStartOutcome {
        best,
        best_score,
        total_iterations,
    })
}
