//! The ILS loop.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::distance::CostMatrix;
use crate::error::Result;
use crate::local_search::LocalSearch;
use crate::models::Solution;

use super::{perturb, IlsConfig};

/// Result of an ILS run.
#[derive(Debug, Clone, PartialEq)]
pub struct IlsOutcome {
    /// Best solution found.
    pub solution: Solution,
    /// Its score.
    pub score: f64,
    /// Outer iterations (perturbation plus descent) completed.
    pub iterations: usize,
    /// Descent scans summed over every inner search.
    pub inner_iterations: usize,
    /// Best score after each outer iteration; non-increasing.
    pub trajectory: Vec<f64>,
}

/// Runs iterated local search from `solution` until `deadline` or
/// `config.max_iterations`.
///
/// The input is first descended to a local optimum. Each iteration then
/// perturbs a copy of the best solution, descends it, and keeps it iff its
/// score is strictly lower. The deadline is checked between iterations, so
/// a run can overshoot it by one descent. A deadline already in the past
/// returns the input unchanged.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use u_selective_tsp::ils::{iterated_local_search, IlsConfig};
/// use u_selective_tsp::models::{Instance, Node};
///
/// let nodes = (0..20)
///     .map(|i| Node::new((i * 37 % 20) as f64, (i * 11 % 7) as f64, (i % 3) as f64))
///     .collect();
/// let inst = Instance::new(nodes);
/// let mut rng = u_numflow::random::create_rng(42);
/// let start = inst.random_start(&mut rng).unwrap();
///
/// let config = IlsConfig::default().with_max_iterations(20);
/// let deadline = Instant::now() + Duration::from_secs(10);
/// let out = iterated_local_search(start, inst.matrix(), &config, deadline, &mut rng).unwrap();
/// assert_eq!(out.iterations, 20);
/// assert!(out.trajectory.windows(2).all(|w| w[1] <= w[0]));
/// ```
pub fn iterated_local_search<R: Rng>(
    solution: Solution,
    matrix: &CostMatrix,
    config: &IlsConfig,
    deadline: Instant,
    rng: &mut R,
) -> Result<IlsOutcome> {
    config.validate()?;
    solution.check_searchable(matrix)?;

    let started = Instant::now();
    if started >= deadline {
        let score = solution.score(matrix);
        return Ok(IlsOutcome {
            solution,
            score,
            iterations: 0,
            inner_iterations: 0,
            trajectory: Vec::new(),
        });
    }

    let search = LocalSearch::new(matrix, config.strategy, config.intra_move);
    let mut best = solution;
    let first = search.run(&mut best, matrix, rng)?;
    let mut best_score = first.score;
    let mut inner_iterations = first.iterations;
    info!(
        event = "ils_start",
        score = best_score,
        perturbation = ?config.perturbation,
        strength = config.perturbation_strength,
    );

    let mut iterations = 0;
    let mut trajectory = Vec::new();
    while Instant::now() < deadline && config.max_iterations.is_none_or(|max| iterations < max) {
        let mut candidate = best.clone();
        perturb(&mut candidate, config.perturbation, config.perturbation_strength, rng);
        let outcome = search.run(&mut candidate, matrix, rng)?;
        inner_iterations += outcome.iterations;
        iterations += 1;

        if outcome.score < best_score {
            debug!(event = "new_best", iteration = iterations, score = outcome.score);
            best = candidate;
            best_score = outcome.score;
        }
        trajectory.push(best_score);
    }

    info!(
        event = "ils_end",
        iterations,
        inner_iterations,
        score = best_score,
        duration_ms = started.elapsed().as_millis() as u64,
    );
    Ok(IlsOutcome {
        solution: best,
        score: best_score,
        iterations,
        inner_iterations,
        trajectory,
    })
}
