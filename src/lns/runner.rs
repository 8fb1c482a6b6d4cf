//! The LNS loop and its self-seeding entry point.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};
use u_metaheur::alns::{DestroyOperator, RepairOperator};

use crate::constructive::random_start;
use crate::distance::CostMatrix;
use crate::error::Result;
use crate::local_search::LocalSearch;
use crate::models::Solution;

use super::{LnsConfig, SegmentRemoval, WeightedRegretInsertion};

/// Result of an LNS run.
#[derive(Debug, Clone, PartialEq)]
pub struct LnsOutcome {
    /// Best solution found.
    pub solution: Solution,
    /// Its score.
    pub score: f64,
    /// Destroy/repair/descent iterations completed.
    pub iterations: usize,
    /// Descent scans summed over every inner search.
    pub inner_iterations: usize,
    /// Best score after each iteration; non-increasing.
    pub trajectory: Vec<f64>,
}

/// Runs LNS from a descended random start of `solution_size` nodes.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use u_selective_tsp::lns::{large_neighborhood_search, LnsConfig, WeightedRegretInsertion};
/// use u_selective_tsp::models::{Instance, Node};
///
/// let nodes = (0..20)
///     .map(|i| Node::new((i * 37 % 20) as f64, (i * 11 % 7) as f64, (i % 3) as f64))
///     .collect();
/// let inst = Instance::new(nodes);
/// let repair = WeightedRegretInsertion::new(inst.matrix().clone(), inst.solution_size());
/// let config = LnsConfig::default().with_max_iterations(10);
/// let deadline = Instant::now() + Duration::from_secs(10);
/// let mut rng = u_numflow::random::create_rng(42);
///
/// let out = large_neighborhood_search(
///     inst.matrix(),
///     inst.solution_size(),
///     &repair,
///     &config,
///     deadline,
///     &mut rng,
/// )
/// .unwrap();
/// assert_eq!(out.solution.len(), 10);
/// assert_eq!(out.iterations, 10);
/// ```
pub fn large_neighborhood_search<P, R>(
    matrix: &CostMatrix,
    solution_size: usize,
    repair: &P,
    config: &LnsConfig,
    deadline: Instant,
    rng: &mut R,
) -> Result<LnsOutcome>
where
    P: RepairOperator<Solution>,
    R: Rng,
{
    config.validate()?;
    let search = LocalSearch::new(matrix, config.strategy, config.intra_move);
    let mut start = random_start(matrix.size(), solution_size, rng)?;
    search.run(&mut start, matrix, rng)?;
    run_from(start, matrix, &search, repair, config, deadline, rng)
}

/// Runs LNS from `solution` as given, without descending it first.
///
/// A deadline already in the past returns the input unchanged with zero
/// iterations. The deadline is checked between iterations.
pub fn large_neighborhood_search_from<P, R>(
    solution: Solution,
    matrix: &CostMatrix,
    repair: &P,
    config: &LnsConfig,
    deadline: Instant,
    rng: &mut R,
) -> Result<LnsOutcome>
where
    P: RepairOperator<Solution>,
    R: Rng,
{
    config.validate()?;
    let search = LocalSearch::new(matrix, config.strategy, config.intra_move);
    run_from(solution, matrix, &search, repair, config, deadline, rng)
}

fn run_from<P, R>(
    solution: Solution,
    matrix: &CostMatrix,
    search: &LocalSearch,
    repair: &P,
    config: &LnsConfig,
    deadline: Instant,
    rng: &mut R,
) -> Result<LnsOutcome>
where
    P: RepairOperator<Solution>,
    R: Rng,
{
    solution.check_searchable(matrix)?;
    let started = Instant::now();
    let mut best_score = solution.score(matrix);
    let mut best = solution;
    let mut iterations = 0;
    let mut inner_iterations = 0;
    let mut trajectory = Vec::new();
    if started >= deadline {
        return Ok(LnsOutcome {
            solution: best,
            score: best_score,
            iterations,
            inner_iterations,
            trajectory,
        });
    }

    info!(
        event = "lns_start",
        score = best_score,
        destroy = SegmentRemoval.name(),
        repair = repair.name(),
        removal_fraction = config.removal_fraction,
    );

    while Instant::now() < deadline && config.max_iterations.is_none_or(|max| iterations < max) {
        let destroyed = SegmentRemoval.destroy(&best, config.removal_fraction, rng);
        let mut candidate = repair.repair(&destroyed, rng);
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
        event = "lns_end",
        iterations,
        inner_iterations,
        score = best_score,
        duration_ms = started.elapsed().as_millis() as u64,
    );
    Ok(LnsOutcome {
        solution: best,
        score: best_score,
        iterations,
        inner_iterations,
        trajectory,
    })
}

/// Runs LNS with [`WeightedRegretInsertion`], a deadline of
/// `now + config.time_limit`, and an RNG seeded from `config.seed`.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::lns::{LnsConfig, LnsRunner};
/// use u_selective_tsp::models::{Instance, Node};
///
/// let nodes = (0..12).map(|i| Node::new(i as f64, (i % 2) as f64, 1.0)).collect();
/// let inst = Instance::new(nodes);
/// let config = LnsConfig::default().with_max_iterations(5).with_seed(42);
/// let out = LnsRunner::run(inst.matrix(), inst.solution_size(), &config).unwrap();
/// assert_eq!(out.solution.len(), 6);
/// ```
pub struct LnsRunner;

impl LnsRunner {
    pub fn run(matrix: &CostMatrix, solution_size: usize, config: &LnsConfig) -> Result<LnsOutcome> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = u_numflow::random::create_rng(seed);
        let deadline = Instant::now() + config.time_limit;
        let repair = WeightedRegretInsertion::new(matrix.clone(), solution_size)
            .with_regret_weight(config.regret_weight);
        large_neighborhood_search(matrix, solution_size, &repair, config, deadline, &mut rng)
    }
}
