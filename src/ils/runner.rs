//! Self-seeding ILS entry point.

use std::time::Instant;

use crate::distance::CostMatrix;
use crate::error::Result;
use crate::models::Solution;

use super::{iterated_local_search, IlsConfig, IlsOutcome};

/// Runs ILS with a deadline of `now + config.time_limit` and an RNG seeded
/// from `config.seed`.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::ils::{IlsConfig, IlsRunner};
/// use u_selective_tsp::models::{Instance, Solution};
///
/// let inst = Instance::from_points(
///     &[(0.0, 0.0), (0.0, 2.0), (1.0, 0.0), (1.0, 2.0), (2.0, 0.0), (2.0, 2.0)],
///     &[-1.0, 0.0, 1.0, 2.0, 3.0, 1.0],
/// )
/// .unwrap();
/// let start = Solution::new(vec![3, 4, 5], vec![0, 1, 2]);
/// let config = IlsConfig::default().with_max_iterations(5).with_seed(42);
/// let out = IlsRunner::run(start, inst.matrix(), &config).unwrap();
/// // The start scores 11; replacing node 4 with node 2 alone gains 2.
/// assert!(out.score < 11.0);
/// ```
pub struct IlsRunner;

impl IlsRunner {
    pub fn run(solution: Solution, matrix: &CostMatrix, config: &IlsConfig) -> Result<IlsOutcome> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = u_numflow::random::create_rng(seed);
        let deadline = Instant::now() + config.time_limit;
        iterated_local_search(solution, matrix, config, deadline, &mut rng)
    }
}
