//! ILS configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::local_search::Strategy;
use crate::moves::IntraMove;

/// Which forced moves a perturbation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerturbationKind {
    /// Random 2-opt reversals.
    #[default]
    IntraEdge,
    /// Random exchanges with the unselected set.
    InterNode,
    /// Each step picks one of the two with equal probability.
    Mixed,
}

/// Configuration for [`iterated_local_search`](super::iterated_local_search)
/// and [`IlsRunner`](super::IlsRunner).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_selective_tsp::ils::{IlsConfig, PerturbationKind};
///
/// let config = IlsConfig::default()
///     .with_time_limit(Duration::from_millis(200))
///     .with_perturbation(PerturbationKind::Mixed)
///     .with_seed(42);
/// assert_eq!(config.perturbation_strength, 10);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlsConfig {
    /// Wall-clock budget used by the runner to set the deadline.
    pub time_limit: Duration,
    /// Optional cap on outer iterations.
    pub max_iterations: Option<usize>,
    /// Forced moves per perturbation.
    pub perturbation_strength: usize,
    /// Kind of forced move.
    pub perturbation: PerturbationKind,
    /// Descent strategy for the inner local search.
    pub strategy: Strategy,
    /// Intra-route family for the inner local search.
    pub intra_move: IntraMove,
    /// RNG seed; `None` draws one at random.
    pub seed: Option<u64>,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(1),
            max_iterations: None,
            perturbation_strength: 10,
            perturbation: PerturbationKind::IntraEdge,
            strategy: Strategy::Steepest,
            intra_move: IntraMove::EdgeExchange,
            seed: None,
        }
    }
}

impl IlsConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the cap on outer iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Sets the number of forced moves per perturbation.
    pub fn with_perturbation_strength(mut self, strength: usize) -> Self {
        self.perturbation_strength = strength;
        self
    }

    /// Sets the kind of forced move.
    pub fn with_perturbation(mut self, kind: PerturbationKind) -> Self {
        self.perturbation = kind;
        self
    }

    /// Sets the inner descent strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the intra-route move family.
    pub fn with_intra_move(mut self, intra: IntraMove) -> Self {
        self.intra_move = intra;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects a perturbation that would never move the search.
    pub fn validate(&self) -> Result<()> {
        if self.perturbation_strength == 0 {
            return Err(SearchError::InvalidParameter {
                name: "perturbation_strength",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
