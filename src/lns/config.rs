//! LNS configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::local_search::Strategy;
use crate::moves::IntraMove;

/// Configuration for [`large_neighborhood_search`](super::large_neighborhood_search)
/// and [`LnsRunner`](super::LnsRunner).
///
/// # Examples
///
/// ```
/// use u_selective_tsp::lns::LnsConfig;
///
/// let config = LnsConfig::default().with_removal_fraction(0.2).with_seed(3);
/// assert!(config.validate().is_ok());
/// assert!(LnsConfig::default().with_removal_fraction(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LnsConfig {
    /// Wall-clock budget used by the runner to set the deadline.
    pub time_limit: Duration,
    /// Optional cap on destroy/repair iterations.
    pub max_iterations: Option<usize>,
    /// Fraction of the tour removed by each destroy step, in `[0, 1)`.
    pub removal_fraction: f64,
    /// Weight of regret against insertion cost in the default repair, in
    /// `[0, 1]`.
    pub regret_weight: f64,
    /// Descent strategy after each repair.
    pub strategy: Strategy,
    /// Intra-route family for the descent.
    pub intra_move: IntraMove,
    /// RNG seed; `None` draws one at random.
    pub seed: Option<u64>,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(1),
            max_iterations: None,
            removal_fraction: 0.3,
            regret_weight: 0.5,
            strategy: Strategy::Steepest,
            intra_move: IntraMove::EdgeExchange,
            seed: None,
        }
    }
}

impl LnsConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the cap on destroy/repair iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Sets the fraction of the tour each destroy step removes.
    pub fn with_removal_fraction(mut self, fraction: f64) -> Self {
        self.removal_fraction = fraction;
        self
    }

    /// Sets the regret weight of the default repair.
    pub fn with_regret_weight(mut self, weight: f64) -> Self {
        self.regret_weight = weight;
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

    /// Checks that both fractions are in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.removal_fraction) {
            return Err(SearchError::InvalidParameter {
                name: "removal_fraction",
                reason: format!("{} is outside [0, 1)", self.removal_fraction),
            });
        }
        if !(0.0..=1.0).contains(&self.regret_weight) {
            return Err(SearchError::InvalidParameter {
                name: "regret_weight",
                reason: format!("{} is outside [0, 1]", self.regret_weight),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LnsConfig::default();
        assert!((config.removal_fraction - 0.3).abs() < 1e-10);
        assert!((config.regret_weight - 0.5).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(LnsConfig::default().with_removal_fraction(1.0).validate().is_err());
        assert!(LnsConfig::default().with_removal_fraction(-0.1).validate().is_err());
        assert!(LnsConfig::default().with_removal_fraction(0.0).validate().is_ok());
        assert!(LnsConfig::default().with_regret_weight(1.0).validate().is_ok());
        assert!(LnsConfig::default().with_regret_weight(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: LnsConfig = serde_json::from_str(
            r#"{"removal_fraction": 0.25, "strategy": {"candidate_steepest": {"neighbors": 8}}}"#,
        )
        .expect("valid json");
        assert!((config.removal_fraction - 0.25).abs() < 1e-10);
        assert_eq!(config.strategy, Strategy::CandidateSteepest { neighbors: 8 });
        assert!((config.regret_weight - 0.5).abs() < 1e-10);
    }
}
