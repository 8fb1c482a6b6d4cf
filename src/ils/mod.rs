//! Iterated local search.
//!
//! Alternates perturbation and descent from the best solution found so far,
//! accepting a new solution only when it is strictly better.
//!
//! - [`IlsConfig`]: budget, perturbation and inner descent settings
//! - [`iterated_local_search`]: the loop, against an explicit deadline
//! - [`IlsRunner`]: convenience entry point seeding its own RNG
//!
//! # Reference
//!
//! Lourenço, H.R., Martin, O.C. & Stützle, T. (2003). "Iterated Local
//! Search", *Handbook of Metaheuristics*, 320-353.

mod config;
mod perturb;
mod runner;
mod search;

pub use config::{IlsConfig, PerturbationKind};
pub use perturb::perturb;
pub use runner::IlsRunner;
pub use search::{iterated_local_search, IlsOutcome};
