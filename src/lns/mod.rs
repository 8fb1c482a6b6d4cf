//! Large neighborhood search.
//!
//! Each iteration destroys part of the best solution, repairs it back to
//! full size, descends to a local optimum, and keeps the result iff it is
//! strictly better.
//!
//! - [`SegmentRemoval`]: [`DestroyOperator`](u_metaheur::alns::DestroyOperator)
//!   removing one contiguous tour segment
//! - [`WeightedRegretInsertion`]: [`RepairOperator`](u_metaheur::alns::RepairOperator)
//!   re-inserting nodes by weighted 2-regret
//! - [`large_neighborhood_search`] / [`large_neighborhood_search_from`]: the
//!   loop, generic over the repair operator
//! - [`LnsRunner`]: self-seeding entry point with the default repair
//!
//! # Reference
//!
//! Shaw, P. (1998). "Using Constraint Programming and Local Search Methods
//! to Solve Vehicle Routing Problems", *CP-98*, LNCS 1520, 417-431.

mod config;
mod destroy;
mod repair;
mod runner;

pub use config::LnsConfig;
pub use destroy::SegmentRemoval;
pub use repair::WeightedRegretInsertion;
pub use runner::{large_neighborhood_search, large_neighborhood_search_from, LnsOutcome, LnsRunner};
