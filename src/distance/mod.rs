//! Cost matrix and candidate neighbor lists.
//!
//! Provides the dense node-to-node cost matrix (rounded Euclidean distance
//! plus the destination's visitation cost) and the k-nearest candidate
//! lists used by restricted descents.

mod candidates;
mod matrix;

pub use candidates::CandidateLists;
pub use matrix::CostMatrix;
