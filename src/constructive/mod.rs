//! Constructive routines for starting solutions.
//!
//! - [`random_start`]: uniform random selection and order, O(n)

mod random;

pub use random::random_start;
