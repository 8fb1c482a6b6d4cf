//! Domain model types for the selective TSP.
//!
//! Nodes carry coordinates and a visitation cost, an instance ties nodes to
//! their cost matrix, and a solution pairs a closed tour with the set of
//! nodes left out of it.

mod instance;
mod node;
mod solution;

pub use instance::Instance;
pub use node::Node;
pub use solution::{Solution, MIN_TOUR_LEN};
