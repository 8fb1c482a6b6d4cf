//! # u-selective-tsp
//!
//! Local search for a selective traveling salesman problem with node costs:
//! exactly half of the nodes (rounded down) are visited, and a tour pays
//! its edge lengths plus the visitation cost of every node on it.
//!
//! ## Modules
//!
//! - [`models`]: Domain types (Node, Solution, Instance)
//! - [`distance`]: Cost matrix with node costs baked in, candidate lists
//! - [`moves`]: Move types, O(1) delta formulas, in-place application
//! - [`local_search`]: Steepest, greedy, candidate-edge and lazy descent,
//!   multi-start search
//! - [`constructive`]: Random starting solutions
//! - [`ils`]: Iterated local search
//! - [`lns`]: Large neighborhood search with pluggable repair
//! - [`error`]: Error type shared by all entry points
//!
//! ## Example
//!
//! ```
//! use u_selective_tsp::ils::{IlsConfig, IlsRunner};
//! use u_selective_tsp::models::{Instance, Node};
//!
//! let nodes = (0..30)
//!     .map(|i| Node::new((i * 17 % 30) as f64, (i * 7 % 11) as f64, (i % 5) as f64))
//!     .collect();
//! let inst = Instance::new(nodes);
//! let mut rng = u_numflow::random::create_rng(42);
//! let start = inst.random_start(&mut rng).unwrap();
//!
//! let config = IlsConfig::default().with_max_iterations(25).with_seed(42);
//! let out = IlsRunner::run(start, inst.matrix(), &config).unwrap();
//! assert_eq!(out.solution.len(), 15);
//! assert!(out.solution.validate(30).is_ok());
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod ils;
pub mod lns;
pub mod local_search;
pub mod models;
pub mod moves;

pub use error::{Result, SearchError};
