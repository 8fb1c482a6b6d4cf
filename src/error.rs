//! Error types for search entry points.
//!
//! Every error here is a violated precondition detected before any move is
//! attempted. Degenerate geometry and exhausted time budgets are not errors.

use thiserror::Error;

/// Errors returned by the search entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// A row of an explicit cost matrix has the wrong length.
    #[error("cost matrix row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        /// Offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Number of rows.
        expected: usize,
    },

    /// Coordinates and costs describe a different number of nodes.
    #[error("{points} coordinates but {costs} node costs")]
    LengthMismatch {
        /// Number of coordinate pairs.
        points: usize,
        /// Number of costs.
        costs: usize,
    },

    /// The tour is too short for the requested moves.
    #[error("tour has {len} nodes, at least {min} are required")]
    TourTooShort {
        /// Tour length.
        len: usize,
        /// Minimum length.
        min: usize,
    },

    /// A node id appears more than once across tour and unselected set.
    #[error("node {node} appears more than once")]
    DuplicateNode {
        /// The repeated node id.
        node: usize,
    },

    /// A node id does not exist in the instance.
    #[error("node {node} is out of range for an instance of {size} nodes")]
    NodeOutOfRange {
        /// The invalid node id.
        node: usize,
        /// Instance size.
        size: usize,
    },

    /// Tour and unselected set together do not cover every node.
    #[error("tour and unselected set cover {covered} of {size} nodes")]
    IncompleteCover {
        /// Number of nodes covered.
        covered: usize,
        /// Instance size.
        size: usize,
    },

    /// The solution was built for a different instance size than the matrix.
    #[error("cost matrix has {matrix} nodes but the solution covers {solution}")]
    SizeMismatch {
        /// Matrix size.
        matrix: usize,
        /// Number of nodes in tour and unselected set.
        solution: usize,
    },

    /// The requested tour size exceeds the number of nodes.
    #[error("solution size {size} exceeds the {nodes} available nodes")]
    SolutionSizeTooLarge {
        /// Requested size.
        size: usize,
        /// Number of nodes.
        nodes: usize,
    },

    /// A configuration value is out of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = SearchError::DuplicateNode { node: 7 };
        assert_eq!(err.to_string(), "node 7 appears more than once");

        let err = SearchError::TourTooShort { len: 2, min: 3 };
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = SearchError::InvalidParameter {
            name: "removal_fraction",
            reason: "must be in [0, 1)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter `removal_fraction`: must be in [0, 1)"
        );
    }
}
