//! Uniformly random starting solutions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SearchError};
use crate::models::Solution;

/// Draws a uniformly random solution visiting `solution_size` of
/// `node_count` nodes.
///
/// All node ids are shuffled; the first `solution_size` become the tour in
/// shuffled order and the rest the unselected set. Returns
/// [`SearchError::SolutionSizeTooLarge`] if `solution_size > node_count`.
///
/// # Examples
///
/// ```
/// use u_selective_tsp::constructive::random_start;
///
/// let mut rng = u_numflow::random::create_rng(42);
/// let sol = random_start(10, 5, &mut rng).unwrap();
/// assert_eq!(sol.len(), 5);
/// assert_eq!(sol.unselected().len(), 5);
/// assert!(sol.validate(10).is_ok());
/// ```
pub fn random_start<R: Rng>(node_count: usize, solution_size: usize, rng: &mut R) -> Result<Solution> {
    if solution_size > node_count {
        return Err(SearchError::SolutionSizeTooLarge {
            size: solution_size,
            nodes: node_count,
        });
    }
    let mut nodes: Vec<usize> = (0..node_count).collect();
    nodes.shuffle(rng);
    let unselected = nodes.split_off(solution_size);
    Ok(Solution::new(nodes, unselected))
}
