//! Destroy operator for LNS.

use rand::Rng;
use u_metaheur::alns::DestroyOperator;

use crate::models::Solution;

/// Removes one contiguous segment of the tour.
///
/// The tour is rotated by a random offset and its first
/// `floor(len * degree)` nodes move to the unselected set. The surviving
/// nodes keep their cyclic order.
///
/// # Examples
///
/// ```
/// use u_metaheur::alns::DestroyOperator;
/// use u_selective_tsp::lns::SegmentRemoval;
/// use u_selective_tsp::models::Solution;
///
/// let sol = Solution::new((0..10).collect(), (10..20).collect());
/// let mut rng = u_numflow::random::create_rng(42);
/// let destroyed = SegmentRemoval.destroy(&sol, 0.3, &mut rng);
/// assert_eq!(destroyed.len(), 7);
/// assert_eq!(destroyed.unselected().len(), 13);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentRemoval;

impl DestroyOperator<Solution> for SegmentRemoval {
    fn name(&self) -> &str {
        "segment_removal"
    }

    fn destroy<R: Rng>(&self, solution: &Solution, degree: f64, rng: &mut R) -> Solution {
        let (mut tour, mut unselected) = solution.clone().into_parts();
        let n = tour.len();
        if n == 0 {
            return Solution::new(tour, unselected);
        }
        let remove = ((n as f64 * degree).floor() as usize).min(n);
        tour.rotate_left(rng.random_range(0..n));
        unselected.extend(tour.drain(..remove));
        Solution::new(tour, unselected)
    }
}
