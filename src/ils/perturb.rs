//! Random forced moves that kick a solution out of its local optimum.

use rand::Rng;

use crate::models::Solution;
use crate::moves::Move;

use super::PerturbationKind;

/// Applies `strength` random moves of the given kind to `solution`.
///
/// Steps walk forward from a random tour position. Reversals pair that
/// position with a partner at cyclic distance at least two, so no step is
/// a no-op; tours shorter than four nodes have no such partner and skip
/// reversal steps. Exchanges skip when nothing is unselected.
pub fn perturb<R: Rng>(solution: &mut Solution, kind: PerturbationKind, strength: usize, rng: &mut R) {
    let n = solution.len();
    if n == 0 {
        return;
    }
    let slots = solution.unselected().len();
    let start = rng.random_range(0..n);

    for step in 0..strength {
        let position = (start + step) % n;
        let reversal = match kind {
            PerturbationKind::IntraEdge => true,
            PerturbationKind::InterNode => false,
            PerturbationKind::Mixed => rng.random_bool(0.5),
        };
        if reversal {
            if n < 4 {
                continue;
            }
            let offset = rng.random_range(2..=n - 2);
            Move::IntraEdge {
                i: position,
                j: (position + offset) % n,
            }
            .apply(solution);
        } else {
            if slots == 0 {
                continue;
            }
            let slot = rng.random_range(0..slots);
            Move::InterNode { position, slot }.apply(solution);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perturb_keeps_partition() {
        let mut rng = u_numflow::random::create_rng(42);
        for kind in [PerturbationKind::IntraEdge, PerturbationKind::InterNode, PerturbationKind::Mixed] {
            let mut sol = Solution::new((0..8).collect(), (8..16).collect());
            perturb(&mut sol, kind, 10, &mut rng);
            assert_eq!(sol.len(), 8);
            assert!(sol.validate(16).is_ok());
        }
    }

    #[test]
    fn test_edge_perturbation_changes_tour() {
        let mut rng = u_numflow::random::create_rng(42);
        let before = Solution::new((0..8).collect(), vec![]);
        let mut sol = before.clone();
        perturb(&mut sol, PerturbationKind::IntraEdge, 1, &mut rng);
        assert_ne!(sol, before);
    }

    #[test]
    fn test_inter_perturbation_changes_selection() {
        let mut rng = u_numflow::random::create_rng(3);
        let mut sol = Solution::new(vec![0, 1, 2], vec![3, 4]);
        perturb(&mut sol, PerturbationKind::InterNode, 1, &mut rng);
        assert!(sol.tour().iter().any(|&v| v >= 3));
        assert!(sol.validate(5).is_ok());
    }

    #[test]
    fn test_small_tour_reversal_is_noop() {
        let mut rng = u_numflow::random::create_rng(1);
        let mut sol = Solution::new(vec![0, 1, 2], vec![3]);
        perturb(&mut sol, PerturbationKind::IntraEdge, 5, &mut rng);
        assert_eq!(sol.tour(), &[0, 1, 2]);
    }
}
