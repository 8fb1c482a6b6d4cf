//! Property tests over random instances and solutions.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use u_selective_tsp::distance::CostMatrix;
use u_selective_tsp::ils::{iterated_local_search, IlsConfig, PerturbationKind};
use u_selective_tsp::local_search::{
    descend, is_local_optimum, lazy_descend, LazySearch, Strategy as Descent,
};
use u_selective_tsp::models::{Node, Solution};
use u_selective_tsp::moves::delta::{intra_edge_exchange_delta, intra_node_exchange_delta};
use u_selective_tsp::moves::{Anchor, IntraMove, Move};

/// Integer coordinates and costs keep every score exact.
fn instance(max_nodes: usize) -> impl Strategy<Value = CostMatrix> {
    prop::collection::vec((0i32..60, 0i32..60, -10i32..30), 6..=max_nodes).prop_map(|raw| {
        let nodes: Vec<Node> = raw
            .into_iter()
            .map(|(x, y, c)| Node::new(x as f64, y as f64, c as f64))
            .collect();
        CostMatrix::from_nodes(&nodes)
    })
}

/// An instance with a random selective solution of half its nodes.
fn instance_and_solution(max_nodes: usize) -> impl Strategy<Value = (CostMatrix, Solution)> {
    instance(max_nodes).prop_flat_map(|dm| {
        let n = dm.size();
        Just((0..n).collect::<Vec<usize>>())
            .prop_shuffle()
            .prop_map(move |mut nodes| {
                let unselected = nodes.split_off(n / 2);
                (dm.clone(), Solution::new(nodes, unselected))
            })
    })
}

fn check_move(dm: &CostMatrix, sol: &Solution, mv: Move) -> Result<(), TestCaseError> {
    let before = sol.score(dm);
    let delta = mv.delta(dm, sol);
    let mut after = sol.clone();
    mv.apply(&mut after);
    prop_assert!(
        (after.score(dm) - before - delta).abs() < 1e-9,
        "{:?}: predicted {}, actual {}",
        mv,
        delta,
        after.score(dm) - before
    );
    prop_assert!(after.validate(dm.size()).is_ok());
    Ok(())
}

proptest! {
    #[test]
    fn delta_matches_score_change(
        (dm, sol) in instance_and_solution(16),
        a in 0usize..1000,
        b in 0usize..1000,
        c in 0usize..1000,
    ) {
        let n = sol.len();
        let (i, j) = (a % n, b % n);
        let slot = c % sol.unselected().len();
        check_move(&dm, &sol, Move::IntraNode { i, j })?;
        check_move(&dm, &sol, Move::IntraEdge { i, j })?;
        check_move(&dm, &sol, Move::InterNode { position: i, slot })?;
    }

    #[test]
    fn anchored_moves_match_their_deltas(
        (dm, sol) in instance_and_solution(16),
        a in 0usize..1000,
        b in 0usize..1000,
        c in 0usize..1000,
    ) {
        let n = sol.len();
        let (i, j) = (a % n, b % n);
        let slot = c % sol.unselected().len();
        for anchor in Anchor::BOTH {
            let mv = anchor.intra_edge(i, j, n);
            prop_assert_eq!(anchor.intra_edge_delta(&dm, sol.tour(), i, j), mv.delta(&dm, &sol));
            check_move(&dm, &sol, mv)?;

            let mv = anchor.inter_node(i, slot, n);
            prop_assert_eq!(
                anchor.inter_node_delta(&dm, sol.tour(), i, sol.unselected(), slot),
                mv.delta(&dm, &sol)
            );
            check_move(&dm, &sol, mv)?;
        }
    }

    #[test]
    fn node_swap_delta_is_symmetric(
        (dm, sol) in instance_and_solution(16),
        a in 0usize..1000,
        b in 0usize..1000,
    ) {
        let n = sol.len();
        let (i, j) = (a % n, b % n);
        prop_assert_eq!(
            intra_node_exchange_delta(&dm, sol.tour(), i, j),
            intra_node_exchange_delta(&dm, sol.tour(), j, i)
        );
    }

    #[test]
    fn touching_edges_are_free((dm, sol) in instance_and_solution(16), a in 0usize..1000) {
        let n = sol.len();
        let i = a % n;
        let j = (i + 1) % n;
        prop_assert_eq!(intra_edge_exchange_delta(&dm, sol.tour(), i, j), 0.0);
        prop_assert_eq!(intra_edge_exchange_delta(&dm, sol.tour(), i, i), 0.0);
        let mut after = sol.clone();
        Move::IntraEdge { i, j }.apply(&mut after);
        prop_assert_eq!(after, sol);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn steepest_ends_in_local_optimum((dm, sol) in instance_and_solution(20), seed in 0u64..1000) {
        for intra in [IntraMove::NodeExchange, IntraMove::EdgeExchange] {
            let mut s = sol.clone();
            let mut rng = u_numflow::random::create_rng(seed);
            let out = descend(&mut s, &dm, Descent::Steepest, intra, &mut rng).expect("valid");
            prop_assert!(out.score <= sol.score(&dm));
            prop_assert!(is_local_optimum(&s, &dm, intra));
        }
    }

    #[test]
    fn greedy_ends_in_local_optimum((dm, sol) in instance_and_solution(20), seed in 0u64..1000) {
        let mut s = sol.clone();
        let mut rng = u_numflow::random::create_rng(seed);
        let out = descend(&mut s, &dm, Descent::Greedy, IntraMove::EdgeExchange, &mut rng)
            .expect("valid");
        prop_assert!(out.score <= sol.score(&dm));
        prop_assert!(is_local_optimum(&s, &dm, IntraMove::EdgeExchange));
    }

    #[test]
    fn candidate_descent_never_worsens((dm, sol) in instance_and_solution(20), k in 1usize..8) {
        let mut s = sol.clone();
        let mut rng = u_numflow::random::create_rng(0);
        let out = descend(
            &mut s,
            &dm,
            Descent::CandidateSteepest { neighbors: k },
            IntraMove::EdgeExchange,
            &mut rng,
        )
        .expect("valid");
        prop_assert!(out.score <= sol.score(&dm));
        prop_assert!((out.score - s.score(&dm)).abs() < 1e-9);
        prop_assert!(s.validate(dm.size()).is_ok());
    }

    #[test]
    fn lazy_ends_in_full_scan_optimum((dm, sol) in instance_and_solution(20)) {
        let mut s = sol.clone();
        let out = lazy_descend(&mut s, &dm).expect("valid");
        prop_assert!(out.score <= sol.score(&dm));
        prop_assert!((out.score - s.score(&dm)).abs() < 1e-9);
        prop_assert!(s.validate(dm.size()).is_ok());
        prop_assert!(is_local_optimum(&s, &dm, IntraMove::EdgeExchange));
    }

    #[test]
    fn lazy_indices_stay_consistent((dm, sol) in instance_and_solution(14)) {
        let mut s = sol.clone();
        let mut search = LazySearch::new(&mut s, &dm).expect("valid");
        while search.step().is_some() {
            prop_assert!(search.is_consistent());
        }
    }

    #[test]
    fn ils_trajectory_non_increasing((dm, sol) in instance_and_solution(16), seed in 0u64..1000) {
        let config = IlsConfig::default()
            .with_max_iterations(8)
            .with_perturbation(PerturbationKind::Mixed)
            .with_perturbation_strength(4);
        let deadline = Instant::now() + Duration::from_secs(60);
        let mut rng = u_numflow::random::create_rng(seed);
        let out = iterated_local_search(sol, &dm, &config, deadline, &mut rng).expect("valid");
        prop_assert_eq!(out.trajectory.len(), 8);
        prop_assert!(out.trajectory.windows(2).all(|w| w[1] <= w[0]));
        prop_assert!((out.score - out.solution.score(&dm)).abs() < 1e-9);
    }
}
