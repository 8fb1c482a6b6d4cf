//! Greedy descent: evaluate moves in a random order, take the first
//! improving one.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::CostMatrix;
use crate::models::Solution;
use crate::moves::{inter_moves, intra_moves, IntraMove, Move, IMPROVEMENT_EPS};

/// First improving move in a fresh random order, or `None` if no move
/// improves `solution`.
pub(super) fn first_improving<R: Rng>(
    solution: &Solution,
    matrix: &CostMatrix,
    intra: IntraMove,
    rng: &mut R,
) -> Option<Move> {
    let n = solution.len();
    let slots = solution.unselected().len();

    let mut moves: Vec<Move> = intra_moves(n, intra).chain(inter_moves(n, slots)).collect();
    moves.shuffle(rng);
    moves
        .into_iter()
        .find(|mv| mv.delta(matrix, solution) < -IMPROVEMENT_EPS)
}
