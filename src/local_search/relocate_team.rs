//! N2: relocate a team to an empty base, carrying its assets along.

use crate::solution::Solution;

use super::Move;

/// Every N2 move: each stationed team to each base hosting no team.
pub fn moves(solution: &Solution) -> Vec<Move> {
    let empty = solution.empty_bases();
    let mut moves = Vec::new();

    for team in solution.placed_teams() {
        for &base in &empty {
            moves.push(Move::RelocateTeam { team, base });
        }
    }

    moves
}

/// Apply an N2 move to a copy of the solution.
///
/// The caller's solution is left untouched; only the copy sees the team and
/// its assets move.
pub fn apply(solution: &Solution, team: usize, base: usize) -> Solution {
    let mut candidate = solution.clone();
    candidate.relocate_team(team, base);
    candidate
}
