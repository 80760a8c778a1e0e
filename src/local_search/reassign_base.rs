//! N1: reassign an asset to another base hosting a team.

use crate::problem::Problem;
use crate::solution::Solution;

use super::utils::{first_team_by_base, nearest_hosting_bases};
use super::Move;

/// Number of nearest hosting bases tried per asset by the sampled variant.
pub const SAMPLED_BASES: usize = 3;

/// Every N1 move: each asset to each other hosting base, joining that base's
/// first team.
pub fn moves(solution: &Solution) -> Vec<Move> {
    let first_teams = first_team_by_base(solution);
    let mut moves = Vec::new();

    for asset in 0..solution.n_assets() {
        let current = solution.base_of_asset(asset);

        for (base, team) in first_teams.iter().enumerate() {
            let Some(team) = *team else {
                continue;
            };
            if Some(base) == current {
                continue;
            }

            moves.push(Move::ReassignBase { asset, base, team });
        }
    }

    moves
}

/// N1 moves restricted to the given assets and, per asset, to the nearest
/// hosting bases.
pub fn sampled_moves(problem: &Problem, solution: &Solution, assets: &[usize]) -> Vec<Move> {
    let first_teams = first_team_by_base(solution);
    let mut moves = Vec::new();

    for &asset in assets {
        let current = solution.base_of_asset(asset);
        let nearest = nearest_hosting_bases(problem, solution, asset, SAMPLED_BASES, None);

        for base in nearest {
            if Some(base) == current {
                continue;
            }
            if let Some(team) = first_teams[base] {
                moves.push(Move::ReassignBase { asset, base, team });
            }
        }
    }

    moves
}

/// Apply an N1 move to a copy of the solution.
pub fn apply(solution: &Solution, asset: usize, base: usize, team: usize) -> Solution {
    let mut candidate = solution.clone();
    candidate.move_asset(asset, base, team);
    candidate
}
