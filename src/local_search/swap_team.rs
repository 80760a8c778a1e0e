//! N3: move an asset to another team stationed at the same base.

use crate::solution::Solution;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use super::Move;

/// Every N3 move: each asset to each other team at its current base.
pub fn moves(solution: &Solution) -> Vec<Move> {
    let mut moves = Vec::new();

    for asset in 0..solution.n_assets() {
        let (Some(base), Some(current)) = (
            solution.base_of_asset(asset),
            solution.team_of_asset(asset),
        ) else {
            continue;
        };

        for team in solution.teams_at_base(base) {
            if team != current {
                moves.push(Move::SwapTeam { asset, team });
            }
        }
    }

    moves
}

/// Draw a random exchange of teams between two assets of a base hosting
/// several teams. Returns `None` when no such pair exists or the two drawn
/// assets already share a team.
pub fn random_exchange<R: Rng>(solution: &Solution, rng: &mut R) -> Option<Move> {
    let crowded: Vec<usize> = (0..solution.n_bases())
        .filter(|&base| solution.y.row_sum(base) > 1)
        .collect();

    let &base = crowded.choose(rng)?;
    let assets: Vec<usize> = solution.x.col_ones(base).collect();
    if assets.len() < 2 {
        return None;
    }

    let picked = index::sample(rng, assets.len(), 2);
    let (first, second) = (assets[picked.index(0)], assets[picked.index(1)]);

    if solution.team_of_asset(first) == solution.team_of_asset(second) {
        return None;
    }

    Some(Move::ExchangeTeams { first, second })
}

/// Apply an N3 move to a copy of the solution.
pub fn apply(solution: &Solution, asset: usize, team: usize) -> Solution {
    let mut candidate = solution.clone();
    candidate.set_team(asset, team);
    candidate
}

/// Swap the team memberships of two assets on a copy of the solution.
pub fn apply_exchange(solution: &Solution, first: usize, second: usize) -> Solution {
    let mut candidate = solution.clone();
    if let (Some(a), Some(b)) = (solution.team_of_asset(first), solution.team_of_asset(second)) {
        candidate.set_team(first, b);
        candidate.set_team(second, a);
    }
    candidate
}
