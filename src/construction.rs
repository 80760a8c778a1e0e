//! Constructive heuristic for the initial solution.
//!
//! Teams are placed on central bases, every asset goes to the nearest base
//! hosting a team, and within that base to the least loaded team. The result
//! attaches every asset to exactly one base and one team but may leave some
//! teams under the minimum load; local search is expected to repair that.

use crate::error::Error;
use crate::objective::violation_breakdown;
use crate::problem::Problem;
use crate::solution::Solution;
use itertools::Itertools;
use log::debug;
use rand::Rng;
use std::cmp::Ordering;

/// Number of most central bases that receive the concentrated placements.
const CENTRAL_BASES: usize = 4;

/// Build an initial solution.
pub fn generate_initial<R: Rng>(problem: &Problem, rng: &mut R) -> Result<Solution, Error> {
    let mut solution = Solution::empty(problem);

    let ranked = problem.bases_by_centrality();
    place_teams(&mut solution, &ranked, rng);

    let hosting = solution.hosting_bases();
    if hosting.is_empty() {
        return Err(Error::InfeasibleConstruction(
            "no base hosts a team".to_string(),
        ));
    }

    for asset in 0..problem.n_assets() {
        let base = nearest_base(problem, asset, &hosting);
        solution.x.set(asset, base, true);
    }

    balance_teams(&mut solution);

    let breakdown = violation_breakdown(problem, &solution);
    if !breakdown.is_structurally_sound() {
        return Err(Error::InfeasibleConstruction(format!(
            "constructed solution breaks structural rules: {:?}",
            breakdown
        )));
    }

    debug!(
        "Constructed initial solution: {} hosting bases, load violation {:.1}",
        hosting.len(),
        breakdown.minimum_team_load
    );

    Ok(solution)
}

/// Place every team on a ranked base: half the draws concentrate on the most
/// central bases, the rest spread over the full ranking.
fn place_teams<R: Rng>(solution: &mut Solution, ranked: &[usize], rng: &mut R) {
    let central = CENTRAL_BASES.min(ranked.len());

    for team in 0..solution.n_teams() {
        let base = if rng.gen_bool(0.5) {
            ranked[team % central]
        } else {
            ranked[team % ranked.len()]
        };
        solution.y.set(base, team, true);
    }
}

fn nearest_base(problem: &Problem, asset: usize, hosting: &[usize]) -> usize {
    hosting
        .iter()
        .copied()
        .min_by(|&a, &b| {
            problem
                .distance(asset, a)
                .partial_cmp(&problem.distance(asset, b))
                .unwrap_or(Ordering::Equal)
        })
        .unwrap_or(hosting[0])
}

/// Give every attached asset to the least loaded team of its base.
fn balance_teams(solution: &mut Solution) {
    let mut loads = vec![0usize; solution.n_teams()];

    for asset in 0..solution.n_assets() {
        let Some(base) = solution.base_of_asset(asset) else {
            continue;
        };

        let teams = solution.teams_at_base(base);
        if let Some(position) = teams.iter().position_min_by_key(|&&team| loads[team]) {
            let team = teams[position];
            solution.h.set(asset, team, true);
            loads[team] += 1;
        }
    }
}
