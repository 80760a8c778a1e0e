//! Shaking: randomized perturbation with tunable intensity.
//!
//! The intensity in `[0, 1]` sets how many assets are moved (in three capped
//! tiers) and, above 0.7, enables an occasional team relocation. The result
//! may be infeasible; the search repairs it or rejects it.

use crate::local_search::utils::nearest_hosting_bases;
use crate::problem::Problem;
use crate::solution::Solution;
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// Nearest hosting bases an asset may be moved to.
const CANDIDATE_BASES: usize = 3;

/// Intensity above which a team may be relocated as well.
const TEAM_MOVE_INTENSITY: f64 = 0.7;

/// Shake intensity for structure `k` of `k_max` (1-based): from 0.2 up to 0.8.
pub fn shake_intensity(k: usize, k_max: usize) -> f64 {
    0.2 + (k as f64 / k_max.max(1) as f64) * 0.6
}

/// Number of assets a shake of the given intensity relocates.
pub fn perturbation_count(n_assets: usize, intensity: f64) -> usize {
    let scaled = |factor: f64| (n_assets as f64 * intensity * factor) as usize;

    let count = if intensity >= 0.8 {
        scaled(0.3).max(30).min(60)
    } else if intensity > 0.5 {
        scaled(0.2).max(15).min(40)
    } else {
        scaled(0.1).max(5).min(20)
    };

    count.min(n_assets)
}

/// Perturb a copy of `solution`.
pub fn shake<R: Rng>(
    problem: &Problem,
    solution: &Solution,
    intensity: f64,
    rng: &mut R,
) -> Solution {
    let intensity = intensity.clamp(0.0, 1.0);
    let mut shaken = solution.clone();

    let count = perturbation_count(problem.n_assets(), intensity);
    for asset in index::sample(rng, problem.n_assets(), count) {
        relocate_asset(problem, &mut shaken, asset, rng);
    }

    if intensity > TEAM_MOVE_INTENSITY && rng.gen_bool(0.5) {
        relocate_random_team(&mut shaken, rng);
    }

    shaken
}

/// Detach an asset and attach it to one of its nearest other hosting bases.
fn relocate_asset<R: Rng>(problem: &Problem, solution: &mut Solution, asset: usize, rng: &mut R) {
    let current = solution.base_of_asset(asset);

    let mut bases = nearest_hosting_bases(problem, solution, asset, CANDIDATE_BASES, current);
    if bases.is_empty() {
        // The asset's own base is the only one hosting a team.
        bases.extend(current.filter(|&base| solution.base_has_team(base)));
    }

    let Some(&base) = bases.choose(rng) else {
        return;
    };
    let teams = solution.teams_at_base(base);
    if let Some(&team) = teams.choose(rng) {
        solution.move_asset(asset, base, team);
    }
}

/// Move a random stationed team to a random empty base.
fn relocate_random_team<R: Rng>(solution: &mut Solution, rng: &mut R) {
    let teams = solution.placed_teams();
    let empty = solution.empty_bases();

    if let (Some(&team), Some(&base)) = (teams.choose(rng), empty.choose(rng)) {
        solution.relocate_team(team, base);
    }
}
