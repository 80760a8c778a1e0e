//! Utility functions for local search and perturbation.

use crate::problem::Problem;
use crate::solution::Solution;

/// The `count` nearest bases to an asset that currently host a team.
///
/// Bases are taken in increasing distance order; `exclude` is skipped
/// without counting towards `count`.
pub fn nearest_hosting_bases(
    problem: &Problem,
    solution: &Solution,
    asset: usize,
    count: usize,
    exclude: Option<usize>,
) -> Vec<usize> {
    problem
        .bases_by_distance(asset)
        .iter()
        .copied()
        .filter(|&base| Some(base) != exclude && solution.base_has_team(base))
        .take(count)
        .collect()
}

/// The lowest-indexed team stationed at each base.
pub fn first_team_by_base(solution: &Solution) -> Vec<Option<usize>> {
    (0..solution.n_bases())
        .map(|base| solution.y.row_ones(base).next())
        .collect()
}
