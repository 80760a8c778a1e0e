//! Objective functions and constraint checking.
//!
//! Two objectives are supported: f1, the total team-routed travel distance,
//! and f2, which comes in two named flavours (load imbalance and active team
//! count). Feasibility is measured quantitatively by [`violation`], a sum of
//! squared violations over six rules.

use crate::problem::Problem;
use crate::solution::Solution;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The quantity a search run minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    /// f1: sum over assets of the distance to the base of their team.
    #[serde(rename = "f1", alias = "distance")]
    Distance,
    /// f2: `max(load) - min(load)` over teams serving at least one asset.
    #[serde(rename = "f2", alias = "imbalance", alias = "team-imbalance")]
    TeamImbalance,
    /// f2 (count): number of teams serving at least one asset.
    #[serde(rename = "f2-count", alias = "team-count")]
    TeamCount,
}

impl Objective {
    /// Canonical name of the objective.
    pub fn name(&self) -> &'static str {
        match self {
            Objective::Distance => "f1",
            Objective::TeamImbalance => "f2",
            Objective::TeamCount => "f2-count",
        }
    }

    /// Compute the objective value of a solution.
    pub fn value(&self, problem: &Problem, solution: &Solution) -> f64 {
        match self {
            Objective::Distance => distance_objective(problem, solution),
            Objective::TeamImbalance => team_imbalance_objective(solution),
            Objective::TeamCount => team_count_objective(solution),
        }
    }

    /// An upper bound of the objective over every feasible solution.
    pub fn upper_bound(&self, problem: &Problem) -> f64 {
        match self {
            Objective::Distance => problem
                .distance_matrix()
                .iter()
                .map(|row| row.iter().copied().fold(0.0, f64::max))
                .sum(),
            Objective::TeamImbalance => problem.n_assets() as f64,
            Objective::TeamCount => problem.n_teams() as f64,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Objective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f1" | "distance" => Ok(Objective::Distance),
            "f2" | "imbalance" | "team-imbalance" => Ok(Objective::TeamImbalance),
            "f2-count" | "team-count" => Ok(Objective::TeamCount),
            other => Err(format!("unknown objective '{}'", other)),
        }
    }
}

/// f1: team-routed distance.
///
/// Each asset contributes the distance to the base where its serving team is
/// stationed (the join of H and Y). When the coupling invariant holds this
/// equals the distance to the asset's own base.
pub fn distance_objective(problem: &Problem, solution: &Solution) -> f64 {
    let mut total = 0.0;

    for asset in 0..solution.n_assets() {
        for team in solution.h.row_ones(asset) {
            for base in solution.y.col_ones(team) {
                total += problem.distance(asset, base);
            }
        }
    }

    total
}

/// f2 (count): number of teams serving at least one asset.
pub fn team_count_objective(solution: &Solution) -> f64 {
    solution.team_loads().iter().filter(|&&load| load > 0).count() as f64
}

/// f2 (imbalance): spread between the most and least loaded active teams.
pub fn team_imbalance_objective(solution: &Solution) -> f64 {
    let loads = solution.team_loads();
    match loads.iter().filter(|&&load| load > 0).minmax() {
        MinMaxResult::NoElements | MinMaxResult::OneElement(_) => 0.0,
        MinMaxResult::MinMax(min, max) => (max - min) as f64,
    }
}

/// Squared violation per constraint rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ViolationBreakdown {
    /// A team stationed at more than one base.
    pub team_to_one_base: f64,
    /// An asset not attached to exactly one base.
    pub asset_to_one_base: f64,
    /// An asset attached to a base that hosts no team.
    pub asset_base_has_team: f64,
    /// An asset not serviced by exactly one team.
    pub asset_to_one_team: f64,
    /// An asset serviced by a team stationed elsewhere.
    pub asset_team_matches_base: f64,
    /// An active team serving fewer than the minimum number of assets.
    pub minimum_team_load: f64,
}

impl ViolationBreakdown {
    pub fn total(&self) -> f64 {
        self.team_to_one_base
            + self.asset_to_one_base
            + self.asset_base_has_team
            + self.asset_to_one_team
            + self.asset_team_matches_base
            + self.minimum_team_load
    }

    /// True when every rule except the minimum load holds.
    pub fn is_structurally_sound(&self) -> bool {
        self.total() - self.minimum_team_load == 0.0
    }
}

fn squared(excess: usize) -> f64 {
    (excess * excess) as f64
}

/// Measure each constraint rule separately.
pub fn violation_breakdown(problem: &Problem, solution: &Solution) -> ViolationBreakdown {
    let mut breakdown = ViolationBreakdown::default();

    for team in 0..solution.n_teams() {
        let bases = solution.y.col_sum(team);
        if bases > 1 {
            breakdown.team_to_one_base += squared(bases - 1);
        }
    }

    for asset in 0..solution.n_assets() {
        breakdown.asset_to_one_base += squared(solution.x.row_sum(asset).abs_diff(1));
        breakdown.asset_to_one_team += squared(solution.h.row_sum(asset).abs_diff(1));

        for base in solution.x.row_ones(asset) {
            if !solution.base_has_team(base) {
                breakdown.asset_base_has_team += 1.0;
            }
        }

        for team in solution.h.row_ones(asset) {
            let shares_base = solution
                .y
                .col_ones(team)
                .any(|base| solution.x.get(asset, base));
            if !shares_base {
                breakdown.asset_team_matches_base += 1.0;
            }
        }
    }

    let min_load = problem.min_team_load();
    for load in solution.team_loads() {
        if load > 0 && load < min_load {
            breakdown.minimum_team_load += squared(min_load - load);
        }
    }

    breakdown
}

/// Sum of squared constraint violations; exactly zero iff the solution is feasible.
pub fn violation(problem: &Problem, solution: &Solution) -> f64 {
    violation_breakdown(problem, solution).total()
}

pub fn is_feasible(problem: &Problem, solution: &Solution) -> bool {
    violation(problem, solution) == 0.0
}

/// Objective value and violation of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub value: f64,
    pub violation: f64,
    /// Penalized score: equals `value` for feasible solutions and exceeds
    /// every feasible value otherwise.
    pub score: f64,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }
}

/// Scores solutions for one objective on one problem.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    problem: &'a Problem,
    objective: Objective,
    penalty_weight: f64,
}

impl<'a> Evaluator<'a> {
    pub fn new(problem: &'a Problem, objective: Objective) -> Self {
        Evaluator {
            problem,
            objective,
            penalty_weight: objective.upper_bound(problem) + 1.0,
        }
    }

    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Weight applied to each unit of violation.
    pub fn penalty_weight(&self) -> f64 {
        self.penalty_weight
    }

    pub fn evaluate(&self, solution: &Solution) -> Evaluation {
        let value = self.objective.value(self.problem, solution);
        let violation = violation(self.problem, solution);

        Evaluation {
            value,
            violation,
            score: value + self.penalty_weight * violation,
        }
    }
}
