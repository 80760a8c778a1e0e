//! Acceptance criteria for comparing candidate solutions.

use crate::objective::{Evaluation, Evaluator};
use crate::solution::Solution;
use serde::Serialize;

/// A solution together with its evaluation under the active objective.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub solution: Solution,
    pub evaluation: Evaluation,
}

impl Candidate {
    /// Evaluate a solution and wrap it.
    pub fn new(evaluator: &Evaluator<'_>, solution: Solution) -> Self {
        let evaluation = evaluator.evaluate(&solution);
        Candidate {
            solution,
            evaluation,
        }
    }

    /// Objective value, ignoring violations.
    pub fn value(&self) -> f64 {
        self.evaluation.value
    }

    /// Penalized score used for every comparison.
    pub fn score(&self) -> f64 {
        self.evaluation.score
    }

    pub fn violation(&self) -> f64 {
        self.evaluation.violation
    }

    pub fn is_feasible(&self) -> bool {
        self.evaluation.is_feasible()
    }

    /// True when `self` is strictly better than `other`.
    pub fn improves_on(&self, other: &Candidate) -> bool {
        self.score() < other.score()
    }
}

/// Pick the better of two candidates; ties keep `a`.
pub fn better_of(a: Candidate, b: Candidate) -> Candidate {
    if b.improves_on(&a) {
        b
    } else {
        a
    }
}

/// Strict-improvement tournament between the incumbent and a neighbor.
///
/// Returns the neighbor and `true` iff it scores strictly lower, otherwise
/// the incumbent and `false`. For feasible candidates the score is the
/// objective value.
pub fn tournament_selection(current: Candidate, neighbor: Candidate) -> (Candidate, bool) {
    if neighbor.improves_on(&current) {
        (neighbor, true)
    } else {
        (current, false)
    }
}
