//! Neighborhood structures and local search procedures.
//!
//! Three neighborhoods are explored in a fixed order:
//!
//! 1. [`reassign_base`] (N1): move an asset to another base hosting a team.
//! 2. [`relocate_team`] (N2): move a team to an empty base with its assets.
//! 3. [`swap_team`] (N3): move an asset to another team at the same base.
//!
//! Every move is materialized as an independent copy of the current
//! solution, so candidates never alias each other or the incumbent.

pub mod reassign_base;
pub mod relocate_team;
pub mod swap_team;
pub mod utils;

use crate::acceptance::Candidate;
use crate::objective::{Evaluator, Objective};
use crate::problem::Problem;
use crate::solution::Solution;
use log::trace;
use rand::seq::index;
use rand::Rng;

/// A single modification of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Attach `asset` to `base`, serviced by `team`.
    ReassignBase { asset: usize, base: usize, team: usize },
    /// Station `team` at `base` and drag its assets along.
    RelocateTeam { team: usize, base: usize },
    /// Serve `asset` by `team` without changing its base.
    SwapTeam { asset: usize, team: usize },
    /// Exchange the teams of two assets.
    ExchangeTeams { first: usize, second: usize },
}

impl Move {
    /// Apply the move to a copy of `solution`.
    pub fn apply(&self, solution: &Solution) -> Solution {
        match *self {
            Move::ReassignBase { asset, base, team } => {
                reassign_base::apply(solution, asset, base, team)
            }
            Move::RelocateTeam { team, base } => relocate_team::apply(solution, team, base),
            Move::SwapTeam { asset, team } => swap_team::apply(solution, asset, team),
            Move::ExchangeTeams { first, second } => {
                swap_team::apply_exchange(solution, first, second)
            }
        }
    }
}

/// The neighborhood structures, in exploration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    ReassignBase,
    RelocateTeam,
    SwapTeam,
}

impl Neighborhood {
    /// N1, N2, N3. Local search always tries them in this order.
    pub const ORDERED: [Neighborhood; 3] = [
        Neighborhood::ReassignBase,
        Neighborhood::RelocateTeam,
        Neighborhood::SwapTeam,
    ];

    /// All moves of this neighborhood from `solution`.
    pub fn moves(&self, solution: &Solution) -> Vec<Move> {
        match self {
            Neighborhood::ReassignBase => reassign_base::moves(solution),
            Neighborhood::RelocateTeam => relocate_team::moves(solution),
            Neighborhood::SwapTeam => swap_team::moves(solution),
        }
    }

    /// Lazily materialized candidate solutions of this neighborhood.
    pub fn candidates<'a>(&self, solution: &'a Solution) -> impl Iterator<Item = Solution> + 'a {
        self.moves(solution)
            .into_iter()
            .map(move |mv| mv.apply(solution))
    }
}

/// Manages the local search phase of the VNS.
#[derive(Debug, Clone)]
pub struct LocalSearch {
    pub objective: Objective,
    /// Assets sampled per call of the sampled descent.
    pub sampled_assets: usize,
    /// Random team exchanges tried by the sampled descent for f2 objectives.
    pub sampled_swaps: usize,
}

impl LocalSearch {
    /// Create a new local search instance.
    pub fn new(objective: Objective) -> Self {
        LocalSearch {
            objective,
            sampled_assets: 30,
            sampled_swaps: 10,
        }
    }

    /// Set the sample sizes used by [`LocalSearch::descend_sampled`].
    pub fn with_sampling(mut self, assets: usize, swaps: usize) -> Self {
        self.sampled_assets = assets;
        self.sampled_swaps = swaps;
        self
    }

    /// First-improvement descent over N1, N2, N3.
    ///
    /// Every improvement restarts the scan at N1. Stops once a full pass over
    /// the three neighborhoods finds nothing better. From a feasible start
    /// only feasible candidates can be accepted; from an infeasible start,
    /// moves lowering the penalized score repair the solution first.
    pub fn descend(&self, problem: &Problem, solution: Solution) -> Candidate {
        let evaluator = Evaluator::new(problem, self.objective);
        let mut current = Candidate::new(&evaluator, solution);

        'scan: loop {
            for neighborhood in Neighborhood::ORDERED {
                if let Some(better) = first_improvement(&evaluator, neighborhood, &current) {
                    current = better;
                    continue 'scan;
                }
            }
            break;
        }

        current
    }

    /// Variable Neighborhood Descent.
    ///
    /// Tracks the active neighborhood explicitly: an improvement resets it to
    /// N1, a failure advances to the next one, and the search ends after N3
    /// fails.
    pub fn vnd(&self, problem: &Problem, solution: Solution) -> Candidate {
        let evaluator = Evaluator::new(problem, self.objective);
        let mut current = Candidate::new(&evaluator, solution);
        let mut k = 0;

        while k < Neighborhood::ORDERED.len() {
            let neighborhood = Neighborhood::ORDERED[k];
            match first_improvement(&evaluator, neighborhood, &current) {
                Some(better) => {
                    trace!(
                        "VND {:?} improved score {:.3} -> {:.3}",
                        neighborhood,
                        current.score(),
                        better.score()
                    );
                    current = better;
                    k = 0;
                }
                None => k += 1,
            }
        }

        current
    }

    /// Cheap sampled descent.
    ///
    /// Tries N1 moves for a random subset of assets, each towards its nearest
    /// hosting bases, and for the f2 objectives a few random team exchanges.
    /// Returns at the first feasible strict improvement, or the input when
    /// the sample holds none.
    pub fn descend_sampled<R: Rng>(
        &self,
        problem: &Problem,
        solution: Solution,
        rng: &mut R,
    ) -> Candidate {
        let evaluator = Evaluator::new(problem, self.objective);
        let current = Candidate::new(&evaluator, solution);

        let n_assets = problem.n_assets();
        let count = self.sampled_assets.min(n_assets);
        let assets = index::sample(rng, n_assets, count).into_vec();

        for mv in reassign_base::sampled_moves(problem, &current.solution, &assets) {
            let candidate = Candidate::new(&evaluator, mv.apply(&current.solution));
            if candidate.is_feasible() && candidate.improves_on(&current) {
                return candidate;
            }
        }

        if self.objective != Objective::Distance {
            for _ in 0..self.sampled_swaps {
                let Some(mv) = swap_team::random_exchange(&current.solution, rng) else {
                    continue;
                };
                let candidate = Candidate::new(&evaluator, mv.apply(&current.solution));
                if candidate.is_feasible() && candidate.improves_on(&current) {
                    return candidate;
                }
            }
        }

        current
    }
}

/// The first candidate of a neighborhood scoring strictly below `current`.
fn first_improvement(
    evaluator: &Evaluator<'_>,
    neighborhood: Neighborhood,
    current: &Candidate,
) -> Option<Candidate> {
    neighborhood
        .candidates(&current.solution)
        .map(|solution| Candidate::new(evaluator, solution))
        .find(|candidate| candidate.improves_on(current))
}
