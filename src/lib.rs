//! # Asset VNS
//!
//! A Rust implementation of Variable Neighborhood Search for assigning
//! monitored assets to service bases and maintenance teams.
//!
//! Each asset is attached to one base and serviced by one team stationed at
//! that base; active teams must serve a minimum share of the assets. The
//! search minimizes either total travel distance (f1) or a team-load measure
//! (f2), combining a constructive heuristic, three neighborhood structures
//! explored by descent or Variable Neighborhood Descent, and an adaptive
//! shaking operator.

pub mod acceptance;
pub mod config;
pub mod construction;
pub mod error;
pub mod local_search;
pub mod objective;
pub mod problem;
pub mod progress;
pub mod shake;
pub mod solution;
pub mod utils;

use crate::acceptance::{tournament_selection, Candidate};
use crate::config::{Config, Variant};
use crate::construction::generate_initial;
use crate::error::Error;
use crate::local_search::LocalSearch;
use crate::objective::{Evaluator, Objective};
use crate::problem::Problem;
use crate::progress::{LogObserver, ProgressEvent, SearchObserver};
use crate::shake::{shake, shake_intensity};
use crate::solution::Solution;
use crate::utils::RunStatistics;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TerminationReason {
    /// The outer iteration budget was exhausted.
    MaxIterations,
    /// Too many consecutive outer iterations without improvement.
    NoImprovement,
    /// The wall-clock budget was exhausted.
    TimeLimit,
    /// The external abort flag was raised.
    Aborted,
}

/// Outcome of one search run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Final incumbent (X, Y, H).
    pub solution: Solution,
    /// Objective that was optimized.
    pub objective: Objective,
    /// Objective value of the final incumbent.
    pub objective_value: f64,
    /// Objective value of the starting incumbent.
    pub initial_value: f64,
    /// Constraint violation of the final incumbent; zero when feasible.
    pub violation: f64,
    pub feasible: bool,
    /// Incumbent score after every outer iteration. Non-increasing; equal to
    /// the objective value whenever the incumbent is feasible.
    pub history: Vec<f64>,
    pub iterations: usize,
    pub improvements: usize,
    pub termination: TerminationReason,
    pub variant: Variant,
    pub run_time: Duration,
}

impl SearchResult {
    /// Number of assets each team serves.
    pub fn team_loads(&self) -> Vec<usize> {
        self.solution.team_loads()
    }

    /// Number of assets attached to each base.
    pub fn assets_per_base(&self) -> Vec<usize> {
        self.solution.assets_per_base()
    }

    /// Number of teams stationed at each base.
    pub fn teams_per_base(&self) -> Vec<usize> {
        self.solution.teams_per_base()
    }
}

/// The main algorithm structure that orchestrates the search.
///
/// Each call to [`VnsAlgorithm::run`] owns a fresh random source, so
/// independent runs over the same problem explore independently.
pub struct VnsAlgorithm<'a> {
    pub problem: &'a Problem,
    pub config: Config,
    pub local_search: LocalSearch,
    pub iterations: usize,
    pub iterations_without_improvement: usize,
    pub improvements: usize,
    pub run_time: Duration,
    abort: Option<Arc<AtomicBool>>,
    start_time: Instant,
}

impl<'a> VnsAlgorithm<'a> {
    /// Create a new VNS instance for the given problem and configuration.
    pub fn new(problem: &'a Problem, config: Config) -> Self {
        let local_search = LocalSearch::new(config.objective)
            .with_sampling(config.sampled_assets, config.sampled_swaps);

        VnsAlgorithm {
            problem,
            config,
            local_search,
            iterations: 0,
            iterations_without_improvement: 0,
            improvements: 0,
            run_time: Duration::from_secs(0),
            abort: None,
            start_time: Instant::now(),
        }
    }

    /// Install a flag that stops the run at the end of the current outer
    /// iteration once set.
    pub fn with_abort_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }

    /// Run the algorithm, logging progress through the `log` facade.
    pub fn run(&mut self) -> Result<SearchResult, Error> {
        let mut observer = LogObserver::default();
        self.run_with_observer(&mut observer)
    }

    /// Run the algorithm until a termination criterion is met, reporting
    /// every outer iteration to `observer`.
    pub fn run_with_observer(
        &mut self,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchResult, Error> {
        self.config.validate()?;

        self.start_time = Instant::now();
        self.iterations = 0;
        self.iterations_without_improvement = 0;
        self.improvements = 0;

        let problem = self.problem;
        let variant = self.config.variant;
        let k_max = self.config.k_max_shake;
        let evaluator = Evaluator::new(problem, self.config.objective);
        let mut rng = self.create_rng();

        info!(
            "Starting {} for {} (n={}, m={}, s={})",
            variant,
            self.config.objective,
            problem.n_assets(),
            problem.n_bases(),
            problem.n_teams()
        );

        let initial = generate_initial(problem, &mut rng)?;

        let mut incumbent = match variant {
            Variant::Gvns => self.local_search.vnd(problem, initial),
            Variant::Vns => Candidate::new(&evaluator, initial),
        };
        let initial_value = incumbent.value();

        info!(
            "Initial value: {:.2} (violation {:.1})",
            incumbent.value(),
            incumbent.violation()
        );

        let mut history = Vec::with_capacity(self.config.max_iterations.min(1 << 16));

        let termination = loop {
            if let Some(reason) = self.should_terminate() {
                break reason;
            }

            let mut k = 1;
            while k <= k_max {
                let intensity = shake_intensity(k, k_max);
                let shaken = shake(problem, &incumbent.solution, intensity, &mut rng);

                let neighbor = match variant {
                    Variant::Gvns => self.local_search.vnd(problem, shaken),
                    Variant::Vns => self.local_search.descend_sampled(problem, shaken, &mut rng),
                };

                let (chosen, accepted) = tournament_selection(incumbent, neighbor);
                incumbent = chosen;

                if accepted {
                    debug!("Improvement at k={}: {:.2}", k, incumbent.value());
                    k = 1;
                    self.iterations_without_improvement = 0;
                    self.improvements += 1;
                } else {
                    k += 1;
                }
            }

            self.iterations_without_improvement += 1;
            history.push(incumbent.score());

            observer.on_iteration(&ProgressEvent {
                iteration: self.iterations,
                best_value: incumbent.score(),
                no_improvement: self.iterations_without_improvement,
                improvements: self.improvements,
                violation: incumbent.violation(),
            });

            self.iterations += 1;
        };

        self.run_time = self.start_time.elapsed();

        if incumbent.is_feasible() {
            info!(
                "{} finished ({:?}) after {} iterations: {:.2}",
                variant,
                termination,
                self.iterations,
                incumbent.value()
            );
        } else {
            warn!(
                "{} finished ({:?}) with an infeasible incumbent: value {:.2}, violation {:.1}",
                variant,
                termination,
                incumbent.value(),
                incumbent.violation()
            );
        }

        Ok(SearchResult {
            objective: self.config.objective,
            objective_value: incumbent.value(),
            initial_value,
            violation: incumbent.violation(),
            feasible: incumbent.is_feasible(),
            solution: incumbent.solution,
            history,
            iterations: self.iterations,
            improvements: self.improvements,
            termination,
            variant,
            run_time: self.run_time,
        })
    }

    /// Check if a termination criterion is met.
    fn should_terminate(&self) -> Option<TerminationReason> {
        if let Some(flag) = &self.abort {
            if flag.load(Ordering::Relaxed) {
                return Some(TerminationReason::Aborted);
            }
        }

        if self.iterations >= self.config.max_iterations {
            return Some(TerminationReason::MaxIterations);
        }

        if self.iterations_without_improvement >= self.config.max_no_improve {
            return Some(TerminationReason::NoImprovement);
        }

        if let Some(time_limit) = self.config.time_limit {
            if self.start_time.elapsed() >= time_limit {
                return Some(TerminationReason::TimeLimit);
            }
        }

        None
    }

    fn create_rng(&self) -> ChaCha8Rng {
        match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Results of several independent runs over the same problem.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub runs: Vec<SearchResult>,
    pub statistics: RunStatistics,
}

impl BatchResult {
    /// The run with the lowest final score.
    pub fn best(&self) -> Option<&SearchResult> {
        self.runs.iter().min_by(|a, b| {
            let score = |r: &SearchResult| r.history.last().copied().unwrap_or(r.objective_value);
            score(*a).total_cmp(&score(*b))
        })
    }
}

/// Execute `runs` independent searches and summarize their final values.
///
/// With a configured seed, run `r` uses `seed + r`; otherwise every run draws
/// its own entropy. Runs execute in parallel with the `parallel` feature.
pub fn run_batch(problem: &Problem, config: &Config, runs: usize) -> Result<BatchResult, Error> {
    if runs == 0 {
        return Err(Error::InvalidConfig("runs must be positive".to_string()));
    }
    config.validate()?;

    let run_one = |run: usize| {
        let mut run_config = config.clone();
        run_config.seed = config.seed.map(|seed| seed.wrapping_add(run as u64));
        VnsAlgorithm::new(problem, run_config).run()
    };

    #[cfg(feature = "parallel")]
    let results: Result<Vec<SearchResult>, Error> = {
        use rayon::prelude::*;
        (0..runs).into_par_iter().map(run_one).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Result<Vec<SearchResult>, Error> = (0..runs).map(run_one).collect();

    let runs = results?;
    let values: Vec<f64> = runs.iter().map(|run| run.objective_value).collect();
    let statistics = RunStatistics::from_values(&values)
        .ok_or_else(|| Error::InvalidConfig("runs must be positive".to_string()))?;

    info!("Batch finished: {}", statistics);

    Ok(BatchResult { runs, statistics })
}
