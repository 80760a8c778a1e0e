//! Problem definition and data structures for the asset assignment problem.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A point on the plane, used to derive Euclidean distance matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(x: f64, y: f64) -> Self {
        Location { x, y }
    }

    /// Calculate the Euclidean distance between two locations.
    pub fn distance(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Raw instance data as handed over by instance-loading code.
///
/// This is the unvalidated wire shape; convert it into a [`Problem`] with
/// `Problem::try_from` before searching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemData {
    pub n_assets: usize,
    pub n_bases: usize,
    pub n_teams: usize,
    /// Minimum coverage fraction of `n / s` an active team must serve.
    pub eta: f64,
    /// Distance from every asset (row) to every base (column).
    pub distances: Vec<Vec<f64>>,
}

/// A validated, immutable assignment problem instance.
///
/// Every search component reads the instance by reference; nothing mutates
/// it once built, so one instance can be shared between concurrent runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ProblemData", into = "ProblemData")]
pub struct Problem {
    n_assets: usize,
    n_bases: usize,
    n_teams: usize,
    eta: f64,
    distance_matrix: Vec<Vec<f64>>,
    /// For every asset, all bases sorted by increasing distance.
    base_order: Vec<Vec<usize>>,
}

impl Problem {
    /// Create a new problem, rejecting malformed input.
    pub fn new(
        n_assets: usize,
        n_bases: usize,
        n_teams: usize,
        eta: f64,
        distance_matrix: Vec<Vec<f64>>,
    ) -> Result<Self, Error> {
        if n_assets == 0 || n_bases == 0 || n_teams == 0 {
            return Err(Error::InvalidInstance(format!(
                "counts must be positive (n={}, m={}, s={})",
                n_assets, n_bases, n_teams
            )));
        }

        if !eta.is_finite() || eta <= 0.0 || eta > 1.0 {
            return Err(Error::InvalidInstance(format!(
                "eta must lie in (0, 1], got {}",
                eta
            )));
        }

        if distance_matrix.len() != n_assets {
            return Err(Error::InvalidInstance(format!(
                "distance matrix has {} rows, expected {}",
                distance_matrix.len(),
                n_assets
            )));
        }

        for (i, row) in distance_matrix.iter().enumerate() {
            if row.len() != n_bases {
                return Err(Error::InvalidInstance(format!(
                    "distance row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n_bases
                )));
            }

            if let Some(j) = row.iter().position(|d| !d.is_finite() || *d < 0.0) {
                return Err(Error::InvalidInstance(format!(
                    "distance from asset {} to base {} is {}",
                    i, j, row[j]
                )));
            }
        }

        let base_order = Self::compute_base_order(&distance_matrix, n_bases);

        Ok(Problem {
            n_assets,
            n_bases,
            n_teams,
            eta,
            distance_matrix,
            base_order,
        })
    }

    /// Build a problem from asset and base coordinates using Euclidean distances.
    pub fn from_locations(
        assets: &[Location],
        bases: &[Location],
        n_teams: usize,
        eta: f64,
    ) -> Result<Self, Error> {
        let distance_matrix = assets
            .iter()
            .map(|asset| bases.iter().map(|base| asset.distance(base)).collect())
            .collect();

        Problem::new(assets.len(), bases.len(), n_teams, eta, distance_matrix)
    }

    /// Number of assets (n).
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Number of bases (m).
    pub fn n_bases(&self) -> usize {
        self.n_bases
    }

    /// Number of teams (s).
    pub fn n_teams(&self) -> usize {
        self.n_teams
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Distance between an asset and a base.
    pub fn distance(&self, asset: usize, base: usize) -> f64 {
        self.distance_matrix[asset][base]
    }

    pub fn distance_matrix(&self) -> &[Vec<f64>] {
        &self.distance_matrix
    }

    /// Minimum number of assets an active team must serve: `ceil(eta * n / s)`.
    pub fn min_team_load(&self) -> usize {
        let bound = self.eta * self.n_assets as f64 / self.n_teams as f64;
        // Guard against 0.7 * 10 / 7 rounding up to 2.
        (bound - 1e-9).ceil().max(0.0) as usize
    }

    /// All bases sorted by increasing distance from the given asset.
    pub fn bases_by_distance(&self, asset: usize) -> &[usize] {
        &self.base_order[asset]
    }

    /// Mean distance from a base to every asset.
    pub fn mean_distance_to_base(&self, base: usize) -> f64 {
        let total: f64 = self.distance_matrix.iter().map(|row| row[base]).sum();
        total / self.n_assets as f64
    }

    /// Bases sorted by centrality (increasing mean distance to all assets).
    pub fn bases_by_centrality(&self) -> Vec<usize> {
        let mut ranked: Vec<(usize, f64)> = (0..self.n_bases)
            .map(|j| (j, self.mean_distance_to_base(j)))
            .collect();

        ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        ranked.into_iter().map(|(j, _)| j).collect()
    }

    fn compute_base_order(distance_matrix: &[Vec<f64>], n_bases: usize) -> Vec<Vec<usize>> {
        distance_matrix
            .iter()
            .map(|row| {
                let mut order: Vec<usize> = (0..n_bases).collect();
                order.sort_by(|&a, &b| row[a].partial_cmp(&row[b]).unwrap_or(Ordering::Equal));
                order
            })
            .collect()
    }
}

impl TryFrom<ProblemData> for Problem {
    type Error = Error;

    fn try_from(data: ProblemData) -> Result<Self, Self::Error> {
        Problem::new(
            data.n_assets,
            data.n_bases,
            data.n_teams,
            data.eta,
            data.distances,
        )
    }
}

impl From<Problem> for ProblemData {
    fn from(problem: Problem) -> Self {
        ProblemData {
            n_assets: problem.n_assets,
            n_bases: problem.n_bases,
            n_teams: problem.n_teams,
            eta: problem.eta,
            distances: problem.distance_matrix,
        }
    }
}
