//! Solution representation for the asset assignment problem.

use crate::problem::Problem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dense 0/1 matrix stored row-major.
///
/// Rows and columns are not required to hold exactly one entry; broken
/// matrices are representable so the evaluator can measure how far a
/// candidate is from feasibility.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BinaryMatrix {
    /// Create an all-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        BinaryMatrix {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Build a matrix from nested rows of 0/1 values.
    ///
    /// Returns `None` when the rows are ragged.
    pub fn from_rows(rows: &[Vec<u8>]) -> Option<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }

        let cells = rows.iter().flatten().map(|&v| v != 0).collect();
        Some(BinaryMatrix {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.cells[row * self.cols + col] = value;
    }

    /// Zero every entry of a row.
    pub fn clear_row(&mut self, row: usize) {
        let start = row * self.cols;
        self.cells[start..start + self.cols].fill(false);
    }

    /// Zero every entry of a column.
    pub fn clear_col(&mut self, col: usize) {
        for row in 0..self.rows {
            self.set(row, col, false);
        }
    }

    pub fn row_sum(&self, row: usize) -> usize {
        self.row_ones(row).count()
    }

    pub fn col_sum(&self, col: usize) -> usize {
        self.col_ones(col).count()
    }

    /// Column indices of the set entries of a row.
    pub fn row_ones(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        let start = row * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(col, _)| col)
    }

    /// Row indices of the set entries of a column.
    pub fn col_ones(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).filter(move |&row| self.get(row, col))
    }

    /// The matrix as nested rows of 0/1 values.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|&v| v as u8).collect())
            .collect()
    }
}

impl fmt::Debug for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_rows()).finish()
    }
}

/// A complete candidate assignment: the (X, Y, H) triple.
///
/// Moves never mutate a solution another candidate can see; operators
/// clone, apply their change and hand back an independent value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Assignment matrix X (n x m): asset `i` is attached to base `j`.
    pub x: BinaryMatrix,
    /// Placement matrix Y (m x s): team `k` is stationed at base `j`.
    pub y: BinaryMatrix,
    /// Care matrix H (n x s): asset `i` is serviced by team `k`.
    pub h: BinaryMatrix,
}

impl Solution {
    /// Create an empty solution sized for the given problem.
    pub fn empty(problem: &Problem) -> Self {
        Solution {
            x: BinaryMatrix::zeros(problem.n_assets(), problem.n_bases()),
            y: BinaryMatrix::zeros(problem.n_bases(), problem.n_teams()),
            h: BinaryMatrix::zeros(problem.n_assets(), problem.n_teams()),
        }
    }

    /// Build a solution from explicit per-asset base, per-team base and
    /// per-asset team vectors. `None` leaves a team unplaced.
    pub fn from_assignment(
        problem: &Problem,
        asset_bases: &[usize],
        team_bases: &[Option<usize>],
        asset_teams: &[usize],
    ) -> Self {
        let mut solution = Solution::empty(problem);

        for (asset, &base) in asset_bases.iter().enumerate() {
            solution.x.set(asset, base, true);
        }
        for (team, base) in team_bases.iter().enumerate() {
            if let Some(base) = base {
                solution.y.set(*base, team, true);
            }
        }
        for (asset, &team) in asset_teams.iter().enumerate() {
            solution.h.set(asset, team, true);
        }

        solution
    }

    pub fn n_assets(&self) -> usize {
        self.x.rows()
    }

    pub fn n_bases(&self) -> usize {
        self.x.cols()
    }

    pub fn n_teams(&self) -> usize {
        self.y.cols()
    }

    /// The first base the asset is attached to, if any.
    pub fn base_of_asset(&self, asset: usize) -> Option<usize> {
        self.x.row_ones(asset).next()
    }

    /// The first team serving the asset, if any.
    pub fn team_of_asset(&self, asset: usize) -> Option<usize> {
        self.h.row_ones(asset).next()
    }

    /// The first base the team is stationed at, if any.
    pub fn base_of_team(&self, team: usize) -> Option<usize> {
        self.y.col_ones(team).next()
    }

    /// Teams stationed at a base, in index order.
    pub fn teams_at_base(&self, base: usize) -> Vec<usize> {
        self.y.row_ones(base).collect()
    }

    pub fn base_has_team(&self, base: usize) -> bool {
        self.y.row_ones(base).next().is_some()
    }

    /// Bases hosting at least one team, in index order.
    pub fn hosting_bases(&self) -> Vec<usize> {
        (0..self.n_bases())
            .filter(|&base| self.base_has_team(base))
            .collect()
    }

    /// Bases hosting no team, in index order.
    pub fn empty_bases(&self) -> Vec<usize> {
        (0..self.n_bases())
            .filter(|&base| !self.base_has_team(base))
            .collect()
    }

    /// Teams stationed at some base, in index order.
    pub fn placed_teams(&self) -> Vec<usize> {
        (0..self.n_teams())
            .filter(|&team| self.base_of_team(team).is_some())
            .collect()
    }

    /// Assets serviced by a team, in index order.
    pub fn assets_of_team(&self, team: usize) -> Vec<usize> {
        self.h.col_ones(team).collect()
    }

    /// Number of assets each team serves.
    pub fn team_loads(&self) -> Vec<usize> {
        (0..self.n_teams()).map(|team| self.h.col_sum(team)).collect()
    }

    /// Number of assets attached to each base.
    pub fn assets_per_base(&self) -> Vec<usize> {
        (0..self.n_bases()).map(|base| self.x.col_sum(base)).collect()
    }

    /// Number of teams stationed at each base.
    pub fn teams_per_base(&self) -> Vec<usize> {
        (0..self.n_bases()).map(|base| self.y.row_sum(base)).collect()
    }

    /// Attach an asset to a base and a team, detaching it from any previous ones.
    pub fn move_asset(&mut self, asset: usize, base: usize, team: usize) {
        self.x.clear_row(asset);
        self.x.set(asset, base, true);
        self.h.clear_row(asset);
        self.h.set(asset, team, true);
    }

    /// Reassign an asset to another team without touching its base.
    pub fn set_team(&mut self, asset: usize, team: usize) {
        self.h.clear_row(asset);
        self.h.set(asset, team, true);
    }

    /// Move a team to a base, dragging the base attachment of every asset it
    /// serves along with it.
    pub fn relocate_team(&mut self, team: usize, base: usize) {
        self.y.clear_col(team);
        self.y.set(base, team, true);

        for asset in self.assets_of_team(team) {
            self.x.clear_row(asset);
            self.x.set(asset, base, true);
        }
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Assets: {}", self.n_assets())?;
        writeln!(f, "  Bases: {}", self.n_bases())?;
        writeln!(f, "  Teams: {}", self.n_teams())?;

        for team in 0..self.n_teams() {
            match self.base_of_team(team) {
                Some(base) => writeln!(
                    f,
                    "  Team {} @ base {}: {:?}",
                    team,
                    base,
                    self.assets_of_team(team)
                )?,
                None => writeln!(f, "  Team {} unplaced", team)?,
            }
        }

        Ok(())
    }
}
