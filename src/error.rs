//! Error types for instance validation, construction and configuration.

use std::fmt;

/// Fatal errors raised before or while setting up a search run.
///
/// Infeasible candidates met during the search are not errors: they are
/// scored by the evaluator and rejected by local search and acceptance.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The problem instance violates its structural invariants.
    InvalidInstance(String),
    /// The constructive heuristic could not attach every asset.
    InfeasibleConstruction(String),
    /// A configuration parameter is out of range.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInstance(msg) => write!(f, "invalid instance: {}", msg),
            Error::InfeasibleConstruction(msg) => write!(f, "infeasible construction: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
