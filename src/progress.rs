//! Progress reporting for search runs.
//!
//! The driver emits one [`ProgressEvent`] per outer iteration to a
//! [`SearchObserver`]. The search loop itself never formats output.

use log::{debug, info};
use serde::Serialize;

/// Snapshot of a run after an outer iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressEvent {
    /// Zero-based outer iteration that just finished.
    pub iteration: usize,
    /// Score of the incumbent after the iteration.
    pub best_value: f64,
    /// Consecutive outer iterations without improvement.
    pub no_improvement: usize,
    /// Improvements accepted since the run started.
    pub improvements: usize,
    /// Constraint violation of the incumbent.
    pub violation: f64,
}

/// Receives progress events from a running search.
pub trait SearchObserver {
    fn on_iteration(&mut self, event: &ProgressEvent);
}

/// Forwards progress to the `log` facade: every `every`-th iteration at info
/// level, the rest at debug level.
#[derive(Debug, Clone)]
pub struct LogObserver {
    pub every: usize,
}

impl Default for LogObserver {
    fn default() -> Self {
        LogObserver { every: 10 }
    }
}

impl SearchObserver for LogObserver {
    fn on_iteration(&mut self, event: &ProgressEvent) {
        if self.every > 0 && event.iteration % self.every == 0 {
            info!(
                "Iter {} | Value: {:.2} | No improvement: {} | Improvements: {}",
                event.iteration, event.best_value, event.no_improvement, event.improvements
            );
        } else {
            debug!(
                "Iter {} | Value: {:.2} | No improvement: {}",
                event.iteration, event.best_value, event.no_improvement
            );
        }
    }
}

/// Collects every event, mostly useful for tests and post-run analysis.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<ProgressEvent>,
}

impl SearchObserver for RecordingObserver {
    fn on_iteration(&mut self, event: &ProgressEvent) {
        self.events.push(*event);
    }
}
