use std::time::Duration;
use thiserror::Error;

/// Operational failures of the solver, as opposed to infeasible or unbounded programs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Solver did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Solver returned an unusable solution: {0}")]
    Numerical(String),
    #[error("Plan exceeds the solver's integer range: {0}")]
    OutOfRange(String),
    #[error("Solver backend failed: {0}")]
    Backend(String),
    #[error("Solver worker exited without a result")]
    WorkerLost,
}
