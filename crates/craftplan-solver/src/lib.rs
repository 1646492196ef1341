mod error;
mod milp;
mod problem;
mod solution;

pub use error::SolverError;
pub use milp::{MilpSolver, Solver};
pub use problem::{IlpProblem, RowViolation};
pub use solution::{Solution, SolutionStatus};
