use craftplan_solver::SolverError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Invalid input: {0}")]
    Domain(String),
    #[error("Recipe {recipe} needs unknown resource: {ingredient}")]
    UnknownResource { recipe: String, ingredient: String },
    #[error("Cannot summarize: {0}")]
    Precondition(String),
    #[error(transparent)]
    Solver(#[from] SolverError),
}
