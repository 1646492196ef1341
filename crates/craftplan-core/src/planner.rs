use craftplan_solver::{MilpSolver, SolutionStatus, Solver};
use tracing::{debug, info};

use crate::error::PlanError;
use crate::expand::expand_all;
use crate::model::{RecipeDefinition, Resource};
use crate::program::Program;
use crate::summary::Summary;

/// Outcome of a planning run that reached the solver
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The best plan, with its total priority `Σ priority × count`
    Optimal { summary: Summary, objective: i64 },
    /// Nothing satisfies the stock limits
    Infeasible,
    /// Some recipe can be produced without limit
    Unbounded,
}

/// Expands recipes, builds the program, solves it and summarizes the result
pub struct Planner<S = Solver> {
    solver: S,
}

impl Default for Planner<Solver> {
    fn default() -> Self {
        Self::new(Solver::default())
    }
}

impl<S: MilpSolver> Planner<S> {
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    pub fn plan(&self, resources: &[Resource], definitions: &[RecipeDefinition]) -> Result<PlanOutcome, PlanError> {
        let recipes = expand_all(definitions)?;
        let program = Program::build(resources, &recipes)?;

        let solution = self.solver.solve(program.problem())?;
        debug!(status = %solution.status, "solver returned");

        match solution.status {
            SolutionStatus::Optimal => {
                let summary = Summary::from_solution(&program, &solution)?;
                let objective = solution
                    .objective_value
                    .checked_neg()
                    .ok_or_else(|| PlanError::Domain("total priority is out of range".to_string()))?;
                info!(recipes = summary.recipes.len(), objective, "found optimal plan");
                Ok(PlanOutcome::Optimal { summary, objective })
            }
            SolutionStatus::Infeasible => Ok(PlanOutcome::Infeasible),
            SolutionStatus::Unbounded => Ok(PlanOutcome::Unbounded),
        }
    }
}
