use std::collections::HashMap;

use craftplan_solver::IlpProblem;
use tracing::debug;

use crate::error::PlanError;
use crate::model::{Recipe, Resource, validate_resources};

/// The integer program for one planning run.
///
/// Rows follow the order of `resources`, columns the order of `recipes`.
#[derive(Debug, Clone)]
pub struct Program<'a> {
    problem: IlpProblem,
    resources: &'a [Resource],
    recipes: &'a [Recipe],
}

impl<'a> Program<'a> {
    /// Build the program, failing on the first unknown ingredient.
    pub fn build(resources: &'a [Resource], recipes: &'a [Recipe]) -> Result<Self, PlanError> {
        validate_resources(resources)?;

        let rows: HashMap<&str, usize> = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name(), i))
            .collect();

        let mut problem = IlpProblem::new(
            recipes
                .iter()
                .enumerate()
                .map(|(j, r)| format!("{}#{}", r.name(), j))
                .collect(),
            resources.iter().map(|r| r.name().to_string()).collect(),
        );

        for (i, resource) in resources.iter().enumerate() {
            problem.set_capacity(i, to_coefficient(resource.name(), resource.count())?);
        }

        for (j, recipe) in recipes.iter().enumerate() {
            for ingredient in recipe.ingredients() {
                let &i = rows.get(ingredient.name()).ok_or_else(|| PlanError::UnknownResource {
                    recipe: recipe.name().to_string(),
                    ingredient: ingredient.name().to_string(),
                })?;
                let amount = to_coefficient(ingredient.name(), ingredient.count())?;
                problem.add_coefficient(i, j, amount).ok_or_else(|| {
                    PlanError::Domain(format!("recipe {} needs too much {}", recipe.name(), ingredient.name()))
                })?;
            }
        }

        // The solver minimizes; priorities are to be maximized.
        let objective = recipes
            .iter()
            .map(|r| {
                r.priority()
                    .checked_neg()
                    .ok_or_else(|| PlanError::Domain(format!("priority of {} is out of range: {}", r.name(), r.priority())))
            })
            .collect::<Result<Vec<_>, _>>()?;
        problem.set_objective(objective);

        debug!(
            resources = resources.len(),
            recipes = recipes.len(),
            "built program"
        );

        Ok(Self {
            problem,
            resources,
            recipes,
        })
    }

    pub fn problem(&self) -> &IlpProblem {
        &self.problem
    }

    pub fn a_ub(&self) -> &[Vec<i64>] {
        &self.problem.a_ub
    }

    pub fn b_ub(&self) -> &[i64] {
        &self.problem.b_ub
    }

    pub fn c(&self) -> &[i64] {
        &self.problem.c
    }

    pub fn resources(&self) -> &'a [Resource] {
        self.resources
    }

    pub fn recipes(&self) -> &'a [Recipe] {
        self.recipes
    }

    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }

    pub fn num_recipes(&self) -> usize {
        self.recipes.len()
    }
}

fn to_coefficient(name: &str, count: u64) -> Result<i64, PlanError> {
    i64::try_from(count).map_err(|_| PlanError::Domain(format!("count of {} is too large: {}", name, count)))
}
