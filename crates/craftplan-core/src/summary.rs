use std::collections::BTreeMap;

use craftplan_solver::Solution;

use crate::error::PlanError;
use crate::model::Resource;
use crate::program::Program;

/// What an optimal plan consumes and produces, by name
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Resource name -> total quantity consumed
    pub resources: BTreeMap<String, u64>,
    /// Recipe name -> total units produced, across all ingredient alternatives
    pub recipes: BTreeMap<String, u64>,
}

impl Summary {
    /// Aggregate an optimal solution of `program` by resource and recipe name.
    ///
    /// Recipes with a count of zero contribute nothing.
    pub fn from_solution(program: &Program<'_>, solution: &Solution) -> Result<Self, PlanError> {
        if !solution.is_optimal() {
            return Err(PlanError::Precondition(format!("solution is {}", solution.status)));
        }
        if solution.values.len() != program.num_recipes() {
            return Err(PlanError::Precondition(format!(
                "solution has {} values for {} recipes",
                solution.values.len(),
                program.num_recipes()
            )));
        }

        let mut summary = Summary::default();

        for (recipe, &value) in program.recipes().iter().zip(&solution.values) {
            let count = u64::try_from(value)
                .map_err(|_| PlanError::Precondition(format!("{} has negative count {}", recipe.name(), value)))?;
            if count == 0 {
                continue;
            }
            for ingredient in recipe.ingredients() {
                let total = summary.resources.entry(ingredient.name().to_string()).or_insert(0);
                *total = ingredient
                    .count()
                    .checked_mul(count)
                    .and_then(|used| total.checked_add(used))
                    .ok_or_else(|| PlanError::Domain(format!("consumption of {} overflows", ingredient.name())))?;
            }
            let total = summary.recipes.entry(recipe.name().to_string()).or_insert(0);
            *total = total
                .checked_add(count)
                .ok_or_else(|| PlanError::Domain(format!("production of {} overflows", recipe.name())))?;
        }

        Ok(summary)
    }

    /// Stock left over after the plan, for every resource in `resources`
    pub fn leftover(&self, resources: &[Resource]) -> BTreeMap<String, u64> {
        resources
            .iter()
            .map(|r| {
                let used = self.resources.get(r.name()).copied().unwrap_or(0);
                (r.name().to_string(), r.count().saturating_sub(used))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ingredient, Recipe};
    use craftplan_solver::SolutionStatus;

    fn fixture() -> (Vec<Resource>, Vec<Recipe>) {
        let resources = vec![
            Resource::new("wood", 10).unwrap(),
            Resource::new("coal", 3).unwrap(),
            Resource::new("resin", 8).unwrap(),
        ];
        let recipes = vec![
            Recipe::new(
                "torch",
                2,
                vec![Ingredient::new("wood", 1).unwrap(), Ingredient::new("coal", 1).unwrap()],
            )
            .unwrap(),
            Recipe::new(
                "torch",
                2,
                vec![Ingredient::new("wood", 1).unwrap(), Ingredient::new("resin", 2).unwrap()],
            )
            .unwrap(),
            Recipe::new("plank", 1, vec![Ingredient::new("wood", 1).unwrap()]).unwrap(),
        ];
        (resources, recipes)
    }

    #[test]
    fn test_merges_alternatives() {
        let (resources, recipes) = fixture();
        let program = Program::build(&resources, &recipes).unwrap();
        let solution = Solution::optimal(vec![3, 4, 0], -14);

        let summary = Summary::from_solution(&program, &solution).unwrap();

        assert_eq!(summary.recipes.len(), 1, "zero-count recipes are left out");
        assert_eq!(summary.recipes["torch"], 7);
        assert_eq!(summary.resources["wood"], 7);
        assert_eq!(summary.resources["coal"], 3);
        assert_eq!(summary.resources["resin"], 8);
    }

    #[test]
    fn test_idempotent() {
        let (resources, recipes) = fixture();
        let program = Program::build(&resources, &recipes).unwrap();
        let solution = Solution::optimal(vec![1, 2, 3], -9);

        let first = Summary::from_solution(&program, &solution).unwrap();
        let second = Summary::from_solution(&program, &solution).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_refuses_non_optimal() {
        let (resources, recipes) = fixture();
        let program = Program::build(&resources, &recipes).unwrap();

        for solution in [Solution::infeasible(), Solution::unbounded()] {
            let err = Summary::from_solution(&program, &solution).unwrap_err();
            assert!(matches!(err, PlanError::Precondition(_)), "{:?}", solution.status);
        }
        assert_ne!(Solution::infeasible().status, SolutionStatus::Optimal);
    }

    #[test]
    fn test_refuses_wrong_length() {
        let (resources, recipes) = fixture();
        let program = Program::build(&resources, &recipes).unwrap();
        let solution = Solution::optimal(vec![1], -2);

        assert!(matches!(
            Summary::from_solution(&program, &solution),
            Err(PlanError::Precondition(_))
        ));
    }

    #[test]
    fn test_overflowing_totals_are_rejected() {
        let resources = vec![Resource::new("wood", i64::MAX).unwrap()];
        let recipes = vec![
            Recipe::new("beam", 1, vec![Ingredient::new("wood", i64::MAX / 2).unwrap()]).unwrap(),
        ];
        let program = Program::build(&resources, &recipes).unwrap();

        let err = Summary::from_solution(&program, &Solution::optimal(vec![u32::MAX as i64], -1)).unwrap_err();
        assert!(matches!(err, PlanError::Domain(_)), "{:?}", err);

        let summary = Summary::from_solution(&program, &Solution::optimal(vec![2], -2)).unwrap();
        assert_eq!(summary.resources["wood"], (i64::MAX / 2) as u64 * 2);
    }

    #[test]
    fn test_leftover() {
        let (resources, recipes) = fixture();
        let program = Program::build(&resources, &recipes).unwrap();
        let summary = Summary::from_solution(&program, &Solution::optimal(vec![3, 0, 2], -8)).unwrap();

        let left = summary.leftover(&resources);
        assert_eq!(left["wood"], 5);
        assert_eq!(left["coal"], 0);
        assert_eq!(left["resin"], 8);
    }
}
