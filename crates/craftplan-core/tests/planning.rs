//! End-to-end planning against the real MILP backend.

use craftplan_core::{IngredientSpec, PlanError, PlanOutcome, Planner, Program, RecipeDefinition, Resource, expand_all};
use craftplan_solver::{IlpProblem, MilpSolver, Solver, SolverError};

fn single(name: &str, priority: i64, items: &[(&str, i64)]) -> RecipeDefinition {
    RecipeDefinition::new(
        name,
        priority,
        IngredientSpec::Single(items.iter().map(|(n, c)| (n.to_string(), *c)).collect()),
    )
}

fn alternatives(name: &str, priority: i64, lists: &[&[(&str, i64)]]) -> RecipeDefinition {
    RecipeDefinition::new(
        name,
        priority,
        IngredientSpec::Alternatives(
            lists
                .iter()
                .map(|items| items.iter().map(|(n, c)| (n.to_string(), *c)).collect())
                .collect(),
        ),
    )
}

/// Best objective (maximized priority) by trying every bounded assignment.
fn brute_force_best(problem: &IlpProblem) -> i64 {
    let bounds: Vec<i64> = (0..problem.num_variables())
        .map(|j| problem.column_upper_bound(j).expect("every column is capped"))
        .collect();

    let mut best = 0;
    let mut x = vec![0i64; bounds.len()];
    loop {
        if problem.is_feasible(&x) {
            best = best.max(-problem.objective_value(&x).expect("objective fits"));
        }
        let mut k = 0;
        loop {
            if k == x.len() {
                return best;
            }
            if x[k] < bounds[k] {
                x[k] += 1;
                break;
            }
            x[k] = 0;
            k += 1;
        }
    }
}

#[test]
fn test_axe_and_plank_scenario() {
    let resources = vec![Resource::new("wood", 10).unwrap(), Resource::new("stone", 4).unwrap()];
    let definitions = vec![
        single("axe", 5, &[("wood", 2), ("stone", 1)]),
        single("plank", 1, &[("wood", 1)]),
    ];

    let recipes = expand_all(&definitions).unwrap();
    let program = Program::build(&resources, &recipes).unwrap();
    let expected = brute_force_best(program.problem());
    assert_eq!(expected, 22);

    let outcome = Planner::default().plan(&resources, &definitions).unwrap();
    let PlanOutcome::Optimal { summary, objective } = outcome else {
        panic!("expected an optimal plan");
    };

    assert_eq!(objective, expected);
    assert_eq!(summary.recipes["axe"], 4);
    assert_eq!(summary.recipes["plank"], 2);
    assert_eq!(summary.resources["wood"], 10);
    assert_eq!(summary.resources["stone"], 4);
}

#[test]
fn test_alternatives_respect_stock() {
    let resources = vec![
        Resource::new("wood", 7).unwrap(),
        Resource::new("coal", 2).unwrap(),
        Resource::new("resin", 6).unwrap(),
    ];
    let definitions = vec![
        alternatives("torch", 3, &[&[("wood", 1), ("coal", 1)], &[("wood", 1), ("resin", 3)]]),
        single("plank", 1, &[("wood", 2)]),
    ];

    let recipes = expand_all(&definitions).unwrap();
    let program = Program::build(&resources, &recipes).unwrap();
    let solution = Solver::new().solve(program.problem()).unwrap();

    assert!(solution.is_optimal());
    assert!(solution.values.iter().all(|&v| v >= 0));
    for (i, row) in program.a_ub().iter().enumerate() {
        let used: i64 = row.iter().zip(&solution.values).map(|(a, x)| a * x).sum();
        assert!(used <= program.b_ub()[i], "row {} uses {} of {}", i, used, program.b_ub()[i]);
    }
    assert_eq!(-solution.objective_value, brute_force_best(program.problem()));

    let outcome = Planner::default().plan(&resources, &definitions).unwrap();
    let PlanOutcome::Optimal { summary, .. } = outcome else {
        panic!("expected an optimal plan");
    };
    // two coal torches and two resin torches; one plank from the last three wood
    assert_eq!(summary.recipes["torch"], 4);
    assert_eq!(summary.recipes["plank"], 1);
    assert_eq!(summary.resources["wood"], 6);
}

#[test]
fn test_zero_stock_gives_empty_plan() {
    let resources = vec![Resource::new("gold", 0).unwrap()];
    let definitions = vec![single("crown", 100, &[("gold", 1)])];

    let outcome = Planner::default().plan(&resources, &definitions).unwrap();
    let PlanOutcome::Optimal { summary, objective } = outcome else {
        panic!("expected an optimal plan");
    };
    assert!(summary.is_empty());
    assert!(summary.resources.is_empty());
    assert_eq!(objective, 0);
}

#[test]
fn test_free_recipe_is_unbounded() {
    let resources = vec![Resource::new("wood", 3).unwrap()];
    let definitions = vec![single("idea", 1, &[]), single("plank", 1, &[("wood", 1)])];

    let outcome = Planner::default().plan(&resources, &definitions).unwrap();
    assert_eq!(outcome, PlanOutcome::Unbounded);
}

#[test]
fn test_unknown_resource_rejected() {
    let resources = vec![Resource::new("wood", 3).unwrap()];
    let definitions = vec![single("sword", 9, &[("iron", 2)])];

    let err = Planner::default().plan(&resources, &definitions).unwrap_err();
    assert_eq!(err.to_string(), "Recipe sword needs unknown resource: iron");
}

#[test]
fn test_extreme_priorities_are_errors() {
    let resources = vec![Resource::new("wood", 4).unwrap()];

    let definitions = vec![single("junk", i64::MIN, &[("wood", 1)])];
    let err = Planner::default().plan(&resources, &definitions).unwrap_err();
    assert!(matches!(err, PlanError::Domain(_)), "{:?}", err);

    // Four planks are worth more than an i64 can hold.
    let definitions = vec![single("plank", i64::MAX / 2, &[("wood", 1)])];
    let err = Planner::default().plan(&resources, &definitions).unwrap_err();
    assert!(matches!(err, PlanError::Solver(SolverError::Numerical(_))), "{:?}", err);
}
