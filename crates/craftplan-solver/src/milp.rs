use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use good_lp::{Expression, ProblemVariables, ResolutionError, SolverModel, Variable, constraint, variable};
use good_lp::Solution as _;
use tracing::{debug, warn};

use crate::error::SolverError;
use crate::problem::IlpProblem;
use crate::solution::Solution;

/// Anything that can solve an [`IlpProblem`].
///
/// Infeasible and unbounded programs are reported through the returned
/// [`Solution`]'s status. `Err` is reserved for operational failures.
pub trait MilpSolver {
    fn solve(&self, problem: &IlpProblem) -> Result<Solution, SolverError>;
}

impl<S: MilpSolver + ?Sized> MilpSolver for &S {
    fn solve(&self, problem: &IlpProblem) -> Result<Solution, SolverError> {
        (**self).solve(problem)
    }
}

/// Branch-and-bound MILP solver backed by `good_lp`'s microlp backend
#[derive(Debug, Clone)]
pub struct Solver {
    /// Wall-clock budget for one solve
    time_limit: Option<Duration>,
    /// Allowed distance between a returned value and the nearest integer
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            time_limit: None,
            tolerance: 1e-6,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop waiting for the backend after `limit` and return [`SolverError::Timeout`].
    ///
    /// The backend cannot be interrupted: after a timeout its worker thread
    /// keeps running on a detached thread until the solve completes, so a batch
    /// of timed-out solves still competes for CPU.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    fn solve_with_budget(&self, problem: &IlpProblem, limit: Duration) -> Result<Solution, SolverError> {
        let owned = problem.clone();
        let tolerance = self.tolerance;
        run_with_budget(move || solve_backend(&owned, tolerance), limit)
    }
}

/// Run `work` on a worker thread and give up after `limit`
fn run_with_budget<F>(work: F, limit: Duration) -> Result<Solution, SolverError>
where
    F: FnOnce() -> Result<Solution, SolverError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("craftplan-milp".to_string())
        .spawn(move || {
            // The receiver is gone once the budget expired; nothing to report then.
            let _ = tx.send(work());
        })
        .map_err(|e| SolverError::Backend(format!("cannot spawn solver thread: {}", e)))?;

    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!(?limit, "solver exceeded its time limit");
            Err(SolverError::Timeout(limit))
        }
        Err(RecvTimeoutError::Disconnected) => Err(SolverError::WorkerLost),
    }
}

impl MilpSolver for Solver {
    fn solve(&self, problem: &IlpProblem) -> Result<Solution, SolverError> {
        if let Some(solution) = solve_trivial(problem) {
            debug!(status = %solution.status, "answered without invoking the backend");
            return Ok(solution);
        }

        let started = Instant::now();
        let result = match self.time_limit {
            Some(limit) => self.solve_with_budget(problem, limit),
            None => solve_backend(problem, self.tolerance),
        };
        debug!(
            variables = problem.num_variables(),
            rows = problem.num_rows(),
            elapsed = ?started.elapsed(),
            "milp solve finished"
        );
        result
    }
}

/// Programs whose answer is known without branching.
fn solve_trivial(problem: &IlpProblem) -> Option<Solution> {
    // A row nothing consumes can still be violated by x = 0.
    let broken_empty_row = problem
        .a_ub
        .iter()
        .zip(&problem.b_ub)
        .any(|(row, &b)| b < 0 && row.iter().all(|&a| a == 0));
    if broken_empty_row {
        return Some(Solution::infeasible());
    }

    if problem.num_variables() == 0 {
        return Some(Solution::optimal(Vec::new(), 0));
    }

    // With x = 0 feasible, a profitable column that no row caps grows without limit.
    let origin_feasible = problem.b_ub.iter().all(|&b| b >= 0);
    let free_profitable_column = (0..problem.num_variables()).any(|j| {
        problem.c[j] < 0 && problem.a_ub.iter().all(|row| row[j] <= 0)
    });
    if origin_feasible && free_profitable_column {
        return Some(Solution::unbounded());
    }

    None
}

/// Largest bound microlp accepts on an integer variable
const BACKEND_INT_MAX: i64 = i32::MAX as i64;

fn solve_backend(problem: &IlpProblem, tolerance: f64) -> Result<Solution, SolverError> {
    let mut vars = ProblemVariables::new();
    // Columns whose own bound had to be lowered to fit the backend. The rows
    // still carry the real capacities.
    let mut clamped = vec![false; problem.num_variables()];
    let columns: Vec<Variable> = (0..problem.num_variables())
        .map(|j| {
            let max = problem.column_upper_bound(j).unwrap_or(i64::MAX);
            if max > BACKEND_INT_MAX {
                clamped[j] = true;
            }
            let def = variable()
                .integer()
                .min(0)
                .max(max.min(BACKEND_INT_MAX) as f64)
                .name(problem.variables[j].clone());
            vars.add(def)
        })
        .collect();

    let objective: Expression = columns
        .iter()
        .zip(&problem.c)
        .map(|(&var, &coef)| coef as f64 * var)
        .sum();

    let mut model = vars.minimise(objective).using(good_lp::microlp);

    for (row, &capacity) in problem.a_ub.iter().zip(&problem.b_ub) {
        if row.iter().all(|&a| a == 0) {
            continue;
        }
        let used: Expression = columns
            .iter()
            .zip(row)
            .filter(|(_, a)| **a != 0)
            .map(|(&var, &a)| a as f64 * var)
            .sum();
        let capacity = capacity as f64;
        model = model.with(constraint!(used <= capacity));
    }

    let lp_solution = match model.solve() {
        Ok(s) => s,
        Err(ResolutionError::Infeasible) => return Ok(Solution::infeasible()),
        Err(ResolutionError::Unbounded) => return Ok(Solution::unbounded()),
        Err(e) => return Err(SolverError::Backend(e.to_string())),
    };

    let mut values = Vec::with_capacity(columns.len());
    for (j, &var) in columns.iter().enumerate() {
        let raw = lp_solution.value(var);
        let rounded = raw.round();
        if (raw - rounded).abs() > tolerance || rounded < 0.0 {
            warn!(variable = %problem.variables[j], raw, "rejecting non-integral value");
            return Err(SolverError::Numerical(format!(
                "{} = {} is not a non-negative integer",
                problem.variables[j], raw
            )));
        }
        values.push(rounded as i64);
    }

    // A profitable column stuck at the clamp may have wanted more.
    for (j, &value) in values.iter().enumerate() {
        if clamped[j] && problem.c[j] < 0 && value >= BACKEND_INT_MAX {
            warn!(variable = %problem.variables[j], "value reached the backend integer limit");
            return Err(SolverError::OutOfRange(format!(
                "{} would need more than {} units",
                problem.variables[j], BACKEND_INT_MAX
            )));
        }
    }

    if let Some(v) = problem.violations(&values).first() {
        return Err(SolverError::Numerical(format!(
            "{} uses {} of {}",
            v.row, v.used, v.capacity
        )));
    }

    let objective_value = problem
        .objective_value(&values)
        .ok_or_else(|| SolverError::Numerical("objective value does not fit in 64 bits".to_string()))?;
    Ok(Solution::optimal(values, objective_value))
}
