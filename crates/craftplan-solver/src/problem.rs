/// An integer linear program in inequality form:
/// minimize `c·x` subject to `a_ub·x <= b_ub`, `x >= 0`, `x` integer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IlpProblem {
    /// Column labels, one per decision variable
    pub variables: Vec<String>,
    /// Row labels, one per capacity constraint
    pub rows: Vec<String>,
    /// Coefficient matrix, `rows.len()` x `variables.len()`
    pub a_ub: Vec<Vec<i64>>,
    /// Capacity of each row
    pub b_ub: Vec<i64>,
    /// Objective coefficients (minimized)
    pub c: Vec<i64>,
}

/// A row whose capacity is exceeded by a candidate assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViolation {
    /// Row label
    pub row: String,
    /// Row capacity
    pub capacity: i64,
    /// Amount the assignment uses
    pub used: i128,
}

impl IlpProblem {
    pub fn new(variables: Vec<String>, rows: Vec<String>) -> Self {
        let n = variables.len();
        let m = rows.len();
        Self {
            variables,
            rows,
            a_ub: vec![vec![0; n]; m],
            b_ub: vec![0; m],
            c: vec![0; n],
        }
    }

    pub fn set_objective(&mut self, c: Vec<i64>) {
        self.c = c;
    }

    pub fn set_capacity(&mut self, row: usize, capacity: i64) {
        self.b_ub[row] = capacity;
    }

    /// Add `amount` to the coefficient at (`row`, `col`).
    ///
    /// Returns the new coefficient, or `None` (leaving the cell unchanged) on overflow.
    pub fn add_coefficient(&mut self, row: usize, col: usize, amount: i64) -> Option<i64> {
        let cell = &mut self.a_ub[row][col];
        *cell = cell.checked_add(amount)?;
        Some(*cell)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Objective value `c·x`, or `None` when it does not fit in an `i64`
    pub fn objective_value(&self, x: &[i64]) -> Option<i64> {
        let total: i128 = self.c.iter().zip(x).map(|(&c, &x)| c as i128 * x as i128).sum();
        i64::try_from(total).ok()
    }

    /// Largest value column `col` can take on its own before some row overflows.
    ///
    /// `None` when no row consumes the column, i.e. it is only bounded below.
    pub fn column_upper_bound(&self, col: usize) -> Option<i64> {
        self.a_ub
            .iter()
            .zip(&self.b_ub)
            .filter(|(row, _)| row[col] > 0)
            .map(|(row, &b)| (b / row[col]).max(0))
            .min()
    }

    /// Rows whose capacity `x` exceeds, in row order
    pub fn violations(&self, x: &[i64]) -> Vec<RowViolation> {
        let mut violations = Vec::new();

        for (i, row) in self.a_ub.iter().enumerate() {
            let used: i128 = row.iter().zip(x).map(|(&a, &x)| a as i128 * x as i128).sum();
            if used > self.b_ub[i] as i128 {
                violations.push(RowViolation {
                    row: self.rows[i].clone(),
                    capacity: self.b_ub[i],
                    used,
                });
            }
        }

        violations
    }

    pub fn is_feasible(&self, x: &[i64]) -> bool {
        x.len() == self.num_variables() && x.iter().all(|&v| v >= 0) && self.violations(x).is_empty()
    }
}
