/// The result of solving an integer program
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Value of each variable (empty unless optimal)
    pub values: Vec<i64>,
    /// Objective value `c·x` (zero unless optimal)
    pub objective_value: i64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal integer solution was found
    Optimal,
    /// No assignment satisfies the constraints
    Infeasible,
    /// The objective can be improved without limit
    Unbounded,
}

impl Solution {
    pub fn optimal(values: Vec<i64>, objective_value: i64) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            values,
            objective_value,
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: SolutionStatus::Infeasible,
            values: Vec::new(),
            objective_value: 0,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            values: Vec::new(),
            objective_value: 0,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "optimal"),
            SolutionStatus::Infeasible => write!(f, "infeasible"),
            SolutionStatus::Unbounded => write!(f, "unbounded"),
        }
    }
}
