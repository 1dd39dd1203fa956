use thiserror::Error;

/// Errors reported by the spline builder, the Jacobi solver and coefficient recovery.
///
/// Slow convergence is not an error: [crate::JacobiSolution] carries the iteration
/// count and a `converged` flag instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Singular system: diagonal entry in row {row} is {value}")]
    SingularSystem { row: usize, value: f64 },
}

pub type Result<T> = std::result::Result<T, SplineError>;
