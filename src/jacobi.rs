//! Jacobi fixed-point iteration for square linear systems.
//!
//! Every sweep computes the new iterate from the previous full iterate only:
//!
//! `x_new[i] = (b[i] - sum_{j != i} A[i,j] * x_prev[j]) / A[i,i]`
//!
//! Iteration stops once the Euclidean norm of `x_new - x_prev` drops below the tolerance,
//! or when the iteration cap is reached. Hitting the cap is not an error: the last iterate
//! is returned with `converged == false`.

use log::{debug, trace, warn};
use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SplineError};

/// Stopping criteria for [solve_jacobi_with].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiConfig {
    /// Absolute bound on the step norm `|x_new - x_prev|`.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Diagonal entries with magnitude at or below this value are treated as zero.
    pub singular_epsilon: f64,
}

impl Default for JacobiConfig {
    fn default() -> Self {
        JacobiConfig {
            tolerance: 1e-10,
            max_iterations: 1000,
            singular_epsilon: f64::EPSILON,
        }
    }
}

impl JacobiConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_singular_epsilon(mut self, singular_epsilon: f64) -> Self {
        self.singular_epsilon = singular_epsilon;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SplineError::InvalidInput(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(SplineError::InvalidInput(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if !(self.singular_epsilon.is_finite() && self.singular_epsilon >= 0.0) {
            return Err(SplineError::InvalidInput(format!(
                "singular_epsilon must be non-negative and finite, got {}",
                self.singular_epsilon
            )));
        }
        Ok(())
    }
}

/// Result of a Jacobi solve.
#[derive(Debug, Clone, PartialEq)]
pub struct JacobiSolution {
    pub solution: DVector<f64>,
    /// Number of sweeps performed. Equals the configured cap when the solve did not converge.
    pub iterations: usize,
    pub converged: bool,
    /// Step norm `|x_new - x_prev|` recorded after every sweep.
    pub residuals: Vec<f64>,
}

impl JacobiSolution {
    /// Splits into `(solution, iterations_used)`.
    pub fn into_parts(self) -> (DVector<f64>, usize) {
        (self.solution, self.iterations)
    }
}

/// Solves `A x = b` by Jacobi iteration starting from `initial_guess`.
///
/// Uses [JacobiConfig::default] for the singular-diagonal threshold.
///
/// # Example
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use natural_spline::solve_jacobi;
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 2.0, 5.0]);
/// let rhs = DVector::from_vec(vec![6.0, 12.0]);
/// let initial_guess = DVector::zeros(2);
///
/// let result = solve_jacobi(&matrix, &rhs, &initial_guess, 1e-12, 200).unwrap();
///
/// assert!(result.converged);
/// assert!((result.solution[0] - 1.0).abs() < 1e-10);
/// assert!((result.solution[1] - 2.0).abs() < 1e-10);
/// ```
/// # Errors
/// - [SplineError::DimensionMismatch] if `matrix` is not square or `rhs`/`initial_guess`
///   do not match its size,
/// - [SplineError::SingularSystem] if a diagonal entry is zero,
/// - [SplineError::InvalidInput] for an empty system, non-finite entries, a non-positive
///   tolerance or a zero iteration cap.
pub fn solve_jacobi(
    matrix: &DMatrix<f64>,
    rhs: &DVector<f64>,
    initial_guess: &DVector<f64>,
    tolerance: f64,
    max_iterations: usize,
) -> Result<JacobiSolution> {
    let config = JacobiConfig::default()
        .with_tolerance(tolerance)
        .with_max_iterations(max_iterations);
    solve_jacobi_with(matrix, rhs, initial_guess, &config)
}

/// Same as [solve_jacobi] with every stopping criterion taken from `config`.
pub fn solve_jacobi_with(
    matrix: &DMatrix<f64>,
    rhs: &DVector<f64>,
    initial_guess: &DVector<f64>,
    config: &JacobiConfig,
) -> Result<JacobiSolution> {
    config.validate()?;
    check_dimensions(matrix, rhs, initial_guess)?;
    check_finite(matrix, rhs, initial_guess)?;

    let size = matrix.nrows();
    let diagonal = matrix.diagonal();
    for (row, value) in diagonal.iter().enumerate() {
        if value.abs() <= config.singular_epsilon {
            return Err(SplineError::SingularSystem { row, value: *value });
        }
    }

    let mut x_prev = initial_guess.clone();
    let mut residuals = Vec::new();

    // First sweep's step norm, |D^-1 (b - A x0)|
    let first_step = (rhs - matrix * &x_prev).component_div(&diagonal).norm();
    if first_step < config.tolerance {
        debug!("initial guess already satisfies the system of size {}", size);
        return Ok(JacobiSolution {
            solution: x_prev,
            iterations: 0,
            converged: true,
            residuals,
        });
    }

    let mut x_new = DVector::<f64>::zeros(size);
    for iteration in 1..=config.max_iterations {
        sweep(matrix, rhs, &diagonal, &x_prev, &mut x_new);

        let step = (&x_new - &x_prev).norm();
        residuals.push(step);
        trace!("jacobi sweep {}: step norm {:e}", iteration, step);

        if step < config.tolerance {
            debug!("jacobi converged after {} iterations, step norm {:e}", iteration, step);
            return Ok(JacobiSolution {
                solution: x_new,
                iterations: iteration,
                converged: true,
                residuals,
            });
        }
        std::mem::swap(&mut x_prev, &mut x_new);
    }

    warn!(
        "jacobi did not reach tolerance {:e} within {} iterations, last step norm {:e}",
        config.tolerance,
        config.max_iterations,
        residuals.last().copied().unwrap_or(f64::NAN)
    );
    Ok(JacobiSolution {
        solution: x_prev,
        iterations: config.max_iterations,
        converged: false,
        residuals,
    })
}

fn sweep(
    matrix: &DMatrix<f64>,
    rhs: &DVector<f64>,
    diagonal: &DVector<f64>,
    x_prev: &DVector<f64>,
    x_new: &mut DVector<f64>,
) {
    let size = matrix.nrows();
    for i in 0..size {
        let mut sum = 0.0;
        for j in 0..size {
            if i != j {
                sum += matrix[(i, j)] * x_prev[j];
            }
        }
        x_new[i] = (rhs[i] - sum) / diagonal[i];
    }
}

fn check_dimensions(
    matrix: &DMatrix<f64>,
    rhs: &DVector<f64>,
    initial_guess: &DVector<f64>,
) -> Result<()> {
    let size = matrix.nrows();
    if size == 0 {
        return Err(SplineError::InvalidInput("system is empty".to_string()));
    }
    if matrix.ncols() != size {
        return Err(SplineError::DimensionMismatch {
            what: "matrix columns",
            expected: size,
            found: matrix.ncols(),
        });
    }
    if rhs.len() != size {
        return Err(SplineError::DimensionMismatch {
            what: "right-hand side",
            expected: size,
            found: rhs.len(),
        });
    }
    if initial_guess.len() != size {
        return Err(SplineError::DimensionMismatch {
            what: "initial guess",
            expected: size,
            found: initial_guess.len(),
        });
    }
    Ok(())
}

fn check_finite(
    matrix: &DMatrix<f64>,
    rhs: &DVector<f64>,
    initial_guess: &DVector<f64>,
) -> Result<()> {
    let all_finite = matrix
        .iter()
        .chain(rhs.iter())
        .chain(initial_guess.iter())
        .all(|v| v.is_finite());
    if all_finite {
        Ok(())
    } else {
        Err(SplineError::InvalidInput(
            "system contains non-finite values".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn sample_system() -> (DMatrix<f64>, DVector<f64>) {
        #[rustfmt::skip]
        let matrix = DMatrix::from_row_slice(3, 3, &[
            10.0, -1.0, 2.0,
            -1.0, 11.0, -1.0,
            2.0, -1.0, 10.0,
        ]);
        let rhs = DVector::from_vec(vec![6.0, 25.0, -11.0]);
        (matrix, rhs)
    }

    #[test]
    fn converges_on_diagonally_dominant_system() {
        let eps = 1e-8;
        let (matrix, rhs) = sample_system();
        let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(3), 1e-10, 100).unwrap();

        assert!(result.converged);
        assert!(result.iterations < 100);
        assert_eq!(result.iterations, result.residuals.len());

        let expected = matrix.clone().lu().solve(&rhs).unwrap();
        for i in 0..3 {
            assert_approx_eq!(result.solution[i], expected[i], eps);
        }
    }

    #[test]
    fn first_sweep_uses_previous_iterate_only() {
        // With x0 = 0 one Jacobi sweep gives b[i] / A[i,i].
        // Gauss-Seidel would differ in rows 1 and 2.
        let (matrix, rhs) = sample_system();
        let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(3), 1e-10, 1).unwrap();

        assert!(!result.converged);
        assert_eq!(1, result.iterations);
        assert_eq!(0.6, result.solution[0]);
        assert_eq!(25.0 / 11.0, result.solution[1]);
        assert_eq!(-1.1, result.solution[2]);
    }

    #[test]
    fn iteration_cap_returns_last_iterate() {
        let (matrix, rhs) = sample_system();
        let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(3), 1e-14, 3).unwrap();

        assert!(!result.converged);
        assert_eq!(3, result.iterations);
        assert_eq!(3, result.residuals.len());
        assert!(result.solution.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn initial_guess_already_solves() {
        let matrix = DMatrix::<f64>::identity(2, 2);
        let rhs = DVector::<f64>::zeros(2);
        let (solution, iterations) = solve_jacobi(&matrix, &rhs, &DVector::zeros(2), 1e-10, 1000)
            .unwrap()
            .into_parts();

        assert_eq!(0, iterations);
        assert_eq!(DVector::<f64>::zeros(2), solution);
    }

    #[test]
    fn small_diagonal_runs_sweeps() {
        // |b - A x0| is below the tolerance but x0 is far from the solution 5e-5.
        let eps = 1e-8;
        let matrix = DMatrix::from_diagonal(&DVector::from_vec(vec![1e-6, 1e-6]));
        let rhs = DVector::from_vec(vec![5e-11, 0.0]);
        let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(2), 1e-10, 1000).unwrap();

        assert!(result.converged);
        assert!(result.iterations >= 1);
        assert_approx_eq!(result.solution[0], 5e-5, eps);
        assert_eq!(0.0, result.solution[1]);
    }

    #[test]
    fn initial_guess_is_not_mutated() {
        let (matrix, rhs) = sample_system();
        let initial_guess = DVector::from_vec(vec![1.0, 1.0, 1.0]);
        let copy = initial_guess.clone();

        let _ = solve_jacobi(&matrix, &rhs, &initial_guess, 1e-10, 100).unwrap();
        assert_eq!(copy, initial_guess);
    }

    #[test]
    fn zero_diagonal_is_singular() {
        let matrix = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let rhs = DVector::from_vec(vec![1.0, 1.0]);
        let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(2), 1e-10, 100);

        assert_eq!(Err(SplineError::SingularSystem { row: 0, value: 0.0 }), result);
    }

    #[test]
    fn near_zero_diagonal_respects_epsilon() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1e-9]);
        let rhs = DVector::from_vec(vec![1.0, 1e-9]);
        let config = JacobiConfig::default().with_singular_epsilon(1e-6);

        let strict = solve_jacobi_with(&matrix, &rhs, &DVector::zeros(2), &config);
        assert!(matches!(strict, Err(SplineError::SingularSystem { row: 1, .. })));

        let loose = solve_jacobi(&matrix, &rhs, &DVector::zeros(2), 1e-10, 100).unwrap();
        assert!(loose.converged);
    }

    #[test]
    fn dimension_mismatch() {
        let (matrix, rhs) = sample_system();

        let result = solve_jacobi(&matrix, &DVector::zeros(2), &DVector::zeros(3), 1e-10, 10);
        assert!(matches!(
            result,
            Err(SplineError::DimensionMismatch { what: "right-hand side", .. })
        ));

        let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(4), 1e-10, 10);
        assert!(matches!(
            result,
            Err(SplineError::DimensionMismatch { what: "initial guess", .. })
        ));

        let non_square = DMatrix::<f64>::zeros(3, 2);
        let result = solve_jacobi(&non_square, &rhs, &DVector::zeros(3), 1e-10, 10);
        assert!(matches!(
            result,
            Err(SplineError::DimensionMismatch { what: "matrix columns", .. })
        ));
    }

    #[test]
    fn invalid_stopping_criteria() {
        let (matrix, rhs) = sample_system();
        let x0 = DVector::zeros(3);

        for (tolerance, max_iterations) in [(0.0, 10), (f64::NAN, 10), (1e-10, 0)] {
            let result = solve_jacobi(&matrix, &rhs, &x0, tolerance, max_iterations);
            assert!(matches!(result, Err(SplineError::InvalidInput(_))));
        }
    }

    #[test]
    fn non_finite_entries_rejected() {
        let (mut matrix, rhs) = sample_system();
        matrix[(0, 1)] = f64::NAN;

        let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(3), 1e-10, 10);
        assert!(matches!(result, Err(SplineError::InvalidInput(_))));
    }

    #[test]
    fn repeated_solves_are_identical() {
        let (matrix, rhs) = sample_system();
        let first = solve_jacobi(&matrix, &rhs, &DVector::zeros(3), 1e-10, 100).unwrap();
        let second = solve_jacobi(&matrix, &rhs, &DVector::zeros(3), 1e-10, 100).unwrap();

        assert_eq!(first, second);
    }
}
