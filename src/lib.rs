//! Natural cubic spline construction backed by a Jacobi iterative solver.
//!
//! The pipeline has three steps which can be used separately:
//! - [build_spline_system] derives the strictly diagonally dominant system for the second
//!   derivative coefficients,
//! - [solve_jacobi] solves any square system by Jacobi iteration,
//! - [recover_coefficients] turns the solution into per-interval cubic coefficients.
//!
//! [CubicSpline] runs all three and evaluates the result.
//!
//! # Example
//! ```
//! use nalgebra::DVector;
//! use natural_spline::{build_spline_system, recover_coefficients, solve_jacobi, CubicSpline};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [0.0, 1.0, 0.0, 1.0];
//!
//! let (matrix, rhs) = build_spline_system(&x, &y).unwrap();
//! let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(4), 1e-10, 1000).unwrap();
//! let coefficients = recover_coefficients(&x, &y, &result.solution).unwrap();
//!
//! assert!(result.converged);
//! assert_approx_eq!(coefficients.b[0], 5.0 / 3.0, 1e-8);
//!
//! let spline = CubicSpline::new(&x, &y).unwrap();
//! assert_approx_eq!(0.75, spline.interpolate(0.5).unwrap(), 1e-8);
//! ```

mod coefficients;
mod error;
mod jacobi;
mod knot;
mod linalg;
mod polynomial;
mod spline;
mod system;

pub use coefficients::{
    linear_coefficients, recover_coefficients, LinearCoefficients, SplineCoefficients,
};
pub use error::{Result, SplineError};
pub use jacobi::{solve_jacobi, solve_jacobi_with, JacobiConfig, JacobiSolution};
pub use knot::{sort_samples, Knot};
pub use linalg::{is_diagonally_dominant, residual_norm, solve_direct};
pub use spline::{CubicSpline, LinearSpline};
pub use system::build_spline_system;
