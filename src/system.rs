use nalgebra::{DMatrix, DVector};

use crate::error::Result;
use crate::knot::{deltas, sort_samples};

/// Builds the natural cubic spline system `A c = b` for the given samples.
///
/// The first and last rows are identity rows with a zero right-hand side, so the
/// second derivative vanishes at both ends. Interior row `i` couples `c[i-1]`, `c[i]`
/// and `c[i+1]`:
///
/// `dx[i-1]*c[i-1] + 2*(dx[i-1] + dx[i])*c[i] + dx[i]*c[i+1] = 3*(dy[i]/dx[i] - dy[i-1]/dx[i-1])`
///
/// The diagonal of every interior row is twice the sum of its neighbours, so the matrix is
/// strictly diagonally dominant for any valid input. Unsorted samples are sorted by `x` first.
///
/// # Example
/// ```
/// use natural_spline::build_spline_system;
///
/// let (matrix, rhs) = build_spline_system(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 0.0, 1.0]).unwrap();
///
/// assert_eq!(4.0, matrix[(1, 1)]);
/// assert_eq!(vec![0.0, -6.0, 6.0, 0.0], rhs.as_slice());
/// ```
/// # Errors
/// [crate::SplineError::InvalidInput] when lengths differ, fewer than 2 points are given,
/// values are not finite or `x` contains duplicates.
pub fn build_spline_system(x: &[f64], y: &[f64]) -> Result<(DMatrix<f64>, DVector<f64>)> {
    let knots = sort_samples(x, y)?;
    let size = knots.len();
    let (delta_x, delta_y) = deltas(&knots);

    let mut matrix = DMatrix::<f64>::zeros(size, size);
    let mut rhs = DVector::<f64>::zeros(size);

    matrix[(0, 0)] = 1.0;
    matrix[(size - 1, size - 1)] = 1.0;

    for i in 1..size - 1 {
        matrix[(i, i - 1)] = delta_x[i - 1];
        matrix[(i, i)] = 2.0 * (delta_x[i - 1] + delta_x[i]);
        matrix[(i, i + 1)] = delta_x[i];
        rhs[i] = 3.0 * (delta_y[i] / delta_x[i] - delta_y[i - 1] / delta_x[i - 1]);
    }

    Ok((matrix, rhs))
}
