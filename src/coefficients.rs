use nalgebra::DVector;

use crate::error::{Result, SplineError};
use crate::knot::{deltas, sort_samples};

/// Cubic coefficients per interval. Segment `i` is
/// `S_i(t) = y[i] + b[i]*t + c[i]*t^2 + d[i]*t^3` with `t = x - x[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCoefficients {
    pub b: Vec<f64>,
    pub c: Vec<f64>,
    pub d: Vec<f64>,
}

/// First-degree spline. Segment `i` is `slope[i]*x + intercept[i]` in global `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearCoefficients {
    pub slope: Vec<f64>,
    pub intercept: Vec<f64>,
}

/// Recovers `b`, `c` and `d` for every interval from the solved second-derivative vector `c`.
///
/// Samples are sorted by `x` the same way [crate::build_spline_system] sorts them, so `c`
/// must be in sorted order.
///
/// # Errors
/// [SplineError::DimensionMismatch] when `c` does not have one entry per sample;
/// [SplineError::InvalidInput] for samples rejected by [crate::sort_samples].
pub fn recover_coefficients(x: &[f64], y: &[f64], c: &DVector<f64>) -> Result<SplineCoefficients> {
    let knots = sort_samples(x, y)?;
    if c.len() != knots.len() {
        return Err(SplineError::DimensionMismatch {
            what: "second derivative coefficients",
            expected: knots.len(),
            found: c.len(),
        });
    }

    let (delta_x, delta_y) = deltas(&knots);
    let number_of_intervals = delta_x.len();

    let mut b = Vec::with_capacity(number_of_intervals);
    let mut d = Vec::with_capacity(number_of_intervals);
    for i in 0..number_of_intervals {
        d.push((c[i + 1] - c[i]) / (3.0 * delta_x[i]));
        b.push(delta_y[i] / delta_x[i] - (delta_x[i] / 3.0) * (2.0 * c[i] + c[i + 1]));
    }

    Ok(SplineCoefficients {
        b,
        c: c.iter().take(number_of_intervals).copied().collect(),
        d,
    })
}

/// Slope and intercept of the piecewise-linear interpolant through the samples.
/// ```
/// use natural_spline::linear_coefficients;
///
/// let linear = linear_coefficients(&[0.0, 1.0, 3.0], &[1.0, 3.0, 2.0]).unwrap();
/// assert_eq!(vec![2.0, -0.5], linear.slope);
/// assert_eq!(vec![1.0, 3.5], linear.intercept);
/// ```
pub fn linear_coefficients(x: &[f64], y: &[f64]) -> Result<LinearCoefficients> {
    let knots = sort_samples(x, y)?;

    let (slope, intercept) = knots
        .windows(2)
        .map(|w| {
            let slope = (w[1].get_y() - w[0].get_y()) / (w[1].get_x() - w[0].get_x());
            (slope, w[0].get_y() - slope * w[0].get_x())
        })
        .unzip();

    Ok(LinearCoefficients { slope, intercept })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn four_point_coefficients() {
        let eps = 1e-12;
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 1.0, 0.0, 1.0];
        let c = DVector::from_vec(vec![0.0, -2.0, 2.0, 0.0]);

        let coefficients = recover_coefficients(&x, &y, &c).unwrap();

        assert_eq!(vec![0.0, -2.0, 2.0], coefficients.c);
        let expected_b = [5.0 / 3.0, -1.0 / 3.0, -1.0 / 3.0];
        let expected_d = [-2.0 / 3.0, 4.0 / 3.0, -2.0 / 3.0];
        for i in 0..3 {
            assert_approx_eq!(coefficients.b[i], expected_b[i], eps);
            assert_approx_eq!(coefficients.d[i], expected_d[i], eps);
        }
    }

    #[test]
    fn exact_cubic_is_recovered() {
        // p(x) = 2 - x + 0.5x^2 + 0.25x^3, c holds p''(x)/2 at the knots
        let eps = 1e-10;
        let p = |x: f64| 2.0 - x + 0.5 * x.powi(2) + 0.25 * x.powi(3);
        let dp = |x: f64| -1.0 + x + 0.75 * x.powi(2);
        let half_ddp = |x: f64| 0.5 + 0.75 * x;

        let x = [-1.0, 0.2, 0.9, 2.5, 3.0];
        let y: Vec<f64> = x.iter().map(|v| p(*v)).collect();
        let c = DVector::from_iterator(x.len(), x.iter().map(|v| half_ddp(*v)));

        let coefficients = recover_coefficients(&x, &y, &c).unwrap();

        for i in 0..x.len() - 1 {
            assert_approx_eq!(coefficients.b[i], dp(x[i]), eps);
            assert_approx_eq!(coefficients.c[i], half_ddp(x[i]), eps);
            assert_approx_eq!(coefficients.d[i], 0.25, eps);
        }
    }

    #[test]
    fn mismatched_solution_length() {
        let result = recover_coefficients(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0], &DVector::zeros(2));

        assert_eq!(
            Err(SplineError::DimensionMismatch {
                what: "second derivative coefficients",
                expected: 3,
                found: 2
            }),
            result
        );
    }

    #[test]
    fn linear_coefficients_unsorted() {
        let eps = 1e-12;
        let linear = linear_coefficients(&[2.0, 0.0, 1.0], &[0.0, 0.0, 2.0]).unwrap();

        assert_approx_eq!(linear.slope[0], 2.0, eps);
        assert_approx_eq!(linear.intercept[0], 0.0, eps);
        assert_approx_eq!(linear.slope[1], -2.0, eps);
        assert_approx_eq!(linear.intercept[1], 4.0, eps);
    }

    #[test]
    fn linear_coefficients_invalid() {
        assert!(linear_coefficients(&[0.0], &[1.0]).is_err());
        assert!(linear_coefficients(&[0.0, 1.0], &[1.0]).is_err());
    }
}
