use log::{debug, warn};
use nalgebra::DVector;

use crate::coefficients::{linear_coefficients, recover_coefficients, SplineCoefficients};
use crate::error::{Result, SplineError};
use crate::jacobi::{solve_jacobi_with, JacobiConfig};
use crate::knot::{sort_samples, Knot};
use crate::polynomial::Polynomial;
use crate::system::build_spline_system;

/// Natural cubic spline through a set of samples.
///
/// Second-derivative coefficients are found with the Jacobi solver; a solve that stops at
/// the iteration cap still produces a spline, check [CubicSpline::converged] to detect it.
pub struct CubicSpline {
    segments: Segments,
    coefficients: SplineCoefficients,
    iterations: usize,
    converged: bool,
}

impl CubicSpline {
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        Self::with_config(x, y, &JacobiConfig::default())
    }

    pub fn with_config(x: &[f64], y: &[f64], config: &JacobiConfig) -> Result<Self> {
        let (matrix, rhs) = build_spline_system(x, y)?;
        let initial_guess = DVector::<f64>::zeros(rhs.len());
        let result = solve_jacobi_with(&matrix, &rhs, &initial_guess, config)?;

        if !result.converged {
            warn!(
                "cubic spline over {} knots built from an unconverged solve ({} iterations)",
                rhs.len(),
                result.iterations
            );
        }

        let coefficients = recover_coefficients(x, y, &result.solution)?;
        let knots = sort_samples(x, y)?;

        let polynomials = knots
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                Polynomial::new(
                    w[0].get_x(),
                    vec![w[0].get_y(), coefficients.b[i], coefficients.c[i], coefficients.d[i]],
                )
            })
            .collect();

        debug!(
            "cubic spline over {} knots, jacobi iterations: {}",
            knots.len(),
            result.iterations
        );

        Ok(CubicSpline {
            segments: Segments::new(knots, polynomials),
            coefficients,
            iterations: result.iterations,
            converged: result.converged,
        })
    }

    pub fn interpolate(&self, x: f64) -> Result<f64> {
        self.segments.interpolate(x)
    }

    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        self.segments.batch_interpolate(x_vector)
    }

    pub fn extrapolate(&self, x: f64) -> f64 {
        self.segments.extrapolate(x)
    }

    pub fn batch_extrapolate(&self, x_vector: &[f64]) -> Vec<f64> {
        self.segments.batch_extrapolate(x_vector)
    }

    pub fn coefficients(&self) -> &SplineCoefficients {
        &self.coefficients
    }

    pub fn knots(&self) -> &[Knot] {
        &self.segments.knots
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Piecewise-linear interpolant through a set of samples.
pub struct LinearSpline {
    segments: Segments,
}

impl LinearSpline {
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        let coefficients = linear_coefficients(x, y)?;
        let knots = sort_samples(x, y)?;

        let polynomials = coefficients
            .slope
            .iter()
            .zip(coefficients.intercept.iter())
            .map(|(slope, intercept)| Polynomial::new(0.0, vec![*intercept, *slope]))
            .collect();

        Ok(LinearSpline {
            segments: Segments::new(knots, polynomials),
        })
    }

    pub fn interpolate(&self, x: f64) -> Result<f64> {
        self.segments.interpolate(x)
    }

    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        self.segments.batch_interpolate(x_vector)
    }

    pub fn extrapolate(&self, x: f64) -> f64 {
        self.segments.extrapolate(x)
    }

    pub fn batch_extrapolate(&self, x_vector: &[f64]) -> Vec<f64> {
        self.segments.batch_extrapolate(x_vector)
    }

    pub fn knots(&self) -> &[Knot] {
        &self.segments.knots
    }
}

/// Sorted knots with one polynomial per interval.
struct Segments {
    knots: Vec<Knot>,
    polynomials: Vec<Polynomial>,
    min_x: f64,
    max_x: f64,
    is_knot_spacing_uniform: bool,
}

impl Segments {
    fn new(knots: Vec<Knot>, polynomials: Vec<Polynomial>) -> Self {
        let min_x = knots[0].get_x();
        let max_x = knots[knots.len() - 1].get_x();

        let x_spacing_vec: Vec<f64> = knots
            .windows(2)
            .map(|w| w[1].get_x() - w[0].get_x())
            .collect();
        let is_knot_spacing_uniform = x_spacing_vec
            .windows(2)
            .map(|spacing| (spacing[1] - spacing[0]).abs())
            .all(|difference| difference < 1e-12 * (max_x - min_x));

        Segments {
            knots,
            polynomials,
            min_x,
            max_x,
            is_knot_spacing_uniform,
        }
    }

    fn interpolate(&self, x: f64) -> Result<f64> {
        if self.is_in_range(x) {
            let index = self.find_interval_index(x);
            Ok(self.polynomials[index].evaluate(x))
        } else {
            Err(self.out_of_range(x))
        }
    }

    fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        if let Some(x) = x_vector.iter().find(|x| !self.is_in_range(**x)) {
            return Err(self.out_of_range(*x));
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.find_interval_index_with_hint(index, *x);
            results.push(self.polynomials[index].evaluate(*x));
        }
        Ok(results)
    }

    fn extrapolate(&self, x: f64) -> f64 {
        match self.evaluate_on_boundaries(x) {
            Some(result) => result,
            None => {
                let index = self.find_interval_index(x);
                self.polynomials[index].evaluate(x)
            }
        }
    }

    fn batch_extrapolate(&self, x_vector: &[f64]) -> Vec<f64> {
        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            match self.evaluate_on_boundaries(*x) {
                Some(result) => results.push(result),
                None => {
                    index = self.find_interval_index_with_hint(index, *x);
                    results.push(self.polynomials[index].evaluate(*x));
                }
            }
        }
        results
    }

    fn out_of_range(&self, x: f64) -> SplineError {
        SplineError::InvalidInput(format!(
            "x = {} is out of range [{}, {}]",
            x, self.min_x, self.max_x
        ))
    }

    fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    fn find_interval_index(&self, x: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_interval_index_uniform(x)
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_bisect(&self, x: f64) -> usize {
        let mut min = 0;
        let mut max = self.knots.len() - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.knots[mid].get_x() {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_interval_index_uniform(&self, x: f64) -> usize {
        let number_of_intervals = self.knots.len() - 1;
        let relative_x = ((x - self.min_x) / (self.max_x - self.min_x)).clamp(0.0, 1.0);
        let index = (relative_x * number_of_intervals as f64).floor() as usize;
        index.min(number_of_intervals - 1)
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {
        if self.is_in_interval_range(index_hint, x) {
            index_hint
        } else if index_hint + 1 < self.polynomials.len()
            && self.is_in_interval_range(index_hint + 1, x)
        {
            index_hint + 1
        } else {
            self.find_interval_index(x)
        }
    }

    fn is_in_interval_range(&self, interval_index: usize, x: f64) -> bool {
        self.knots[interval_index].get_x() <= x && x <= self.knots[interval_index + 1].get_x()
    }

    fn evaluate_on_boundaries(&self, x: f64) -> Option<f64> {
        let size = self.knots.len();
        if x < self.knots[1].get_x() {
            Some(self.polynomials[0].evaluate(x))
        } else if x > self.knots[size - 2].get_x() {
            Some(self.polynomials[size - 2].evaluate(x))
        } else {
            None
        }
    }
}
