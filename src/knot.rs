use crate::error::{Result, SplineError};

/// Knot represents a sample point through which the spline passes.
/// - `x` - coordinate,
/// - `y` - coordinate.
///
/// Knots are ordered by `x` only, so sorting a set of knots keeps every `y` paired with its `x`.
#[derive(Debug, Clone, Copy)]
pub struct Knot {
    x: f64,
    y: f64,
}

impl Knot {
    /// # Example
    /// ```
    /// use natural_spline::Knot;
    ///
    /// let knot = Knot::new(1.0, 2.0);
    /// assert_eq!(1.0, knot.get_x());
    /// assert_eq!(2.0, knot.get_y());
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Knot { x, y }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }
}

impl Ord for Knot {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x.total_cmp(&other.x)
    }
}

impl PartialOrd for Knot {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Knot {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
    }
}

impl Eq for Knot {}

/// Pairs `x` with `y`, validates the sample set and returns the knots sorted by `x`.
///
/// # Errors
/// [SplineError::InvalidInput] when the lengths differ, fewer than 2 points are given,
/// a coordinate is not finite or two knots share the same `x`.
/// ```
/// use natural_spline::sort_samples;
///
/// let knots = sort_samples(&[2.0, 0.0, 1.0], &[4.0, 0.0, 1.0]).unwrap();
/// assert_eq!(vec![0.0, 1.0, 2.0], knots.iter().map(|k| k.get_x()).collect::<Vec<_>>());
/// assert_eq!(vec![0.0, 1.0, 4.0], knots.iter().map(|k| k.get_y()).collect::<Vec<_>>());
///
/// assert!(sort_samples(&[1.0], &[1.0]).is_err());
/// ```
pub fn sort_samples(x: &[f64], y: &[f64]) -> Result<Vec<Knot>> {
    if x.len() != y.len() {
        return Err(SplineError::InvalidInput(format!(
            "x has {} values while y has {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(SplineError::InvalidInput(
            "at least 2 sample points are required".to_string(),
        ));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(SplineError::InvalidInput(
            "sample coordinates must be finite".to_string(),
        ));
    }

    let mut knots: Vec<Knot> = x.iter().zip(y).map(|(x, y)| Knot::new(*x, *y)).collect();
    knots.sort();

    if knots.windows(2).any(|w| w[1].x - w[0].x < 1e-16) {
        return Err(SplineError::InvalidInput(
            "knots have equal x values".to_string(),
        ));
    }

    Ok(knots)
}

/// Spacing between consecutive knots, `x[i+1] - x[i]` and `y[i+1] - y[i]`.
pub(crate) fn deltas(knots: &[Knot]) -> (Vec<f64>, Vec<f64>) {
    knots
        .windows(2)
        .map(|w| (w[1].x - w[0].x, w[1].y - w[0].y))
        .unzip()
}
