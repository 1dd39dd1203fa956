/// Polynomial in local coordinate `t = x - origin`:
/// `p(x) = c[0] + c[1]*t + c[2]*t^2 + ...`
pub struct Polynomial {
    origin: f64,
    coefficients: Vec<f64>,
}

impl Polynomial {

    pub fn new(origin: f64, coefficients: Vec<f64>) -> Self {
        Polynomial { origin, coefficients }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let t = x - self.origin;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |result, c| result * t + c)
    }
}
