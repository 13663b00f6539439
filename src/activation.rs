//! The logistic sigmoid, `σ(x) = 1 / (1 + e^-x)`.
//!
//! Both layers of the network use it. Backprop only ever needs the derivative
//! at a point whose activation has already been computed, so the derivative is
//! expressed in terms of the cached output `y = σ(x)`: `σ'(x) = y (1 - y)`.

use crate::Matrix;

#[inline]
pub fn sigmoid(x: f64) -> f64 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// `σ'(x)` given `y = σ(x)`.
#[inline]
pub fn sigmoid_grad_from_output(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Applies [`sigmoid`] to every element.
#[must_use]
pub fn sigmoid_matrix(m: &Matrix) -> Matrix {
    m.map(sigmoid)
}

/// Applies [`sigmoid_grad_from_output`] to every element of an activated matrix.
#[must_use]
pub fn sigmoid_grad_matrix(activated: &Matrix) -> Matrix {
    activated.map(sigmoid_grad_from_output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_basic_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
        // No overflow at the extremes.
        assert!(sigmoid(-1e4).is_finite());
        assert!(sigmoid(1e4) <= 1.0);
    }

    #[test]
    fn gradient_from_output_matches_finite_difference() {
        let x = 0.3;
        let eps = 1e-6;
        let numeric = (sigmoid(x + eps) - sigmoid(x - eps)) / (2.0 * eps);
        let analytic = sigmoid_grad_from_output(sigmoid(x));
        assert!((numeric - analytic).abs() < 1e-8);
        assert!((sigmoid_grad_from_output(0.5) - 0.25).abs() < 1e-12);
    }
}
