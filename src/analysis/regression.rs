use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SeaLevelError;

/// A fitted polynomial of a given degree.
///
/// Coefficients are stored in ascending order of power: `coefficients[k]`
/// multiplies `x^k`. Instances are cheap and ephemeral; every prediction
/// call re-fits from the raw observations, so a fit is never shared or
/// cached across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialFit {
    pub degree: usize,
    pub coefficients: Vec<f64>,
}

impl PolynomialFit {
    /// Evaluate the polynomial at a single point (Horner's method).
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    /// Evaluate the polynomial at each target, preserving target order.
    pub fn predict(&self, x_targets: &[f64]) -> Vec<f64> {
        x_targets.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Coefficient of determination against a set of observations.
    ///
    /// 1.0 is a perfect fit; 0.0 means the fit explains no more variance
    /// than the mean of the observations.
    pub fn r_squared(&self, x_observed: &[f64], y_observed: &[f64]) -> f64 {
        if y_observed.is_empty() {
            return 0.0;
        }
        let mean = y_observed.iter().sum::<f64>() / y_observed.len() as f64;
        let ss_tot: f64 = y_observed.iter().map(|y| (y - mean).powi(2)).sum();
        let ss_res: f64 = x_observed
            .iter()
            .zip(y_observed)
            .map(|(&x, &y)| (y - self.evaluate(x)).powi(2))
            .sum();
        if ss_tot.abs() < f64::EPSILON {
            if ss_res.abs() < f64::EPSILON {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        }
    }
}

/// Fit a least-squares polynomial of `degree` to the observed points.
///
/// Builds a design matrix of monomial features `1, x, ..., x^degree` and
/// solves the ordinary least-squares system via SVD (no regularization).
/// Requires `x_observed.len() == y_observed.len()` and strictly more
/// observations than `degree`, otherwise the system is underdetermined.
pub fn fit(
    x_observed: &[f64],
    y_observed: &[f64],
    degree: usize,
) -> Result<PolynomialFit, SeaLevelError> {
    if degree < 1 {
        return Err(SeaLevelError::InvalidParameter(
            "regression degree must be at least 1".to_string(),
        ));
    }
    if x_observed.len() != y_observed.len() {
        return Err(SeaLevelError::InvalidParameter(format!(
            "x/y length mismatch: {} vs {}",
            x_observed.len(),
            y_observed.len()
        )));
    }
    if x_observed.len() <= degree {
        return Err(SeaLevelError::InsufficientData(format!(
            "need more than {} observations for a degree-{} fit, got {}",
            degree,
            degree,
            x_observed.len()
        )));
    }

    let n = x_observed.len();
    let k = degree + 1;
    let design = DMatrix::from_fn(n, k, |i, j| x_observed[i].powi(j as i32));
    let rhs = DVector::from_column_slice(y_observed);

    let svd = design.svd(true, true);

    // Rank tolerance scaled by the largest singular value, so the cutoff
    // tracks the conditioning of this particular system.
    let sigma_max = svd.singular_values.max();
    let epsilon = f64::EPSILON * n.max(k) as f64 * sigma_max;

    let solution = svd
        .solve(&rhs, epsilon)
        .map_err(|e| SeaLevelError::InsufficientData(e.to_string()))?;

    let coefficients: Vec<f64> = solution.iter().copied().collect();
    if coefficients.iter().any(|c| c.is_nan()) {
        return Err(SeaLevelError::InsufficientData(
            "least-squares solution contains NaN coefficients".to_string(),
        ));
    }

    debug!(degree, observations = n, "fitted polynomial");
    Ok(PolynomialFit {
        degree,
        coefficients,
    })
}

/// Fit a polynomial to the observations and evaluate it at each target.
///
/// Convenience wrapper around [`fit`] and [`PolynomialFit::predict`];
/// results preserve target order. Purely functional: identical inputs
/// always yield identical outputs.
pub fn fit_and_predict(
    x_observed: &[f64],
    y_observed: &[f64],
    x_targets: &[f64],
    degree: usize,
) -> Result<Vec<f64>, SeaLevelError> {
    let model = fit(x_observed, y_observed, degree)?;
    Ok(model.predict(x_targets))
}
