//! Atkinson index with a caller-selected inequality-aversion exponent.

use super::sample_mean;
use crate::error::{InequalityError, Result};

/// Atkinson inequality index
///
/// For `epsilon == 1` the limiting form `1 − geometric_mean / mean` is used,
/// which requires every salary to be strictly positive. Otherwise
/// `1 − mean((xᵢ/μ)^(1−ε))^(1/(1−ε))`. Returns `0.0` when `n ≤ 1` or the mean
/// is zero.
pub fn atkinson(values: &[f64], epsilon: f64) -> Result<f64> {
    let n = values.len();
    let Some(mean) = sample_mean(values) else {
        return Ok(0.0);
    };
    if n <= 1 || mean == 0.0 {
        return Ok(0.0);
    }

    if epsilon == 1.0 {
        if let Some(bad) = values.iter().find(|value| **value <= 0.0) {
            return Err(InequalityError::NumericDomain(format!(
                "logarithmic Atkinson index requires positive salaries, found {bad}"
            )));
        }
        let log_mean = values.iter().map(|value| value.ln()).sum::<f64>() / n as f64;
        return Ok(1.0 - log_mean.exp() / mean);
    }

    let exponent = 1.0 - epsilon;
    let term = values
        .iter()
        .map(|value| (value / mean).powf(exponent))
        .sum::<f64>()
        / n as f64;

    Ok(1.0 - term.powf(1.0 / exponent))
}
