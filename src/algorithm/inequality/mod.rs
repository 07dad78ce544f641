//! Inequality measures over a salary sample
//!
//! Every measure takes the raw cap-hit values of one (team, season) group in
//! any order. Empty or degenerate samples (all zero, a single observation)
//! yield the `0.0` sentinel rather than an error; only the logarithmic
//! Atkinson branch can fail, when a salary is not strictly positive.

mod atkinson;
mod gini;
mod ortega;

pub use atkinson::atkinson;
pub use gini::{GiniCoefficients, adjusted_gini, gini, gini_coefficients};
pub use ortega::ortega_gamma;

/// Round half away from zero to a fixed number of decimal places
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Arithmetic mean, `None` for an empty slice
pub(crate) fn sample_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
