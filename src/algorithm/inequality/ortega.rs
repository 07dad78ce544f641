//! Ortega gamma: squared deviations from the mean, normalised by the mean.

use super::sample_mean;

/// Ortega gamma inequality score
///
/// `Σ ((xᵢ − μ) / μ)² / (n − 1)`. Returns `0.0` when `n ≤ 1` or the mean is
/// zero.
#[must_use]
pub fn ortega_gamma(values: &[f64]) -> f64 {
    let n = values.len();
    let Some(mean) = sample_mean(values) else {
        return 0.0;
    };
    if n <= 1 || mean == 0.0 {
        return 0.0;
    }

    let squared: f64 = values
        .iter()
        .map(|value| ((value - mean) / mean).powi(2))
        .sum();

    squared / (n - 1) as f64
}
