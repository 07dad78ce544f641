//! Descriptive statistics for the per-team salary summary

use crate::algorithm::inequality::sample_mean;

/// Arithmetic mean, `None` for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    sample_mean(values)
}

/// Population standard deviation (divides by `n`), `None` for an empty slice
#[must_use]
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = sample_mean(values)?;
    let variance =
        values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}
