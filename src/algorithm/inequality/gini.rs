//! Gini coefficient and its small-sample correction.

use itertools::Itertools;

/// Raw and size-adjusted Gini for one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GiniCoefficients {
    /// Population Gini coefficient
    pub raw: f64,
    /// Gini scaled by `(n + 1) / (n - 1)`
    pub adjusted: f64,
    /// Sample size the coefficients were computed over
    pub sample_size: usize,
}

/// Population Gini coefficient
///
/// Values are sorted ascending and ranked from 1, then
/// `Σ (2i − n − 1)·xᵢ / (n · Σ xᵢ)`. Returns `0.0` for an empty sample or one
/// summing to zero. The result is not clamped.
#[must_use]
pub fn gini(values: &[f64]) -> f64 {
    let n = values.len();
    let total: f64 = values.iter().sum();
    if n == 0 || total == 0.0 {
        return 0.0;
    }

    let n = n as f64;
    let weighted: f64 = values
        .iter()
        .copied()
        .sorted_by(f64::total_cmp)
        .enumerate()
        .map(|(idx, value)| {
            let rank = (idx + 1) as f64;
            (2.0 * rank - n - 1.0) * value
        })
        .sum();

    weighted / (n * total)
}

/// Small-sample bias correction of a raw Gini
///
/// With one observation or fewer the raw value is returned unchanged.
#[must_use]
pub fn adjusted_gini(raw: f64, sample_size: usize) -> f64 {
    if sample_size > 1 {
        let n = sample_size as f64;
        raw * (n + 1.0) / (n - 1.0)
    } else {
        raw
    }
}

/// Compute raw and adjusted Gini together (unrounded)
#[must_use]
pub fn gini_coefficients(values: &[f64]) -> GiniCoefficients {
    let raw = gini(values);
    GiniCoefficients {
        raw,
        adjusted: adjusted_gini(raw, values.len()),
        sample_size: values.len(),
    }
}
