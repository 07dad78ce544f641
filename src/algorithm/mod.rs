//! Algorithm implementations for salary inequality analysis
//!
//! This module contains the closed-form inequality measures computed over a
//! single team/season salary sample, and the descriptive statistics used by
//! the per-team salary summary.

pub mod inequality;
pub mod summary;

pub use inequality::{
    GiniCoefficients, adjusted_gini, atkinson, gini, gini_coefficients, ortega_gamma, round_to,
};
pub use summary::{mean, population_std_dev};
