//! Domain models
//!
//! Salary source data, inequality result rows and per-team summaries, each
//! convertible to and from Arrow record batches.

pub mod result;
pub mod salary;
pub mod summary;

pub use result::{InequalityResult, Measure, ResultTable};
pub use salary::{SalaryRecord, SalarySample, SalaryTable};
pub use summary::TeamSalarySummary;
