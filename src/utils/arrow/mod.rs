//! Arrow data handling utilities
//!
//! Helpers for pulling typed columns out of record batches regardless of the
//! physical type the file was written with, and for preparing batches for
//! text output.

pub mod array_utils;

pub use array_utils::{downcast_array, fixed_point_floats, get_column};
