//! Shared utilities: Arrow column access, tabular file IO and logging.

pub mod arrow;
pub mod io;
pub mod logging;
