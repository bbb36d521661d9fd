//! Per-directory file isolation.
//!
//! Files sharing a common name within one directory are duplicates; the
//! planner decides which ones move and the executor moves them.

mod executor;
mod planner;
mod types;

pub use executor::IsolateExecutor;
pub use planner::IsolatePlanner;
pub use types::*;
