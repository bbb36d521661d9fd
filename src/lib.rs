//! # File Isolator
//!
//! Groups files whose names share a common stem and moves the extras into a
//! per-directory `Isolated` folder.
//!
//! ## Core Philosophy
//! - **Never copy, never delete** - Duplicates are moved, not destroyed
//! - **Per-directory scope** - A collision in one folder never touches another
//! - **Never overwrite** - Destination clashes are renamed with a suffix
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - The walk/dedup/move engine
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{IsolatorError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
