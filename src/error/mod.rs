//! # Error Module
//!
//! User-friendly error types for the file isolator.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Fail loudly** - filesystem errors abort the run; partial work is
//!   never silently papered over

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum IsolatorError {
    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("Move error: {0}")]
    Move(#[from] MoveError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while walking the directory tree
#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory entry {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while creating folders or moving files
#[derive(Error, Debug)]
pub enum MoveError {
    #[error("Failed to create isolated folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, IsolatorError>;
