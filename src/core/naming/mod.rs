//! # Naming Module
//!
//! Derives the deduplication key ("common name") for a file.
//!
//! The key is the file's stem - its name without the final extension -
//! with a fixed number of characters trimmed from one end. Two files in
//! the same directory with equal keys are duplicates of each other; the
//! extension never participates.
//!
//! Counts are in Unicode characters, not bytes, so multi-byte names trim
//! the same way they read.

use serde::{Deserialize, Serialize};

/// Which end of the stem the trim removes characters from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Trim from the end of the stem (default)
    #[default]
    Back,
    /// Trim from the start of the stem
    Front,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Back => write!(f, "back"),
            Direction::Front => write!(f, "front"),
        }
    }
}

/// Compute the common name for a stem.
///
/// A stem fully consumed by the trim keys to the empty string, in both
/// directions. Short names therefore collapse into one shared bucket;
/// callers that trim more characters than their names hold get exactly
/// the grouping they asked for.
pub fn common_name(stem: &str, count: usize, direction: Direction) -> String {
    match direction {
        Direction::Back => {
            let len = stem.chars().count();
            if len > count {
                stem.chars().take(len - count).collect()
            } else {
                String::new()
            }
        }
        Direction::Front => stem.chars().skip(count).collect(),
    }
}

/// Hidden files (name starting with a dot) are never keyed or moved.
pub fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.')
}
