//! Types for the isolate module.

use crate::core::naming::Direction;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default name of the per-directory destination folder
pub const DEFAULT_ISOLATED_NAME: &str = "Isolated";

/// Configuration for an isolation run.
///
/// This is the explicit request object handed to the core; there is no
/// other input channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolateConfig {
    /// Root of the tree to process
    pub root: PathBuf,
    /// Number of characters to trim from each stem
    pub trim_chars: usize,
    /// Which end of the stem to trim from
    pub direction: Direction,
    /// Name of the per-directory destination folder
    pub isolated_name: String,
}

impl IsolateConfig {
    /// Create a config with the default folder name and direction
    pub fn new(root: impl Into<PathBuf>, trim_chars: usize) -> Self {
        Self {
            root: root.into(),
            trim_chars,
            direction: Direction::default(),
            isolated_name: DEFAULT_ISOLATED_NAME.to_string(),
        }
    }
}

/// A single move the plan calls for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMove {
    /// Current location of the file
    pub source: PathBuf,
    /// Where it will land, inside its directory's isolated folder
    pub destination: PathBuf,
    /// The key it collided on
    pub common_name: String,
    /// True when the destination name carries a collision suffix
    pub renamed: bool,
}

/// Everything a run would do, computed without touching the tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolatePlan {
    /// Plan identifier
    pub id: String,
    /// Root the walk started from
    pub root: PathBuf,
    /// Folder name the plan isolates into
    pub isolated_name: String,
    /// Every directory the walk visited, in visit order
    pub directories: Vec<PathBuf>,
    /// Moves to perform
    pub moves: Vec<PlannedMove>,
    /// Files examined (hidden files excluded)
    pub files_examined: usize,
    /// Hidden files skipped
    pub hidden_skipped: usize,
}

impl IsolatePlan {
    /// Number of moves that needed a collision suffix
    pub fn renamed_count(&self) -> usize {
        self.moves.iter().filter(|m| m.renamed).count()
    }
}

/// Result of executing a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolateResult {
    /// Files moved into isolated folders
    pub files_moved: usize,
    /// Isolated folders newly created (pre-existing ones don't count)
    pub folders_created: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
