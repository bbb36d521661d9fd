//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the isolator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Planning-phase events (the walk)
    Walk(WalkEvent),
    /// Execution-phase events (folder creation, moves)
    Move(MoveEvent),
    /// Run-level events
    Run(RunEvent),
}

/// Events during the walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WalkEvent {
    /// The walk has started at the given root
    Started { root: PathBuf },
    /// Progress update, sent once per directory entered
    Progress(WalkProgress),
    /// A hidden file was skipped (base name starts with a dot)
    HiddenSkipped { path: PathBuf },
    /// An entry named like the isolated folder was skipped
    IsolatedSkipped { path: PathBuf },
    /// A file collided with an earlier common name and will be moved
    DuplicateFound { path: PathBuf, common_name: String },
    /// The walk completed
    Completed {
        directories: usize,
        files_examined: usize,
    },
}

/// Progress information during the walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkProgress {
    /// Number of directories entered so far
    pub directories_entered: usize,
    /// Number of files examined so far
    pub files_examined: usize,
    /// Directory currently being processed
    pub current_path: PathBuf,
}

/// Events during plan execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MoveEvent {
    /// An isolated folder was created (absent folders only)
    FolderCreated { path: PathBuf },
    /// A file was moved into an isolated folder
    FileMoved {
        from: PathBuf,
        to: PathBuf,
        /// True when the destination name carries a collision suffix
        renamed: bool,
    },
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// The run has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: RunPhase },
    /// The run completed successfully
    Completed { summary: RunSummary },
    /// The run encountered a fatal error
    Error { message: String },
}

/// Phases of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Planning,
    Moving,
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Directories visited by the walk
    pub directories_visited: usize,
    /// Files examined (hidden files excluded)
    pub files_examined: usize,
    /// Files moved into isolated folders
    pub files_moved: usize,
    /// Isolated folders newly created
    pub folders_created: usize,
    /// Moves that needed a collision suffix
    pub renamed_moves: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::Planning => write!(f, "Planning"),
            RunPhase::Moving => write!(f, "Moving"),
        }
    }
}
