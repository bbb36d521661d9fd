//! Executor for isolation plans.

use super::types::{IsolatePlan, IsolateResult};
use crate::error::MoveError;
use crate::events::{Event, EventSender, MoveEvent};
use std::fs;
use std::time::Instant;
use tracing::debug;

/// Applies a plan: creates isolated folders, then moves files.
///
/// Errors are fatal and nothing is rolled back; a run that fails halfway
/// leaves its earlier moves in place.
pub struct IsolateExecutor;

impl IsolateExecutor {
    /// Execute a plan.
    ///
    /// Every visited directory gets its isolated folder, duplicates or
    /// not; creating one that already exists is not an error. Moves are
    /// plain renames - the destination sits inside the source's own
    /// directory, so a rename never crosses a volume.
    pub fn execute(plan: &IsolatePlan, events: &EventSender) -> Result<IsolateResult, MoveError> {
        let start = Instant::now();

        let mut folders_created = 0usize;
        for dir in &plan.directories {
            let isolated = dir.join(&plan.isolated_name);
            if !isolated.exists() {
                fs::create_dir_all(&isolated).map_err(|source| MoveError::CreateFolder {
                    path: isolated.clone(),
                    source,
                })?;
                folders_created += 1;
                debug!(path = %isolated.display(), "created isolated folder");
                events.send(Event::Move(MoveEvent::FolderCreated { path: isolated }));
            }
        }

        let mut files_moved = 0usize;
        for mv in &plan.moves {
            fs::rename(&mv.source, &mv.destination).map_err(|source| MoveError::Rename {
                from: mv.source.clone(),
                to: mv.destination.clone(),
                source,
            })?;
            files_moved += 1;
            debug!(
                from = %mv.source.display(),
                to = %mv.destination.display(),
                "moved file"
            );
            events.send(Event::Move(MoveEvent::FileMoved {
                from: mv.source.clone(),
                to: mv.destination.clone(),
                renamed: mv.renamed,
            }));
        }

        Ok(IsolateResult {
            files_moved,
            folders_created,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
