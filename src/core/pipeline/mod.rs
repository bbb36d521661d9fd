//! # Pipeline Module
//!
//! Orchestrates a full isolation run.
//!
//! ## Phases
//! 1. **Planning** - Walk the tree and decide every move (read-only)
//! 2. **Moving** - Create isolated folders and rename files
//!
//! Stopping after phase 1 is a dry run.

use crate::core::isolate::{IsolateConfig, IsolateExecutor, IsolatePlan, IsolatePlanner, IsolateResult, DEFAULT_ISOLATED_NAME};
use crate::core::naming::Direction;
use crate::error::{IsolatorError, Result};
use crate::events::{null_sender, Event, EventSender, RunEvent, RunPhase, RunSummary};
use std::path::PathBuf;
use std::time::Instant;

/// Result of a full run
#[derive(Debug)]
pub struct RunReport {
    /// The plan that was executed
    pub plan: IsolatePlan,
    /// What the executor did
    pub result: IsolateResult,
    /// Aggregated summary
    pub summary: RunSummary,
}

/// Builder for isolator configuration
pub struct IsolatorBuilder {
    config: IsolateConfig,
}

impl IsolatorBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self {
            config: IsolateConfig {
                root: PathBuf::new(),
                trim_chars: 0,
                direction: Direction::default(),
                isolated_name: DEFAULT_ISOLATED_NAME.to_string(),
            },
        }
    }

    /// Set the root directory to process
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Set the number of characters to trim from each stem
    pub fn trim_chars(mut self, count: usize) -> Self {
        self.config.trim_chars = count;
        self
    }

    /// Set the trim direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    /// Set the isolated-folder name
    pub fn isolated_name(mut self, name: impl Into<String>) -> Self {
        self.config.isolated_name = name.into();
        self
    }

    /// Build the isolator
    pub fn build(self) -> Isolator {
        Isolator {
            config: self.config,
        }
    }
}

impl Default for IsolatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The isolation pipeline
pub struct Isolator {
    config: IsolateConfig,
}

impl Isolator {
    /// Create a new builder
    pub fn builder() -> IsolatorBuilder {
        IsolatorBuilder::new()
    }

    /// Create an isolator from an existing config
    pub fn new(config: IsolateConfig) -> Self {
        Self { config }
    }

    /// Plan without executing (dry run)
    pub fn plan(&self) -> Result<IsolatePlan> {
        self.plan_with_events(&null_sender())
    }

    /// Plan without executing, reporting progress as events
    pub fn plan_with_events(&self, events: &EventSender) -> Result<IsolatePlan> {
        self.validate()?;
        Ok(IsolatePlanner::create_plan(&self.config, events)?)
    }

    /// Plan and execute
    pub fn run(&self) -> Result<RunReport> {
        self.run_with_events(&null_sender())
    }

    /// Plan and execute, reporting progress as events
    pub fn run_with_events(&self, events: &EventSender) -> Result<RunReport> {
        let start = Instant::now();
        self.validate()?;

        events.send(Event::Run(RunEvent::Started));
        events.send(Event::Run(RunEvent::PhaseChanged {
            phase: RunPhase::Planning,
        }));

        let plan = match IsolatePlanner::create_plan(&self.config, events) {
            Ok(plan) => plan,
            Err(e) => {
                events.send(Event::Run(RunEvent::Error {
                    message: e.to_string(),
                }));
                return Err(e.into());
            }
        };

        events.send(Event::Run(RunEvent::PhaseChanged {
            phase: RunPhase::Moving,
        }));

        let result = match IsolateExecutor::execute(&plan, events) {
            Ok(result) => result,
            Err(e) => {
                events.send(Event::Run(RunEvent::Error {
                    message: e.to_string(),
                }));
                return Err(e.into());
            }
        };

        let summary = RunSummary {
            directories_visited: plan.directories.len(),
            files_examined: plan.files_examined,
            files_moved: result.files_moved,
            folders_created: result.folders_created,
            renamed_moves: plan.renamed_count(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        events.send(Event::Run(RunEvent::Completed {
            summary: summary.clone(),
        }));

        Ok(RunReport {
            plan,
            result,
            summary,
        })
    }

    /// Reject folder names the filesystem would misread before any walk
    /// or move happens.
    fn validate(&self) -> Result<()> {
        let name = &self.config.isolated_name;
        if name.is_empty() {
            return Err(IsolatorError::Config(
                "isolated folder name must not be empty".to_string(),
            ));
        }
        if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            return Err(IsolatorError::Config(format!(
                "isolated folder name must be a plain directory name, got {:?}",
                name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn touch(dir: &std::path::Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn builder_defaults() {
        let isolator = Isolator::builder().root("/downloads").build();
        assert_eq!(isolator.config.trim_chars, 0);
        assert_eq!(isolator.config.direction, Direction::Back);
        assert_eq!(isolator.config.isolated_name, "Isolated");
    }

    #[test]
    fn run_moves_the_later_duplicate_aside() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "photo_a.jpg");
        touch(temp.path(), "photo_b.jpg");
        touch(temp.path(), "notes.txt");

        let report = Isolator::builder()
            .root(temp.path())
            .trim_chars(1)
            .build()
            .run()
            .unwrap();

        assert_eq!(report.summary.files_moved, 1);
        assert!(temp.path().join("notes.txt").exists());

        // Exactly one of the photo files stays; the other sits in Isolated
        let in_place = ["photo_a.jpg", "photo_b.jpg"]
            .iter()
            .filter(|n| temp.path().join(n).exists())
            .count();
        let isolated = ["photo_a.jpg", "photo_b.jpg"]
            .iter()
            .filter(|n| temp.path().join("Isolated").join(n).exists())
            .count();
        assert_eq!(in_place, 1);
        assert_eq!(isolated, 1);
    }

    #[test]
    fn second_run_is_harmless() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a_1.txt");
        touch(temp.path(), "a_2.txt");

        let isolator = Isolator::builder().root(temp.path()).trim_chars(2).build();

        let first = isolator.run().unwrap();
        assert_eq!(first.summary.files_moved, 1);
        assert_eq!(first.summary.folders_created, 1);

        // The isolated folder already exists and its contents are out of
        // reach, so the second run finds nothing to do
        let second = isolator.run().unwrap();
        assert_eq!(second.summary.files_moved, 0);
        assert_eq!(second.summary.folders_created, 0);
    }

    #[test]
    fn plan_alone_touches_nothing() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b_1.txt");
        touch(temp.path(), "b_2.txt");

        let plan = Isolator::builder()
            .root(temp.path())
            .trim_chars(2)
            .build()
            .plan()
            .unwrap();

        assert_eq!(plan.moves.len(), 1);
        assert!(!temp.path().join("Isolated").exists());
        assert!(temp.path().join("b_1.txt").exists());
        assert!(temp.path().join("b_2.txt").exists());
    }

    #[test]
    fn empty_folder_name_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let result = Isolator::builder()
            .root(temp.path())
            .isolated_name("")
            .build()
            .run();
        assert!(matches!(result, Err(IsolatorError::Config(_))));
    }

    #[test]
    fn path_separator_in_folder_name_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let result = Isolator::builder()
            .root(temp.path())
            .isolated_name("a/b")
            .build()
            .plan();
        assert!(matches!(result, Err(IsolatorError::Config(_))));
    }

    #[test]
    fn custom_folder_name_is_used_and_guarded() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "c_1.txt");
        touch(temp.path(), "c_2.txt");

        let isolator = Isolator::builder()
            .root(temp.path())
            .trim_chars(2)
            .isolated_name("Quarantine")
            .build();

        let report = isolator.run().unwrap();
        assert_eq!(report.summary.files_moved, 1);
        assert!(temp.path().join("Quarantine").is_dir());

        // A second run must not descend into the custom folder either
        let second = isolator.run().unwrap();
        assert_eq!(second.summary.files_moved, 0);

        let entries = fs::read_dir(temp.path().join("Quarantine")).unwrap().count();
        assert_eq!(entries, 1);
    }
}
