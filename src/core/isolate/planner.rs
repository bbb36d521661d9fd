//! Plan generation: the walk and every dedup decision.

use super::types::{IsolateConfig, IsolatePlan, PlannedMove};
use crate::core::naming;
use crate::error::WalkError;
use crate::events::{Event, EventSender, WalkEvent, WalkProgress};
use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;
use walkdir::WalkDir;

/// Walks a tree and decides which files move where.
///
/// The walk itself is read-only; all filesystem effects live in the
/// executor. Dedup scope is strictly per directory: each directory gets
/// its own seen-names table, discarded when the directory is done.
pub struct IsolatePlanner;

impl IsolatePlanner {
    /// Walk the tree rooted at `config.root` and produce a plan.
    ///
    /// Entries are visited in whatever order the filesystem enumerates
    /// them; within a group the first file encountered keeps its place.
    pub fn create_plan(
        config: &IsolateConfig,
        events: &EventSender,
    ) -> Result<IsolatePlan, WalkError> {
        let root = &config.root;

        if !root.exists() {
            return Err(WalkError::RootNotFound { path: root.clone() });
        }
        if !root.is_dir() {
            return Err(WalkError::NotADirectory { path: root.clone() });
        }

        events.send(Event::Walk(WalkEvent::Started { root: root.clone() }));
        debug!(root = %root.display(), "starting walk");

        let isolated_name = OsStr::new(&config.isolated_name);

        let mut directories: Vec<PathBuf> = Vec::new();
        let mut moves: Vec<PlannedMove> = Vec::new();
        // One seen-names table per directory, keyed by the directory path
        let mut seen: HashMap<PathBuf, HashMap<String, String>> = HashMap::new();
        // Destinations already claimed by earlier planned moves
        let mut claimed: HashSet<PathBuf> = HashSet::new();
        let mut files_examined = 0usize;
        let mut hidden_skipped = 0usize;

        let mut walker = WalkDir::new(root).follow_links(false).into_iter();

        while let Some(entry_result) = walker.next() {
            let entry = entry_result.map_err(Self::map_walk_error)?;
            let path = entry.path();

            // The guard is by name, so a file called like the isolated
            // folder is skipped too. The root itself is exempt.
            if entry.depth() > 0 && entry.file_name() == isolated_name {
                debug!(path = %path.display(), "skipping isolated folder");
                events.send(Event::Walk(WalkEvent::IsolatedSkipped {
                    path: path.to_path_buf(),
                }));
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            if entry.file_type().is_dir() {
                directories.push(path.to_path_buf());
                events.send(Event::Walk(WalkEvent::Progress(WalkProgress {
                    directories_entered: directories.len(),
                    files_examined,
                    current_path: path.to_path_buf(),
                })));
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();

            if naming::is_hidden(&file_name) {
                hidden_skipped += 1;
                debug!(path = %path.display(), "skipping hidden file");
                events.send(Event::Walk(WalkEvent::HiddenSkipped {
                    path: path.to_path_buf(),
                }));
                continue;
            }

            files_examined += 1;

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let key = naming::common_name(&stem, config.trim_chars, config.direction);

            let parent = path.parent().unwrap_or(root).to_path_buf();
            let table = seen.entry(parent.clone()).or_default();

            if table.contains_key(&key) {
                let isolated_dir = parent.join(&config.isolated_name);
                let (destination, renamed) =
                    Self::unique_destination(&isolated_dir, entry.file_name(), &claimed);
                claimed.insert(destination.clone());

                debug!(
                    path = %path.display(),
                    common_name = %key,
                    "duplicate found"
                );
                events.send(Event::Walk(WalkEvent::DuplicateFound {
                    path: path.to_path_buf(),
                    common_name: key.clone(),
                }));

                moves.push(PlannedMove {
                    source: path.to_path_buf(),
                    destination,
                    common_name: key,
                    renamed,
                });
            } else {
                table.insert(key, file_name);
            }
        }

        events.send(Event::Walk(WalkEvent::Completed {
            directories: directories.len(),
            files_examined,
        }));
        debug!(
            directories = directories.len(),
            files = files_examined,
            moves = moves.len(),
            "walk complete"
        );

        Ok(IsolatePlan {
            id: Uuid::new_v4().to_string(),
            root: root.clone(),
            isolated_name: config.isolated_name.clone(),
            directories,
            moves,
            files_examined,
            hidden_skipped,
        })
    }

    /// Pick a destination that clashes with nothing on disk and nothing
    /// already planned. Clashes get a numeric suffix; files are never
    /// overwritten.
    fn unique_destination(
        isolated_dir: &Path,
        file_name: &OsStr,
        claimed: &HashSet<PathBuf>,
    ) -> (PathBuf, bool) {
        let candidate = isolated_dir.join(file_name);
        if !candidate.exists() && !claimed.contains(&candidate) {
            return (candidate, false);
        }

        let as_path = Path::new(file_name);
        let stem = as_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let ext = as_path.extension().map(|e| e.to_string_lossy().into_owned());

        let mut counter = 1;
        loop {
            let new_name = match &ext {
                Some(ext) => format!("{}_{}.{}", stem, counter, ext),
                None => format!("{}_{}", stem, counter),
            };
            let candidate = isolated_dir.join(new_name);
            if !candidate.exists() && !claimed.contains(&candidate) {
                return (candidate, true);
            }
            counter += 1;
        }
    }

    fn map_walk_error(error: walkdir::Error) -> WalkError {
        let path = error
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        if error.io_error().map(std::io::Error::kind)
            == Some(std::io::ErrorKind::PermissionDenied)
        {
            WalkError::PermissionDenied { path }
        } else {
            WalkError::ReadEntry {
                path,
                source: error.into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::naming::Direction;
    use crate::events::null_sender;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn config(root: &Path, chars: usize, direction: Direction) -> IsolateConfig {
        IsolateConfig {
            root: root.to_path_buf(),
            trim_chars: chars,
            direction,
            isolated_name: "Isolated".to_string(),
        }
    }

    #[test]
    fn plans_one_move_per_collision() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "photo_a.jpg");
        touch(temp.path(), "photo_b.jpg");
        touch(temp.path(), "notes.txt");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 1, Direction::Back),
            &null_sender(),
        )
        .unwrap();

        // photo_a and photo_b both key to "photo_"; notes keys to "note"
        assert_eq!(plan.moves.len(), 1);
        let moved = plan.moves[0].source.file_name().unwrap().to_str().unwrap();
        assert!(moved == "photo_a.jpg" || moved == "photo_b.jpg");
        assert_eq!(plan.moves[0].common_name, "photo_");
        assert_eq!(plan.files_examined, 3);
    }

    #[test]
    fn dedup_scope_is_per_directory() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).unwrap();

        touch(temp.path(), "song_1.mp3");
        touch(temp.path(), "song_2.mp3");
        touch(&sub, "song_1.mp3");
        touch(&sub, "song_2.mp3");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 1, Direction::Back),
            &null_sender(),
        )
        .unwrap();

        // One move per directory, each landing in its own Isolated folder
        assert_eq!(plan.moves.len(), 2);
        let mut parents: Vec<_> = plan
            .moves
            .iter()
            .map(|m| m.destination.parent().unwrap().to_path_buf())
            .collect();
        parents.sort();
        parents.dedup();
        assert_eq!(parents.len(), 2);
        assert!(parents.contains(&temp.path().join("Isolated")));
        assert!(parents.contains(&sub.join("Isolated")));
    }

    #[test]
    fn isolated_folders_are_never_recursed_into() {
        let temp = TempDir::new().unwrap();
        let isolated = temp.path().join("Isolated");
        fs::create_dir(&isolated).unwrap();
        touch(&isolated, "dup_1.txt");
        touch(&isolated, "dup_2.txt");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 2, Direction::Back),
            &null_sender(),
        )
        .unwrap();

        assert!(plan.moves.is_empty());
        assert!(!plan.directories.contains(&isolated));
        assert_eq!(plan.files_examined, 0);
    }

    #[test]
    fn a_file_named_like_the_isolated_folder_is_skipped() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Isolated");
        touch(temp.path(), "a_1.txt");
        touch(temp.path(), "a_2.txt");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 2, Direction::Back),
            &null_sender(),
        )
        .unwrap();

        // The bare "Isolated" file is neither examined nor moved
        assert_eq!(plan.files_examined, 2);
        assert_eq!(plan.moves.len(), 1);
    }

    #[test]
    fn hidden_files_are_never_keyed() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".env");
        touch(temp.path(), ".hidden.txt");
        touch(temp.path(), "data_1.txt");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 2, Direction::Back),
            &null_sender(),
        )
        .unwrap();

        // Hidden files neither move nor occupy a common-name slot
        assert!(plan.moves.is_empty());
        assert_eq!(plan.hidden_skipped, 2);
        assert_eq!(plan.files_examined, 1);
    }

    #[test]
    fn short_stems_collapse_into_one_bucket() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "img.jpg");
        touch(temp.path(), "x.png");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 10, Direction::Back),
            &null_sender(),
        )
        .unwrap();

        // Both stems are shorter than the trim count, so both key to ""
        assert_eq!(plan.moves.len(), 1);
        assert_eq!(plan.moves[0].common_name, "");
    }

    #[test]
    fn collision_in_isolated_folder_gets_a_suffix() {
        let temp = TempDir::new().unwrap();
        let isolated = temp.path().join("Isolated");
        fs::create_dir(&isolated).unwrap();
        touch(&isolated, "dup_b.txt");

        touch(temp.path(), "dup_a.txt");
        touch(temp.path(), "dup_b.txt");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 2, Direction::Back),
            &null_sender(),
        )
        .unwrap();

        assert_eq!(plan.moves.len(), 1);
        let mv = &plan.moves[0];
        if mv.source.file_name().unwrap() == "dup_b.txt" {
            // Same name already sits in Isolated, so the move is renamed
            assert!(mv.renamed);
            assert_eq!(
                mv.destination.file_name().unwrap().to_str().unwrap(),
                "dup_b_1.txt"
            );
        } else {
            assert!(!mv.renamed);
        }
    }

    #[test]
    fn subdirectories_are_recursed_but_never_moved() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("sub");
        let nested = sub.join("nested");
        fs::create_dir_all(&nested).unwrap();
        touch(&nested, "deep_1.txt");
        touch(&nested, "deep_2.txt");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 2, Direction::Back),
            &null_sender(),
        )
        .unwrap();

        assert_eq!(plan.directories.len(), 3); // root, sub, nested
        assert_eq!(plan.moves.len(), 1);
        assert_eq!(
            plan.moves[0].destination.parent().unwrap(),
            nested.join("Isolated")
        );
    }

    #[test]
    fn front_direction_trims_leading_characters() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "01_track.mp3");
        touch(temp.path(), "02_track.mp3");
        touch(temp.path(), "03_other.mp3");

        let plan = IsolatePlanner::create_plan(
            &config(temp.path(), 3, Direction::Front),
            &null_sender(),
        )
        .unwrap();

        assert_eq!(plan.moves.len(), 1);
        assert_eq!(plan.moves[0].common_name, "track");
    }

    #[test]
    fn nonexistent_root_is_an_error() {
        let result = IsolatePlanner::create_plan(
            &config(Path::new("/nonexistent/path/12345"), 1, Direction::Back),
            &null_sender(),
        );
        assert!(matches!(result, Err(WalkError::RootNotFound { .. })));
    }

    #[test]
    fn file_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        File::create(&file).unwrap();

        let result = IsolatePlanner::create_plan(
            &config(&file, 1, Direction::Back),
            &null_sender(),
        );
        assert!(matches!(result, Err(WalkError::NotADirectory { .. })));
    }
}
