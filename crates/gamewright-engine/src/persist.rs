//! Archiving of executed game attempts.

use chrono::Local;
use gamewright_domain::{ExecutionRecord, Result, SavedArtifact};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Archives game source and execution records under a root directory.
///
/// Each saved attempt gets its own `game_<NNN>_<YYYYMMDD_HHMMSS>` directory.
/// The sequence number is one more than the count of existing `game_*`
/// siblings at save time. Numbering is monotonic for a single caller; the
/// count-then-create step is not locked, so concurrent writers against the
/// same root can collide. The host only saves from one flow at a time.
pub struct GameStore {
    root: PathBuf,
}

impl GameStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Archive root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `source` and `record` into a fresh numbered attempt directory.
    ///
    /// IO and serialization failures propagate: a store that cannot write is
    /// an environment problem (permissions, disk full), not a candidate
    /// failure.
    pub fn save(&self, source: &str, record: &ExecutionRecord) -> Result<SavedArtifact> {
        fs::create_dir_all(&self.root)?;

        let number = self.next_game_number()?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let directory = self.root.join(format!("game_{number:03}_{timestamp}"));
        fs::create_dir_all(&directory)?;

        let source_path = directory.join("game.py");
        fs::write(&source_path, source)?;

        let results_path = directory.join("execution_results.json");
        fs::write(&results_path, serde_json::to_string_pretty(record)?)?;

        debug!(directory = %directory.display(), "Archived game attempt");

        Ok(SavedArtifact {
            directory,
            source_path,
            results_path,
        })
    }

    fn next_game_number(&self) -> Result<u32> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with("game_") {
                count += 1;
            }
        }
        Ok(count + 1)
    }
}
