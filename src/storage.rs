//! Storage adapter for the task collection.
//!
//! The entire collection lives in one JSON document at a fixed path, the
//! file-system analog of a single key-value slot. Every save rewrites the
//! whole file; there is no delta persistence.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::task::Task;

/// File name of the task collection inside the data directory.
pub const DATA_FILE: &str = "tasks.json";

/// Storage manager for the persisted task collection.
#[derive(Debug, Clone)]
pub struct Storage {
    data_file: PathBuf,
}

impl Storage {
    /// Create a storage adapter writing to the given file.
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    /// Storage at the per-user data directory for this application.
    pub fn default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "taskdeck").ok_or(Error::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join(DATA_FILE)))
    }

    /// Path of the backing data file.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Load the task collection.
    ///
    /// Missing, unreadable, or unparseable content all recover to an empty
    /// collection; corrupt data is never fatal and never surfaced as an error.
    pub fn load(&self) -> Vec<Task> {
        if !self.data_file.exists() {
            debug!(path = %self.data_file.display(), "no data file, starting empty");
            return Vec::new();
        }
        let content = match fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %self.data_file.display(), %err, "unreadable data file, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(path = %self.data_file.display(), %err, "malformed data file, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection with `tasks`.
    ///
    /// Writes to a sibling temp file and renames it into place so readers
    /// never observe a partial document.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        self.write_atomic(json.as_bytes())
            .map_err(|_| Error::DataFileWrite(self.data_file.clone()))?;
        debug!(path = %self.data_file.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn write_atomic(&self, data: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.data_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.data_file.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, &self.data_file)
    }
}
