//! JSON file backend
//!
//! All records live in one pretty-printed JSON array. The file is read and
//! rewritten on every operation; a missing file is an empty store.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::record::{FeedbackRecord, RecordPatch};
use super::{rows_for, upsert_rows, RecordStore};
use crate::error::Result;

/// Records persisted to a local JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`; nothing is touched until the first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record from disk
    pub fn load(&self) -> Result<Vec<FeedbackRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<FeedbackRecord> = serde_json::from_str(&content)?;
        Ok(records)
    }

    /// Replace the file with `records`
    pub fn save(&self, records: &[FeedbackRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)?;

        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn find(&self, email: &str, file_hash: &str) -> Result<Option<FeedbackRecord>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|r| r.is_for(email, file_hash)))
    }

    fn upsert(
        &mut self,
        email: &str,
        file_hash: &str,
        patch: RecordPatch,
    ) -> Result<FeedbackRecord> {
        let mut records = self.load()?;
        let record = upsert_rows(&mut records, email, file_hash, patch);
        self.save(&records)?;
        Ok(record)
    }

    fn records_for(&self, email: &str) -> Result<Vec<FeedbackRecord>> {
        Ok(rows_for(&self.load()?, email))
    }
}
