//! In-memory backend, for tests and one-off runs that should leave no trace

use super::record::{FeedbackRecord, RecordPatch};
use super::{rows_for, upsert_rows, RecordStore};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<FeedbackRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn find(&self, email: &str, file_hash: &str) -> Result<Option<FeedbackRecord>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.is_for(email, file_hash))
            .cloned())
    }

    fn upsert(
        &mut self,
        email: &str,
        file_hash: &str,
        patch: RecordPatch,
    ) -> Result<FeedbackRecord> {
        Ok(upsert_rows(&mut self.records, email, file_hash, patch))
    }

    fn records_for(&self, email: &str) -> Result<Vec<FeedbackRecord>> {
        Ok(rows_for(&self.records, email))
    }
}
