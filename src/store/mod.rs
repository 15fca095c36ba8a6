//! Record persistence
//!
//! The upload pipeline talks to storage only through [`RecordStore`]. Each
//! backend decides where rows live; the advisory logic never changes with
//! the backend.

mod json_store;
mod memory;
pub mod record;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{
    Feedback, FeedbackRecord, PainPoint, ProjectStage, Purpose, RecordPatch, Relevance,
};

use chrono::Utc;

use crate::error::Result;
use crate::identity::project_number;

/// Storage port for submission records
pub trait RecordStore {
    /// Look up the record for one upload
    fn find(&self, email: &str, file_hash: &str) -> Result<Option<FeedbackRecord>>;

    /// Update the record for `(email, file_hash)`, creating it if missing
    fn upsert(&mut self, email: &str, file_hash: &str, patch: RecordPatch)
        -> Result<FeedbackRecord>;

    /// All records for an email, newest first
    fn records_for(&self, email: &str) -> Result<Vec<FeedbackRecord>>;

    /// One past the highest project number among the email's uploads
    fn next_project_number(&self, email: &str) -> Result<u32> {
        let highest = self
            .records_for(email)?
            .iter()
            .filter_map(|record| project_number(&record.filename))
            .max()
            .unwrap_or(0);
        Ok(highest + 1)
    }
}

/// Shared upsert over an in-memory row set
pub(crate) fn upsert_rows(
    rows: &mut Vec<FeedbackRecord>,
    email: &str,
    file_hash: &str,
    patch: RecordPatch,
) -> FeedbackRecord {
    let now = Utc::now();

    match rows.iter_mut().find(|r| r.is_for(email, file_hash)) {
        Some(existing) => {
            existing.apply(patch, now);
            existing.clone()
        }
        None => {
            let mut record = FeedbackRecord::new(email, file_hash, now);
            record.apply(patch, now);
            rows.push(record.clone());
            record
        }
    }
}

/// Rows for one email, newest first
pub(crate) fn rows_for(rows: &[FeedbackRecord], email: &str) -> Vec<FeedbackRecord> {
    let mut matching: Vec<FeedbackRecord> =
        rows.iter().filter(|r| r.email == email).cloned().collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matching
}
