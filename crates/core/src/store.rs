//! Submission storage.
//!
//! The collection service only appends and lists, so that is all a store has to provide. The
//! in-memory store is the process-lifetime policy: created empty at startup and gone at
//! shutdown. A persistent store can be swapped in behind the same trait without touching
//! validation or anonymization.

use crate::error::{StoreError, StoreResult};
use crate::submission::Submission;
use std::sync::RwLock;

/// Append-only storage for accepted submissions.
pub trait SubmissionStore: Send + Sync {
    /// Append one submission. Submissions are never updated or removed.
    fn append(&self, submission: Submission) -> StoreResult<()>;

    /// Every stored submission in insertion order.
    fn list_all(&self) -> StoreResult<Vec<Submission>>;

    fn len(&self) -> StoreResult<usize> {
        Ok(self.list_all()?.len())
    }

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Store that keeps submissions in memory for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    submissions: RwLock<Vec<Submission>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionStore for InMemoryStore {
    fn append(&self, submission: Submission) -> StoreResult<()> {
        self.submissions
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .push(submission);
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<Submission>> {
        Ok(self
            .submissions
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self
            .submissions
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .len())
    }
}
