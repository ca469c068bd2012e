//! Deferred update jobs.

use parking_lot::Mutex;
use thiserror::Error;

use crate::base::Title;

/// One page whose semantic data must be recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateJob {
    title: Title,
}

impl UpdateJob {
    pub fn new(title: Title) -> UpdateJob {
        UpdateJob { title }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }
}

/// Errors raised while handing jobs to the queue backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobQueueError {
    #[error("job queue backend error: {0}")]
    Backend(String),
}

/// The external job queue. Fire-and-forget: execution, retries, and
/// scheduling are the host's business.
pub trait JobQueue {
    fn batch_insert(&self, jobs: Vec<UpdateJob>) -> Result<(), JobQueueError>;
}

/// A [`JobQueue`] that records batches in memory, for tests and small tools.
#[derive(Default)]
pub struct MemoryJobQueue {
    batches: Mutex<Vec<Vec<UpdateJob>>>,
}

impl MemoryJobQueue {
    pub fn new() -> MemoryJobQueue {
        MemoryJobQueue::default()
    }

    /// Batches in insertion order.
    pub fn batches(&self) -> Vec<Vec<UpdateJob>> {
        self.batches.lock().clone()
    }

    /// All jobs across all batches.
    pub fn jobs(&self) -> Vec<UpdateJob> {
        self.batches.lock().iter().flatten().cloned().collect()
    }
}

impl JobQueue for MemoryJobQueue {
    fn batch_insert(&self, jobs: Vec<UpdateJob>) -> Result<(), JobQueueError> {
        self.batches.lock().push(jobs);
        Ok(())
    }
}
