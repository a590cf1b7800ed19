//! Job store with point lookup by identity
//!
//! The board is the engine's only native query surface: insert and lookup
//! by `JobId`. Discovery queries ("open jobs", "jobs by client") belong to
//! the external indexer, fed by the event log.

use crate::job::Job;
use gild_core::JobId;
use std::collections::BTreeMap;

/// All jobs known to the engine, keyed by identity
#[derive(Debug, Default)]
pub struct JobBoard {
    jobs: BTreeMap<JobId, Job>,
}

impl JobBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, job: Job) -> JobId {
        let id = job.id();
        self.jobs.insert(id, job);
        id
    }

    /// Point lookup by identity
    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(&id)
    }

    /// Mutable point lookup by identity
    pub fn get_mut(&mut self, id: JobId) -> Option<&mut Job> {
        self.jobs.get_mut(&id)
    }

    /// True if the board holds `id`
    pub fn contains(&self, id: JobId) -> bool {
        self.jobs.contains_key(&id)
    }

    /// Number of jobs held
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// True if no jobs are held
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
