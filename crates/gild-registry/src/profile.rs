//! Profile records
//!
//! A profile is the identity record of one external party. Mutation entry
//! points are plain data transitions; every operation that reaches them
//! first proves ownership with [`Profile::ensure_owned_by`] or an address
//! match against the job aggregate.

use gild_core::{Address, Amount, EngineConfig, EscrowError, JobId, Result, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Role tag carried by a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Posts jobs and escrows budgets
    Client,
    /// Applies to and delivers jobs
    Freelancer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Freelancer => write!(f, "freelancer"),
        }
    }
}

/// Identity record exclusively owned by one external party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning address; never changes after creation
    pub owner: Address,
    /// Role tag
    pub role: Role,
    /// Display metadata, opaque to the engine
    pub display_name: String,
    /// Running-average rating (integer recurrence, see `add_rating`)
    pub rating: u64,
    /// Number of ratings folded into the average
    pub rating_count: u64,
    /// Jobs brought to completion
    pub completed_jobs: u64,
    /// Jobs ever participated in
    pub total_jobs: u64,
    /// Total amount earned (freelancer) or spent (client)
    pub total_amount: u64,
    /// Platform verification flag; set outside the engine
    pub verified: bool,
    /// Jobs this party is currently engaged in
    pub active_jobs: BTreeSet<JobId>,
    /// Creation timestamp
    pub created_at: Timestamp,
}

impl Profile {
    /// Create a fresh profile record
    pub fn new(owner: Address, role: Role, display_name: impl Into<String>, at: Timestamp) -> Self {
        Self {
            owner,
            role,
            display_name: display_name.into(),
            rating: 0,
            rating_count: 0,
            completed_jobs: 0,
            total_jobs: 0,
            total_amount: 0,
            verified: false,
            active_jobs: BTreeSet::new(),
            created_at: at,
        }
    }

    /// Require that `caller` owns this record
    pub fn ensure_owned_by(&self, caller: Address) -> Result<()> {
        if self.owner == caller {
            Ok(())
        } else {
            Err(EscrowError::unauthorized(format!(
                "profile owned by {} presented by {caller}",
                self.owner
            )))
        }
    }

    /// Count one more job participation
    pub fn increment_total_jobs(&mut self) {
        self.total_jobs = self.total_jobs.saturating_add(1);
    }

    /// Add a job to the active set
    pub fn add_active_job(&mut self, job: JobId) {
        self.active_jobs.insert(job);
    }

    /// Drop a job from the active set
    pub fn remove_active_job(&mut self, job: JobId) {
        self.active_jobs.remove(&job);
    }

    /// True if the profile is currently engaged in `job`
    pub fn has_active_job(&self, job: JobId) -> bool {
        self.active_jobs.contains(&job)
    }

    /// Record a completed engagement and the amount moved by it
    ///
    /// Used on both sides: earnings for the freelancer, spend for the
    /// client. The active set drops the job.
    pub fn record_job_completion(&mut self, job: JobId, amount: Amount) {
        self.completed_jobs = self.completed_jobs.saturating_add(1);
        self.total_amount = self.total_amount.saturating_add(amount.value());
        self.active_jobs.remove(&job);
    }

    /// Accumulate moved funds without closing an engagement
    ///
    /// Non-final milestone releases land here; the engagement stays active.
    pub fn record_amount(&mut self, amount: Amount) {
        self.total_amount = self.total_amount.saturating_add(amount.value());
    }

    /// Fold a rating into the running average
    ///
    /// `new_rating = (old_rating * old_count + submitted) / (old_count + 1)`
    /// in integer arithmetic. Out-of-range submissions fail with
    /// `InvalidRating` and leave the record untouched.
    pub fn add_rating(&mut self, submitted: u64, config: &EngineConfig) -> Result<(u64, u64)> {
        if !config.rating_in_range(submitted) {
            return Err(EscrowError::InvalidRating {
                submitted,
                min: config.rating_min,
                max: config.rating_max,
            });
        }
        let folded = self
            .rating
            .saturating_mul(self.rating_count)
            .saturating_add(submitted);
        let count = self.rating_count.saturating_add(1);
        self.rating = folded / count;
        self.rating_count = count;
        Ok((self.rating, self.rating_count))
    }
}
