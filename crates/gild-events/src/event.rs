//! Event kinds and records
//!
//! Events carry the job identity, the parties involved, and the amounts
//! moved, so the indexer can answer "jobs by client", "jobs by freelancer",
//! and "open jobs" without reading aggregate internals.

use gild_core::{Address, Amount, JobId, MilestoneSeq, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic position of an event in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventSeq(pub u64);

impl EventSeq {
    /// First sequence number
    pub fn zero() -> Self {
        Self(0)
    }

    /// Raw sequence value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The next sequence number
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EventSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event-{}", self.0)
    }
}

/// One structured transition event
///
/// Tagged serialization keeps the indexer's decoding independent of variant
/// ordering in this enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EventKind {
    /// A profile was registered for an address
    ProfileCreated {
        /// Owning address
        owner: Address,
        /// Role tag of the new profile
        role: String,
    },
    /// A profile's participation counters changed
    ProfileUpdated {
        /// Owning address
        owner: Address,
    },
    /// A profile's reputation average changed
    ReputationUpdated {
        /// Owning address
        owner: Address,
        /// New running-average rating
        rating: u64,
        /// Number of ratings now recorded
        rating_count: u64,
    },
    /// A job was created and its budget escrowed
    JobCreated {
        /// The new job
        job: JobId,
        /// The client that escrowed the budget
        client: Address,
        /// Escrowed budget
        budget: Amount,
        /// Business deadline for the engagement
        deadline: Timestamp,
    },
    /// A freelancer applied to an open job
    JobApplied {
        /// The job applied to
        job: JobId,
        /// The applicant
        applicant: Address,
    },
    /// The client selected a freelancer from the applicant set
    FreelancerAssigned {
        /// The job
        job: JobId,
        /// The client making the assignment
        client: Address,
        /// The chosen freelancer
        freelancer: Address,
    },
    /// The assigned freelancer confirmed and work began
    JobStarted {
        /// The job
        job: JobId,
        /// The freelancer starting work
        freelancer: Address,
    },
    /// A payment tranche was added to the job
    MilestoneAdded {
        /// The job
        job: JobId,
        /// Sequence number of the new milestone
        seq: MilestoneSeq,
        /// Tranche amount
        amount: Amount,
    },
    /// The freelancer began work on a milestone
    MilestoneStarted {
        /// The job
        job: JobId,
        /// The milestone
        seq: MilestoneSeq,
        /// The freelancer
        freelancer: Address,
    },
    /// The freelancer submitted milestone work for review
    MilestoneSubmitted {
        /// The job
        job: JobId,
        /// The milestone
        seq: MilestoneSeq,
        /// The freelancer
        freelancer: Address,
        /// True when every milestone of the job is now submitted or approved
        final_submission: bool,
    },
    /// The client opened (or re-opened) review of a submission
    MilestoneReviewed {
        /// The job
        job: JobId,
        /// The milestone
        seq: MilestoneSeq,
        /// The reviewing client
        client: Address,
    },
    /// The client sent a submission back for rework
    RevisionRequested {
        /// The job
        job: JobId,
        /// The milestone
        seq: MilestoneSeq,
        /// The requesting client
        client: Address,
    },
    /// A party disputed a milestone; release is frozen until resolution
    MilestoneDisputed {
        /// The job
        job: JobId,
        /// The milestone
        seq: MilestoneSeq,
        /// The party raising the dispute
        raised_by: Address,
    },
    /// Milestone funds were released to the freelancer
    MilestoneApproved {
        /// The job
        job: JobId,
        /// The milestone
        seq: MilestoneSeq,
        /// The paid freelancer
        freelancer: Address,
        /// Released amount
        amount: Amount,
    },
    /// The final milestone was approved and the job closed
    JobCompleted {
        /// The job
        job: JobId,
        /// The client
        client: Address,
        /// The freelancer
        freelancer: Address,
        /// Total released across all milestones
        total_released: Amount,
    },
    /// An open job was cancelled and its escrow refunded
    JobCancelled {
        /// The job
        job: JobId,
        /// The client
        client: Address,
        /// Refunded amount
        refunded: Amount,
    },
    /// An in-flight job was cancelled after assignment
    JobCancelledWithFreelancer {
        /// The job
        job: JobId,
        /// The client
        client: Address,
        /// The released freelancer
        freelancer: Address,
        /// Refunded (unreleased) amount
        refunded: Amount,
    },
}

impl EventKind {
    /// Short name of the event kind, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProfileCreated { .. } => "ProfileCreated",
            Self::ProfileUpdated { .. } => "ProfileUpdated",
            Self::ReputationUpdated { .. } => "ReputationUpdated",
            Self::JobCreated { .. } => "JobCreated",
            Self::JobApplied { .. } => "JobApplied",
            Self::FreelancerAssigned { .. } => "FreelancerAssigned",
            Self::JobStarted { .. } => "JobStarted",
            Self::MilestoneAdded { .. } => "MilestoneAdded",
            Self::MilestoneStarted { .. } => "MilestoneStarted",
            Self::MilestoneSubmitted { .. } => "MilestoneSubmitted",
            Self::MilestoneReviewed { .. } => "MilestoneReviewed",
            Self::RevisionRequested { .. } => "RevisionRequested",
            Self::MilestoneDisputed { .. } => "MilestoneDisputed",
            Self::MilestoneApproved { .. } => "MilestoneApproved",
            Self::JobCompleted { .. } => "JobCompleted",
            Self::JobCancelled { .. } => "JobCancelled",
            Self::JobCancelledWithFreelancer { .. } => "JobCancelledWithFreelancer",
        }
    }

    /// The job this event concerns, if any
    pub fn job(&self) -> Option<JobId> {
        match self {
            Self::ProfileCreated { .. }
            | Self::ProfileUpdated { .. }
            | Self::ReputationUpdated { .. } => None,
            Self::JobCreated { job, .. }
            | Self::JobApplied { job, .. }
            | Self::FreelancerAssigned { job, .. }
            | Self::JobStarted { job, .. }
            | Self::MilestoneAdded { job, .. }
            | Self::MilestoneStarted { job, .. }
            | Self::MilestoneSubmitted { job, .. }
            | Self::MilestoneReviewed { job, .. }
            | Self::RevisionRequested { job, .. }
            | Self::MilestoneDisputed { job, .. }
            | Self::MilestoneApproved { job, .. }
            | Self::JobCompleted { job, .. }
            | Self::JobCancelled { job, .. }
            | Self::JobCancelledWithFreelancer { job, .. } => Some(*job),
        }
    }
}

/// An event as appended to the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log
    pub seq: EventSeq,
    /// Operation timestamp supplied by the platform
    pub at: Timestamp,
    /// The transition that occurred
    pub event: EventKind,
}
