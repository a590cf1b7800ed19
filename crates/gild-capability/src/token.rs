//! Capability token types

use gild_core::{Address, CapabilityId, JobId};

/// Durable capability proving "I am authorized to act as this job's client"
///
/// Minted 1:1 with a job at creation and held by the client for the job's
/// lifetime. The 1:1 link never changes; after a terminal transition the
/// cap may be retained as a historical record but authorizes nothing new.
#[derive(Debug, PartialEq, Eq)]
pub struct JobCap {
    id: CapabilityId,
    job: JobId,
}

impl JobCap {
    pub(crate) fn bind(job: JobId) -> Self {
        Self {
            id: CapabilityId::new(),
            job,
        }
    }

    /// The capability's own identity
    pub fn id(&self) -> CapabilityId {
        self.id
    }

    /// The one job this capability was minted for
    pub fn job(&self) -> JobId {
        self.job
    }

    /// Pure link-equality authorization check
    pub fn authorizes(&self, job: JobId) -> bool {
        self.job == job
    }
}

/// Single-use bridge capability for the two-phase assignment split
///
/// Minted when a freelancer applies and stored inside the job's applicant
/// entry. The client's assignment never touches the freelancer's profile;
/// instead, the freelancer's own start operation consumes this token as
/// proof that the client-side phase sanctioned the profile mutation.
#[derive(Debug, PartialEq, Eq)]
pub struct ProfileUpdateCap {
    id: CapabilityId,
    job: JobId,
    applicant: Address,
}

impl ProfileUpdateCap {
    pub(crate) fn bind(job: JobId, applicant: Address) -> Self {
        Self {
            id: CapabilityId::new(),
            job,
            applicant,
        }
    }

    /// The capability's own identity
    pub fn id(&self) -> CapabilityId {
        self.id
    }

    /// The job this capability bridges
    pub fn job(&self) -> JobId {
        self.job
    }

    /// The applicant this capability was minted for
    pub fn applicant(&self) -> Address {
        self.applicant
    }

    /// Pure link-equality authorization check
    pub fn authorizes(&self, job: JobId, applicant: Address) -> bool {
        self.job == job && self.applicant == applicant
    }
}
