//! Core identifier types used across the Gild engine
//!
//! Every aggregate and party in the system is referred to through a typed
//! identifier wrapper so that a job id can never be confused with a
//! capability id or a party address.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Party address identifying an external identity (client or freelancer)
///
/// The hosting platform authenticates the address; the engine only compares
/// addresses for equality when enforcing ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub Uuid);

impl Address {
    /// Create a new random address
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "addr-{}", self.0)
    }
}

impl From<Uuid> for Address {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Address> for Uuid {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Job identifier
///
/// Uniquely identifies one escrowed engagement aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Create a new random job ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

impl From<Uuid> for JobId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<JobId> for Uuid {
    fn from(job_id: JobId) -> Self {
        job_id.0
    }
}

/// Capability identifier
///
/// Identifies a minted capability token. The id is bookkeeping only;
/// authorization is the link match between the token and its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CapabilityId(pub Uuid);

impl CapabilityId {
    /// Create a new random capability ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CapabilityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cap-{}", self.0)
    }
}

impl From<Uuid> for CapabilityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<CapabilityId> for Uuid {
    fn from(capability_id: CapabilityId) -> Self {
        capability_id.0
    }
}

/// Milestone sequence number within a job
///
/// Milestones are 1-based and ordered; the sequence number never changes
/// once a milestone is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MilestoneSeq(pub u64);

impl MilestoneSeq {
    /// First milestone in a job
    pub fn first() -> Self {
        Self(1)
    }

    /// Create a sequence number
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Get the inner sequence value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Get the next sequence number
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MilestoneSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "milestone-{}", self.0)
    }
}

impl From<u64> for MilestoneSeq {
    fn from(seq: u64) -> Self {
        Self(seq)
    }
}

impl From<MilestoneSeq> for u64 {
    fn from(seq: MilestoneSeq) -> Self {
        seq.0
    }
}
