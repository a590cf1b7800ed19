//! Mint and verify operations
//!
//! Minting binds a fresh token to exactly one target at creation time.
//! Verification maps a failed link match to `Unauthorized`; an absent or
//! already-consumed token surfaces as `MissingCapability` at the call site
//! that held it.

use crate::token::{JobCap, ProfileUpdateCap};
use gild_core::{Address, EscrowError, JobId, Result};

/// Mint the durable client capability for a freshly created job
pub fn mint_job_cap(job: JobId) -> JobCap {
    let cap = JobCap::bind(job);
    tracing::debug!(cap = %cap.id(), job = %job, "job cap minted");
    cap
}

/// Mint the single-use profile-update bridge for an applicant
pub fn mint_profile_update_cap(job: JobId, applicant: Address) -> ProfileUpdateCap {
    let cap = ProfileUpdateCap::bind(job, applicant);
    tracing::debug!(cap = %cap.id(), job = %job, applicant = %applicant, "profile update cap minted");
    cap
}

/// Require that `cap` was minted for `job`
pub fn verify_job_cap(cap: &JobCap, job: JobId) -> Result<()> {
    if cap.authorizes(job) {
        Ok(())
    } else {
        Err(EscrowError::unauthorized(format!(
            "capability {} was minted for {}, not {}",
            cap.id(),
            cap.job(),
            job
        )))
    }
}
