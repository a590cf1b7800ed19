//! Unified error taxonomy for Gild operations
//!
//! Every operation failure is one of the variants below. Failures are atomic
//! aborts: an operation that returns an error has made no mutation, moved no
//! funds, and minted no capability. Retries are the caller's responsibility.
//!
//! Invariant breakage that correct capability and ownership enforcement makes
//! unreachable (fund conservation, double consumption of a typed value) is a
//! defect, not a variant here.

use serde::{Deserialize, Serialize};

/// Unified error type for all Gild engine operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum EscrowError {
    /// Capability or ownership check failed
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// What check failed
        message: String,
    },

    /// Operation not valid in the job's current lifecycle state
    #[error("invalid job state: {actual}")]
    InvalidState {
        /// The job state the operation found
        actual: String,
    },

    /// Operation not valid in the milestone's current sub-state
    #[error("invalid milestone state: {actual}")]
    InvalidMilestoneState {
        /// The milestone state the operation found
        actual: String,
    },

    /// Planned milestone total would exceed the escrowed budget
    #[error("budget exceeded: planned {planned} + requested {requested} > budget {budget}")]
    BudgetExceeded {
        /// Sum of already planned milestone amounts
        planned: u64,
        /// Amount the operation tried to add
        requested: u64,
        /// The escrowed budget
        budget: u64,
    },

    /// Requested funds are not available
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount requested
        requested: u64,
        /// Amount actually available
        available: u64,
    },

    /// Applicant has already applied to this job
    #[error("duplicate application from {applicant}")]
    DuplicateApplication {
        /// The applicant address
        applicant: String,
    },

    /// A client may not apply to its own job
    #[error("client cannot apply to its own job")]
    SelfApplication,

    /// Address is not in the job's applicant set
    #[error("{address} is not an applicant")]
    NotAnApplicant {
        /// The address that was not found
        address: String,
    },

    /// Submitted rating is outside the configured valid range
    #[error("rating {submitted} outside valid range {min}..={max}")]
    InvalidRating {
        /// The rating that was submitted
        submitted: u64,
        /// Lowest acceptable rating
        min: u64,
        /// Highest acceptable rating
        max: u64,
    },

    /// A required capability is absent or already consumed
    #[error("missing capability: {message}")]
    MissingCapability {
        /// Which capability was expected
        message: String,
    },

    /// Milestone funds were already released
    #[error("milestone {seq} already released")]
    AlreadyReleased {
        /// Sequence number of the milestone
        seq: u64,
    },

    /// Deadline is not in the future
    #[error("deadline {deadline} is not after now {now}")]
    InvalidDeadline {
        /// The rejected deadline (milliseconds)
        deadline: u64,
        /// The operation timestamp (milliseconds)
        now: u64,
    },
}

impl EscrowError {
    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create an invalid-state error from any displayable state
    pub fn invalid_state(actual: impl ToString) -> Self {
        Self::InvalidState {
            actual: actual.to_string(),
        }
    }

    /// Create an invalid-milestone-state error from any displayable state
    pub fn invalid_milestone_state(actual: impl ToString) -> Self {
        Self::InvalidMilestoneState {
            actual: actual.to_string(),
        }
    }

    /// Create a missing-capability error
    pub fn missing_capability(message: impl Into<String>) -> Self {
        Self::MissingCapability {
            message: message.into(),
        }
    }
}

/// Standard Result type for Gild operations
pub type Result<T> = std::result::Result<T, EscrowError>;
