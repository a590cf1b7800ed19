//! Milestone entries and their sub-state machine
//!
//! Sub-states move forward along a fixed graph:
//!
//! ```text
//! Pending -> InProgress -> Submitted -> Approved            (terminal)
//!                              |    \-> UnderReview -> Approved
//!                              |           |   \-> RevisionRequested
//!                              \-> RevisionRequested -> Submitted
//!                              \-> Disputed -> Submitted
//! ```
//!
//! `Disputed` freezes fund release until resolution re-enters `Submitted`.
//! Resolution policy beyond that re-entry is external arbitration.

use gild_core::{Amount, BlobPtr, EscrowError, MilestoneSeq, Result, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-state of one milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneState {
    /// Added, not yet worked on
    Pending,
    /// Freelancer has begun work
    InProgress,
    /// Work submitted, awaiting client decision
    Submitted,
    /// Client holding state while review exceeds one transaction
    UnderReview,
    /// Funds released; terminal
    Approved,
    /// Client sent the submission back for rework
    RevisionRequested,
    /// Contested; fund release frozen until resolution
    Disputed,
}

impl MilestoneState {
    /// True for states a submission may be made from
    pub fn accepts_submission(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::InProgress | Self::RevisionRequested
        )
    }

    /// True for states a client decision may be made from
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Self::Submitted | Self::UnderReview)
    }

    /// True once the milestone can never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::RevisionRequested => "revision_requested",
            Self::Disputed => "disputed",
        };
        write!(f, "{name}")
    }
}

/// One independently-priced payment tranche within a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// 1-based position in the job's schedule
    pub seq: MilestoneSeq,
    /// Pointer to the tranche description in the content store
    pub description: BlobPtr,
    /// Amount released when this milestone is approved
    pub amount: Amount,
    /// Current sub-state
    pub state: MilestoneState,
    /// Latest submission proof, if any
    pub submission: Option<BlobPtr>,
    /// Times the client sent the work back
    pub revision_count: u32,
    /// When the milestone was added
    pub created_at: Timestamp,
    /// When work was last submitted
    pub submitted_at: Option<Timestamp>,
    /// When the milestone reached its terminal state
    pub resolved_at: Option<Timestamp>,
    /// Latch: funds for this milestone have left escrow
    released: bool,
}

impl Milestone {
    /// Create a pending milestone
    pub fn new(seq: MilestoneSeq, description: BlobPtr, amount: Amount, at: Timestamp) -> Self {
        Self {
            seq,
            description,
            amount,
            state: MilestoneState::Pending,
            submission: None,
            revision_count: 0,
            created_at: at,
            submitted_at: None,
            resolved_at: None,
            released: false,
        }
    }

    /// True if this milestone's funds already left escrow
    pub fn is_released(&self) -> bool {
        self.released
    }

    fn reject_state(&self) -> EscrowError {
        EscrowError::invalid_milestone_state(self.state)
    }

    /// `Pending -> InProgress`
    pub fn begin(&mut self) -> Result<()> {
        if self.state != MilestoneState::Pending {
            return Err(self.reject_state());
        }
        self.state = MilestoneState::InProgress;
        Ok(())
    }

    /// `Pending | InProgress | RevisionRequested -> Submitted`
    pub fn submit(&mut self, proof: BlobPtr, at: Timestamp) -> Result<()> {
        if !self.state.accepts_submission() {
            return Err(self.reject_state());
        }
        self.state = MilestoneState::Submitted;
        self.submission = Some(proof);
        self.submitted_at = Some(at);
        Ok(())
    }

    /// `Submitted -> UnderReview`
    pub fn begin_review(&mut self) -> Result<()> {
        if self.state != MilestoneState::Submitted {
            return Err(self.reject_state());
        }
        self.state = MilestoneState::UnderReview;
        Ok(())
    }

    /// `Submitted | UnderReview -> RevisionRequested`
    pub fn request_revision(&mut self) -> Result<()> {
        if !self.state.is_reviewable() {
            return Err(self.reject_state());
        }
        self.state = MilestoneState::RevisionRequested;
        self.revision_count = self.revision_count.saturating_add(1);
        Ok(())
    }

    /// `Submitted | UnderReview | RevisionRequested -> Disputed`
    pub fn dispute(&mut self) -> Result<()> {
        match self.state {
            MilestoneState::Submitted
            | MilestoneState::UnderReview
            | MilestoneState::RevisionRequested => {
                self.state = MilestoneState::Disputed;
                Ok(())
            }
            _ => Err(self.reject_state()),
        }
    }

    /// `Disputed -> Submitted` re-entry after external arbitration
    pub fn resolve_dispute(&mut self) -> Result<()> {
        if self.state != MilestoneState::Disputed {
            return Err(self.reject_state());
        }
        self.state = MilestoneState::Submitted;
        Ok(())
    }

    /// `Submitted | UnderReview -> Approved`, marking the release latch
    ///
    /// The caller must release the funds in the same operation; the latch
    /// guarantees the pair happens at most once per milestone.
    pub fn approve(&mut self, at: Timestamp) -> Result<()> {
        if self.released {
            return Err(EscrowError::AlreadyReleased {
                seq: self.seq.value(),
            });
        }
        if !self.state.is_reviewable() {
            return Err(self.reject_state());
        }
        self.state = MilestoneState::Approved;
        self.released = true;
        self.resolved_at = Some(at);
        Ok(())
    }
}
