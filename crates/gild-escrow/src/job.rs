//! The job aggregate

use gild_capability::ProfileUpdateCap;
use gild_core::{Address, BlobPtr, EscrowError, JobId, Result, Timestamp};
use gild_ledger::{Escrow, MilestoneSchedule};
use indexmap::IndexMap;
use std::fmt;

/// Lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum JobState {
    /// Accepting applications
    Open,
    /// Freelancer selected, awaiting their confirmation
    Assigned,
    /// Work underway
    InProgress,
    /// Every milestone submitted, awaiting final approval
    Submitted,
    /// All milestones approved; terminal
    Completed,
    /// Cancelled before assignment; terminal
    Cancelled,
    /// Cancelled after assignment; terminal
    CancelledWithFreelancer,
}

impl JobState {
    /// True once no operation may mutate the job again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Cancelled | Self::CancelledWithFreelancer
        )
    }

    /// True for states in which a freelancer is set
    pub fn carries_freelancer(&self) -> bool {
        matches!(
            self,
            Self::Assigned
                | Self::InProgress
                | Self::Submitted
                | Self::Completed
                | Self::CancelledWithFreelancer
        )
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::CancelledWithFreelancer => "cancelled_with_freelancer",
        };
        write!(f, "{name}")
    }
}

/// One applicant's entry in the job's applicant set
///
/// Holds the single-use profile-update bridge minted at application time;
/// `None` once the freelancer's start operation has consumed it.
#[derive(Debug)]
pub struct Application {
    /// The applicant address
    pub applicant: Address,
    /// When the application was made
    pub applied_at: Timestamp,
    /// The stored bridge capability
    pub update_cap: Option<ProfileUpdateCap>,
}

/// Shared aggregate for one escrowed engagement
///
/// Mutated only through the operations in [`crate::ops`]; fields stay
/// crate-private so no path can bypass validation.
#[derive(Debug)]
pub struct Job {
    pub(crate) id: JobId,
    pub(crate) client: Address,
    pub(crate) freelancer: Option<Address>,
    pub(crate) title: String,
    pub(crate) description: BlobPtr,
    pub(crate) escrow: Escrow,
    pub(crate) state: JobState,
    pub(crate) milestones: MilestoneSchedule,
    pub(crate) applicants: IndexMap<Address, Application>,
    pub(crate) created_at: Timestamp,
    pub(crate) deadline: Timestamp,
    pub(crate) deliverables: Vec<BlobPtr>,
}

impl Job {
    pub(crate) fn new(
        client: Address,
        title: String,
        description: BlobPtr,
        escrow: Escrow,
        created_at: Timestamp,
        deadline: Timestamp,
    ) -> Self {
        Self {
            id: JobId::new(),
            client,
            freelancer: None,
            title,
            description,
            escrow,
            state: JobState::Open,
            milestones: MilestoneSchedule::new(),
            applicants: IndexMap::new(),
            created_at,
            deadline,
            deliverables: Vec::new(),
        }
    }

    /// Job identity
    pub fn id(&self) -> JobId {
        self.id
    }

    /// The client that created and funded the job
    pub fn client(&self) -> Address {
        self.client
    }

    /// The assigned freelancer, if any
    pub fn freelancer(&self) -> Option<Address> {
        self.freelancer
    }

    /// Job title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description pointer into the content store
    pub fn description(&self) -> &BlobPtr {
        &self.description
    }

    /// Current lifecycle state
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Escrow custody view
    pub fn escrow(&self) -> &Escrow {
        &self.escrow
    }

    /// The milestone schedule
    pub fn milestones(&self) -> &MilestoneSchedule {
        &self.milestones
    }

    /// Applicant set in application order
    pub fn applicants(&self) -> impl Iterator<Item = &Application> {
        self.applicants.values()
    }

    /// True if `address` has applied
    pub fn has_applicant(&self, address: Address) -> bool {
        self.applicants.contains_key(&address)
    }

    /// Creation timestamp
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Business deadline
    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// Submitted deliverable pointers, in submission order
    pub fn deliverables(&self) -> &[BlobPtr] {
        &self.deliverables
    }

    /// Require a specific lifecycle state
    pub(crate) fn ensure_state(&self, allowed: &[JobState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(EscrowError::invalid_state(self.state))
        }
    }

    /// Require that `caller` is the assigned freelancer
    pub(crate) fn ensure_freelancer(&self, caller: Address) -> Result<()> {
        if self.freelancer == Some(caller) {
            Ok(())
        } else {
            Err(EscrowError::unauthorized(format!(
                "{caller} is not the assigned freelancer"
            )))
        }
    }

    /// Require that `caller` is the job's client
    pub(crate) fn ensure_client(&self, caller: Address) -> Result<()> {
        if self.client == caller {
            Ok(())
        } else {
            Err(EscrowError::unauthorized(format!(
                "{caller} is not the job client"
            )))
        }
    }

    /// The structural invariants checked by tests
    ///
    /// - planned milestone total never exceeds the budget
    /// - a freelancer is set exactly in the states that carry one
    /// - escrow conservation holds
    pub fn invariants_hold(&self) -> bool {
        let budget_ok = self.milestones.planned_total() <= self.escrow.budget();
        let freelancer_ok = self.freelancer.is_some() == self.state.carries_freelancer();
        budget_ok && freelancer_ok && self.escrow.is_conserved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_exactly_three() {
        let terminal: Vec<JobState> = [
            JobState::Open,
            JobState::Assigned,
            JobState::InProgress,
            JobState::Submitted,
            JobState::Completed,
            JobState::Cancelled,
            JobState::CancelledWithFreelancer,
        ]
        .into_iter()
        .filter(JobState::is_terminal)
        .collect();
        assert_eq!(
            terminal,
            vec![
                JobState::Completed,
                JobState::Cancelled,
                JobState::CancelledWithFreelancer
            ]
        );
    }

    #[test]
    fn freelancer_states_match_spec_set() {
        assert!(!JobState::Open.carries_freelancer());
        assert!(!JobState::Cancelled.carries_freelancer());
        assert!(JobState::Assigned.carries_freelancer());
        assert!(JobState::CancelledWithFreelancer.carries_freelancer());
    }
}
