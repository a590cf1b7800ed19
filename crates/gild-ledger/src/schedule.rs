//! The per-job milestone schedule

use crate::milestone::{Milestone, MilestoneState};
use gild_core::{Amount, BlobPtr, EscrowError, MilestoneSeq, Result, Timestamp};
use serde::{Deserialize, Serialize};

/// Ordered sequence of payment tranches within one job
///
/// Sequence numbers are 1-based and stable; milestones are never removed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSchedule {
    milestones: Vec<Milestone>,
}

impl MilestoneSchedule {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of milestones
    pub fn count(&self) -> u64 {
        self.milestones.len() as u64
    }

    /// True if the schedule has no milestones
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Append a tranche, returning its sequence number
    pub fn add(&mut self, description: BlobPtr, amount: Amount, at: Timestamp) -> MilestoneSeq {
        let seq = MilestoneSeq::new(self.count() + 1);
        self.milestones.push(Milestone::new(seq, description, amount, at));
        seq
    }

    /// Lookup a milestone by sequence number
    pub fn get(&self, seq: MilestoneSeq) -> Result<&Milestone> {
        self.milestones
            .get(seq.value().wrapping_sub(1) as usize)
            .ok_or_else(|| {
                EscrowError::invalid_milestone_state(format!("{seq} does not exist"))
            })
    }

    /// Mutable lookup by sequence number
    pub fn get_mut(&mut self, seq: MilestoneSeq) -> Result<&mut Milestone> {
        self.milestones
            .get_mut(seq.value().wrapping_sub(1) as usize)
            .ok_or_else(|| {
                EscrowError::invalid_milestone_state(format!("{seq} does not exist"))
            })
    }

    /// Iterate milestones in sequence order
    pub fn iter(&self) -> impl Iterator<Item = &Milestone> {
        self.milestones.iter()
    }

    /// Sum of all planned tranche amounts
    ///
    /// The budget invariant keeps this within u64, so saturation never
    /// engages on a well-formed schedule.
    pub fn planned_total(&self) -> Amount {
        Amount::new(
            self.milestones
                .iter()
                .fold(0u64, |acc, m| acc.saturating_add(m.amount.value())),
        )
    }

    /// Sum of amounts already released
    pub fn released_total(&self) -> Amount {
        Amount::new(
            self.milestones
                .iter()
                .filter(|m| m.is_released())
                .fold(0u64, |acc, m| acc.saturating_add(m.amount.value())),
        )
    }

    /// True when every milestone has been approved
    ///
    /// An empty schedule has no unapproved milestone, so this is true; the
    /// operation layer requires at least one milestone before completion.
    pub fn all_approved(&self) -> bool {
        self.milestones
            .iter()
            .all(|m| m.state == MilestoneState::Approved)
    }

    /// True when every milestone is submitted or already approved
    pub fn all_submitted_or_approved(&self) -> bool {
        self.milestones.iter().all(|m| {
            matches!(
                m.state,
                MilestoneState::Submitted | MilestoneState::UnderReview | MilestoneState::Approved
            )
        })
    }
}
