//! Milestone ledger and fund custody for the Gild engine
//!
//! A job's budget is held in [`Escrow`] and paid out tranche by tranche as
//! milestones are approved. The conservation law holds at every point:
//!
//! ```text
//! released + refunded + remaining == budget
//! ```
//!
//! Release is a single atomic step combined with the `Approved` transition;
//! a milestone can release funds exactly once.

mod custody;
mod milestone;
mod schedule;

pub use custody::Escrow;
pub use milestone::{Milestone, MilestoneState};
pub use schedule::MilestoneSchedule;
