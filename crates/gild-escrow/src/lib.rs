//! Job escrow state machine
//!
//! The [`Job`] aggregate ties the whole engine together: lifecycle state,
//! escrowed balance, applicant set, milestone schedule. Every mutation goes
//! through the operation surface in [`ops`], which validates capability,
//! ownership, state, and fund invariants before touching anything, so a
//! failed operation has no effect at all.
//!
//! # Concurrency model
//!
//! The hosting platform serializes conflicting operations against the same
//! job, so the engine performs no locking. Operations are synchronous and
//! either commit fully or fail atomically.

mod board;
mod job;
pub mod ops;

pub use board::JobBoard;
pub use job::{Application, Job, JobState};
pub use ops::ApprovalOutcome;
