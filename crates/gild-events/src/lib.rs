//! Append-only event trail for the Gild engine
//!
//! Every successful state transition emits exactly one structured event.
//! The log is ordered by emission, never rewritten, and is the only channel
//! through which the external indexer discovers jobs and their progress;
//! the indexer reads Job aggregates directly only for point lookups.

mod event;
mod log;

pub use event::{EventKind, EventRecord, EventSeq};
pub use log::EventLog;
