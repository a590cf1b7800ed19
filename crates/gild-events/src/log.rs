//! The append-only event log

use crate::event::{EventKind, EventRecord, EventSeq};
use gild_core::Timestamp;

/// Append-only, emission-ordered record of every state transition
///
/// The log never reorders or rewrites records. `drain` exists for the
/// indexer-feeding side; draining does not reset sequence numbers, so a
/// consumer can detect gaps across batches.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
    next_seq: u64,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number
    pub fn emit(&mut self, event: EventKind, at: Timestamp) -> EventSeq {
        let seq = EventSeq(self.next_seq);
        self.next_seq += 1;
        tracing::debug!(
            event = event.name(),
            seq = seq.value(),
            job = ?event.job(),
            "event emitted"
        );
        self.records.push(EventRecord { seq, at, event });
        seq
    }

    /// All records currently buffered, in emission order
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Number of buffered records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are buffered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hand the buffered records to the indexer, leaving the log empty
    ///
    /// Sequence numbering continues across drains.
    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }
}
