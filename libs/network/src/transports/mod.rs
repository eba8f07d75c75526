//! Ingest Transport Layer
//!
//! The TCP listener, the record framer it feeds, and the counters it keeps.
//! [`DeltaSink`] is the seam between transport and control: the listener
//! never knows what a record does to the actuator, only whether the sink
//! reports a clamped move that must be acknowledged.

use actuator_types::{ApplyOutcome, DeltaRecord};

pub mod framing;
pub mod stats;
pub mod tcp;

#[cfg(test)]
mod tests;

// Re-export transport types
pub use framing::{Frame, RecordFramer};
pub use stats::{IngestStats, IngestStatsSnapshot};
pub use tcp::{IngestSession, SessionSummary, TcpIngestConfig, TcpIngestListener};

/// Consumer of parsed delta records, in arrival order
pub trait DeltaSink: Send {
    /// Apply one record and report what it did
    fn apply(&mut self, record: DeltaRecord) -> ApplyOutcome;
}
