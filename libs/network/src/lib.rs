//! Ingest Network Layer
//!
//! TCP ingest for the actuator simulation: a listener that serves one client
//! at a time, frames the byte stream into newline-delimited records, hands
//! parsed [`DeltaRecord`](actuator_types::DeltaRecord)s to a [`DeltaSink`],
//! and writes the `hitlimit` acknowledgment back when the sink reports a
//! clamped move.

pub mod error;
pub mod transports;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use transports::{
    DeltaSink, IngestSession, IngestStats, IngestStatsSnapshot, RecordFramer, SessionSummary,
    TcpIngestConfig, TcpIngestListener,
};
