//! Ingest wire protocol
//!
//! Client → server: newline-terminated ASCII records of comma-separated
//! decimals, read positionally as `(dx, dy, trigger)`.
//! Server → client: the bare bytes of [`LIMIT_ACK`] after a clamped record.

pub mod constants;
pub mod record;

pub use constants::{
    DEFAULT_BACKLOG, DEFAULT_BIND_HOST, DEFAULT_DELTA_SCALE, DEFAULT_PORT, FIELD_SEPARATOR,
    LIMIT_ACK, MAX_RECORD_LEN, MIN_RECORD_FIELDS, RECORD_DELIMITER,
};
pub use record::{DeltaRecord, RecordError};
