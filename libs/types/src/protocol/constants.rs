//! Protocol constants shared by the ingest listener, the controller and tests

/// TCP port the ingest listener binds to
pub const DEFAULT_PORT: u16 = 9999;

/// Bind host, all interfaces
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Pending-connection queue length passed to `listen(2)`
pub const DEFAULT_BACKLOG: u32 = 5;

/// Longest accepted record in bytes, delimiter excluded
pub const MAX_RECORD_LEN: usize = 256;

/// Byte that terminates a record
pub const RECORD_DELIMITER: u8 = b'\n';

/// Separator between fields of a record
pub const FIELD_SEPARATOR: char = ',';

/// Records with fewer fields are dropped
pub const MIN_RECORD_FIELDS: usize = 3;

/// Raw delta units (millimetres) to scene units
pub const DEFAULT_DELTA_SCALE: f64 = 0.001;

/// Written back, unframed, after a record that hit a workspace limit
pub const LIMIT_ACK: &[u8] = b"hitlimit";
