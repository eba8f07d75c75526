//! Delta record parsing
//!
//! A record is one line of text. Fields are split on [`FIELD_SEPARATOR`],
//! surrounding whitespace is ignored, and the first three fields map to
//! `(dx, dy, trigger)`. Extra fields are ignored.
//!
//! Each field is read as its longest leading number, so trailing junk such
//! as a unit suffix (`12mm`) is dropped. A field with no leading number, or
//! one that overflows to infinity, rejects the whole record.

use super::constants::{FIELD_SEPARATOR, MIN_RECORD_FIELDS};
use std::str::FromStr;
use thiserror::Error;

/// One parsed ingest record, in raw (unscaled) units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaRecord {
    pub dx: f64,
    pub dy: f64,
    /// Compared raw against the hop threshold
    pub trigger: f64,
}

/// Reasons a record is discarded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Record has {found} fields, need at least {need}")]
    TooFewFields { found: usize, need: usize },

    #[error("Field {index} is not a finite number: {value:?}")]
    InvalidNumber { index: usize, value: String },

    #[error("Record is not valid UTF-8")]
    NotUtf8,
}

impl DeltaRecord {
    pub const fn new(dx: f64, dy: f64, trigger: f64) -> Self {
        Self { dx, dy, trigger }
    }

    /// Parse a record from raw bytes as they came off the wire
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        let text = std::str::from_utf8(bytes).map_err(|_| RecordError::NotUtf8)?;
        text.parse()
    }
}

fn parse_field(index: usize, raw: &str) -> Result<f64, RecordError> {
    let trimmed = raw.trim();
    let numeric_len = trimmed
        .find(|c: char| !matches!(c, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'))
        .unwrap_or(trimmed.len());
    let candidate = &trimmed[..numeric_len];

    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| RecordError::InvalidNumber {
            index,
            value: trimmed.to_string(),
        })
}

impl FromStr for DeltaRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < MIN_RECORD_FIELDS {
            return Err(RecordError::TooFewFields {
                found: fields.len(),
                need: MIN_RECORD_FIELDS,
            });
        }

        Ok(Self {
            dx: parse_field(0, fields[0])?,
            dy: parse_field(1, fields[1])?,
            trigger: parse_field(2, fields[2])?,
        })
    }
}
