//! Core types shared across the crate.

use crate::codec::{BinaryCodec, Codec, CsvCodec, JsonCodec};
use crate::error::{Result, StoreError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// UTC creation timestamp, truncated to whole seconds.
///
/// Second precision makes the codec round-trip an exact equality: every
/// transport format carries timestamps as RFC 3339 strings without
/// fractional seconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Build from an arbitrary UTC datetime, dropping sub-second precision.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let truncated = DateTime::from_timestamp(dt.timestamp(), 0).unwrap_or(dt);
        Timestamp(truncated)
    }

    /// Parse an RFC 3339 string (any offset, normalized to UTC).
    pub fn parse(s: &str) -> Result<Self> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            StoreError::validation("created_at", format!("not an ISO-8601 timestamp: {e}"))
        })?;
        Ok(Self::from_datetime(dt.with_timezone(&Utc)))
    }

    /// Format as RFC 3339 with an explicit UTC offset, e.g.
    /// `2024-01-15T10:00:00+00:00`.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Build from seconds since the Unix epoch. `None` if out of the
    /// representable range.
    pub fn from_unix_seconds(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Timestamp)
    }

    /// Seconds since the Unix epoch.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.to_rfc3339())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

/// Supported transport formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Json,
    Csv,
    Binary,
}

impl Format {
    /// Construct the codec for this format.
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Format::Json => Box::new(JsonCodec::new()),
            Format::Csv => Box::new(CsvCodec),
            Format::Binary => Box::new(BinaryCodec),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Binary => "binary",
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::Json
    }
}
