//! # Temporal Types: UTC Timestamps
//!
//! `Timestamp` is the creation instant stamped on every submission record.
//! It is always UTC, serialized as ISO-8601 with millisecond precision and a
//! `Z` suffix (`YYYY-MM-DDTHH:MM:SS.sssZ`), which is what the receiving sheet
//! endpoint parses.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PledgeError;

/// A UTC timestamp truncated to millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Wrap a `DateTime<Utc>`, truncating sub-millisecond components.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        let millis = dt.timestamp_millis();
        Self(DateTime::from_timestamp_millis(millis).unwrap_or(dt))
    }

    /// Build a timestamp from Unix epoch milliseconds.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, PledgeError> {
        DateTime::from_timestamp_millis(millis)
            .map(Self)
            .ok_or_else(|| PledgeError::InvalidIdentifier(format!("invalid epoch millis: {millis}")))
    }

    /// Parse an RFC 3339 string. Any offset is accepted and normalized to UTC.
    pub fn parse(s: &str) -> Result<Self, PledgeError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            PledgeError::InvalidIdentifier(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unix epoch milliseconds.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// `YYYY-MM-DDTHH:MM:SS.sssZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Long-form rendering in the local timezone, for receipts.
    ///
    /// Example: `October 15, 2026 at 3:04 PM`.
    pub fn to_human_readable(&self) -> String {
        self.0
            .with_timezone(&Local)
            .format("%B %-d, %Y at %-I:%M %p")
            .to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
