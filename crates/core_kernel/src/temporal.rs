//! Date and timestamp handling for the backend wire format
//!
//! The backend is loose about date shapes: policy dates come back either as
//! `2024-01-01` or as `2024-01-01T00:00:00`, and claim timestamps may or may
//! not carry an offset. Everything is normalised here so the domain types
//! only ever see `NaiveDate` and `DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::CoreError;

/// Format used when sending calendar dates to the backend
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar date, ignoring any time-of-day suffix
///
/// # Arguments
///
/// * `raw` - A date such as `2024-03-01` or `2024-03-01T00:00:00`
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// Parses a timestamp, treating values without an offset as UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    let trimmed = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// Serde adapter for calendar dates (`#[serde(with = "core_kernel::temporal::date")]`)
pub mod date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(super::DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }
}

/// Serde adapter for timestamps (`#[serde(with = "core_kernel::temporal::timestamp")]`)
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}
