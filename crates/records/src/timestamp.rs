//! Serde helpers for report and record timestamps.
//!
//! Clients send times in several shapes: full RFC 3339, HTML `datetime-local`
//! values without seconds or offset, and MySQL-style `DATETIME` strings.
//! Naive values are read as UTC. Output is always RFC 3339.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::RecordError;

const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp in any accepted layout.
///
/// ```rust
/// use records::parse_timestamp;
///
/// let a = parse_timestamp("2024-01-01T12:00").unwrap();
/// let b = parse_timestamp("2024-01-01T12:00:00Z").unwrap();
/// let c = parse_timestamp("2024-01-01 12:00:00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b, c);
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| RecordError::InvalidTimestamp(raw.to_string()))
}

/// Render a timestamp the way every response carries it.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Same contract for optional fields. Blank strings and `null` read as `None`.
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&format_timestamp(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_timestamp(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_all_layouts() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        for raw in [
            "2024-01-01T08:00",
            "2024-01-01T08:00:00",
            "2024-01-01T08:00:00.000",
            "2024-01-01 08:00",
            "2024-01-01 08:00:00",
            "2024-01-01T08:00:00Z",
            "2024-01-01T10:00:00+02:00",
            "  2024-01-01T08:00  ",
        ] {
            assert_eq!(parse_timestamp(raw).unwrap(), expected, "layout {raw}");
        }
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("yesterday afternoon").unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp(_)));
    }

    #[test]
    fn formats_as_rfc3339_utc() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "2024-01-01T12:00:00Z");
    }
}
