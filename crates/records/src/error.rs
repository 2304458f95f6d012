//! Error types produced while validating creation payloads.
//!
//! Every variant maps to a caller mistake (HTTP 400 at the transport), so the
//! enum stays small and comparable for tests.
//!
//! ```rust
//! use records::RecordError;
//!
//! let err = RecordError::MissingField("item_type");
//! assert_eq!(err.to_string(), "missing required field: item_type");
//! ```
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by [`NewLostItem::validate`](crate::NewLostItem::validate) and friends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    /// A required field was absent, zero, or blank after trimming.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// `lost_time_from` is later than `lost_time_to`.
    #[error("invalid time window: {from} is after {to}")]
    InvalidTimeWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    /// A timestamp string matched none of the accepted layouts.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
