//! # Lost & Found Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` ranks found-item records against a single lost-item report. It
//! is a pure function of its inputs: no I/O, no shared state, no randomness.
//! Fetching the report and the available found items is the caller's job.
//!
//! ## Scoring
//!
//! Four independent, additive factors (maximum 100):
//!
//! | Factor | Points | Rule |
//! |--------|--------|------|
//! | type | [`TYPE_WEIGHT`] (50) | equal after trim + lowercase |
//! | color | [`COLOR_WEIGHT`] (20) | equal after trim + lowercase |
//! | location | [`LOCATION_WEIGHT`] (20) | either contains the other, literal substring |
//! | time | [`TIME_WEIGHT`] (10) | `from <= found_time <= to`, both bounds required |
//!
//! Empty or absent values never match. Candidates scoring below
//! [`MATCH_THRESHOLD`] (60) are dropped. Records that are not `available`
//! are skipped whatever the caller passed in. Results are sorted by score
//! descending; equal scores keep their input order.
//!
//! ## Example Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use matcher::{MatchConfig, Matcher};
//! use records::{NewFoundItem, NewLostItem};
//!
//! let at = |h| Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap();
//!
//! let lost = NewLostItem {
//!     reporter_id: 1,
//!     item_type: "backpack".into(),
//!     color: Some("black".into()),
//!     lost_location: "main library".into(),
//!     lost_time_from: Some(at(8)),
//!     lost_time_to: Some(at(18)),
//!     ..Default::default()
//! }
//! .into_report(1, at(19));
//!
//! let found = NewFoundItem {
//!     admin_id: 2,
//!     item_type: "Backpack".into(),
//!     color: Some("Black".into()),
//!     found_location: "Library".into(),
//!     found_time: Some(at(12)),
//!     ..Default::default()
//! }
//! .into_record(10, at(20));
//!
//! let matcher = Matcher::new(MatchConfig::default()).unwrap();
//! let hits = matcher.find_matches(Some(&lost), &[found]).unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].score, 100);
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record
//! per-request latency and hit counts.

pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::engine::{find_matches, score_found_item, Matcher};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{
    MatchConfig, MatchError, MatchExplanation, MatchResult, COLOR_WEIGHT, LOCATION_WEIGHT,
    MATCH_THRESHOLD, MAX_SCORE, TIME_WEIGHT, TYPE_WEIGHT,
};
