//! Lost & Found records
//!
//! Entity types that flow between the store, the matcher, the claim
//! adjudicator, and the HTTP layer, plus the validation applied to creation
//! payloads before anything is persisted.
//!
//! ## What lives here
//!
//! - [`LostItemReport`] / [`NewLostItem`]: a student's report, including the
//!   two private verification secrets ([`StoredSecrets`]). Secrets are skipped
//!   on serialization and redacted in `Debug`, so no read response or log line
//!   can carry them.
//! - [`FoundItemRecord`] / [`NewFoundItem`]: an item logged by staff.
//! - [`Claim`] / [`NewClaim`]: an ownership claim with its [`ClaimStatus`].
//! - [`timestamp`]: serde helpers accepting RFC 3339 and naive datetime layouts.
//!
//! ## Example
//!
//! ```
//! use records::{NewLostItem, StoredSecrets};
//! use chrono::Utc;
//!
//! let payload = NewLostItem {
//!     reporter_id: 42,
//!     item_type: "Backpack".into(),
//!     lost_location: "Main Library".into(),
//!     secrets: StoredSecrets::new("blue42", "room9"),
//!     ..Default::default()
//! };
//! payload.validate().unwrap();
//!
//! let report = payload.into_report(1, Utc::now());
//! let json = serde_json::to_string(&report).unwrap();
//! assert!(!json.contains("blue42"));
//! ```

mod error;
pub mod timestamp;
mod types;

pub use crate::error::RecordError;
pub use crate::timestamp::{format_timestamp, parse_timestamp};
pub use crate::types::{
    Claim, ClaimId, ClaimStatus, FoundItemId, FoundItemRecord, FoundItemStatus, LostItemId,
    LostItemReport, LostItemStatus, NewClaim, NewFoundItem, NewLostItem, StoredSecrets, UserId,
    VerificationInputs,
};
