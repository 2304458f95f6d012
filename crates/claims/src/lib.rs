//! # Lost & Found Claims (`claims`)
//!
//! Decides the initial status of an ownership claim by comparing the two
//! submitted verification inputs with the two secrets stored on the lost-item
//! report.
//!
//! A claim is [`ClaimStatus::Verified`] only when both stored secrets are
//! non-empty and both inputs equal their counterparts exactly (case-sensitive,
//! no trimming). Every other combination is [`ClaimStatus::Pending`] and goes
//! to manual review. There is no partial credit.
//!
//! ```
//! use claims::adjudicate_claim;
//! use records::{ClaimStatus, StoredSecrets, VerificationInputs};
//!
//! let stored = StoredSecrets::new("blue42", "room9");
//!
//! let status = adjudicate_claim(Some(&stored), &VerificationInputs::new("blue42", "room9"));
//! assert_eq!(status.unwrap(), ClaimStatus::Verified);
//!
//! let status = adjudicate_claim(Some(&stored), &VerificationInputs::new("blue42", "ROOM9"));
//! assert_eq!(status.unwrap(), ClaimStatus::Pending);
//! ```

mod adjudicator;

pub use crate::adjudicator::{adjudicate_claim, ClaimAdjudicator, ClaimError};
pub use records::ClaimStatus;
