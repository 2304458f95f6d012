use records::{ClaimStatus, StoredSecrets, VerificationInputs};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, error};

/// Errors produced by claim adjudication.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// No resolved lost item was supplied. The caller should have reported
    /// NotFound before getting here.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Stateless claim adjudicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimAdjudicator;

impl ClaimAdjudicator {
    pub fn new() -> Self {
        Self
    }

    /// Classify a claim as verified or pending.
    ///
    /// `stored` is `None` only when the caller failed to resolve the lost
    /// item, which is a contract violation.
    pub fn adjudicate(
        &self,
        stored: Option<&StoredSecrets>,
        submitted: &VerificationInputs,
    ) -> Result<ClaimStatus, ClaimError> {
        let Some(stored) = stored else {
            error!("adjudicate called without the lost item's stored secrets");
            return Err(ClaimError::InvalidArgument(
                "stored secrets of a resolved lost item are required".into(),
            ));
        };

        let first = secret_matches(
            stored.secret_info_1.as_deref(),
            submitted.verification_input_1.as_deref(),
        );
        let second = secret_matches(
            stored.secret_info_2.as_deref(),
            submitted.verification_input_2.as_deref(),
        );

        let status = if first && second {
            ClaimStatus::Verified
        } else {
            ClaimStatus::Pending
        };
        debug!(
            secrets_on_file = stored.secret_info_1.is_some() && stored.secret_info_2.is_some(),
            status = status.as_str(),
            "claim adjudicated"
        );
        Ok(status)
    }
}

/// Adjudicate with the default [`ClaimAdjudicator`].
pub fn adjudicate_claim(
    stored: Option<&StoredSecrets>,
    submitted: &VerificationInputs,
) -> Result<ClaimStatus, ClaimError> {
    ClaimAdjudicator.adjudicate(stored, submitted)
}

// An empty or absent stored secret can never be matched.
fn secret_matches(stored: Option<&str>, submitted: Option<&str>) -> bool {
    match (stored, submitted) {
        (Some(stored), Some(submitted)) if !stored.is_empty() => {
            stored.as_bytes().ct_eq(submitted.as_bytes()).into()
        }
        _ => false,
    }
}
