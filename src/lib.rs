//! Workspace umbrella crate for the campus lost & found service.
//!
//! This crate stitches the record types, the store, the matcher, and the
//! claim adjudicator together so callers (the HTTP server, tests, batch jobs)
//! get one entry point per use case instead of wiring the stages by hand.

pub use claims::{adjudicate_claim, ClaimAdjudicator, ClaimError};
pub use matcher::{
    find_matches, score_found_item, set_match_metrics, MatchConfig, MatchError, MatchExplanation,
    MatchMetrics, MatchResult, Matcher, COLOR_WEIGHT, LOCATION_WEIGHT, MATCH_THRESHOLD, MAX_SCORE,
    TIME_WEIGHT, TYPE_WEIGHT,
};
pub use records::{
    format_timestamp, parse_timestamp, Claim, ClaimId, ClaimStatus, FoundItemId, FoundItemRecord,
    FoundItemStatus, LostItemId, LostItemReport, LostItemStatus, NewClaim, NewFoundItem,
    NewLostItem, RecordError, StoredSecrets, UserId, VerificationInputs,
};
pub use store::{Clock, InMemoryStore, ItemStore, StoreConfig, StoreCounts, StoreError, SystemClock};

use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while serving a lost & found use case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error("validation failed: {0}")]
    Validation(#[from] RecordError),
    #[error("matching failed: {0}")]
    Match(#[from] MatchError),
    #[error("claim adjudication failed: {0}")]
    Claim(#[from] ClaimError),
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    fn lost_item(id: LostItemId) -> Self {
        ServiceError::NotFound {
            entity: "lost item",
            id,
        }
    }

    fn found_item(id: FoundItemId) -> Self {
        ServiceError::NotFound {
            entity: "found item",
            id,
        }
    }
}

/// Validate and persist a student's lost-item report.
pub fn report_lost_item(
    store: &dyn ItemStore,
    item: NewLostItem,
) -> Result<LostItemReport, ServiceError> {
    if let Err(err) = item.validate() {
        warn!(error = %err, "rejected lost item report");
        return Err(err.into());
    }
    let report = store.insert_lost_item(item)?;
    info!(
        lost_item_id = report.id,
        reporter_id = report.reporter_id,
        item_type = %report.item_type,
        "lost item reported"
    );
    Ok(report)
}

/// Validate and persist a found item logged by staff.
pub fn log_found_item(
    store: &dyn ItemStore,
    item: NewFoundItem,
) -> Result<FoundItemRecord, ServiceError> {
    if let Err(err) = item.validate() {
        warn!(error = %err, "rejected found item");
        return Err(err.into());
    }
    let record = store.insert_found_item(item)?;
    info!(
        found_item_id = record.id,
        admin_id = record.admin_id,
        item_type = %record.item_type,
        "found item logged"
    );
    Ok(record)
}

/// Rank the currently available found items against one lost-item report.
///
/// Returns [`ServiceError::NotFound`] when no report has `lost_item_id`, and
/// an empty list when nothing reaches the match threshold.
pub fn find_matches_for_lost_item(
    store: &dyn ItemStore,
    matcher: &Matcher,
    lost_item_id: LostItemId,
) -> Result<Vec<MatchResult>, ServiceError> {
    let lost = store
        .lost_item(lost_item_id)?
        .ok_or_else(|| ServiceError::lost_item(lost_item_id))?;
    let candidates = store.available_found_items()?;
    let matches = matcher.find_matches(Some(&lost), &candidates)?;
    info!(
        lost_item_id,
        candidates = candidates.len(),
        matches = matches.len(),
        "matches computed"
    );
    Ok(matches)
}

/// Validate a claim, adjudicate it against the lost item's stored secrets,
/// and persist it with the resulting status.
///
/// Only the verdict is logged; neither the stored secrets nor the submitted
/// inputs are ever written to the log.
pub fn submit_claim(store: &dyn ItemStore, submission: NewClaim) -> Result<Claim, ServiceError> {
    if let Err(err) = submission.validate() {
        warn!(error = %err, "rejected claim");
        return Err(err.into());
    }
    let lost_item_id = submission.lost_item_id;
    let secrets = store
        .lost_item_secrets(lost_item_id)?
        .ok_or_else(|| ServiceError::lost_item(lost_item_id))?;
    let status = adjudicate_claim(Some(&secrets), &submission.inputs)?;
    let claim = store.insert_claim(submission, status)?;
    info!(
        claim_id = claim.id,
        lost_item_id = claim.lost_item_id,
        found_item_id = claim.found_item_id,
        claimer_id = claim.claimer_id,
        status = status.as_str(),
        "claim submitted"
    );
    Ok(claim)
}

/// Move a found item to `status` (for example `claimed` once staff hand it
/// over, or `returned`). Items leave the matching pool as soon as they stop
/// being `available`.
pub fn update_found_item_status(
    store: &dyn ItemStore,
    found_item_id: FoundItemId,
    status: FoundItemStatus,
) -> Result<FoundItemRecord, ServiceError> {
    let record = store
        .set_found_item_status(found_item_id, status)?
        .ok_or_else(|| ServiceError::found_item(found_item_id))?;
    info!(found_item_id, status = status.as_str(), "found item status updated");
    Ok(record)
}
