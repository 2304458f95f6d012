use crate::error::ServerResult;
use crate::telemetry::record_claim;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use records::{ClaimId, ClaimStatus, NewClaim};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response to a submitted claim
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimCreated {
    pub message: String,
    pub claim_id: ClaimId,
    pub status: ClaimStatus,
}

/// Submit an ownership claim.
///
/// The claim is `verified` when both verification inputs equal the secrets
/// on the referenced lost-item report, otherwise `pending` for manual
/// review. An unknown `lost_item_id` is 404 and nothing is stored.
pub async fn create_claim(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<NewClaim>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(submission) = payload?;
    let claim = lostfound::submit_claim(state.store.as_ref(), submission)?;
    record_claim(claim.status);

    Ok((
        StatusCode::CREATED,
        Json(ClaimCreated {
            message: "Claim created successfully".to_string(),
            claim_id: claim.id,
            status: claim.status,
        }),
    ))
}
