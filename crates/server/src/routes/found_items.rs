use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use records::{Claim, FoundItemId, FoundItemRecord, FoundItemStatus, NewFoundItem};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response to a successfully logged found item
#[derive(Debug, Serialize, Deserialize)]
pub struct FoundItemCreated {
    pub message: String,
    pub found_item_id: FoundItemId,
}

/// Status change request
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: FoundItemStatus,
}

/// Log a found item. New items start out `available`.
pub async fn create_found_item(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<NewFoundItem>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(item) = payload?;
    let record = lostfound::log_found_item(state.store.as_ref(), item)?;

    Ok((
        StatusCode::CREATED,
        Json(FoundItemCreated {
            message: "Found item logged successfully".to_string(),
            found_item_id: record.id,
        }),
    ))
}

/// List available found items, most recently found first.
pub async fn list_found_items(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<Vec<FoundItemRecord>>> {
    Ok(Json(state.store.available_found_items()?))
}

pub async fn get_found_item(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<FoundItemId>, PathRejection>,
) -> ServerResult<Json<FoundItemRecord>> {
    let Path(id) = id?;
    state
        .store
        .found_item(id)?
        .map(Json)
        .ok_or_else(|| found_item_not_found(id))
}

/// Move a found item to `claimed` or `returned` (or back to `available`).
pub async fn update_found_item_status(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<FoundItemId>, PathRejection>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> ServerResult<Json<FoundItemRecord>> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let record = lostfound::update_found_item_status(state.store.as_ref(), id, update.status)?;
    Ok(Json(record))
}

/// Claims against one found item, in submission order. Verification inputs
/// are never included.
pub async fn list_found_item_claims(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<FoundItemId>, PathRejection>,
) -> ServerResult<Json<Vec<Claim>>> {
    let Path(id) = id?;
    if state.store.found_item(id)?.is_none() {
        return Err(found_item_not_found(id));
    }
    Ok(Json(state.store.claims_for_found_item(id)?))
}

fn found_item_not_found(id: FoundItemId) -> ServerError {
    ServerError::NotFound(format!("Found item {id} not found"))
}
