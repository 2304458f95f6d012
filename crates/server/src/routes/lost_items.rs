use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use records::{LostItemId, LostItemReport, NewLostItem, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response to a successful report
#[derive(Debug, Serialize, Deserialize)]
pub struct LostItemCreated {
    pub message: String,
    pub lost_item_id: LostItemId,
}

/// File a lost-item report.
///
/// Requires `user_id` (or `reporter_id`), `item_type`, and `lost_location`.
/// The two secrets are stored but never returned by any endpoint.
pub async fn create_lost_item(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<NewLostItem>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(item) = payload?;
    let report = lostfound::report_lost_item(state.store.as_ref(), item)?;

    Ok((
        StatusCode::CREATED,
        Json(LostItemCreated {
            message: "Lost item reported successfully".to_string(),
            lost_item_id: report.id,
        }),
    ))
}

/// List all lost-item reports, newest first.
pub async fn list_lost_items(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<Vec<LostItemReport>>> {
    Ok(Json(state.store.list_lost_items()?))
}

/// List one student's reports, newest first.
pub async fn list_user_lost_items(
    State(state): State<Arc<ServerState>>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ServerResult<Json<Vec<LostItemReport>>> {
    let Path(user_id) = user_id?;
    Ok(Json(state.store.lost_items_by_reporter(user_id)?))
}
