use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use matcher::{MatchConfig, MatchResult, Matcher};
use records::LostItemId;
use serde::Deserialize;
use std::sync::Arc;

/// Optional per-request overrides of the configured matcher.
#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    /// Return at most this many matches
    #[serde(default)]
    pub limit: Option<usize>,

    /// Attach the per-factor breakdown to every match
    #[serde(default)]
    pub explain: Option<bool>,
}

impl MatchQuery {
    fn is_empty(&self) -> bool {
        self.limit.is_none() && self.explain.is_none()
    }

    fn apply(&self, base: &MatchConfig) -> MatchConfig {
        MatchConfig {
            max_results: self.limit.or(base.max_results),
            explain: self.explain.unwrap_or(base.explain),
        }
    }
}

/// Rank available found items against one lost-item report.
///
/// Returns `[{found_item, score}]` sorted by score descending, only for
/// items scoring at least the match threshold. Unknown reports are 404.
pub async fn lost_item_matches(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<LostItemId>, PathRejection>,
    query: Result<Query<MatchQuery>, QueryRejection>,
) -> ServerResult<Json<Vec<MatchResult>>> {
    let Path(lost_item_id) = id?;
    let Query(query) = query.map_err(|err| ServerError::BadRequest(err.body_text()))?;

    let matches = if query.is_empty() {
        lostfound::find_matches_for_lost_item(state.store.as_ref(), &state.matcher, lost_item_id)?
    } else {
        let matcher = Matcher::new(query.apply(state.matcher.config()))
            .map_err(|err| ServerError::BadRequest(err.to_string()))?;
        lostfound::find_matches_for_lost_item(state.store.as_ref(), &matcher, lost_item_id)?
    };

    Ok(Json(matches))
}
