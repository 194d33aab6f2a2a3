//! Song info lookup by (group, song)

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use songlib_common::SongInfo;
use tracing::{debug, warn};

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct InfoParams {
    pub group: Option<String>,
    pub song: Option<String>,
}

/// GET /info?group=...&song=...
///
/// Both parameters are required. Returns `{releaseDate, text, link}`.
/// Any store failure, including no matching song, is a 500.
pub async fn get_info(
    State(state): State<AppState>,
    Query(params): Query<InfoParams>,
) -> ApiResult<Json<SongInfo>> {
    let (group, song) = match (params.group.as_deref(), params.song.as_deref()) {
        (Some(group), Some(song)) if !group.is_empty() && !song.is_empty() => (group, song),
        _ => {
            warn!("Group or song parameters are missing");
            return Err(ApiError::BadRequest("Group or song are required".to_string()));
        }
    };

    debug!("Fetching info for '{}' by '{}'", song, group);

    let info = state
        .store
        .get_info(group, song)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch song info"))?;

    Ok(Json(info))
}

/// Build info routes
pub fn info_routes() -> Router<AppState> {
    Router::new().route("/info", get(get_info))
}
