//! Song CRUD and verse endpoints
//!
//! - GET    /songs            list with exact-match filters and pagination
//! - POST   /songs            create
//! - GET    /songs/:id        fetch one
//! - PUT    /songs/:id        replace all mutable fields
//! - DELETE /songs/:id        remove
//! - GET    /songs/:id/verse  fetch one stanza of the lyric text

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use songlib_common::{NewSong, Song, SongFilter};
use tracing::{debug, error, warn};

use crate::pagination::{parse_positive, Page};
use crate::{ApiError, ApiResult, AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /songs
///
/// Kept as raw strings: invalid pagination values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub group: Option<String>,
    /// Exact song title
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VerseParams {
    /// 1-based stanza index
    pub verse: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerseResponse {
    pub verse: String,
}

// ============================================================================
// Path Helpers
// ============================================================================

/// Id for read/delete lookups; a non-integer id cannot match any song
fn lookup_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| {
        warn!("Song id {:?} is not an integer", raw);
        ApiError::NotFound("Song not found".to_string())
    })
}

/// Id for endpoints that require a well-formed integer
fn require_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| {
        warn!("Invalid song ID: {:?}", raw);
        ApiError::BadRequest("Invalid song ID".to_string())
    })
}

/// Decode and validate a create/update body
fn song_body(payload: Result<Json<NewSong>, JsonRejection>) -> ApiResult<NewSong> {
    let Json(song) = payload?;
    song.validate()
        .map_err(|e| ApiError::from_store(e, "Invalid song"))?;
    Ok(song)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /songs
///
/// Returns 200 with an array (empty when nothing matches). Store failures
/// are reported as 400.
pub async fn list_songs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Song>>> {
    let filter = SongFilter::from_params(
        params.group.as_deref(),
        params.song.as_deref(),
        params.release_date.as_deref(),
    )
    .map_err(|e| ApiError::from_store(e, "Invalid filter"))?;
    let page = Page::resolve(params.page.as_deref(), params.limit.as_deref(), &state.defaults);

    debug!(
        "Fetching songs: filter={:?} page={} limit={} offset={}",
        filter,
        page.page(),
        page.limit(),
        page.offset()
    );

    let songs = state.store.list(&filter, page).await.map_err(|e| {
        error!("Failed to fetch songs: {}", e);
        ApiError::BadRequest("Failed to fetch songs".to_string())
    })?;

    Ok(Json(songs))
}

/// POST /songs
///
/// 200 with the created song, 400 on a malformed body or duplicate
/// (group, song) pair.
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<NewSong>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let new_song = song_body(payload)?;
    debug!("Adding song '{}' by '{}'", new_song.title, new_song.group);

    let song = state
        .store
        .create(new_song)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to add song"))?;

    Ok(Json(song))
}

/// GET /songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Song>> {
    let id = lookup_id(&raw_id)?;
    debug!("Fetching song {}", id);

    let song = state
        .store
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch song"))?;

    Ok(Json(song))
}

/// PUT /songs/:id
///
/// The id always comes from the path; any id in the body is ignored.
pub async fn update_song(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<NewSong>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let id = require_id(&raw_id)?;
    let new_song = song_body(payload)?;
    debug!("Updating song {}", id);

    let song = state
        .store
        .update(id, new_song)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update song"))?;

    Ok(Json(song))
}

/// DELETE /songs/:id
///
/// 204 on success, 404 when no song was deleted.
pub async fn delete_song(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = lookup_id(&raw_id)?;
    debug!("Deleting song {}", id);

    state
        .store
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to delete song"))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /songs/:id/verse?verse=N
///
/// A missing or invalid `verse` falls back to the configured default.
pub async fn get_song_verse(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<VerseParams>,
) -> ApiResult<Json<VerseResponse>> {
    let id = require_id(&raw_id)?;
    let verse = parse_positive(params.verse.as_deref())
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(state.defaults.verse);
    debug!("Fetching verse {} of song {}", verse, id);

    let text = state
        .store
        .get_verse(id, verse)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to retrieve verse"))?;

    Ok(Json(VerseResponse { verse: text }))
}

/// Build song routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route(
            "/songs/:id",
            get(get_song).put(update_song).delete(delete_song),
        )
        .route("/songs/:id/verse", get(get_song_verse))
}
