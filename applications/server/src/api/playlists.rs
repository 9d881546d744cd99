/// Playlists API routes
use crate::{
    api::{success, with_data_source},
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chorus_core::types::{PlaylistId, SongId};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRequest {
    pub song_id: SongId,
}

/// GET /api/playlists
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Response> {
    let cached = app_state.playlists.get_playlists(auth.user_id()).await?;

    Ok(with_data_source(
        cached.from_cache,
        success(json!({ "playlists": cached.value })),
    ))
}

/// POST /api/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest("Playlist name must not be empty".to_string()));
    }

    let playlist_id = app_state
        .playlists
        .add_playlist(name, auth.user_id())
        .await?;

    Ok((
        StatusCode::CREATED,
        success(json!({ "playlistId": playlist_id })),
    ))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<StatusCode> {
    app_state
        .playlists
        .delete_playlist(&PlaylistId::new(id), auth.user_id())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/playlists/:id/songs
pub async fn add_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<SongRequest>,
) -> Result<StatusCode> {
    app_state
        .playlists
        .add_song(&PlaylistId::new(id), &req.song_id, auth.user_id())
        .await?;
    Ok(StatusCode::CREATED)
}

/// GET /api/playlists/:id/songs
pub async fn get_songs(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist = app_state
        .playlists
        .get_songs(&PlaylistId::new(id), auth.user_id())
        .await?;
    Ok(success(json!({ "playlist": playlist })))
}

/// DELETE /api/playlists/:id/songs
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<SongRequest>,
) -> Result<StatusCode> {
    app_state
        .playlists
        .delete_song(&PlaylistId::new(id), &req.song_id, auth.user_id())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/playlists/:id/activities
pub async fn list_activities(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist_id = PlaylistId::new(id);
    let activities = app_state
        .playlists
        .get_activities(&playlist_id, auth.user_id())
        .await?;

    Ok(success(json!({
        "playlistId": playlist_id,
        "activities": activities,
    })))
}
