/// Album like API routes
use crate::{
    api::{success, with_data_source},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chorus_core::types::{AlbumId, LikeState};
use serde_json::{json, Value};

/// POST /api/albums/:id/likes
///
/// Likes the album, or removes the like if one exists.
pub async fn toggle_like(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<(StatusCode, Json<Value>)> {
    let state = app_state
        .likes
        .toggle_like(&AlbumId::new(id), auth.user_id())
        .await?;

    let status = match state {
        LikeState::Liked => StatusCode::CREATED,
        LikeState::NotLiked => StatusCode::OK,
    };

    Ok((status, success(json!({ "liked": state == LikeState::Liked }))))
}

/// GET /api/albums/:id/likes
pub async fn get_likes(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Response> {
    let cached = app_state.likes.get_album_likes(&AlbumId::new(id)).await?;

    Ok(with_data_source(
        cached.from_cache,
        success(json!({ "likes": cached.value })),
    ))
}
