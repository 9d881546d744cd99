/// Collaboration API routes
use crate::{api::success, error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use chorus_core::types::{PlaylistId, UserId};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub playlist_id: PlaylistId,
    pub user_id: UserId,
}

/// POST /api/collaborations
pub async fn add_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CollaborationRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let collaboration_id = app_state
        .playlists
        .add_collaborator(&req.playlist_id, auth.user_id(), &req.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        success(json!({ "collaborationId": collaboration_id })),
    ))
}

/// DELETE /api/collaborations
pub async fn delete_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CollaborationRequest>,
) -> Result<StatusCode> {
    app_state
        .playlists
        .remove_collaborator(&req.playlist_id, auth.user_id(), &req.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
