/// Export API routes
use crate::{api::success, error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chorus_core::types::PlaylistId;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub target_email: String,
}

/// POST /api/export/playlists/:id
pub async fn export_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<ExportRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    app_state
        .exports
        .export_playlist(&PlaylistId::new(id), auth.user_id(), &req.target_email)
        .await?;

    Ok((
        StatusCode::CREATED,
        success(json!({ "message": "Your request is being processed" })),
    ))
}
