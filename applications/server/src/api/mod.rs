/// API route modules
pub mod albums;
pub mod auth;
pub mod collaborations;
pub mod exports;
pub mod health;
pub mod playlists;

use crate::{middleware, state::AppState};
use axum::{
    http::{HeaderName, HeaderValue},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Set on responses whose body came from the cache
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// `{"status": "success", "data": ...}`
pub(crate) fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": data,
    }))
}

/// Tag a response served from the cache
pub(crate) fn with_data_source(from_cache: bool, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    if from_cache {
        response
            .headers_mut()
            .insert(
                HeaderName::from_static(DATA_SOURCE_HEADER),
                HeaderValue::from_static("cache"),
            );
    }
    response
}

/// Build the HTTP router; everything lives under `/api`
pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh));

    let protected_routes = Router::new()
        // Playlists
        .route(
            "/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            axum::routing::delete(playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/songs",
            get(playlists::get_songs)
                .post(playlists::add_song)
                .delete(playlists::delete_song),
        )
        .route("/playlists/:id/activities", get(playlists::list_activities))
        // Collaborations
        .route(
            "/collaborations",
            post(collaborations::add_collaboration).delete(collaborations::delete_collaboration),
        )
        // Exports
        .route("/export/playlists/:id", post(exports::export_playlist))
        // Albums
        .route(
            "/albums/:id/likes",
            get(albums::get_likes).post(albums::toggle_like),
        )
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
