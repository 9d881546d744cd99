/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chorus_core::ChorusError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Domain(#[from] ChorusError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<chorus_storage::StorageError> for ServerError {
    fn from(err: chorus_storage::StorageError) -> Self {
        ServerError::Domain(err.into())
    }
}

/// Status and outward message for a domain error
///
/// Domain outcomes keep their message; infrastructure failures are logged and
/// answered generically.
fn domain_response(err: &ChorusError) -> (StatusCode, String) {
    match err {
        ChorusError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ChorusError::Invariant(msg) | ChorusError::InvalidInput(msg) => {
            (StatusCode::BAD_REQUEST, msg.clone())
        }
        ChorusError::Unauthorized(msg) => (StatusCode::FORBIDDEN, msg.clone()),
        ChorusError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
        ChorusError::Storage(_) | ChorusError::Database(_) | ChorusError::Serialization(_) => {
            tracing::error!(error = %err, "Storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            )
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Domain(ref e) => domain_response(e),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "fail",
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ChorusError) -> StatusCode {
        ServerError::from(err).into_response().status()
    }

    #[test]
    fn domain_errors_map_to_status_codes() {
        assert_eq!(
            status_of(ChorusError::not_found("Playlist", "playlist-1")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ChorusError::invariant("no row")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ChorusError::unauthorized("denied")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ChorusError::conflict("dup")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ChorusError::storage("disk")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_user_is_conflict() {
        let err = ServerError::from(chorus_storage::StorageError::Duplicate("taken".into()));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
