//! Error types for the hub API.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use hub_core::ImportError;
use thiserror::Error;

/// Message shown for failures the user cannot fix.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum HubError {
    /// No authenticated identity on the request.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// CSV import rejected.
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Body or query string the extractor could not decode.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for HubError {
    fn from(rejection: JsonRejection) -> Self {
        HubError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for HubError {
    fn from(rejection: QueryRejection) -> Self {
        HubError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            HubError::Unauthenticated => {
                tracing::warn!("Unauthenticated request");
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            HubError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, msg.clone())
            }
            HubError::Database(DatabaseError::NotFound { entity, id }) => {
                tracing::debug!(entity, id = %id, "Not found");
                (StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            HubError::Database(DatabaseError::AlreadyExists { entity, id }) => {
                tracing::debug!(entity, id = %id, "Already exists");
                (StatusCode::CONFLICT, format!("{} already exists", entity))
            }
            HubError::Database(DatabaseError::Validation(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            HubError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            HubError::Import(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HubError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            HubError::Rejected { status, message } => {
                tracing::debug!(status = %status, "Rejected request: {}", message);
                (*status, message.clone())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for hub handlers.
pub type Result<T> = std::result::Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;
    use database::ValidationError;

    fn status_of(err: HubError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(HubError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(HubError::Import(ImportError::MissingColumns)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(HubError::Database(DatabaseError::NotFound {
                entity: "Faq",
                id: "x".to_string(),
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(HubError::Database(DatabaseError::Validation(
                ValidationError::Empty("question".to_string())
            ))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(HubError::Database(DatabaseError::AlreadyExists {
                entity: "AgentSubscription",
                id: "x".to_string(),
            })),
            StatusCode::CONFLICT
        );
    }
}
