use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use landing_builder_core::document::ValidationError;
use landing_builder_core::BuilderError;
use serde_json::json;

/// API error type rendered as a JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// The generation service failed or returned something unusable.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Upstream(msg) => {
                tracing::warn!("Upstream error: {msg}");
                (StatusCode::BAD_GATEWAY, "badGateway", msg.clone())
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<BuilderError> for ApiError {
    fn from(err: BuilderError) -> Self {
        let message = err.to_string();
        match err {
            BuilderError::PageGenerationInFlight | BuilderError::ImageGenerationInFlight(_) => {
                ApiError::Conflict(message)
            }
            BuilderError::SectionNotFound(_) => ApiError::NotFound(message),
            BuilderError::EmptyDescription
            | BuilderError::NoImageSlot(_)
            | BuilderError::Patch(_) => ApiError::BadRequest(message),
            BuilderError::Generate(_) | BuilderError::Merge(_) => ApiError::Upstream(message),
        }
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
