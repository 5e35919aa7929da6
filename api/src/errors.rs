use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

#[derive(Debug)]
pub enum ApiError {
    PostNotFound,
    ValidationError(String),
    RateLimited(String),
}

/// Every failure is rendered as `{"error": "<message>"}`; clients read the
/// message from that field.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::PostNotFound => (StatusCode::NOT_FOUND, "post not found".to_string()),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::RateLimited(msg) => {
                warn!("{}", msg);
                (StatusCode::TOO_MANY_REQUESTS, msg)
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": message
            })),
        )
            .into_response()
    }
}
