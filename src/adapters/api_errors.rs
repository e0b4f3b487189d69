use crate::domain::error::QueryError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Newtype so the domain error can become an axum response.
pub struct ApiError(pub QueryError);

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            QueryError::InvalidFilter { .. } | QueryError::MalformedQuery(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            QueryError::Database(err) => {
                tracing::error!("database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
            QueryError::Integrity(msg) => {
                tracing::error!("integrity error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
