use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contas_core::errors::{DatabaseError, Error};
use serde_json::json;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Core errors carried across the HTTP boundary.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            Error::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
            Error::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self.0);
        }

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
