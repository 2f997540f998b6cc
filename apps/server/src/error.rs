//! HTTP error mapping for the API layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use moneta_core::errors::DatabaseError;
use serde_json::json;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper that turns core errors into HTTP responses. Handlers return
/// `ApiResult<T>` and use `?` freely.
pub enum ApiError {
    Core(moneta_core::Error),
    Other(anyhow::Error),
}

impl From<moneta_core::Error> for ApiError {
    fn from(err: moneta_core::Error) -> Self {
        ApiError::Core(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Other(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Core(err) => (status_for(err), err.to_string()),
            ApiError::Other(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::debug!("{}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn status_for(err: &moneta_core::Error) -> StatusCode {
    use moneta_core::Error;
    match err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Settlement(_) => StatusCode::UNPROCESSABLE_ENTITY,
        // Price feed failures are non-fatal upstream problems; stored
        // state is untouched.
        Error::PriceFeed(_) => StatusCode::BAD_GATEWAY,
        Error::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        Error::Database(DatabaseError::UniqueViolation(_))
        | Error::Database(DatabaseError::ForeignKeyViolation(_))
        | Error::ConstraintViolation(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
