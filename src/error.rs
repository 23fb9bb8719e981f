use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

/// The application's error type.
///
/// "Not found" at the service layer is a normal return value (`Option` /
/// `bool`); the `NotFound` variant exists for the routing boundary only.
#[derive(Error, Debug)]
pub enum AppError {
    /// The key-value store could not complete an operation.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] redis::RedisError),

    /// A validation error, raised before any store access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The session token is missing, invalid, or expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// A resource not found error.
    #[error("Resource not found")]
    NotFound,

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::StoreUnavailable(ref e) => {
                tracing::error!("Store unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Storage temporarily unavailable".to_string(),
                )
                    .into_response()
            }

            AppError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg).into_response()
            }

            AppError::Unauthorized => {
                tracing::warn!("Unauthorized request, redirecting to login");
                Redirect::to("/login").into_response()
            }

            AppError::NotFound => {
                tracing::debug!("Resource not found");
                (StatusCode::NOT_FOUND, "Not found".to_string()).into_response()
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}
