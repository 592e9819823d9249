use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch videos: {0}")]
    FetchError(String),

    #[error("Invalid request: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    InternalError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Fetch failures answer 502 rather than a blanket 500 so callers can
    /// tell an engine outage from a bug in this service; both stay 5xx.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::FetchError(_) => StatusCode::BAD_GATEWAY,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::ValidationError(_) => tracing::warn!(%status, "{}", self),
            _ => tracing::error!(%status, "{}", self),
        }

        response::error(status, self.to_string()).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
