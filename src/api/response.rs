use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

pub fn error(status: StatusCode, detail: String) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(ErrorBody { detail }))
}

/// Turns a panic caught at the router boundary into a 500 response.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %message, "request handler panicked");
    AppError::InternalError(message).into_response()
}
