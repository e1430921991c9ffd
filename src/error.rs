use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Failures a page handler can surface.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidForm(String),

    #[error("render failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("date formatting failed: {0}")]
    DateFormat(#[from] time::error::Format),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidForm(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            other => {
                error!(error = %other, "handler failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
