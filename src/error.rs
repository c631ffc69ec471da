use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Invalid date: {0}")]
    Parse(String),
    #[error("No reservation in progress for this session")]
    SessionStateMissing,
    #[error("Session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                StatusCode::NOT_FOUND
            }
            AppError::Validation(msg) | AppError::Parse(msg) => {
                warn!("Bad request: {}", msg);
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            other => {
                error!("{}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let reason = status.canonical_reason().unwrap_or("Error");
        let body = format!(
            "<!doctype html><html><head><title>{code} {reason}</title></head>\
             <body><h1>{code} {reason}</h1><p>Something went wrong. Please go back and try again.</p>\
             <p><a href=\"/\">Home</a></p></body></html>",
            code = status.as_u16(),
        );

        (status, Html(body)).into_response()
    }
}
