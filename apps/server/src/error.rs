use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use workwise_core::errors::{Error as CoreError, ErrorCategory};

/// Message used when a failure carries no user-facing classification.
pub const UNCLASSIFIED_MESSAGE: &str = "An error has occured";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub description: String,
}

fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Conflict => StatusCode::CONFLICT,
        ErrorCategory::Forbidden => StatusCode::FORBIDDEN,
        ErrorCategory::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCategory::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, String, String) {
        match self {
            // Raised deliberately with its own texts.
            ApiError::Core(e @ CoreError::Internal { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.message(), e.description())
            }
            ApiError::Core(e) => match e.category() {
                ErrorCategory::Internal => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UNCLASSIFIED_MESSAGE.to_string(),
                    e.to_string(),
                ),
                category => (status_for(category), e.message(), e.description()),
            },
            ApiError::Unauthorized(reason) => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized".to_string(),
                reason.clone(),
            ),
            ApiError::Internal(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNCLASSIFIED_MESSAGE.to_string(),
                reason.clone(),
            ),
            ApiError::Anyhow(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNCLASSIFIED_MESSAGE.to_string(),
                e.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, description) = self.parts();
        if status.is_server_error() {
            tracing::error!("{}: {}", message, description);
        }
        let body = Json(ErrorBody {
            status_code: status.as_u16(),
            message,
            description,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
