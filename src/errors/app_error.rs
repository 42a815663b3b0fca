//! Application error type and its HTTP mapping.
//!
//! | Variant         | Status | Body message                 |
//! |-----------------|--------|------------------------------|
//! | Validation      | 400    | validation message, verbatim |
//! | InvalidFilename | 400    | `Invalid filename`           |
//! | Completion      | 502    | generic                      |
//! | Audio           | 500    | generic                      |
//! | NotFound        | 404    | resource message             |
//! | Internal        | 500    | generic                      |
//!
//! Details of 5xx errors are logged, never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::{GenerationError, ValidationError};

pub const COMPLETION_FAILED_MESSAGE: &str =
    "The content service is temporarily unavailable. Please try again.";
pub const AUDIO_FAILED_MESSAGE: &str = "Audio generation failed. Please try again.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Invalid filename")]
    InvalidFilename,

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// `{"success": false, "error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidFilename => StatusCode::BAD_REQUEST,
            Self::Generation(GenerationError::Completion(_)) => StatusCode::BAD_GATEWAY,
            Self::Generation(GenerationError::Audio(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the client
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::InvalidFilename => self.to_string(),
            Self::NotFound(message) => message.clone(),
            Self::Generation(GenerationError::Completion(_)) => {
                COMPLETION_FAILED_MESSAGE.to_string()
            }
            Self::Generation(GenerationError::Audio(_)) => AUDIO_FAILED_MESSAGE.to_string(),
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::new(self.client_message()))).into_response()
    }
}
