use actix_web::{error::JsonPayloadError, http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    NotFound(String),

    /// Write failed and the transaction was rolled back. The cause is kept for
    /// logging only.
    #[error("{message}: {cause}")]
    Persistence { message: String, cause: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl AppError {
    /// Maps a JSON extractor failure. An empty body becomes `missing_message`.
    pub fn from_json_payload(err: &JsonPayloadError, missing_message: &str) -> Self {
        match err {
            JsonPayloadError::Deserialize(e) if e.is_eof() => {
                AppError::Validation(missing_message.to_string())
            }
            JsonPayloadError::ContentType => AppError::Validation(missing_message.to_string()),
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                AppError::Validation("Request body too large".to_string())
            }
            _ => AppError::Validation("Invalid JSON body".to_string()),
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(m)
            | AppError::Conflict(m)
            | AppError::Auth(m)
            | AppError::NotFound(m) => m.clone(),
            AppError::Persistence { message, .. } => message.clone(),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) | AppError::Persistence { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        }
        HttpResponse::build(status).json(MessageResponse::new(self.client_message()))
    }
}
