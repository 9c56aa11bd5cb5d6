//! Handler errors and their HTTP mapping. Every failure becomes `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nebula::{ErrorResponse, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing name")]
    MissingName,
    #[error("Invalid JSON body")]
    InvalidBody,
    #[error("Project name is required")]
    NameRequired,
    #[error("Not found")]
    NotFound,
    #[error("Failed to read JSON: {0}")]
    Read(String),
    #[error("Failed to write JSON: {0}")]
    Write(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingName | ApiError::InvalidBody | ApiError::NameRequired => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Read(_) | ApiError::Write(_) | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidName => ApiError::NameRequired,
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Read(msg) => ApiError::Read(msg),
            StoreError::Write(msg) => ApiError::Write(msg),
            StoreError::Io(msg) => ApiError::Storage(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
