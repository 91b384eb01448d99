use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Input mismatch: {values} numeric values but {labels} group labels")]
    InputMismatch { values: usize, labels: usize },
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("File processing error: {0}")]
    FileProcessingError(String),
    #[error("File exceeds the limit of {limit} bytes")]
    FileTooLarge { limit: usize },
    #[error("HTTP Error: {0}")]
    HttpError(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::FileProcessingError(format!("Failed to read CSV: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::InputMismatch { .. }
            | AppError::EmptyDataset(_)
            | AppError::ColumnNotFound(_)
            | AppError::UnsupportedFormat(_)
            | AppError::FileProcessingError(_) => StatusCode::BAD_REQUEST,
            AppError::DatasetNotFound(_) => StatusCode::NOT_FOUND,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::HttpError(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            AppError::InputMismatch { values: 3, labels: 2 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::DatasetNotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::HttpError("down".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::FileProcessingError("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FileTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Internal("join".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn mismatch_message_names_both_lengths() {
        let msg = AppError::InputMismatch { values: 4, labels: 3 }.to_string();
        assert!(msg.contains('4') && msg.contains('3'));
    }
}
