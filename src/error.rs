use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backup::BackupStep;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::error::EncodeError),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bincode::error::DecodeError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status} during {step}")]
    UnexpectedStatus { step: BackupStep, status: u16 },

    #[error("Cloud backup failed: {0}")]
    BackupFailed(String),

    #[error("No WebDAV endpoint configured")]
    CloudNotConfigured,

    #[error("Category {0} not found")]
    CategoryNotFound(u32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Implement IntoResponse to convert AppError into HTTP responses
///
/// Bodies carry a stable `code` next to the human-readable message so
/// clients can branch on error identity (the reorder screen treats
/// `backup_failed` differently from any other persistence error).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::Transaction(ref e) => {
                tracing::error!("Transaction error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::Table(ref e) => {
                tracing::error!("Table error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::Commit(ref e) => {
                tracing::error!("Commit error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::Deserialization(ref e) => {
                tracing::error!("Deserialization error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::TaskJoin(ref e) => {
                tracing::error!("Task join error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("I/O error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            AppError::Transport(ref e) => {
                tracing::error!("Transport error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "transport",
                    "Cloud endpoint unreachable".to_string(),
                )
            }
            AppError::UnexpectedStatus { step, status } => (
                StatusCode::BAD_GATEWAY,
                "unexpected_status",
                format!("Cloud endpoint returned {} during {}", status, step),
            ),
            AppError::BackupFailed(ref msg) => (
                StatusCode::BAD_GATEWAY,
                "backup_failed",
                format!("Saved locally but cloud backup failed: {}", msg),
            ),
            AppError::CloudNotConfigured => (
                StatusCode::PRECONDITION_FAILED,
                "cloud_not_configured",
                "No WebDAV endpoint configured".to_string(),
            ),
            AppError::CategoryNotFound(id) => (
                StatusCode::NOT_FOUND,
                "category_not_found",
                format!("Category {} not found", id),
            ),
            AppError::InvalidInput(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", msg.clone())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
