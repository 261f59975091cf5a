use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::models::DocumentError;
use crate::store::StoreError;
use crate::workspace::WorkspaceError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("A translation is in progress")]
    TranslationInProgress,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<WorkspaceError> for AppError {
    fn from(err: WorkspaceError) -> Self {
        match err {
            WorkspaceError::TranslationInProgress => AppError::TranslationInProgress,
            WorkspaceError::Document(e @ DocumentError::EntryNotFound { .. }) => {
                AppError::NotFound(e.to_string())
            }
            WorkspaceError::Document(e) => AppError::Validation(e.to_string()),
            WorkspaceError::NothingToUndo | WorkspaceError::LanguageChanged { .. } => {
                AppError::Conflict(err.to_string())
            }
            WorkspaceError::SaveNotFound(_) => AppError::NotFound(err.to_string()),
            WorkspaceError::InvalidSave { .. } => AppError::UnprocessableEntity(err.to_string()),
            WorkspaceError::Store(StoreError::InvalidName(msg)) => AppError::Validation(msg),
            WorkspaceError::Store(e) => AppError::Storage(e.to_string()),
            WorkspaceError::Translate(e) => AppError::Internal(e.into()),
            WorkspaceError::TranslationAborted(msg) => {
                AppError::Internal(anyhow::anyhow!("translation aborted: {msg}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::TranslationInProgress => (
                StatusCode::CONFLICT,
                "TRANSLATION_IN_PROGRESS",
                "Edits are suspended while the document is being translated".to_string(),
            ),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The document could not be exported".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
