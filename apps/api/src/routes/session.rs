use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::{ExportError, EXPORT_FILE_STEM};
use crate::models::Language;
use crate::render::{html, RenderedDocument, Variant};
use crate::state::AppState;
use crate::workspace::{LanguageOutcome, WorkspaceView};

#[derive(Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Deserialize)]
pub struct VariantRequest {
    pub variant: Variant,
}

/// PUT /api/v1/language
/// Runs a full translation pass unless the language is already active.
pub async fn handle_set_language(
    State(state): State<AppState>,
    Json(req): Json<LanguageRequest>,
) -> Result<Json<LanguageOutcome>, AppError> {
    let outcome = state.workspace.change_language(req.language).await?;
    Ok(Json(outcome))
}

/// PUT /api/v1/variant
pub async fn handle_set_variant(
    State(state): State<AppState>,
    Json(req): Json<VariantRequest>,
) -> Json<WorkspaceView> {
    state.workspace.set_variant(req.variant).await;
    Json(state.workspace.view().await)
}

/// GET /api/v1/render
pub async fn handle_render(State(state): State<AppState>) -> Json<RenderedDocument> {
    Json(state.workspace.rendered().await)
}

/// GET /api/v1/render/html
pub async fn handle_render_html(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let rendered = state.workspace.rendered().await;
    let page = html::page(&rendered, EXPORT_FILE_STEM).map_err(ExportError::from)?;
    Ok(Html(page))
}

/// GET /api/v1/export
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let rendered = state.workspace.rendered().await;
    let artifact = state.exporter.export(&rendered)?;
    info!(
        "Exported {} ({} bytes)",
        artifact.file_name,
        artifact.bytes.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}
