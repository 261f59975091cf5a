use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::Document;
use crate::routes::document::owned;
use crate::state::AppState;
use crate::store::SaveInfo;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SaveRequest {
    /// Defaults to `My CV <local date>`.
    pub name: Option<String>,
}

/// GET /api/v1/saves
pub async fn handle_list_saves(
    State(state): State<AppState>,
) -> Result<Json<Vec<SaveInfo>>, AppError> {
    Ok(Json(state.workspace.list_saves().await?))
}

/// POST /api/v1/saves
pub async fn handle_save(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<(StatusCode, Json<SaveInfo>), AppError> {
    let info = state.workspace.save(req.name.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// POST /api/v1/saves/:name/load
pub async fn handle_load_save(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Document>, AppError> {
    let doc = state.workspace.load_save(&name).await?;
    Ok(Json(owned(doc)))
}

/// DELETE /api/v1/saves/:name
pub async fn handle_delete_save(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    state.workspace.delete_save(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}
