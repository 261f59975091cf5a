use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Document, EntryId, ListEntry, PersonalField};
use crate::state::AppState;
use crate::workspace::WorkspaceView;

/// `{ "field": "jobTitle", "value": "..." }`
#[derive(Deserialize)]
pub struct FieldUpdate<F> {
    pub field: F,
    pub value: String,
}

#[derive(Serialize)]
pub struct AddedEntry {
    pub id: EntryId,
    pub document: Document,
}

pub(crate) fn owned(document: Arc<Document>) -> Document {
    Arc::unwrap_or_clone(document)
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<WorkspaceView> {
    Json(state.workspace.view().await)
}

/// PUT /api/v1/document
pub async fn handle_replace_document(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> Result<Json<Document>, AppError> {
    let doc = state.workspace.replace_document(document).await?;
    Ok(Json(owned(doc)))
}

/// PATCH /api/v1/document/personal
pub async fn handle_set_personal(
    State(state): State<AppState>,
    Json(req): Json<FieldUpdate<PersonalField>>,
) -> Result<Json<Document>, AppError> {
    let doc = state.workspace.set_personal(req.field, req.value).await?;
    Ok(Json(owned(doc)))
}

/// POST /api/v1/document/{experience,education,skills}
pub async fn handle_add_entry<E: ListEntry>(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AddedEntry>), AppError> {
    let (doc, id) = state.workspace.add_entry::<E>().await?;
    Ok((
        StatusCode::CREATED,
        Json(AddedEntry {
            id,
            document: owned(doc),
        }),
    ))
}

/// PATCH /api/v1/document/{section}/:id
pub async fn handle_update_entry<E: ListEntry>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<FieldUpdate<E::Field>>,
) -> Result<Json<Document>, AppError> {
    let doc = state
        .workspace
        .update_entry::<E>(&id, req.field, req.value)
        .await?;
    Ok(Json(owned(doc)))
}

/// DELETE /api/v1/document/{section}/:id
pub async fn handle_remove_entry<E: ListEntry>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let doc = state.workspace.remove_entry::<E>(&id).await?;
    Ok(Json(owned(doc)))
}

/// POST /api/v1/document/undo
pub async fn handle_undo(State(state): State<AppState>) -> Result<Json<Document>, AppError> {
    let doc = state.workspace.undo().await?;
    Ok(Json(owned(doc)))
}
