use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::gateway::ResumeScore;
use crate::models::Document;
use crate::routes::document::owned;
use crate::state::AppState;

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreRequest {
    pub target_job: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub target_job: Option<String>,
    pub company_name: Option<String>,
}

/// Generated text together with the document it was written into.
#[derive(Serialize)]
pub struct GeneratedContent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
}

/// POST /api/v1/document/experience/:id/description
pub async fn handle_generate_description(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GeneratedContent>, AppError> {
    let (doc, text) = state.workspace.generate_description(&id).await?;
    Ok(Json(GeneratedContent {
        text,
        document: Some(owned(doc)),
    }))
}

/// POST /api/v1/ai/summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
) -> Result<Json<GeneratedContent>, AppError> {
    let (doc, text) = state.workspace.generate_summary().await?;
    Ok(Json(GeneratedContent {
        text,
        document: Some(owned(doc)),
    }))
}

/// POST /api/v1/ai/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Json<ResumeScore> {
    Json(state.workspace.score(req.target_job.as_deref()).await)
}

/// POST /api/v1/ai/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(req): Json<CoverLetterRequest>,
) -> Json<GeneratedContent> {
    let text = state
        .workspace
        .cover_letter(req.target_job.as_deref(), req.company_name.as_deref())
        .await;
    Json(GeneratedContent {
        text,
        document: None,
    })
}
