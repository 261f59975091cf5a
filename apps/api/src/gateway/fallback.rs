//! Non-failing wrappers over `ContentGateway`.
//!
//! Generation failures surface to the user as inert placeholder text, never as
//! an error. Leaf translation has its own fallback in `translation::walker`.

use tracing::warn;

use crate::gateway::{ContentGateway, ResumeScore};
use crate::models::Document;

pub const DESCRIPTION_FALLBACK: &str = "Failed to generate description. Please try again.";
pub const SUMMARY_FALLBACK: &str = "Failed to generate summary. Please try again.";
pub const COVER_LETTER_FALLBACK: &str = "Failed to generate cover letter. Please try again.";
pub const SCORE_FALLBACK_FEEDBACK: &str = "Could not score resume due to an error.";

pub async fn description_or_placeholder(
    gateway: &dyn ContentGateway,
    job_title: &str,
    company: &str,
) -> String {
    match gateway.generate_description(job_title, company).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Description generation failed: {}", e);
            DESCRIPTION_FALLBACK.to_string()
        }
    }
}

pub async fn summary_or_placeholder(gateway: &dyn ContentGateway, document: &Document) -> String {
    match gateway.generate_summary(document).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Summary generation failed: {}", e);
            SUMMARY_FALLBACK.to_string()
        }
    }
}

pub async fn cover_letter_or_placeholder(
    gateway: &dyn ContentGateway,
    document: &Document,
    target_job: &str,
    company_name: &str,
) -> String {
    match gateway
        .generate_cover_letter(document, target_job, company_name)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("Cover letter generation failed: {}", e);
            COVER_LETTER_FALLBACK.to_string()
        }
    }
}

pub async fn score_or_zero(
    gateway: &dyn ContentGateway,
    document: &Document,
    target_job: &str,
) -> ResumeScore {
    match gateway.score_resume(document, target_job).await {
        Ok(score) => score,
        Err(e) => {
            warn!("Resume scoring failed: {}", e);
            ResumeScore {
                score: 0,
                feedback: SCORE_FALLBACK_FEEDBACK.to_string(),
                suggestions: vec![],
            }
        }
    }
}
