//! AI Content Gateway: the narrow capability the core consumes for generated
//! and translated text.
//!
//! `ContentGateway` is the injectable seam: `GeminiGateway` talks to the hosted
//! model, tests use the fakes in `testing`. Implementations report failures as
//! `GatewayError`; callers that must never fail go through `fallback`, which
//! maps every failure to the documented fallback value.
//!
//! Carried in `AppState` and `Workspace` as `Arc<dyn ContentGateway>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::{Document, Language};

pub mod fallback;
pub mod gemini;
pub mod prompts;
#[cfg(test)]
pub mod testing;

pub use gemini::GeminiGateway;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}

/// Résumé score as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeScore {
    /// 0 – 100
    pub score: u8,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

impl ResumeScore {
    /// Builds a score from whatever integer the model produced, clamped to 0 – 100.
    pub fn clamped(score: i64, feedback: String, suggestions: Vec<String>) -> Self {
        Self {
            score: score.clamp(0, 100) as u8,
            feedback,
            suggestions,
        }
    }
}

/// The five gateway operations.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    async fn translate(&self, text: &str, target: Language) -> Result<String, GatewayError>;

    async fn generate_description(
        &self,
        job_title: &str,
        company: &str,
    ) -> Result<String, GatewayError>;

    async fn generate_summary(&self, document: &Document) -> Result<String, GatewayError>;

    async fn generate_cover_letter(
        &self,
        document: &Document,
        target_job: &str,
        company_name: &str,
    ) -> Result<String, GatewayError>;

    async fn score_resume(
        &self,
        document: &Document,
        target_job: &str,
    ) -> Result<ResumeScore, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(ResumeScore::clamped(140, String::new(), vec![]).score, 100);
        assert_eq!(ResumeScore::clamped(-3, String::new(), vec![]).score, 0);
        assert_eq!(ResumeScore::clamped(72, String::new(), vec![]).score, 72);
    }
}
