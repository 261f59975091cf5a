use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::gateway::prompts::{
    build_cover_letter_prompt, build_description_prompt, build_score_prompt,
    build_summary_prompt, build_translate_prompt, score_response_schema,
};
use crate::gateway::{ContentGateway, GatewayError, ResumeScore};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PLAIN_TEXT_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::{Document, Language};

/// Raw scoring payload; the model may omit fields or overshoot the range.
#[derive(Debug, Deserialize)]
struct RawScore {
    score: i64,
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Gateway backed by the hosted Gemini model.
#[derive(Clone)]
pub struct GeminiGateway {
    llm: LlmClient,
}

impl GeminiGateway {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentGateway for GeminiGateway {
    async fn translate(&self, text: &str, target: Language) -> Result<String, GatewayError> {
        let prompt = build_translate_prompt(text, target.name());
        let translated = self.llm.call_text(&prompt, Some(PLAIN_TEXT_SYSTEM)).await?;
        Ok(strip_wrapping_quotes(&translated).to_string())
    }

    async fn generate_description(
        &self,
        job_title: &str,
        company: &str,
    ) -> Result<String, GatewayError> {
        let prompt = build_description_prompt(job_title, company);
        Ok(self.llm.call_text(&prompt, Some(PLAIN_TEXT_SYSTEM)).await?)
    }

    async fn generate_summary(&self, document: &Document) -> Result<String, GatewayError> {
        let prompt = build_summary_prompt(document);
        Ok(self.llm.call_text(&prompt, Some(PLAIN_TEXT_SYSTEM)).await?)
    }

    async fn generate_cover_letter(
        &self,
        document: &Document,
        target_job: &str,
        company_name: &str,
    ) -> Result<String, GatewayError> {
        let prompt = build_cover_letter_prompt(document, target_job, company_name);
        Ok(self.llm.call_text(&prompt, Some(PLAIN_TEXT_SYSTEM)).await?)
    }

    async fn score_resume(
        &self,
        document: &Document,
        target_job: &str,
    ) -> Result<ResumeScore, GatewayError> {
        let prompt = build_score_prompt(document, target_job)?;
        let raw: RawScore = self
            .llm
            .call_json(&prompt, Some(JSON_ONLY_SYSTEM), &score_response_schema())
            .await?;
        debug!("Raw resume score from model: {}", raw.score);
        Ok(ResumeScore::clamped(raw.score, raw.feedback, raw.suggestions))
    }
}

/// The translation prompt quotes its input; models often echo the quotes back.
fn strip_wrapping_quotes(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_wrapping_quotes() {
        assert_eq!(strip_wrapping_quotes("\"سلام\""), "سلام");
        assert_eq!(strip_wrapping_quotes("  plain  "), "plain");
        assert_eq!(strip_wrapping_quotes("say \"hi\" now"), "say \"hi\" now");
    }

    #[test]
    fn test_raw_score_tolerates_missing_fields() {
        let raw: RawScore = serde_json::from_str(r#"{"score": 120}"#).unwrap();
        let score = ResumeScore::clamped(raw.score, raw.feedback, raw.suggestions);
        assert_eq!(score.score, 100);
        assert!(score.suggestions.is_empty());
    }

    #[test]
    fn test_raw_score_requires_score() {
        assert!(serde_json::from_str::<RawScore>(r#"{"feedback": "ok"}"#).is_err());
    }
}
