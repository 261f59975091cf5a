// Prompt templates for the five gateway operations.
// Placeholders in `{braces}` are replaced before sending.

use serde_json::{json, Value};

use crate::llm_client::prompts::TARGET_MARKET;
use crate::models::Document;

/// Translation prompt. Replace `{language}` and `{text}`.
pub const TRANSLATE_PROMPT_TEMPLATE: &str =
    "Translate the following text to {language}. Keep line breaks and any leading \"- \" \
     bullet markers exactly where they are: \"{text}\"";

/// Description prompt. Replace `{job_title}` and `{company}`.
pub const DESCRIPTION_PROMPT_TEMPLATE: &str =
    "Generate 3 concise, professional bullet points for a job description for a {job_title} \
     at {company}. Focus on key responsibilities and achievements. Start each point with '- ' \
     and put each point on its own line.";

/// Summary prompt. Replace `{market}` and `{details}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str =
    "Based on the following resume details, write a compelling and professional 2-3 sentence \
     summary for a CV. Tailor it for {market}. Details:\n{details}";

/// Scoring prompt. Replace `{target_job}`, `{market}` and `{resume_json}`.
pub const SCORE_PROMPT_TEMPLATE: &str =
    "Analyze the following resume data for a \"{target_job}\" position in {market}. \
     Provide a score out of 100, one sentence of overall feedback, and a list of 3 actionable \
     suggestions for improvement (e.g., missing keywords). Resume Data: {resume_json}";

/// Cover letter prompt. Replace `{job_title}`, `{company}`, `{market}` and `{resume_info}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str =
    "Using the following resume information, write a professional and concise cover letter \
     for the position of {job_title} at {company}. The tone should be formal and tailored to \
     {market}. Keep it to 3 paragraphs. Resume Info: {resume_info}";

pub fn build_translate_prompt(text: &str, language: &str) -> String {
    TRANSLATE_PROMPT_TEMPLATE
        .replace("{language}", language)
        .replace("{text}", text)
}

pub fn build_description_prompt(job_title: &str, company: &str) -> String {
    DESCRIPTION_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{company}", company)
}

pub fn build_summary_prompt(document: &Document) -> String {
    let experience = document
        .experience
        .iter()
        .map(|e| format!("{} at {}: {}", e.job_title, e.company, e.description))
        .collect::<Vec<_>>()
        .join("; ");
    let skills = document
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let details = format!(
        "Job Title: {}\nExperience: {}\nSkills: {}",
        document.personal_info.title, experience, skills
    );

    SUMMARY_PROMPT_TEMPLATE
        .replace("{market}", TARGET_MARKET)
        .replace("{details}", &details)
}

pub fn build_score_prompt(document: &Document, target_job: &str) -> Result<String, serde_json::Error> {
    let resume_json = serde_json::to_string(document)?;
    Ok(SCORE_PROMPT_TEMPLATE
        .replace("{target_job}", target_job)
        .replace("{market}", TARGET_MARKET)
        .replace("{resume_json}", &resume_json))
}

pub fn build_cover_letter_prompt(document: &Document, job_title: &str, company: &str) -> String {
    let mut resume_info = format!(
        "{} {}",
        document.personal_info.name, document.personal_info.summary
    );
    for e in &document.experience {
        resume_info.push(' ');
        resume_info.push_str(&e.job_title);
        resume_info.push(' ');
        resume_info.push_str(&e.description);
    }

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{company}", company)
        .replace("{market}", TARGET_MARKET)
        .replace("{resume_info}", &resume_info)
}

/// Response schema for résumé scoring (Gemini JSON mode).
pub fn score_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER" },
            "feedback": { "type": "STRING" },
            "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["score", "feedback", "suggestions"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_placeholders(prompt: &str) {
        for placeholder in [
            "{language}",
            "{text}",
            "{job_title}",
            "{company}",
            "{market}",
            "{details}",
            "{target_job}",
            "{resume_json}",
            "{resume_info}",
        ] {
            assert!(
                !prompt.contains(placeholder),
                "unreplaced {placeholder} in: {prompt}"
            );
        }
    }

    #[test]
    fn test_translate_prompt_embeds_language_and_text() {
        let prompt = build_translate_prompt("Built UI", "Urdu");
        assert!(prompt.contains("to Urdu"));
        assert!(prompt.contains("\"Built UI\""));
        assert_no_placeholders(&prompt);
    }

    #[test]
    fn test_description_prompt() {
        let prompt = build_description_prompt("Frontend Developer", "Tech Solutions Ltd.");
        assert!(prompt.contains("Frontend Developer at Tech Solutions Ltd."));
        assert_no_placeholders(&prompt);
    }

    #[test]
    fn test_summary_prompt_lists_experience_and_skills() {
        let prompt = build_summary_prompt(&Document::seed());
        assert!(prompt.contains("Job Title: Software Engineer"));
        assert!(prompt.contains("Frontend Developer at Tech Solutions Ltd.:"));
        assert!(prompt.contains("JavaScript, React, Node.js, TypeScript, Tailwind CSS"));
        assert_no_placeholders(&prompt);
    }

    #[test]
    fn test_score_prompt_embeds_document_json() {
        let prompt = build_score_prompt(&Document::seed(), "Doctor").unwrap();
        assert!(prompt.contains("\"Doctor\" position"));
        assert!(prompt.contains("\"jobTitle\":\"Frontend Developer\""));
        assert_no_placeholders(&prompt);
    }

    #[test]
    fn test_cover_letter_prompt() {
        let prompt = build_cover_letter_prompt(&Document::seed(), "Engineer", "Acme");
        assert!(prompt.contains("position of Engineer at Acme"));
        assert!(prompt.contains("Muhammad Ali"));
        assert_no_placeholders(&prompt);
    }

    #[test]
    fn test_score_schema_requires_all_fields() {
        let schema = score_response_schema();
        assert_eq!(schema["properties"]["suggestions"]["type"], "ARRAY");
        assert_eq!(schema["required"].as_array().map(|a| a.len()), Some(3));
    }
}
