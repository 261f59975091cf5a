// Shared prompt constants used across gateway operations.
// Operation-specific templates live in gateway/prompts.rs.

/// System prompt for operations whose whole response is inserted into the document.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a professional CV writing assistant. \
    Respond with the requested text only. \
    Do NOT add a preface, a closing remark, quotation marks or markdown formatting.";

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Market the generated content is tailored for.
pub const TARGET_MARKET: &str = "the Pakistani job market";
