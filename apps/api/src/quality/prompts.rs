// Prompt template for the quality-check route.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::quality::models::CheckType;

/// Quality-check prompt. Replace: {mode}, {json_only}, then {email}.
pub const QUALITY_PROMPT_TEMPLATE: &str = r#"You are an Email Quality Assurance system.

Checking Mode: {mode}

{json_only}

Schema:
{
  "score": number,
  "severity": "Low" | "Medium" | "High",
  "summary": string,
  "grammar": string,
  "clarity": string,
  "tone": string,
  "risk": string,
  "suggestions": string,
  "improvedEmail": string
}

Mode rules:
- normal: grammar + clarity only
- medium: tone + professionalism + risk
- advanced: deep risk + rewrite full improved email

Rules:
- All keys MUST exist
- score between 0–100
- If not advanced, improvedEmail MUST be empty string

EMAIL:
"""{email}""""#;

pub fn build_quality_prompt(email: &str, check_type: CheckType) -> String {
    QUALITY_PROMPT_TEMPLATE
        .replace("{mode}", check_type.as_str())
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{email}", email)
}
