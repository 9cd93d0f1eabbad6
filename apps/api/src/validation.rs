//! Request validation for the AI-backed routes.
//!
//! Works on the raw JSON body so that type mismatches (`"prompt": 42`) are
//! rejected instead of coerced. A body that failed to parse is passed in as
//! `Value::Null` and behaves as if every field were missing.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::email::models::GenerationRequest;
use crate::quality::models::{CheckType, QualityCheckRequest};

pub const MAX_PROMPT_CHARS: usize = 3000;
pub const MAX_EMAIL_CHARS: usize = 6000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    Missing(&'static str),

    #[error("'{0}' must be a string")]
    InvalidType(&'static str),

    #[error("'{field}' exceeds {limit} characters")]
    TooLong { field: &'static str, limit: usize },
}

/// Validates a generate-email body.
pub fn validate_generation(body: &Value) -> Result<GenerationRequest, ValidationError> {
    let prompt = require_text(body, "prompt", MAX_PROMPT_CHARS)?;

    let tone = match body.get("tone") {
        None | Some(Value::Null) => None,
        Some(Value::String(t)) if t.trim().is_empty() => None,
        Some(Value::String(t)) => Some(t.trim().to_string()),
        Some(_) => return Err(ValidationError::InvalidType("tone")),
    };

    Ok(GenerationRequest { prompt, tone })
}

/// Validates a quality-check body. `checkType` never fails validation.
pub fn validate_quality_check(body: &Value) -> Result<QualityCheckRequest, ValidationError> {
    let email = require_text(body, "email", MAX_EMAIL_CHARS)?;
    let check_type = parse_check_type(body.get("checkType"));

    Ok(QualityCheckRequest { email, check_type })
}

/// Absent or null selects `normal`; unknown values fall back to `normal`.
fn parse_check_type(raw: Option<&Value>) -> CheckType {
    match raw {
        None | Some(Value::Null) => CheckType::default(),
        Some(Value::String(s)) => CheckType::parse(s).unwrap_or_else(|| {
            warn!("Unknown checkType {s:?}, using normal");
            CheckType::default()
        }),
        Some(other) => {
            warn!("Non-string checkType {other}, using normal");
            CheckType::default()
        }
    }
}

/// Returns the field untouched when it is a non-blank string within `limit` chars.
fn require_text(
    body: &Value,
    field: &'static str,
    limit: usize,
) -> Result<String, ValidationError> {
    let text = match body.get(field) {
        Some(Value::String(s)) => s,
        _ => return Err(ValidationError::Missing(field)),
    };

    if text.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }

    if text.chars().count() > limit {
        return Err(ValidationError::TooLong { field, limit });
    }

    Ok(text.clone())
}
