//! Response normalizer: turns untrusted model output into a `QualityReport`.
//!
//! CRITICAL: `normalize_report` never fails. Anything it cannot make sense of
//! becomes a fallback report carrying the reason in `summary`.
//!
//! `improvedEmail` is enforced here, not in the prompt: a model that ignores
//! its instructions still cannot leak a rewrite outside `advanced` mode.

use serde_json::{Map, Value};
use tracing::warn;

use crate::quality::models::{CheckType, QualityReport, Severity};

pub const NO_SUMMARY: &str = "No summary provided.";
pub const NOT_AVAILABLE: &str = "N/A";

/// Why a quality check could not be completed. The display text is shown to
/// the client inside the fallback summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    ServerConfig,
    EmailMissing,
    EmailTooLong,
    AiResponse,
    Unexpected,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::ServerConfig => "Server config error",
            FallbackReason::EmailMissing => "Email content missing",
            FallbackReason::EmailTooLong => "Email too long",
            FallbackReason::AiResponse => "AI response issue",
            FallbackReason::Unexpected => "Unexpected error",
        }
    }
}

/// The fixed-shape degraded report.
pub fn fallback_report(reason: FallbackReason) -> QualityReport {
    QualityReport {
        score: 0,
        severity: Severity::High,
        summary: format!("Unable to analyze email ({}).", reason.as_str()),
        grammar: NOT_AVAILABLE.to_string(),
        clarity: NOT_AVAILABLE.to_string(),
        tone: NOT_AVAILABLE.to_string(),
        risk: NOT_AVAILABLE.to_string(),
        suggestions: String::new(),
        improved_email: String::new(),
    }
}

/// Returns the span from the first `{` to the last `}`, inclusive.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Normalizes raw model text into a report. Never fails.
pub fn normalize_report(raw: &str, check_type: CheckType) -> QualityReport {
    let parsed = extract_json_object(raw).and_then(|candidate| {
        serde_json::from_str::<Value>(candidate)
            .map_err(|e| warn!("Model JSON did not parse: {e}"))
            .ok()
    });

    match parsed {
        Some(Value::Object(fields)) => build_report(&fields, check_type),
        _ => {
            warn!("No usable JSON object in model output ({} chars)", raw.len());
            fallback_report(FallbackReason::AiResponse)
        }
    }
}

fn build_report(fields: &Map<String, Value>, check_type: CheckType) -> QualityReport {
    let score = coerce_score(fields.get("score"));

    let severity = fields
        .get("severity")
        .and_then(Value::as_str)
        .and_then(Severity::parse)
        .unwrap_or_else(|| Severity::from_score(score));

    let improved_email = match check_type {
        CheckType::Advanced => text_or(fields.get("improvedEmail"), ""),
        CheckType::Normal | CheckType::Medium => String::new(),
    };

    QualityReport {
        score,
        severity,
        summary: text_or(fields.get("summary"), NO_SUMMARY),
        grammar: text_or(fields.get("grammar"), NOT_AVAILABLE),
        clarity: text_or(fields.get("clarity"), NOT_AVAILABLE),
        tone: text_or(fields.get("tone"), NOT_AVAILABLE),
        risk: text_or(fields.get("risk"), NOT_AVAILABLE),
        suggestions: text_or(fields.get("suggestions"), ""),
        improved_email,
    }
}

/// Numeric coercion for `score`: numbers and numeric strings count, booleans
/// are 1/0, everything else is 0. Result is rounded and clamped to 0..=100.
fn coerce_score(value: Option<&Value>) -> u8 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };

    if !n.is_finite() {
        return 0;
    }
    n.round().clamp(0.0, 100.0) as u8
}

/// The value rendered as text when it is truthy, otherwise `default`.
fn text_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(truthy_text)
        .unwrap_or_else(|| default.to_string())
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let lines: Vec<String> = items.iter().filter_map(truthy_text).collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        Value::Object(_) => Some(value.to_string()),
    }
}
