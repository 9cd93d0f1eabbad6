use serde::{Deserialize, Serialize};

/// Analysis depth requested by the client. Changes prompt emphasis and whether
/// `improvedEmail` may be returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckType {
    #[default]
    Normal,
    Medium,
    Advanced,
}

impl CheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Normal => "normal",
            CheckType::Medium => "medium",
            CheckType::Advanced => "advanced",
        }
    }

    /// Exact match on the wire name. Returns `None` for anything else, so
    /// only the literal `"advanced"` can unlock `improvedEmail`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "normal" => Some(CheckType::Normal),
            "medium" => Some(CheckType::Medium),
            "advanced" => Some(CheckType::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// ≥80 Low, ≥60 Medium, otherwise High.
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Severity::Low
        } else if score >= 60 {
            Severity::Medium
        } else {
            Severity::High
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

/// Validated quality-check input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityCheckRequest {
    pub email: String,
    pub check_type: CheckType,
}

/// The guaranteed-shape body of every `/api/quality-check` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub score: u8,
    pub severity: Severity,
    pub summary: String,
    pub grammar: String,
    pub clarity: String,
    pub tone: String,
    pub risk: String,
    pub suggestions: String,
    pub improved_email: String,
}
