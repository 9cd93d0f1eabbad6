use serde::Serialize;

/// Validated generate-email input. `prompt` is kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateEmailResponse {
    pub success: bool,
    pub email: String,
}

/// A built-in prompt starter offered to the front-end.
#[derive(Debug, Clone, Serialize)]
pub struct PromptTemplate {
    pub id: &'static str,
    pub label: &'static str,
    pub content: &'static str,
}
