//! Axum route handlers for email generation and the prompt-starter catalog.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::email::models::{GenerateEmailResponse, PromptTemplate};
use crate::email::prompts::build_email_prompt;
use crate::email::templates::{find_template, PROMPT_TEMPLATES};
use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::{validate_generation, ValidationError, MAX_PROMPT_CHARS};

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: &'static [PromptTemplate],
}

/// POST /api/generate-email
///
/// Fail-visible: every failure class maps to its own status code.
pub async fn handle_generate_email(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateEmailResponse>, AppError> {
    state.llm.ensure_ready()?;

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!("Oversized generate-email body: {rejection}");
            return Err(prompt_too_long());
        }
        Err(rejection) => {
            warn!("Unreadable generate-email body: {rejection}");
            Value::Null
        }
    };

    let request = validate_generation(&body).map_err(|e| {
        warn!("Rejected generate-email request: {e}");
        match e {
            ValidationError::Missing(_) => AppError::Validation("Prompt is required".to_string()),
            ValidationError::InvalidType(field) => {
                AppError::Validation(format!("Field '{field}' must be a string"))
            }
            ValidationError::TooLong { .. } => prompt_too_long(),
        }
    })?;

    let prompt = build_email_prompt(&request.prompt, request.tone.as_deref());
    let email = state.llm.generate(&prompt).await?;

    info!("Generated email ({} chars)", email.chars().count());

    Ok(Json(GenerateEmailResponse {
        success: true,
        email,
    }))
}

fn prompt_too_long() -> AppError {
    AppError::PayloadTooLarge(format!(
        "Prompt too long. Please keep it under {MAX_PROMPT_CHARS} characters."
    ))
}

/// GET /api/templates
pub async fn handle_list_templates() -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: PROMPT_TEMPLATES,
    })
}

/// GET /api/templates/:id
pub async fn handle_get_template(
    Path(id): Path<String>,
) -> Result<Json<&'static PromptTemplate>, AppError> {
    find_template(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))
}
