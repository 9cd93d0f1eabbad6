//! Axum route handler for the quality-check API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::llm_client::LlmError;
use crate::quality::models::QualityReport;
use crate::quality::normalizer::{fallback_report, normalize_report, FallbackReason};
use crate::quality::prompts::build_quality_prompt;
use crate::state::AppState;
use crate::validation::{validate_quality_check, ValidationError};

/// POST /api/quality-check
///
/// Fail-soft: always 200 with a well-formed `QualityReport`. Failures show up
/// only as a fallback report whose summary names the reason.
pub async fn handle_quality_check(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Json<QualityReport> {
    Json(run_quality_check(&state, payload).await)
}

async fn run_quality_check(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> QualityReport {
    if let Err(e) = state.llm.ensure_ready() {
        error!("Quality check unavailable: {e}");
        return fallback_report(FallbackReason::ServerConfig);
    }

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!("Oversized quality-check body: {rejection}");
            return fallback_report(FallbackReason::EmailTooLong);
        }
        Err(rejection) => {
            warn!("Unreadable quality-check body: {rejection}");
            Value::Null
        }
    };

    let request = match validate_quality_check(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected quality-check request: {e}");
            return match e {
                ValidationError::TooLong { .. } => fallback_report(FallbackReason::EmailTooLong),
                ValidationError::Missing(_) | ValidationError::InvalidType(_) => {
                    fallback_report(FallbackReason::EmailMissing)
                }
            };
        }
    };

    let prompt = build_quality_prompt(&request.email, request.check_type);

    let raw = match state.llm.generate(&prompt).await {
        Ok(raw) => raw,
        Err(LlmError::MissingApiKey) => return fallback_report(FallbackReason::ServerConfig),
        Err(e) => {
            error!("Quality check failed: {e}");
            return fallback_report(FallbackReason::Unexpected);
        }
    };

    let report = normalize_report(&raw, request.check_type);
    info!(
        "Quality check complete: mode={}, score={}, severity={:?}",
        request.check_type.as_str(),
        report.score,
        report.severity
    );
    report
}
