use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and whether the model credential is present.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "mailkaro-api",
        "model": state.config.gemini_model,
        "llm_configured": state.llm.ensure_ready().is_ok()
    }))
}
