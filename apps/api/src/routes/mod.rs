pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::email::handlers as email;
use crate::quality::handlers as quality;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/generate-email", post(email::handle_generate_email))
        .route("/api/quality-check", post(quality::handle_quality_check))
        .route("/api/templates", get(email::handle_list_templates))
        .route("/api/templates/:id", get(email::handle_get_template))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::{LlmError, TextGenerator};

    #[derive(Clone)]
    enum Reply {
        Text(String),
        Auth,
        RateLimited,
        Empty,
        ServerError,
    }

    /// In-process stand-in for the Gemini gateway.
    struct StubGenerator {
        has_key: bool,
        reply: Reply,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl StubGenerator {
        fn replying(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                has_key: true,
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn without_key() -> Arc<Self> {
            Arc::new(Self {
                has_key: false,
                reply: Reply::Text("unused".into()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_prompt(&self) -> String {
            self.last_prompt.lock().unwrap().clone().unwrap_or_default()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        fn ensure_ready(&self) -> Result<(), LlmError> {
            if self.has_key {
                Ok(())
            } else {
                Err(LlmError::MissingApiKey)
            }
        }

        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.ensure_ready()?;
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Reply::Text(t) => Ok(t.clone()),
                Reply::Auth => Err(LlmError::Auth("API_KEY_INVALID".into())),
                Reply::RateLimited => Err(LlmError::RateLimited("quota exceeded".into())),
                Reply::Empty => Err(LlmError::EmptyContent),
                Reply::ServerError => Err(LlmError::Api {
                    status: 503,
                    message: "internal provider detail".into(),
                }),
            }
        }
    }

    /// Larger than axum's default 2 MB request body limit.
    const OVERSIZED_BODY_BYTES: usize = 3 * 1024 * 1024;

    fn app_with(stub: Arc<StubGenerator>) -> Router {
        let config = Config {
            gemini_api_key: stub.has_key.then(|| "test-key".to_string()),
            gemini_model: "gemini-test".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            gemini_timeout_secs: 1,
            port: 0,
            rust_log: "debug".to_string(),
        };
        build_router(AppState { config, llm: stub })
    }

    async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(app, uri, &body.to_string()).await
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assert_well_formed_report(body: &Value) {
        let score = body["score"].as_u64().expect("score must be an integer");
        assert!(score <= 100);
        assert!(["Low", "Medium", "High"].contains(&body["severity"].as_str().unwrap()));
        for key in [
            "summary",
            "grammar",
            "clarity",
            "tone",
            "risk",
            "suggestions",
            "improvedEmail",
        ] {
            assert!(body[key].is_string(), "{key} must be a string");
        }
    }

    // ── generate-email ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_email_success() {
        let stub = StubGenerator::replying(Reply::Text("Subject: Leave\n\nHi...".into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/generate-email",
            json!({ "prompt": "Request leave on Friday", "tone": "formal" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "email": "Subject: Leave\n\nHi..." }));
        assert_eq!(stub.calls(), 1);
        let prompt = stub.last_prompt();
        assert!(prompt.contains("\"Request leave on Friday\""));
        assert!(prompt.contains("formal tone"));
    }

    #[tokio::test]
    async fn test_generate_email_missing_key_is_500_and_skips_model() {
        let stub = StubGenerator::without_key();
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/generate-email",
            json!({ "prompt": "hello" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": "Server configuration error" }));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_email_validation_errors() {
        for bad in [json!({}), json!({ "prompt": "   " }), json!({ "prompt": 12 })] {
            let stub = StubGenerator::replying(Reply::Text("x".into()));
            let (status, body) =
                post_json(app_with(stub.clone()), "/api/generate-email", bad).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "Prompt is required");
            assert_eq!(stub.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_generate_email_malformed_json_is_400() {
        let stub = StubGenerator::replying(Reply::Text("x".into()));
        let (status, body) = post_raw(app_with(stub), "/api/generate-email", "{prompt:").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_generate_email_too_long_is_413() {
        let stub = StubGenerator::replying(Reply::Text("x".into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/generate-email",
            json!({ "prompt": "a".repeat(3001) }),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body["error"],
            "Prompt too long. Please keep it under 3000 characters."
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_email_body_over_transport_limit_is_413() {
        let stub = StubGenerator::replying(Reply::Text("x".into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/generate-email",
            json!({ "prompt": "a".repeat(OVERSIZED_BODY_BYTES) }),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Prompt too long. Please keep it under 3000 characters."
            })
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_email_non_string_tone_is_400() {
        let stub = StubGenerator::replying(Reply::Text("x".into()));
        let (status, _) = post_json(
            app_with(stub),
            "/api/generate-email",
            json!({ "prompt": "hi", "tone": false }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_email_provider_failures_map_to_status() {
        let cases = [
            (
                Reply::Auth,
                StatusCode::UNAUTHORIZED,
                "AI service authentication failed",
            ),
            (
                Reply::RateLimited,
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please try again later.",
            ),
            (
                Reply::Empty,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate email. Please try again.",
            ),
            (
                Reply::ServerError,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate email. Please try again.",
            ),
        ];

        for (reply, expected_status, expected_error) in cases {
            let (status, body) = post_json(
                app_with(StubGenerator::replying(reply)),
                "/api/generate-email",
                json!({ "prompt": "hello" }),
            )
            .await;
            assert_eq!(status, expected_status);
            assert_eq!(body, json!({ "success": false, "error": expected_error }));
        }
    }

    // ── quality-check ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_quality_check_normalizes_model_output() {
        let raw = "Here is the result:\n{\"score\": 55, \"summary\": \"ok\", \"improvedEmail\": \"leak\"} Thanks!";
        let stub = StubGenerator::replying(Reply::Text(raw.into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/quality-check",
            json!({ "email": "Hi team, see attached." }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "score": 55,
                "severity": "High",
                "summary": "ok",
                "grammar": "N/A",
                "clarity": "N/A",
                "tone": "N/A",
                "risk": "N/A",
                "suggestions": "",
                "improvedEmail": ""
            })
        );
        assert!(stub.last_prompt().contains("Checking Mode: normal"));
    }

    #[tokio::test]
    async fn test_quality_check_advanced_keeps_improved_email() {
        let raw = r#"{"score": 82, "improvedEmail": "Dear team,\nPlease find..."}"#;
        let stub = StubGenerator::replying(Reply::Text(raw.into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/quality-check",
            json!({ "email": "hey", "checkType": "advanced" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["severity"], "Low");
        assert_eq!(body["improvedEmail"], "Dear team,\nPlease find...");
        assert!(stub.last_prompt().contains("Checking Mode: advanced"));
    }

    #[tokio::test]
    async fn test_quality_check_empty_email_fallback() {
        let stub = StubGenerator::replying(Reply::Text("{}".into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/quality-check",
            json!({ "email": "" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 0);
        assert_eq!(body["severity"], "High");
        assert_eq!(body["summary"], "Unable to analyze email (Email content missing).");
        assert_well_formed_report(&body);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_quality_check_oversized_email_fallback() {
        let stub = StubGenerator::replying(Reply::Text("{}".into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/quality-check",
            json!({ "email": "x".repeat(10_000) }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "Unable to analyze email (Email too long).");
        assert_well_formed_report(&body);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_quality_check_body_over_transport_limit_is_too_long() {
        let stub = StubGenerator::replying(Reply::Text("{}".into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/quality-check",
            json!({ "email": "x".repeat(OVERSIZED_BODY_BYTES) }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "Unable to analyze email (Email too long).");
        assert_well_formed_report(&body);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_quality_check_uppercase_advanced_does_not_unlock_rewrite() {
        let raw = r#"{"score": 50, "improvedEmail": "Rewritten body"}"#;
        let stub = StubGenerator::replying(Reply::Text(raw.into()));
        let (status, body) = post_json(
            app_with(stub.clone()),
            "/api/quality-check",
            json!({ "email": "hey", "checkType": "ADVANCED" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["improvedEmail"], "");
        assert!(stub.last_prompt().contains("Checking Mode: normal"));
    }

    #[tokio::test]
    async fn test_quality_check_missing_key_fallback() {
        let (status, body) = post_json(
            app_with(StubGenerator::without_key()),
            "/api/quality-check",
            json!({ "email": "hello" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "Unable to analyze email (Server config error).");
    }

    #[tokio::test]
    async fn test_quality_check_garbage_model_output_fallback() {
        let stub = StubGenerator::replying(Reply::Text("Sorry, I can't do JSON today.".into()));
        let (status, body) =
            post_json(app_with(stub), "/api/quality-check", json!({ "email": "hello" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "Unable to analyze email (AI response issue).");
        assert_well_formed_report(&body);
    }

    #[tokio::test]
    async fn test_quality_check_provider_failures_are_soft() {
        for reply in [Reply::Auth, Reply::RateLimited, Reply::Empty, Reply::ServerError] {
            let (status, body) = post_json(
                app_with(StubGenerator::replying(reply)),
                "/api/quality-check",
                json!({ "email": "hello" }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["summary"], "Unable to analyze email (Unexpected error).");
            assert!(!body.to_string().contains("internal provider detail"));
        }
    }

    #[tokio::test]
    async fn test_quality_check_malformed_body_is_soft() {
        let stub = StubGenerator::replying(Reply::Text("{}".into()));
        let (status, body) = post_raw(app_with(stub), "/api/quality-check", "not json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "Unable to analyze email (Email content missing).");
    }

    // ── ambient routes ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let (status, body) = get_json(app_with(StubGenerator::without_key()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "mailkaro-api");
        assert_eq!(body["model"], "gemini-test");
        assert_eq!(body["llm_configured"], false);
    }

    #[tokio::test]
    async fn test_templates_catalog() {
        let stub = StubGenerator::replying(Reply::Text("x".into()));
        let (status, body) = get_json(app_with(stub.clone()), "/api/templates").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templates"].as_array().unwrap().len(), 15);
        assert_eq!(body["templates"][0]["id"], "job");

        let (status, body) = get_json(app_with(stub.clone()), "/api/templates/refund").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "Write a refund request email for the product...");

        let (status, body) = get_json(app_with(stub), "/api/templates/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Template not found" }));
    }
}
