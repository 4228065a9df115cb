pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::contact::handlers::handle_contact;
use crate::content::handlers::{handle_get_profile, handle_get_projects, handle_get_resume};
use crate::cover_letter::handlers::handle_generate_cover_letter;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Content
        .route("/api/v1/resume", get(handle_get_resume))
        .route("/api/v1/profile", get(handle_get_profile))
        .route("/api/v1/projects", get(handle_get_projects))
        // Cover letter generator
        .route("/api/v1/cover-letter", post(handle_generate_cover_letter))
        // Contact form
        .route("/api/v1/contact", post(handle_contact))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;
    use crate::content::document::{parse_document, ResumeDocument};
    use crate::content::provider::{ContentProvider, FileContentProvider, StaticContentProvider};
    use crate::llm_client::LlmClient;

    const RESUME: &str = "---\nname: Jane R. Doe\ntitle: Engineer\ncvUrl: /cv.pdf\n---\n## Summary\nHi.\n\n## Skills\n- Rust\n\n## Experience\nBuilt things.\n";

    fn state(llm_base_url: &str, content: Arc<dyn ContentProvider>) -> AppState {
        let config = Config {
            anthropic_api_key: "test-key".to_string(),
            anthropic_base_url: llm_base_url.to_string(),
            llm_max_attempts: 1,
            resume_path: "content/resume.md".into(),
            cors_allow_origin: None,
            port: 0,
            rust_log: "debug".to_string(),
        };
        AppState {
            llm: LlmClient::new(config.anthropic_api_key.clone(), llm_base_url, 1).unwrap(),
            config,
            content,
        }
    }

    fn static_content() -> Arc<dyn ContentProvider> {
        Arc::new(StaticContentProvider::new(parse_document(RESUME).unwrap()))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn long(text: &str) -> String {
        format!("{text} {}", "detail ".repeat(10))
    }

    #[tokio::test]
    async fn test_health() {
        let router = build_router(state("http://127.0.0.1:9", static_content()));
        let (status, body) = send(router, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let router = build_router(state("http://127.0.0.1:9", static_content()));
        let (status, body) = send(router, get_req("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_resume_strips_home_page_sections() {
        let router = build_router(state("http://127.0.0.1:9", static_content()));
        let (status, body) = send(router, get_req("/api/v1/resume")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["frontmatter"]["name"], "Jane R. Doe");
        assert_eq!(body["content"], "## Experience\nBuilt things.");
        let html = body["html"].as_str().unwrap();
        assert!(html.contains("<h2>Experience</h2>"));
        assert!(html.contains("opacity-0"));
    }

    #[tokio::test]
    async fn test_resume_load_failure_renders_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let content = Arc::new(FileContentProvider::new(dir.path().join("missing.md")));
        let router = build_router(state("http://127.0.0.1:9", content));

        let (status, body) = send(router, get_req("/api/v1/resume")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["frontmatter"]["name"], "Error");
        assert_eq!(body["content"], ResumeDocument::load_failure().content);
    }

    #[tokio::test]
    async fn test_profile() {
        let router = build_router(state("http://127.0.0.1:9", static_content()));
        let (status, body) = send(router, get_req("/api/v1/profile")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"][0]["company"], "QuantumLeap AI");
        assert_eq!(body["allSkillsWithLogos"][0]["name"], "Python");
    }

    #[tokio::test]
    async fn test_projects() {
        let router = build_router(state("http://127.0.0.1:9", static_content()));
        let (status, body) = send(router, get_req("/api/v1/projects")).await;
        assert_eq!(status, StatusCode::OK);
        let projects = body["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 4);
        assert_eq!(projects[0]["title"], "RetinaFace – A Face Detection Tool");
        assert_eq!(projects[0]["tags"][2], "PyTorch");
        assert!(projects[1].get("liveUrl").is_none());
    }

    #[tokio::test]
    async fn test_cover_letter_success() {
        let server = MockServer::start().await;
        let text = json!({"coverLetter": "Dear Hiring Manager,\n\nThank you."}).to_string();
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": text}],
                "usage": {"input_tokens": 10, "output_tokens": 20}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let router = build_router(state(&server.uri(), static_content()));
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/cover-letter",
                json!({
                    "jobDescription": long("Backend engineer, Rust, distributed systems."),
                    "resumeInformation": long("Seven years shipping Rust services."),
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body["coverLetter"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cover_letter_validation_happens_before_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let router = build_router(state(&server.uri(), static_content()));
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/cover-letter",
                json!({ "jobDescription": long("Backend engineer, Rust.") }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("resumeInformation"));
    }

    #[tokio::test]
    async fn test_cover_letter_upstream_failure_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let router = build_router(state(&server.uri(), static_content()));
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/cover-letter",
                json!({
                    "jobDescription": long("Backend engineer, Rust."),
                    "resumeInformation": long("Seven years of Rust."),
                    "additionalInstructions": "Keep it short."
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
        assert!(!body.to_string().contains("invalid x-api-key"));
    }

    #[tokio::test]
    async fn test_contact_accepts_valid_submission() {
        let router = build_router(state("http://127.0.0.1:9", static_content()));
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/contact",
                json!({
                    "name": "Sam",
                    "email": "sam@example.com",
                    "message": "Would love to chat about a role."
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["status"], "received");
        assert!(body["receivedAt"].is_string());
    }

    #[tokio::test]
    async fn test_contact_rejects_bad_email() {
        let router = build_router(state("http://127.0.0.1:9", static_content()));
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/contact",
                json!({ "name": "Sam", "email": "sam", "message": "Would love to chat." }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("email"));
    }
}
