//! Common test utilities for petverse-service integration tests.
//!
//! Each [`TestApp`] owns a temporary directory holding its SQLite file and
//! page templates, so tests never share state.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use petverse_service::config::{
    DatabaseConfig, Environment, GroqConfig, PetverseConfig, WebConfig,
};
use petverse_service::services::init_metrics;
use petverse_service::services::providers::mock::{MockBehavior, MockChatProvider};
use petverse_service::{build_router, AppState};
use secrecy::Secret;
use service_core::config::Config as CommonConfig;
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tower::ServiceExt;

static INIT: Once = Once::new();

pub const TEST_MODEL: &str = "test-model";

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,petverse_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const HOME_HTML: &str = "<html><body>home</body></html>";
pub const PETS_HTML: &str = "<html><body>pets</body></html>";
pub const ABOUT_HTML: &str = "<html><body>about</body></html>";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub provider: Arc<MockChatProvider>,
    _dir: TempDir,
}

impl TestApp {
    /// Spawn an app whose chat provider always replies with `"Woof!"`.
    pub async fn spawn() -> Self {
        Self::spawn_with(MockBehavior::Reply("Woof!".to_string())).await
    }

    pub async fn spawn_with(behavior: MockBehavior) -> Self {
        init_tracing();
        init_metrics();

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let templates = dir.path().join("templates");
        std::fs::create_dir_all(&templates).expect("Failed to create template dir");
        std::fs::write(templates.join("index.html"), HOME_HTML).expect("write index.html");
        std::fs::write(templates.join("pets.html"), PETS_HTML).expect("write pets.html");
        std::fs::write(templates.join("about.html"), ABOUT_HTML).expect("write about.html");

        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(static_dir.join("images")).expect("Failed to create static dir");
        std::fs::write(static_dir.join("style.css"), "body { margin: 0; }")
            .expect("write style.css");

        let config = PetverseConfig {
            common: CommonConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            environment: Environment::Dev,
            service_name: "petverse-service-test".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: None,
            database: DatabaseConfig {
                url: format!("sqlite://{}", dir.path().join("pets.db").display()),
                max_connections: 4,
            },
            groq: GroqConfig {
                api_key: Secret::new("test-key".to_string()),
                api_base_url: "http://127.0.0.1:1".to_string(),
                model: TEST_MODEL.to_string(),
                timeout_secs: 1,
            },
            web: WebConfig {
                template_dir: templates.display().to_string(),
                static_dir: static_dir.display().to_string(),
                allowed_origins: vec!["*".to_string()],
            },
        };

        let provider = Arc::new(MockChatProvider::new(behavior));
        let state = AppState::new(config, provider.clone())
            .await
            .expect("Failed to build app state");

        Self {
            router: build_router(state.clone()),
            state,
            provider,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request"),
        )
        .await
    }

    /// `POST /api/adopt` and return the status with the decoded body.
    pub async fn adopt(&self, user_name: &str, pet_id: i64) -> (StatusCode, serde_json::Value) {
        let response = self
            .post_json(
                "/api/adopt",
                serde_json::json!({ "user_name": user_name, "pet_id": pet_id }),
            )
            .await;
        let status = response.status();
        (status, json_body(response).await)
    }

    pub async fn available_pets(&self) -> Vec<serde_json::Value> {
        let response = self.get("/api/pets").await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response)
            .await
            .as_array()
            .cloned()
            .expect("pets response should be an array")
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn json_body(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Failed to parse JSON body")
}

pub async fn text_body(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("Body is not UTF-8")
}
