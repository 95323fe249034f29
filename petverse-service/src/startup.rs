//! Application startup and lifecycle management.

use crate::config::PetverseConfig;
use crate::handlers;
use crate::middleware::metrics_middleware;
use crate::services::providers::groq::GroqProvider;
use crate::services::providers::ChatProvider;
use crate::services::{
    init_metrics, AdoptionService, CatalogService, ChatService, Database, LostFoundService,
    PageResolver,
};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: PetverseConfig,
    pub db: Database,
    pub catalog: CatalogService,
    pub adoptions: AdoptionService,
    pub lost_found: LostFoundService,
    pub chat: ChatService,
    pub pages: PageResolver,
}

impl AppState {
    /// Open and prepare the store, then wire the services around it.
    pub async fn new(
        config: PetverseConfig,
        provider: Arc<dyn ChatProvider>,
    ) -> Result<Self, AppError> {
        let db = Database::new(&config.database.url, config.database.max_connections)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to open database");
                e
            })?;

        db.run_migrations().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            e
        })?;

        if db.seed_sample_pets().await? {
            tracing::info!("Seeded empty catalog with sample pets");
        }

        Ok(Self {
            catalog: CatalogService::new(db.clone()),
            adoptions: AdoptionService::new(db.clone()),
            lost_found: LostFoundService::new(db.clone()),
            chat: ChatService::new(provider, config.groq.model.clone()),
            pages: PageResolver::new(&config.web.template_dir),
            db,
            config,
        })
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the HTTP router: JSON API, HTML pages, static assets, probes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/pets", get(handlers::pets::list_pets))
        .route("/api/adopt", post(handlers::pets::adopt))
        .route("/api/adoptions", get(handlers::pets::list_adoptions))
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/reset", post(handlers::pets::reset))
        .route(
            "/api/lost-found",
            get(handlers::lost_found::list_reports).post(handlers::lost_found::create_report),
        );

    let page_routes = Router::new()
        .route("/", get(handlers::pages::fixed_page))
        .route("/login", get(handlers::pages::fixed_page))
        .route("/pets", get(handlers::pages::fixed_page))
        .route("/volunteer", get(handlers::pages::fixed_page))
        .route("/donate", get(handlers::pages::fixed_page))
        .route("/community", get(handlers::pages::fixed_page))
        .route("/lost-found", get(handlers::pages::fixed_page))
        .route("/myadoptions", get(handlers::pages::fixed_page))
        .route("/:page", get(handlers::pages::any_page));

    let cors = cors_layer(&state.config.web.allowed_origins);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::health::metrics_handler))
        .merge(api_routes)
        .merge(page_routes)
        .nest_service("/static", ServeDir::new(&state.config.web.static_dir))
        .route_layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Groq chat provider.
    pub async fn build(config: PetverseConfig) -> Result<Self, AppError> {
        let provider = GroqProvider::new(config.groq.clone())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            model = %config.groq.model,
            api_key_loaded = !config.groq.api_key.expose_secret().is_empty(),
            "Initialized Groq chat provider"
        );
        if !provider.is_configured() {
            tracing::warn!("GROQ_API_KEY not set; chat requests will fail");
        }

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an arbitrary chat provider.
    pub async fn build_with_provider(
        config: PetverseConfig,
        provider: Arc<dyn ChatProvider>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let address = config.common.bind_address();
        let state = AppState::new(config, provider).await?;

        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(address = %address, error = %e, "Failed to bind HTTP listener");
            e
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "HTTP listener bound");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Serve until the listener fails.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
