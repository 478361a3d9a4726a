//! Application startup and lifecycle management.

use crate::config::{StoreBackend, StudioConfig};
use crate::handlers;
use crate::middleware::ADMIN_API_KEY_HEADER;
use crate::services::{InvoiceService, SiteService};
use crate::ApiDoc;
use axum::{
    http::{header, HeaderName, HeaderValue, Method, Request},
    middleware::from_fn,
    routing::{delete, get, post, put},
    Json, Router,
};
use ledger_store::{Ledger, LedgerStore, MemoryStore, PgStore};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StudioConfig>,
    pub ledger: Ledger,
    pub invoices: Arc<InvoiceService>,
    pub site: SiteService,
}

impl AppState {
    pub fn new(config: StudioConfig, store: Arc<dyn LedgerStore>) -> Self {
        let ledger = Ledger::new(store);
        let invoices = InvoiceService::new(ledger.clone(), config.invoicing.clone());
        let site = SiteService::new(ledger.clone());

        Self {
            config: Arc::new(config),
            ledger,
            invoices: Arc::new(invoices),
            site,
        }
    }
}

/// Open the configured ledger backend.
pub async fn connect_store(config: &StudioConfig) -> Result<Arc<dyn LedgerStore>, AppError> {
    match (config.store, &config.database) {
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory ledger store - data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        (StoreBackend::Postgres, Some(db)) => {
            let store = PgStore::connect(
                db.url.expose_secret(),
                db.max_connections,
                db.min_connections,
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.into()))?;
            store
                .run_migrations()
                .await
                .map_err(|e| AppError::DatabaseError(e.into()))?;
            Ok(Arc::new(store))
        }
        (StoreBackend::Postgres, None) => Err(AppError::ConfigError(anyhow::anyhow!(
            "DATABASE_URL is required when STORE_BACKEND=postgres"
        ))),
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/portfolio",
            get(handlers::portfolio::list_projects).post(handlers::portfolio::create_project),
        )
        .route(
            "/api/portfolio/:id",
            put(handlers::portfolio::update_project).delete(handlers::portfolio::delete_project),
        )
        .route(
            "/api/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route("/api/invoices/:number", get(handlers::invoices::get_invoice))
        .route(
            "/api/testimonials",
            get(handlers::testimonials::list_testimonials)
                .post(handlers::testimonials::create_testimonial),
        )
        .route(
            "/api/testimonials/:id",
            delete(handlers::testimonials::delete_testimonial),
        )
        .route(
            "/api/content",
            get(handlers::content::get_content).put(handlers::content::update_content),
        )
        .route("/api/contact", post(handlers::contact::submit_contact))
        .route("/api/analytics/track", post(handlers::analytics::track_event))
        .route(
            "/api/analytics/stats",
            get(handlers::analytics::dashboard_stats),
        );

    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/.well-known/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(api)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::error!("Invalid CORS origin '{}': {}", o, e))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-admin-api-key"),
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(Duration::from_secs(600))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the configured ledger backend.
    pub async fn build(config: StudioConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        Self::build_with_store(config, store).await
    }

    /// Build the application over an existing store.
    pub async fn build_with_store(
        config: StudioConfig,
        store: Arc<dyn LedgerStore>,
    ) -> Result<Self, AppError> {
        let address = config.common.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port = port,
            admin_header = ADMIN_API_KEY_HEADER,
            invoice_prefix = %config.invoicing.prefix,
            sequence_scope = config.invoicing.scope.as_str(),
            numbering = config.invoicing.strategy.as_str(),
            "Studio service listening"
        );

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, store),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Run until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);
        axum::serve(
            self.listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
    }
}
