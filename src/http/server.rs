//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the operational handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve on the listener bound during assembly
//! - Stop gracefully on the root shutdown or when resources are released

use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HttpSettings;
use crate::http::docs::{self, ApiInfo, DOCS_PATH, OPENAPI_PATH};
use crate::http::request;
use crate::lifecycle::Shutdown;
use crate::wire::{Application, RunError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiInfo>,
    pub started_at: Instant,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            api: Arc::new(ApiInfo::default()),
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
    /// Cancelled by the assembly release.
    resources: CancellationToken,
}

impl HttpServer {
    /// Create a server that will serve on an already bound listener.
    pub fn new(settings: &HttpSettings, listener: TcpListener, resources: CancellationToken) -> Self {
        let router = Self::build_router(settings, AppState::default());
        Self {
            router,
            listener,
            resources,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(settings: &HttpSettings, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route(DOCS_PATH, get(docs::index))
            .route(OPENAPI_PATH, get(docs::openapi))
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(request::set_request_id())
                    .layer(TraceLayer::new_for_http().make_span_with(request::make_span))
                    .layer(request::propagate_request_id())
                    .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        settings.request_timeout_secs,
                    ))),
            )
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

#[async_trait]
impl Application for HttpServer {
    async fn run(self, shutdown: Shutdown) -> Result<(), RunError> {
        let addr = self.listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server listening");

        let root = shutdown.subscribe();
        let resources = self.resources;
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = root.cancelled() => {}
                    _ = resources.cancelled() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
