//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (CORS, tracing, request ID, timeout)
//! - Bind server to listener
//! - Dispatch requests to the route table
//! - Forward matched requests upstream, serve static files otherwise

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ProxyConfig, StaticFilesConfig};
use crate::http::middleware::cors_middleware;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::http::static_files;
use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::routing::Router as ProxyRouter;
use crate::upstream::{Forwarder, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub forwarder: Arc<Forwarder>,
    pub static_files: StaticFilesConfig,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let proxy_router = Arc::new(ProxyRouter::from_config(config.routes.clone()));
        let forwarder = Arc::new(Forwarder::new(&config.timeouts)?);

        let state = AppState {
            router: proxy_router,
            forwarder,
            static_files: config.static_files.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            // Outermost so even timeout and error responses carry the headers.
            .layer(middleware::from_fn(cors_middleware))
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
/// Looks up the route and forwards the request; unmatched paths fall through
/// to the static file surface.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_owned);
    let method = request.method().clone();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    match state.router.match_path(&path) {
        Some(matched) => {
            let forwarded = state
                .forwarder
                .forward(matched.route, method.clone(), matched.rest, query.as_deref())
                .await;

            metrics::record_request(
                method.as_str(),
                forwarded.status.as_u16(),
                &matched.route.name,
                start_time,
            );

            let mut response = (forwarded.status, Json(forwarded.body)).into_response();
            // The cache hint rides on every proxied response; preflights never
            // reach this handler.
            if let Ok(value) = HeaderValue::from_str(&matched.route.cache.header_value()) {
                response.headers_mut().insert(header::CACHE_CONTROL, value);
            }
            response
        }
        None if state.static_files.enabled => {
            let response = static_files::serve(&state.static_files.root, &path).await;
            metrics::record_request(method.as_str(), response.status().as_u16(), "static", start_time);
            response
        }
        None => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_request(method.as_str(), 404, "none", start_time);
            (StatusCode::NOT_FOUND, "No matching route").into_response()
        }
    }
}
