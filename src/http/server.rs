//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Create the Axum router: landing route, optional asset proxy route,
//!   catch-all dispatch route
//! - Wire up middleware (tracing, timeout, request ID)
//! - Map dispatch outcomes to HTTP responses
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - `/` renders the landing view and bypasses the matcher entirely
//! - The asset proxy route exists only in development mode
//! - Every request produces exactly one response; outcome mapping lives
//!   here and nowhere else

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Router,
};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{GatewayConfig, LandingConfig};
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::http::proxy::AssetProxy;
use crate::http::request::{request_id, RequestIdLayer};
use crate::http::views::ViewEngine;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub views: Arc<dyn ViewEngine>,
    pub proxy: Option<Arc<AssetProxy>>,
    pub landing: LandingConfig,
}

/// HTTP server for the SSR gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server from validated configuration and the
    /// injected dispatch collaborators.
    pub fn new(
        config: GatewayConfig,
        dispatcher: Arc<Dispatcher>,
        views: Arc<dyn ViewEngine>,
    ) -> Self {
        let proxy = if config.mode.is_development() {
            match AssetProxy::new(&config.assets.upstream) {
                Ok(proxy) => {
                    tracing::info!(upstream = %config.assets.upstream, "asset proxy enabled");
                    Some(Arc::new(proxy))
                }
                Err(e) => {
                    tracing::error!(error = %e, "asset proxy disabled");
                    None
                }
            }
        } else {
            None
        };

        let state = AppState {
            dispatcher,
            views,
            proxy,
            landing: config.landing.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new().route("/", get(landing_handler));

        if state.proxy.is_some() {
            let asset_route = format!("{}/{{*asset}}", config.assets.prefix);
            router = router.route(&asset_route, any(asset_handler));
        }

        router
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, mode = ?self.config.mode, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Landing page handler: static view, never touches the matcher.
async fn landing_handler(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let mut vars = Map::new();
    vars.insert(
        "layout".to_string(),
        Value::String(state.landing.layout.clone()),
    );
    vars.insert(
        "title".to_string(),
        Value::String(state.landing.title.clone()),
    );

    match state.views.render_view("landing", &vars) {
        Ok(body) => {
            metrics::record_request("landing", 200, start);
            Html(body).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "landing view failed");
            metrics::record_request("landing", 500, start);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Development asset proxy handler.
async fn asset_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    match &state.proxy {
        Some(proxy) => proxy.forward(req).await,
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Catch-all handler: runs the SSR dispatch state machine.
async fn dispatch_handler(State(app): State<AppState>, req: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(&req).to_string();
    let uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    tracing::debug!(request_id = %request_id, uri = %uri, "dispatching");

    match app.dispatcher.dispatch(&uri) {
        DispatchOutcome::Rendered { markup, state } => {
            let mut vars = Map::new();
            vars.insert("preloadedState".to_string(), Value::String(state));
            vars.insert("reactHTML".to_string(), Value::String(markup));

            match app.views.render_view("index", &vars) {
                Ok(body) => {
                    tracing::info!(request_id = %request_id, uri = %uri, "rendered");
                    metrics::record_request("rendered", 200, start);
                    Html(body).into_response()
                }
                Err(e) => {
                    tracing::error!(request_id = %request_id, error = %e, "index view failed");
                    metrics::record_request("view_error", 500, start);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
                }
            }
        }
        DispatchOutcome::Redirect { location } => {
            tracing::info!(request_id = %request_id, uri = %uri, location = %location, "redirect");
            metrics::record_request("redirect", 302, start);
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    let mut response = StatusCode::FOUND.into_response();
                    response.headers_mut().insert(header::LOCATION, value);
                    response
                }
                Err(_) => {
                    tracing::error!(request_id = %request_id, location = %location, "redirect target not a valid header value");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
                }
            }
        }
        DispatchOutcome::NotFound => {
            tracing::info!(request_id = %request_id, uri = %uri, "not found");
            metrics::record_request("not_found", 404, start);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
        DispatchOutcome::Failed { message } => {
            tracing::warn!(request_id = %request_id, uri = %uri, "dispatch failed");
            metrics::record_request("failed", 500, start);
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
