//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener, stop on the shutdown signal
//! - Dispatch requests through the route table
//! - Record per-request metrics

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, State},
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ReflectorConfig, SimulationConfig};
use crate::http::handlers;
use crate::http::request::{request_id_middleware, RequestId};
use crate::observability::metrics;
use crate::reflect::Inbound;
use crate::routing::RouteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub simulation: SimulationConfig,
}

/// HTTP server for the reflector.
pub struct HttpServer {
    router: Router,
    config: ReflectorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ReflectorConfig) -> Self {
        let state = AppState {
            routes: Arc::new(RouteTable::standard()),
            simulation: config.simulation.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ReflectorConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// The configured router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ReflectorConfig {
        &self.config
    }
}

/// Single entry point: route, run the endpoint, record the outcome.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (mut parts, _body) = request.into_parts();

    let peer = ConnectInfo::<SocketAddr>::from_request_parts(&mut parts, &state)
        .await
        .ok()
        .map(|ConnectInfo(addr)| addr);
    let request_id = parts
        .extensions
        .get::<RequestId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();
    let inbound = Inbound::from_parts(&parts, peer);

    tracing::debug!(
        request_id = %request_id,
        method = %inbound.method,
        path = %inbound.path(),
        "Dispatching request"
    );

    let (label, result) = match state.routes.match_request(&inbound.method, inbound.path()) {
        Ok(matched) => {
            let label = matched.route.endpoint.label();
            (label, handlers::respond(&state, matched, &inbound).await)
        }
        Err(e) => ("none", Err(e)),
    };

    let response = result.unwrap_or_else(IntoResponse::into_response);
    let status = response.status();
    metrics::record_request(label, &inbound.method, status.as_u16(), start);

    tracing::debug!(
        request_id = %request_id,
        endpoint = label,
        status = status.as_u16(),
        "Request handled"
    );
    response
}
