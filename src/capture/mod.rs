// Capture server - records HTTP exchanges and serves them to the inspector
//
// Requests to any path other than /data pass through the recording
// middleware to a small echo handler, so pointing a client at the server is
// enough to populate it. GET /data returns everything recorded so far.

pub mod format;
pub mod recorder;

use crate::config::{CaptureConfig, Config, ExchangeLogFormat};
use crate::model::Exchange;
use anyhow::{Context, Result};
use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, HeaderMap, Response, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{any, get},
    Router,
};
use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::net::TcpListener;

/// Path the inspector fetches exchanges from
pub const DATA_PATH: &str = "/data";

/// Shared, append-only collection of recorded exchanges
#[derive(Debug, Clone, Default)]
pub struct CaptureStore {
    exchanges: Arc<RwLock<Vec<Exchange>>>,
}

impl CaptureStore {
    /// Store pre-filled with `exchanges` (demo data or a saved capture)
    pub fn seeded(exchanges: Vec<Exchange>) -> Self {
        Self {
            exchanges: Arc::new(RwLock::new(exchanges)),
        }
    }

    pub fn record(&self, exchange: Exchange) {
        self.write().push(exchange);
    }

    /// Copy of everything recorded so far, oldest first
    pub fn snapshot(&self) -> Vec<Exchange> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panicked writer leaves a fully pushed or untouched Vec
    fn read(&self) -> RwLockReadGuard<'_, Vec<Exchange>> {
        self.exchanges.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Exchange>> {
        self.exchanges.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Shared state for the capture server's handlers and middleware
#[derive(Debug, Clone)]
pub struct CaptureState {
    pub store: CaptureStore,
    pub max_body_bytes: usize,
    pub log_exchanges: bool,
    pub log_format: ExchangeLogFormat,
}

impl CaptureState {
    pub fn new(store: CaptureStore, config: &CaptureConfig) -> Self {
        Self {
            store,
            max_body_bytes: config.max_body_bytes,
            log_exchanges: config.log_exchanges,
            log_format: config.log_format,
        }
    }
}

/// Errors surfaced to capture server clients
#[derive(Debug)]
pub(crate) enum CaptureError {
    BodyRead(String),
    ResponseRead(String),
    InvalidStatus(u16),
    Serialize(String),
}

impl IntoResponse for CaptureError {
    fn into_response(self) -> Response<Body> {
        let (status, message) = match self {
            CaptureError::BodyRead(msg) => (StatusCode::BAD_REQUEST, msg),
            CaptureError::ResponseRead(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            CaptureError::InvalidStatus(code) => (
                StatusCode::BAD_REQUEST,
                format!("{} is not a valid status code", code),
            ),
            CaptureError::Serialize(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        tracing::error!("Capture error: {} - {}", status, message);

        Response::builder()
            .status(status)
            .body(Body::from(message))
            .unwrap_or_else(|_| Response::new(Body::from("Internal error building error response")))
    }
}

/// Build the capture server's router
///
/// Only the echo routes are recorded; reading `/data` never adds to it.
pub fn router(state: CaptureState) -> Router {
    Router::new()
        .route("/status/:code", any(status_handler))
        .route("/", any(echo_handler))
        .route("/*path", any(echo_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            recorder::record,
        ))
        .route(DATA_PATH, get(data_handler))
        .with_state(state)
}

/// Bind `config.bind_addr` and serve until `shutdown` resolves
pub async fn serve(
    config: &Config,
    store: CaptureStore,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;

    if config.capture.banner {
        println!("vex is recording on http://{}", addr);
        println!(
            "Send requests there, then run `vex --url http://{}{}` to inspect them",
            addr, DATA_PATH
        );
    }

    serve_listener(listener, CaptureState::new(store, &config.capture), shutdown).await
}

/// Serve on an already bound listener
pub async fn serve_listener(
    listener: TcpListener,
    state: CaptureState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    tracing::info!(
        "Capture server listening on {} ({} exchange(s) preloaded)",
        addr,
        state.store.len()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    tracing::info!("Capture server shut down gracefully");
    Ok(())
}

/// GET /data - every recorded exchange as a JSON array
async fn data_handler(State(state): State<CaptureState>) -> Result<Response<Body>, CaptureError> {
    let exchanges = state.store.snapshot();
    let body = serde_json::to_vec(&exchanges).map_err(|e| CaptureError::Serialize(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Echo the request body back with the same content type
async fn echo_handler(headers: HeaderMap, body: Bytes) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type.clone());
    }
    response
}

/// Respond with the status named in the path
async fn status_handler(Path(code): Path<u16>) -> Result<Response<Body>, CaptureError> {
    let status = StatusCode::from_u16(code).map_err(|_| CaptureError::InvalidStatus(code))?;
    let reason = status.canonical_reason().unwrap_or("Unknown");

    Ok((
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("{} {}", status.as_u16(), reason),
    )
        .into_response())
}
