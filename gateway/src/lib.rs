// Thu vien cho gateway: cung cap router dung trong test/integration.
// Binary entrypoint van o src/main.rs.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use axum::{http::header, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use tokio::sync::oneshot;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use common::{metrics::room_metrics, shutdown};
use room_service::RoomService;

pub mod api;
pub mod types;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const HEALTHZ_PATH: &str = "/healthz";
pub const VERSION_PATH: &str = "/version";
pub const METRICS_PATH: &str = "/metrics";
pub const API_PREFIX: &str = "/api/secret-santa";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gateway_http_requests_total",
        "Tong so HTTP request theo route",
        &["path"]
    )
    .expect("register gateway_http_requests_total")
});

pub(crate) fn count_request(path: &str) {
    HTTP_REQUESTS_TOTAL.with_label_values(&[path]).inc();
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct GatewaySettings {
    pub bind_addr: SocketAddr,
}

impl GatewaySettings {
    pub fn from_env() -> Result<Self, BoxError> {
        let bind_addr: SocketAddr = std::env::var("GATEWAY_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(Self { bind_addr })
    }

    pub fn from_file(path: &Path) -> Result<Self, BoxError> {
        let raw = fs::read_to_string(path).map_err(|err| Box::new(err) as BoxError)?;
        let settings = serde_json::from_str(&raw).map_err(|err| Box::new(err) as BoxError)?;
        Ok(settings)
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("default gateway bind addr"),
        }
    }
}

#[derive(Debug)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub ready_tx: Option<oneshot::Sender<SocketAddr>>,
}

impl GatewayConfig {
    pub fn from_settings(settings: GatewaySettings) -> Self {
        Self {
            bind_addr: settings.bind_addr,
            ready_tx: None,
        }
    }

    pub fn from_env() -> Result<Self, BoxError> {
        GatewaySettings::from_env().map(Self::from_settings)
    }
}

pub fn build_router(service: RoomService) -> Router {
    Router::new()
        .route(HEALTHZ_PATH, get(healthz))
        .route(VERSION_PATH, get(version))
        .route(METRICS_PATH, get(metrics))
        .nest(API_PREFIX, api::router(service))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> impl IntoResponse {
    count_request(HEALTHZ_PATH);
    StatusCode::OK
}

async fn version() -> impl IntoResponse {
    count_request(VERSION_PATH);
    let body = serde_json::json!({
        "name": "gateway",
        "version": env!("CARGO_PKG_VERSION"),
    });
    Json(body)
}

async fn metrics() -> impl IntoResponse {
    count_request(METRICS_PATH);
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(%err, "metrics encode failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "metrics encode failed").into_response();
    }
    let body = String::from_utf8(buffer).unwrap_or_default();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type())],
        body,
    )
        .into_response()
}

pub async fn run(
    config: GatewayConfig,
    shutdown_rx: shutdown::ShutdownReceiver,
) -> Result<(), BoxError> {
    room_metrics().on_startup();

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|err| Box::new(err) as BoxError)?;
    let local_addr = listener
        .local_addr()
        .map_err(|err| Box::new(err) as BoxError)?;

    if let Some(tx) = config.ready_tx {
        let _ = tx.send(local_addr);
    }

    info!(%local_addr, "gateway listening");

    let app = build_router(RoomService::new());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait(shutdown_rx))
        .await
        .map_err(|err| Box::new(err) as BoxError)
}

pub async fn run_with_ctrl_c(config: GatewayConfig) -> Result<(), BoxError> {
    let (shutdown_tx, shutdown_rx) = shutdown::channel();

    let ctrl_c = tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "gateway: khong the lang nghe ctrl_c");
        }
        shutdown::trigger(&shutdown_tx);
    });

    let result = run(config, shutdown_rx).await;

    ctrl_c.abort();
    result
}
