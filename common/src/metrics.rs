use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use once_cell::sync::OnceCell;
use prometheus::{register_int_counter, register_int_gauge, Encoder, IntCounter, IntGauge, TextEncoder};
use tokio::net::TcpListener;
use tracing::error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const METRICS_PATH: &str = "/metrics";

/// Metric set cho room-service.
pub struct RoomMetrics {
    pub rooms_created_total: IntCounter,
    pub active_rooms: IntGauge,
    pub shuffles_total: IntCounter,
    pub reveals_total: IntCounter,
}

impl RoomMetrics {
    pub fn on_startup(&self) {
        self.rooms_created_total.inc_by(0);
        self.active_rooms.set(0);
        self.shuffles_total.inc_by(0);
        self.reveals_total.inc_by(0);
    }

    pub fn inc_rooms_created(&self) {
        self.rooms_created_total.inc();
    }

    pub fn set_active_rooms(&self, rooms: i64) {
        self.active_rooms.set(rooms);
    }

    pub fn inc_shuffles(&self) {
        self.shuffles_total.inc();
    }

    pub fn inc_reveals(&self) {
        self.reveals_total.inc();
    }
}

static ROOM_METRICS: OnceCell<RoomMetrics> = OnceCell::new();

pub fn room_metrics() -> &'static RoomMetrics {
    ROOM_METRICS.get_or_init(|| RoomMetrics {
        rooms_created_total: register_int_counter!(
            "room_service_rooms_created_total",
            "Tong so phong duoc tao boi room-service"
        )
        .expect("register room_service_rooms_created_total"),
        active_rooms: register_int_gauge!("room_service_active_rooms", "So phong dang hoat dong")
            .expect("register room_service_active_rooms"),
        shuffles_total: register_int_counter!(
            "room_service_shuffles_total",
            "Tong so lan xao lai phan cong qua"
        )
        .expect("register room_service_shuffles_total"),
        reveals_total: register_int_counter!(
            "room_service_reveals_total",
            "Tong so lan tiet lo nguoi nhan qua"
        )
        .expect("register room_service_reveals_total"),
    })
}

pub fn metrics_router(metrics_path: &'static str) -> Router {
    Router::new().route(metrics_path, get(metrics_handler))
}

pub async fn serve_metrics(
    listener: TcpListener,
    metrics_path: &'static str,
) -> Result<(), BoxError> {
    let router = metrics_router(metrics_path);
    axum::serve(listener, router)
        .await
        .map_err(|err| Box::new(err) as BoxError)
}

async fn metrics_handler() -> Response {
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(%err, "metrics: encode that bai");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let body = match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => {
            error!(%err, "metrics: UTF-8 sai");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type())],
        body,
    )
        .into_response()
}
