use std::sync::Once;

use tracing::info;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Khoi tao tracing subscriber mot lan cho ca process; binary va test deu
/// goi qua day nen goi lap lai la an toan.
pub fn init(service_name: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .init();
    });

    info!(service = service_name, "telemetry initialized");
}
