use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

use common::telemetry;
use gateway::{BoxError, GatewayConfig, GatewaySettings};

#[derive(Debug, Parser)]
#[command(author, version, about = "HTTP gateway for the secret santa service")]
struct GatewayCli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,

    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,
}

impl GatewayCli {
    fn resolve_config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            return Some(path.clone());
        }
        std::env::var("GATEWAY_CONFIG_PATH").ok().map(PathBuf::from)
    }

    fn apply_overrides(&self, settings: &mut GatewaySettings) {
        if let Some(addr) = self.bind {
            settings.bind_addr = addr;
        }
    }
}

fn build_config(cli: &GatewayCli) -> Result<GatewayConfig, BoxError> {
    let mut settings = if let Some(path) = cli.resolve_config_path() {
        GatewaySettings::from_file(&path)?
    } else {
        GatewaySettings::from_env()?
    };

    cli.apply_overrides(&mut settings);

    Ok(GatewayConfig::from_settings(settings))
}

#[tokio::main]
async fn main() {
    telemetry::init("gateway");

    let cli = GatewayCli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "gateway: cau hinh khong hop le");
            return;
        }
    };

    if let Err(err) = gateway::run_with_ctrl_c(config).await {
        tracing::error!(%err, "gateway ket thuc do loi");
    }
}
