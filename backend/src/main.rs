//! Backend entry-point: loads settings, wires the backend adapters and
//! serves the `/api` surface.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use historian::inbound::http::health::HealthState;
use historian::settings::HistorianSettings;
use server::{BackendTarget, ServerConfig, create_server};

fn server_config(settings: &HistorianSettings) -> Result<ServerConfig> {
    let backend = settings
        .api_url()?
        .map(|url| -> Result<BackendTarget> {
            Ok(BackendTarget::new(
                url,
                settings.api_token().map(str::to_owned),
                settings.request_timeout()?,
            ))
        })
        .transpose()?;
    Ok(
        ServerConfig::new(settings.bind_addr(), settings.max_upload_bytes())
            .with_backend(backend)
            .with_pipeline(settings.pipeline()?)
            .with_map(historian::domain::MapConfig::from_settings(settings)?),
    )
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        HistorianSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = server_config(&settings).wrap_err("invalid settings")?;
    let (host, port) = config.bind_addr.clone();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to start server on {host}:{port}"))?;
    info!(%host, port, "historian listening");

    server.await.wrap_err("server terminated abnormally")
}
