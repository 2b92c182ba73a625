//! Builders wiring the backend adapters into HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use historian::domain::ports::{AuthGateway, FileStore, PointsRepository};
use historian::domain::{AuthService, FilesService, MapConfig, PointPipeline, PointsService};
use historian::inbound::http::state::{HttpState, HttpStatePorts};
use historian::outbound::backend_api::{BackendApi, UnconfiguredBackend};

use super::ServerConfig;

/// Bind every driving port to services over one backend adapter.
fn ports_over<B>(backend: Arc<B>, pipeline: PointPipeline, max_upload_bytes: usize) -> HttpStatePorts
where
    B: PointsRepository + AuthGateway + FileStore + 'static,
{
    let points = Arc::new(PointsService::new(backend.clone(), pipeline));
    HttpStatePorts {
        points: points.clone(),
        point_commands: points,
        accounts: Arc::new(AuthService::new(backend.clone())),
        files: Arc::new(FilesService::new(backend, max_upload_bytes)),
    }
}

/// Build handler state from configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let pipeline = config.pipeline.clone();
    let ports = match &config.backend {
        Some(target) => {
            let api = BackendApi::new(target.base.clone(), target.token.clone(), target.timeout)
                .map_err(|err| std::io::Error::other(format!("backend client setup failed: {err}")))?;
            info!(
                backend = %target.base,
                service_token = target.token.is_some(),
                timeout_secs = target.timeout.as_secs(),
                "proxying to remote backend"
            );
            ports_over(Arc::new(api), pipeline, config.max_upload_bytes)
        }
        None => {
            warn!("no backend URL configured; proxy routes will answer 503");
            ports_over(Arc::new(UnconfiguredBackend), pipeline, config.max_upload_bytes)
        }
    };
    Ok(web::Data::new(HttpState::new(ports, MapConfig::clone(&config.map))))
}
