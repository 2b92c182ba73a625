//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on driving ports and stay testable without a backend.

use std::sync::Arc;

use crate::domain::MapConfig;
use crate::domain::ports::{AccountService, FilesProxy, PointsCommand, PointsQuery};

/// Parameter object bundling the driving ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub points: Arc<dyn PointsQuery>,
    pub point_commands: Arc<dyn PointsCommand>,
    pub accounts: Arc<dyn AccountService>,
    pub files: Arc<dyn FilesProxy>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub points: Arc<dyn PointsQuery>,
    pub point_commands: Arc<dyn PointsCommand>,
    pub accounts: Arc<dyn AccountService>,
    pub files: Arc<dyn FilesProxy>,
    pub map: Arc<MapConfig>,
}

impl HttpState {
    /// Construct state from the ports bundle and the start-up map settings.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use historian::domain::ports::{FixtureAuthGateway, FixturePointsRepository};
    /// use historian::domain::{AuthService, FilesService, MapConfig, PointPipeline, PointsService};
    /// use historian::inbound::http::state::{HttpState, HttpStatePorts};
    /// use historian::outbound::backend_api::UnconfiguredBackend;
    ///
    /// let points = Arc::new(PointsService::new(
    ///     Arc::new(FixturePointsRepository::default()),
    ///     PointPipeline::default(),
    /// ));
    /// let ports = HttpStatePorts {
    ///     points: points.clone(),
    ///     point_commands: points,
    ///     accounts: Arc::new(AuthService::new(Arc::new(FixtureAuthGateway))),
    ///     files: Arc::new(FilesService::new(Arc::new(UnconfiguredBackend), 1024)),
    /// };
    /// let state = HttpState::new(ports, MapConfig::default());
    /// assert_eq!(state.map.zoom, 15);
    /// ```
    pub fn new(ports: HttpStatePorts, map: MapConfig) -> Self {
        let HttpStatePorts {
            points,
            point_commands,
            accounts,
            files,
        } = ports;
        Self {
            points,
            point_commands,
            accounts,
            files,
            map: Arc::new(map),
        }
    }
}
