//! HTTP server configuration object and helpers.

use std::time::Duration;

use url::Url;

use historian::domain::{MapConfig, PointPipeline};

/// Connection details for the remote REST backend.
#[derive(Debug, Clone)]
pub struct BackendTarget {
    pub(crate) base: Url,
    pub(crate) token: Option<String>,
    pub(crate) timeout: Duration,
}

impl BackendTarget {
    #[must_use]
    pub fn new(base: Url, token: Option<String>, timeout: Duration) -> Self {
        Self {
            base,
            token,
            timeout,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) backend: Option<BackendTarget>,
    pub(crate) pipeline: PointPipeline,
    pub(crate) map: MapConfig,
    pub(crate) max_upload_bytes: usize,
}

impl ServerConfig {
    /// Unconfigured backend, default pipeline and map settings.
    #[must_use]
    pub fn new(bind_addr: (String, u16), max_upload_bytes: usize) -> Self {
        Self {
            bind_addr,
            backend: None,
            pipeline: PointPipeline::default(),
            map: MapConfig::default(),
            max_upload_bytes,
        }
    }

    /// Proxy calls to `backend`; without one every call answers 503.
    #[must_use]
    pub fn with_backend(mut self, backend: Option<BackendTarget>) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn with_pipeline(mut self, pipeline: PointPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    #[must_use]
    pub fn with_map(mut self, map: MapConfig) -> Self {
        self.map = map;
        self
    }
}
