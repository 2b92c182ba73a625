//! Service settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `HISTORIAN_*` environment variables and the
//! optional configuration file, in that order of precedence. The bind port
//! and request timeout carry loader defaults; the remaining fields are
//! optional and their accessors supply defaults and validate what was given.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::facets::{DEFAULT_CENTER, GeoPoint};
use crate::domain::grouping::{DEFAULT_MARKER_PRECISION, MarkerGrouper, PrecisionOutOfRange};
use crate::domain::images::{DEFAULT_FILE_PROXY_BASE, ImagePrecedence, ImageResolver, UnknownPrecedence};
use crate::domain::map::{DEFAULT_MAP_ZOOM, DEFAULT_TILE_URL};
use crate::domain::{MapConfig, PointPipeline};

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
const MAX_MAP_ZOOM: u8 = 22;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid backend URL `{url}`: {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Precedence(#[from] UnknownPrecedence),
    #[error(transparent)]
    Precision(#[from] PrecisionOutOfRange),
    #[error("default centre ({lat}, {lon}) is not a valid coordinate")]
    InvalidCenter { lat: f64, lon: f64 },
    #[error("map zoom {0} exceeds the maximum of {MAX_MAP_ZOOM}")]
    InvalidZoom(u8),
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration for the historian BFF.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HISTORIAN")]
pub struct HistorianSettings {
    /// Base URL of the remote REST backend. Unset means every proxy call
    /// answers `503 API URL not configured`.
    pub api_url: Option<String>,
    /// Service token sent as `Bearer` on point, type and upload calls.
    pub api_token: Option<String>,
    pub bind_host: Option<String>,
    #[ortho_config(default = 8080)]
    pub bind_port: u16,
    /// Prefix that relative image paths are rewritten under.
    ///
    /// Only the URLs change. This service always serves stored files at
    /// `/api/files`, so any other prefix must be served by something in
    /// front of it, such as a CDN or reverse proxy.
    pub file_proxy_base: Option<String>,
    /// Decimal places used to group map markers.
    pub marker_precision: Option<u8>,
    /// `photo_urls` or `photo_ids`.
    pub image_precedence: Option<String>,
    /// Upstream request timeout in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
    pub max_upload_bytes: Option<usize>,
    pub default_center_lat: Option<f64>,
    pub default_center_lon: Option<f64>,
    pub map_zoom: Option<u8>,
    pub tile_url: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl HistorianSettings {
    /// Parsed backend URL, or `None` when unset or blank.
    pub fn api_url(&self) -> Result<Option<Url>, SettingsError> {
        non_blank(self.api_url.as_deref())
            .map(|raw| {
                Url::parse(raw).map_err(|source| SettingsError::InvalidApiUrl {
                    url: raw.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn api_token(&self) -> Option<&str> {
        non_blank(self.api_token.as_deref())
    }

    /// Socket address to bind, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> (String, u16) {
        let host = non_blank(self.bind_host.as_deref()).unwrap_or(DEFAULT_BIND_HOST);
        (host.to_owned(), self.bind_port)
    }

    pub fn file_proxy_base(&self) -> &str {
        non_blank(self.file_proxy_base.as_deref()).unwrap_or(DEFAULT_FILE_PROXY_BASE)
    }

    pub fn image_precedence(&self) -> Result<ImagePrecedence, SettingsError> {
        match non_blank(self.image_precedence.as_deref()) {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(ImagePrecedence::default()),
        }
    }

    pub fn marker_grouper(&self) -> Result<MarkerGrouper, SettingsError> {
        Ok(MarkerGrouper::new(
            self.marker_precision.unwrap_or(DEFAULT_MARKER_PRECISION),
        )?)
    }

    /// Upstream request timeout; zero is rejected.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_secs {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Map centre used when there are no points to average.
    pub fn default_center(&self) -> Result<GeoPoint, SettingsError> {
        let lat = self.default_center_lat.unwrap_or(DEFAULT_CENTER.lat);
        let lon = self.default_center_lon.unwrap_or(DEFAULT_CENTER.lon);
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if valid {
            Ok(GeoPoint { lat, lon })
        } else {
            Err(SettingsError::InvalidCenter { lat, lon })
        }
    }

    /// Point pipeline configured from these settings.
    pub fn pipeline(&self) -> Result<PointPipeline, SettingsError> {
        Ok(PointPipeline::new(
            ImageResolver::new(self.file_proxy_base(), self.image_precedence()?),
            self.marker_grouper()?,
            self.default_center()?,
        ))
    }
}

impl MapConfig {
    /// Build the map configuration served at `/api/map/config`.
    pub fn from_settings(settings: &HistorianSettings) -> Result<Self, SettingsError> {
        let zoom = settings.map_zoom.unwrap_or(DEFAULT_MAP_ZOOM);
        if zoom > MAX_MAP_ZOOM {
            return Err(SettingsError::InvalidZoom(zoom));
        }
        Ok(Self {
            default_center: settings.default_center()?,
            zoom,
            tile_url: non_blank(settings.tile_url.as_deref())
                .unwrap_or(DEFAULT_TILE_URL)
                .to_owned(),
            ..Self::default()
        })
    }
}
