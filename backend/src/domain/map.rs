//! Map presentation settings shared by the map and home pages.
//!
//! The configuration is built once at start-up and handed to the HTTP layer;
//! nothing here is mutated afterwards.

use serde::Serialize;
use utoipa::ToSchema;

use super::facets::{DEFAULT_CENTER, GeoPoint};

/// Initial zoom level of the full-page map.
pub const DEFAULT_MAP_ZOOM: u8 = 15;
/// OpenStreetMap raster tiles.
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
/// Attribution required by the default tile server.
pub const DEFAULT_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// Marker icon assets served by the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            icon_url: "/leaflet/marker-icon.png".to_owned(),
            icon_retina_url: "/leaflet/marker-icon-2x.png".to_owned(),
            shadow_url: "/leaflet/marker-shadow.png".to_owned(),
        }
    }
}

/// Map rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// Centre used when no points are available.
    pub default_center: GeoPoint,
    pub zoom: u8,
    /// Tile URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub tile_url: String,
    pub attribution: String,
    pub marker_icon: MarkerIcon,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            zoom: DEFAULT_MAP_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_owned(),
            attribution: DEFAULT_ATTRIBUTION.to_owned(),
            marker_icon: MarkerIcon::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn serializes_in_camel_case() {
        let value = serde_json::to_value(MapConfig::default()).expect("serializes");
        assert_eq!(value["defaultCenter"], json!({ "lat": -30.885, "lon": -55.51 }));
        assert_eq!(value["zoom"], json!(15));
        assert_eq!(value["markerIcon"]["iconRetinaUrl"], json!("/leaflet/marker-icon-2x.png"));
    }
}
