//! Map endpoints: grouped markers and the tile configuration.
//!
//! ```text
//! GET /api/map/markers
//! GET /api/map/config
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::{Error, MapConfig};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::state::HttpState;

/// Marker groups for the map page, centred on the mean of all points.
#[utoipa::path(
    get,
    path = "/api/map/markers",
    responses(
        (status = 200, description = "Map centre and marker groups", body = serde_json::Value),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["map"],
    operation_id = "mapMarkers"
)]
#[get("/map/markers")]
pub async fn markers(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let layout = state.points.marker_layout().await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(layout))
}

/// Tile layer, default view and marker icons, fixed at start-up.
#[utoipa::path(
    get,
    path = "/api/map/config",
    responses((status = 200, description = "Map configuration", body = MapConfig)),
    tags = ["map"],
    operation_id = "mapConfig"
)]
#[get("/map/config")]
pub async fn config(state: web::Data<HttpState>) -> web::Json<MapConfig> {
    web::Json(MapConfig::clone(&state.map))
}
