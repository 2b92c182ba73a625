//! Shared fixtures for integration tests.

use std::sync::Arc;

use actix_web::web;
use serde_json::{Value, json};

use historian::domain::points::{Category, RawPoint};
use historian::domain::ports::{AuthGateway, FileStore, PointsRepository};
use historian::domain::{AuthService, FilesService, MapConfig, PointPipeline, PointsService};
use historian::inbound::http::state::{HttpState, HttpStatePorts};

/// Decode raw backend records.
pub fn raw_points(values: Vec<Value>) -> Vec<RawPoint> {
    values
        .into_iter()
        .map(|value| serde_json::from_value(value).expect("fixture decodes"))
        .collect()
}

/// A small city: two coincident monuments, one park, one broken record and
/// a room nested under the fort.
pub fn city_points() -> Vec<RawPoint> {
    raw_points(vec![
        json!({
            "objectId": "fort",
            "name": "Praça XV",
            "lat": "-30.88500",
            "lon": "-55.51000",
            "type": { "objectId": "mon", "name": "Monument", "color": "#aa0000" },
            "neighborhood": "Centro",
            "photoUrls": ["forts/front.jpg", ""],
            "photoIds": ["https://images.example/fort.jpg"],
            "children": [
                { "objectId": "room", "name": "Armoury", "lat": "-30,8851", "lon": "-55.5101", "photoUrls": ["rooms/a.jpg"] }
            ]
        }),
        json!({
            "objectId": "statue",
            "name": "Praça Internacional",
            "lat": -30.885004,
            "lon": -55.510004,
            "type": { "objectId": "mon", "name": "Monument" },
            "neighborhood": "Zona Norte"
        }),
        json!({
            "objectId": "park",
            "name": "Parque Harmonia",
            "lat": "-30.90",
            "lon": "-55.55",
            "type": "park",
            "neighborhood": "Centro"
        }),
        json!({ "objectId": "broken", "name": "Nowhere", "lat": "bad", "lon": "-55.0" }),
        json!({ "objectId": "room", "name": "Armoury", "lat": -30.8851, "lon": -55.5101, "parentId": "fort" }),
    ])
}

pub fn city_categories() -> Vec<Category> {
    serde_json::from_value(json!([
        { "id": "mon", "name": "Monument", "color": "#aa0000" },
        { "id": "park", "name": "Park" }
    ]))
    .expect("categories decode")
}

/// Handler state over the given driven adapters.
pub fn state_with<R, G, F>(points: R, gateway: G, files: F) -> web::Data<HttpState>
where
    R: PointsRepository + 'static,
    G: AuthGateway + 'static,
    F: FileStore + 'static,
{
    let service = Arc::new(PointsService::new(Arc::new(points), PointPipeline::default()));
    let ports = HttpStatePorts {
        points: service.clone(),
        point_commands: service,
        accounts: Arc::new(AuthService::new(Arc::new(gateway))),
        files: Arc::new(FilesService::new(Arc::new(files), 1024 * 1024)),
    };
    web::Data::new(HttpState::new(ports, MapConfig::default()))
}
