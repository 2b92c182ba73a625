//! HTTP inbound adapter exposing the `/api` surface.
//!
//! Handlers translate requests into driving-port calls and shape the JSON
//! the frontend consumes. Extractor failures are reported with the same
//! error body as domain failures.

pub mod auth;
pub mod cache_control;
pub mod categories;
pub mod error;
pub mod files;
pub mod health;
pub mod images;
pub mod map;
pub mod points;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::{Scope, web};

use crate::domain::Error;

pub use error::ApiResult;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_request(format!("invalid JSON body: {err}")).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| Error::invalid_request(format!("invalid query: {err}")).into())
}

/// Every `/api` route, in matching order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use historian::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(json_config())
        .app_data(query_config())
        .service(points::list_points)
        .service(points::recent_points)
        .service(points::create_point)
        .service(points::child_points)
        .service(points::point_detail)
        .service(points::update_point)
        .service(points::delete_point)
        .service(categories::list_categories)
        .service(map::markers)
        .service(map::config)
        .service(auth::login)
        .service(auth::register)
        .service(auth::current_user)
        .service(images::upload_images)
        .service(files::fetch_file)
}
