//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler and the health checks. The
//! document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary for frontend tooling.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::facets::{CategoryOption, GeoPoint};
use crate::domain::map::MarkerIcon;
use crate::domain::submission::PointDraft;
use crate::domain::{Error, ErrorCode, MapConfig};
use crate::inbound::http::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::inbound::http::points::PointListResponse;

/// Adds the bearer token scheme used by `GET /api/users/me`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the historian BFF.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Historian API",
        description = "Backend-for-frontend serving normalized points of interest, map markers and proxied files."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::points::list_points,
        crate::inbound::http::points::recent_points,
        crate::inbound::http::points::point_detail,
        crate::inbound::http::points::child_points,
        crate::inbound::http::points::create_point,
        crate::inbound::http::points::update_point,
        crate::inbound::http::points::delete_point,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::map::markers,
        crate::inbound::http::map::config,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::images::upload_images,
        crate::inbound::http::files::fetch_file,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PointListResponse,
        CategoryOption,
        GeoPoint,
        MapConfig,
        MarkerIcon,
        PointDraft,
        LoginRequest,
        LoginResponse,
        RegisterRequest,
        RegisterResponse,
    )),
    tags(
        (name = "points", description = "Points of interest"),
        (name = "categories", description = "Point categories"),
        (name = "map", description = "Map markers and configuration"),
        (name = "auth", description = "Authentication passthrough"),
        (name = "files", description = "File proxy and image uploads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
