//! Point read and write endpoints.
//!
//! ```text
//! GET    /api/points?search=&typeId=&neighborhood=
//! GET    /api/points/recent?limit=6
//! GET    /api/points/{id}
//! GET    /api/points/{id}/children
//! POST   /api/points
//! PUT    /api/points/{id}
//! DELETE /api/points/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::facets::{CategoryOption, DEFAULT_RECENT_COUNT};
use crate::domain::filter::PointFilter;
use crate::domain::ports::PointListing;
use crate::domain::submission::PointDraft;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::state::HttpState;

/// Response payload for the filtered point list.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointListResponse {
    /// Normalized points with resolved preview images.
    #[schema(value_type = Vec<serde_json::Value>)]
    pub points: serde_json::Value,
    /// Number of points after filtering.
    pub total: usize,
    /// Category facet over the whole collection.
    pub categories: Vec<CategoryOption>,
    /// Neighbourhood facet over the whole collection.
    pub neighborhoods: Vec<String>,
}

impl TryFrom<PointListing> for PointListResponse {
    type Error = Error;

    fn try_from(listing: PointListing) -> Result<Self, Self::Error> {
        Ok(Self {
            points: to_json(&listing.points)?,
            total: listing.total,
            categories: listing.categories,
            neighborhoods: listing.neighborhoods,
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, Error> {
    serde_json::to_value(value).map_err(|err| Error::internal(err.to_string()))
}

/// Query string for `GET /api/points/recent`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Number of points to return; defaults to 6.
    pub limit: Option<usize>,
}

fn no_store_json<T: Serialize>(body: &T) -> HttpResponse {
    HttpResponse::Ok().insert_header(no_store_header()).json(body)
}

/// List points matching the optional filters.
#[utoipa::path(
    get,
    path = "/api/points",
    params(PointFilter),
    responses(
        (status = 200, description = "Filtered points with facets", body = PointListResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Backend unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["points"],
    operation_id = "listPoints"
)]
#[get("/points")]
pub async fn list_points(
    state: web::Data<HttpState>,
    filter: web::Query<PointFilter>,
) -> ApiResult<HttpResponse> {
    let listing = state.points.list_points(&filter).await?;
    let response = PointListResponse::try_from(listing)?;
    Ok(no_store_json(&response))
}

/// Most recently added points.
#[utoipa::path(
    get,
    path = "/api/points/recent",
    params(RecentQuery),
    responses(
        (status = 200, description = "Recent points, newest last", body = Vec<serde_json::Value>),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["points"],
    operation_id = "recentPoints"
)]
#[get("/points/recent")]
pub async fn recent_points(
    state: web::Data<HttpState>,
    query: web::Query<RecentQuery>,
) -> ApiResult<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_COUNT);
    let points = state.points.recent_points(limit).await?;
    Ok(no_store_json(&points))
}

/// Point detail with gallery and children.
#[utoipa::path(
    get,
    path = "/api/points/{id}",
    params(("id" = String, Path, description = "Point identifier")),
    responses(
        (status = 200, description = "Point detail", body = serde_json::Value),
        (status = 404, description = "Unknown point or unusable location", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["points"],
    operation_id = "getPoint"
)]
#[get("/points/{id}")]
pub async fn point_detail(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let detail = state.points.point_detail(&id).await?;
    Ok(no_store_json(&detail))
}

/// Points nested under a parent.
#[utoipa::path(
    get,
    path = "/api/points/{id}/children",
    params(("id" = String, Path, description = "Parent point identifier")),
    responses(
        (status = 200, description = "Child points", body = Vec<serde_json::Value>),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["points"],
    operation_id = "listChildPoints"
)]
#[get("/points/{id}/children")]
pub async fn child_points(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let children = state.points.child_points(&id).await?;
    Ok(no_store_json(&children))
}

/// Create a point from the submission form.
#[utoipa::path(
    post,
    path = "/api/points",
    request_body = PointDraft,
    responses(
        (status = 201, description = "Point created", body = serde_json::Value),
        (status = 400, description = "Invalid submission", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["points"],
    operation_id = "createPoint"
)]
#[post("/points")]
pub async fn create_point(
    state: web::Data<HttpState>,
    payload: web::Json<PointDraft>,
) -> ApiResult<HttpResponse> {
    let created = state
        .point_commands
        .create_point(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace a point.
#[utoipa::path(
    put,
    path = "/api/points/{id}",
    params(("id" = String, Path, description = "Point identifier")),
    request_body = PointDraft,
    responses(
        (status = 200, description = "Point updated", body = serde_json::Value),
        (status = 400, description = "Invalid submission", body = Error),
        (status = 404, description = "Unknown point", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["points"],
    operation_id = "updatePoint"
)]
#[put("/points/{id}")]
pub async fn update_point(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<PointDraft>,
) -> ApiResult<HttpResponse> {
    let saved = state
        .point_commands
        .update_point(&id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(saved))
}

/// Delete a point.
#[utoipa::path(
    delete,
    path = "/api/points/{id}",
    params(("id" = String, Path, description = "Point identifier")),
    responses(
        (status = 204, description = "Point deleted"),
        (status = 404, description = "Unknown point", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["points"],
    operation_id = "deletePoint"
)]
#[delete("/points/{id}")]
pub async fn delete_point(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.point_commands.delete_point(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "points_tests.rs"]
mod tests;
