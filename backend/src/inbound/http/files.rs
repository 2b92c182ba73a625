//! File proxy endpoint.
//!
//! ```text
//! GET /api/files/{path..}
//! ```
//!
//! Streams stored images from the backend so the browser never needs the
//! backend origin. Paths containing `.` or `..` segments are refused.

use actix_web::{HttpResponse, get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::immutable_header;
use crate::inbound::http::state::HttpState;

/// Fetch a stored file.
#[utoipa::path(
    get,
    path = "/api/files/{path}",
    params(("path" = String, Path, description = "File path below the backend's files root")),
    responses(
        (status = 200, description = "File bytes with the backend's content type"),
        (status = 400, description = "Unsafe path", body = Error),
        (status = 404, description = "Unknown file", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["files"],
    operation_id = "fetchFile",
    security([])
)]
#[get("/files/{path:.*}")]
pub async fn fetch_file(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let file = state.files.fetch_file(&path).await?;
    Ok(HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header(immutable_header())
        .body(file.bytes))
}
