//! Image upload passthrough.
//!
//! ```text
//! POST /api/images/upload-multiple   (multipart/form-data)
//! ```
//!
//! The multipart body is forwarded byte for byte with its original
//! `Content-Type`, boundary included; the backend parses it.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, post, web};

use crate::domain::Error;
use crate::domain::ports::Upload;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn upload_content_type(request: &HttpRequest) -> Result<String, Error> {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
        .ok_or_else(|| Error::invalid_request("Content-Type header is required"))
}

/// Upload one or more images.
#[utoipa::path(
    post,
    path = "/api/images/upload-multiple",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Backend upload result", body = serde_json::Value),
        (status = 400, description = "Missing body or content type", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["files"],
    operation_id = "uploadImages"
)]
#[post("/images/upload-multiple")]
pub async fn upload_images(
    state: web::Data<HttpState>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let upload = Upload {
        content_type: upload_content_type(&request)?,
        body: body.to_vec(),
    };
    let result = state.files.upload_images(upload).await?;
    Ok(HttpResponse::Ok().json(result))
}
