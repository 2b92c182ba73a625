//! Category list endpoint.
//!
//! ```text
//! GET /api/categories
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::state::HttpState;

/// Categories known to the backend, as returned by its type registry.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories", body = Vec<serde_json::Value>),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let categories = state.points.categories().await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, read_body_json};
    use serde_json::{Value, json};

    use crate::domain::points::Category;
    use crate::inbound::http::test_utils::{TestPorts, call_api};

    #[actix_web::test]
    async fn lists_backend_categories() {
        let mut ports = TestPorts::default();
        ports.points.expect_categories().return_once(|| {
            Ok(vec![Category {
                id: "c1".into(),
                name: "Monument".into(),
                icon: None,
                color: Some("#aa0000".into()),
            }])
        });

        let response = call_api(ports, TestRequest::get().uri("/api/categories")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = read_body_json(response).await;
        assert_eq!(
            body,
            json!([{ "id": "c1", "name": "Monument", "color": "#aa0000" }])
        );
    }
}
