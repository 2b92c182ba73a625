//! Handler tests for the point endpoints.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, read_body_json};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::PointPipeline;
use crate::domain::points::{NormalizedPoint, RawPoint};
use crate::domain::ports::{CreatedPoint, SavedPoint};
use crate::inbound::http::test_utils::{TestPorts, call_api};

fn normalized(values: Vec<Value>) -> Vec<NormalizedPoint> {
    let raw = values
        .into_iter()
        .map(|value| serde_json::from_value::<RawPoint>(value).expect("fixture decodes"));
    PointPipeline::default().normalize(raw)
}

#[fixture]
fn fort() -> Value {
    json!({
        "objectId": "fort",
        "name": "Old Fort",
        "lat": "-30,885",
        "lon": -55.51,
        "type": { "objectId": "c1", "name": "Monument" },
        "photoIds": ["forts/front.jpg"]
    })
}

fn header<'a>(response: &'a actix_web::dev::ServiceResponse, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|value| value.to_str().ok())
}

#[rstest]
#[actix_web::test]
async fn list_forwards_filter_and_returns_facets(fort: Value) {
    let mut ports = TestPorts::default();
    let points = normalized(vec![fort]);
    ports
        .points
        .expect_list_points()
        .withf(|filter| filter.search == "fort" && filter.type_id == "c1" && filter.neighborhood.is_empty())
        .return_once(move |_| {
            Ok(PointListing {
                total: points.len(),
                points,
                categories: vec![CategoryOption {
                    id: "c1".into(),
                    name: "Monument".into(),
                }],
                neighborhoods: vec!["Centro".into()],
            })
        });

    let response = call_api(
        ports,
        TestRequest::get().uri("/api/points?search=fort&typeId=c1"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "Cache-Control"), Some("no-store"));
    let body: Value = read_body_json(response).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["points"][0]["lat"], json!(-30.885));
    assert_eq!(body["points"][0]["imageUrl"], json!("/api/files/forts/front.jpg"));
    assert_eq!(body["categories"], json!([{ "id": "c1", "name": "Monument" }]));
    assert_eq!(body["neighborhoods"], json!(["Centro"]));
}

#[rstest]
#[case("/api/points/recent", DEFAULT_RECENT_COUNT)]
#[case("/api/points/recent?limit=2", 2)]
#[actix_web::test]
async fn recent_uses_requested_limit(#[case] uri: &str, #[case] expected: usize) {
    let mut ports = TestPorts::default();
    ports
        .points
        .expect_recent_points()
        .withf(move |limit| *limit == expected)
        .return_once(|_| Ok(Vec::new()));

    let response = call_api(ports, TestRequest::get().uri(uri)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn malformed_query_is_reported_as_invalid_request() {
    let response = call_api(
        TestPorts::default(),
        TestRequest::get().uri("/api/points/recent?limit=many"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn detail_returns_point_gallery_and_children(fort: Value) {
    let mut ports = TestPorts::default();
    let raw: RawPoint = serde_json::from_value(fort).expect("fixture decodes");
    let detail = PointPipeline::default().detail(raw).expect("usable point");
    ports
        .points
        .expect_point_detail()
        .withf(|id| id == "fort")
        .return_once(move |_| Ok(detail));

    let response = call_api(ports, TestRequest::get().uri("/api/points/fort")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["point"]["objectId"], json!("fort"));
    assert_eq!(body["gallery"], json!(["/api/files/forts/front.jpg"]));
    assert_eq!(body["children"], json!([]));
}

#[actix_web::test]
async fn detail_errors_keep_their_status() {
    let mut ports = TestPorts::default();
    ports
        .points
        .expect_point_detail()
        .return_once(|_| Err(Error::not_found("point ghost has no usable location")));

    let response = call_api(ports, TestRequest::get().uri("/api/points/ghost")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["code"], json!("not_found"));
}

#[actix_web::test]
async fn children_are_listed_for_parent() {
    let mut ports = TestPorts::default();
    let children = normalized(vec![json!({ "objectId": "room", "lat": 1, "lon": 2, "parentId": "fort" })]);
    ports
        .points
        .expect_child_points()
        .withf(|id| id == "fort")
        .return_once(move |_| Ok(children));

    let response = call_api(ports, TestRequest::get().uri("/api/points/fort/children")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_body_json(response).await;
    assert_eq!(body[0]["objectId"], json!("room"));
}

#[actix_web::test]
async fn backend_outage_is_service_unavailable() {
    let mut ports = TestPorts::default();
    ports
        .points
        .expect_list_points()
        .return_once(|_| Err(Error::service_unavailable("API URL not configured")));

    let response = call_api(ports, TestRequest::get().uri("/api/points")).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["message"], json!("API URL not configured"));
}

#[actix_web::test]
async fn create_returns_created_with_identifier() {
    let mut ports = TestPorts::default();
    ports
        .point_commands
        .expect_create_point()
        .withf(|draft| draft.name == "Old Fort" && draft.lat == Some(json!("-30,885")))
        .return_once(|_| {
            Ok(CreatedPoint {
                object_id: Some("new-1".into()),
                point: None,
            })
        });

    let response = call_api(
        ports,
        TestRequest::post()
            .uri("/api/points")
            .set_json(json!({ "name": "Old Fort", "lat": "-30,885", "lon": "-55,51" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = read_body_json(response).await;
    assert_eq!(body, json!({ "objectId": "new-1" }));
}

#[actix_web::test]
async fn create_rejects_non_json_body() {
    let response = call_api(
        TestPorts::default(),
        TestRequest::post()
            .uri("/api/points")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[actix_web::test]
async fn create_validation_errors_surface_details() {
    let mut ports = TestPorts::default();
    ports.point_commands.expect_create_point().return_once(|_| {
        Err(Error::invalid_request("point name is required")
            .with_details(json!({ "field": "name", "code": "empty_name" })))
    });

    let response = call_api(
        ports,
        TestRequest::post().uri("/api/points").set_json(json!({ "lat": 1, "lon": 2 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["details"]["field"], json!("name"));
}

#[actix_web::test]
async fn update_returns_saved_point() {
    let mut ports = TestPorts::default();
    ports
        .point_commands
        .expect_update_point()
        .withf(|id, draft| id == "fort" && draft.name == "Renamed")
        .return_once(|_, _| Ok(SavedPoint::Raw(json!({ "objectId": "fort", "name": "Renamed" }))));

    let response = call_api(
        ports,
        TestRequest::put()
            .uri("/api/points/fort")
            .set_json(json!({ "name": "Renamed", "lat": 1, "lon": 2 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["name"], json!("Renamed"));
}

#[actix_web::test]
async fn delete_returns_no_content() {
    let mut ports = TestPorts::default();
    ports
        .point_commands
        .expect_delete_point()
        .withf(|id| id == "fort")
        .return_once(|_| Ok(()));

    let response = call_api(ports, TestRequest::delete().uri("/api/points/fort")).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
