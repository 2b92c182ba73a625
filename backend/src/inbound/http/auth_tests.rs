//! Handler tests for the authentication passthrough.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, read_body_json};
use rstest::rstest;

use crate::domain::ports::AuthSession;
use crate::inbound::http::test_utils::{TestPorts, call_api};

fn session(token: Option<&str>, user: Value) -> AuthSession {
    AuthSession {
        token: token.and_then(AccessToken::new),
        user,
    }
}

#[actix_web::test]
async fn login_returns_backend_token_and_user() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_login()
        .withf(|creds| creds.email() == "ana@example.org" && creds.password() == "secret")
        .return_once(|_| Ok(session(Some("tok-1"), json!({ "email": "ana@example.org" }))));

    let response = call_api(
        ports,
        TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": " ana@example.org ", "password": "secret" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["token"], json!("tok-1"));
    assert_eq!(body["user"]["email"], json!("ana@example.org"));
}

#[rstest]
#[case("", "secret", "email", "empty_email")]
#[case("ana@example.org", "", "password", "empty_password")]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let response = call_api(
        TestPorts::default(),
        TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["details"]["field"], json!(field));
    assert_eq!(body["details"]["code"], json!(code));
}

#[actix_web::test]
async fn login_failure_is_unauthorized() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_login()
        .return_once(|_| Err(Error::unauthorized("Invalid credentials")));

    let response = call_api(
        ports,
        TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ana@example.org", "password": "wrong" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["message"], json!("Invalid credentials"));
}

#[actix_web::test]
async fn register_defaults_names_and_echoes_email() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_register()
        .withf(|registration| registration.name() == "User" && registration.surname() == "Test")
        .return_once(|_| Ok(session(None, json!({}))));

    let response = call_api(
        ports,
        TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "new@example.org", "password": "pw" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_body_json(response).await;
    assert_eq!(body, json!({ "email": "new@example.org" }));
}

#[actix_web::test]
async fn register_conflict_is_reported() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_register()
        .return_once(|_| Err(Error::conflict("email already registered")));

    let response = call_api(
        ports,
        TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "taken@example.org", "password": "pw", "name": "Ana" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn current_user_forwards_bearer_token() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_current_user()
        .withf(|token| token.as_str() == "tok-1")
        .return_once(|_| Ok(json!({ "email": "ana@example.org" })));

    let response = call_api(
        ports,
        TestRequest::get()
            .uri("/api/users/me")
            .insert_header(("Authorization", "Bearer tok-1")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_body_json(response).await;
    assert_eq!(body["email"], json!("ana@example.org"));
}

#[rstest]
#[case(None)]
#[case(Some("Basic abc"))]
#[case(Some("Bearer "))]
#[actix_web::test]
async fn current_user_requires_bearer_token(#[case] authorization: Option<&str>) {
    let mut request = TestRequest::get().uri("/api/users/me");
    if let Some(value) = authorization {
        request = request.insert_header(("Authorization", value.to_owned()));
    }

    let response = call_api(TestPorts::default(), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
