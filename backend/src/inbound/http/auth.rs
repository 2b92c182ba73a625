//! Authentication passthrough endpoints.
//!
//! ```text
//! POST /api/auth/login {"email":"ana@example.org","password":"secret"}
//! POST /api/auth/register {"email":"ana@example.org","password":"secret","name":"Ana"}
//! GET  /api/users/me  (Authorization: Bearer <token>)
//! ```
//!
//! Tokens are issued by the backend and returned to the caller untouched;
//! the BFF keeps no session of its own.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::{AccessToken, CredentialsValidationError, Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@example.org")]
    pub email: String,
    pub password: String,
}

/// Registration request body; missing names fall back to defaults.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ana@example.org")]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

/// Successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token issued by the backend.
    pub token: Option<String>,
    /// User record as returned by the backend.
    #[schema(value_type = Object)]
    pub user: Value,
}

/// Successful registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub email: String,
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let code = match err {
        CredentialsValidationError::EmptyEmail => "empty_email",
        CredentialsValidationError::EmptyPassword => "empty_password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": code,
    }))
}

fn bearer_token(request: &HttpRequest) -> Result<AccessToken, Error> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(AccessToken::from_authorization)
        .ok_or_else(|| Error::unauthorized("Unauthorized"))
}

/// Exchange credentials for a backend token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let session = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(LoginResponse {
            token: session.token.map(|token| token.as_str().to_owned()),
            user: session.user,
        }))
}

/// Create an account on the backend.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let registration = Registration::new(
        credentials,
        payload.name.as_deref(),
        payload.surname.as_deref(),
    );
    let session = state.accounts.register(&registration).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(RegisterResponse {
            token: session.token.map(|token| token.as_str().to_owned()),
            email: registration.credentials().email().to_owned(),
        }))
}

/// The user owning the presented bearer token.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = serde_json::Value),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("BearerToken" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> ApiResult<HttpResponse> {
    let token = bearer_token(&request)?;
    let user = state.accounts.current_user(&token).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(user))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
