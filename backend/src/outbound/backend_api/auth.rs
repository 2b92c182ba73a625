//! [`AuthGateway`] over the backend's authentication endpoints.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use super::client::BackendApi;
use super::dto::{LoginRequestDto, RegisterRequestDto, SessionDto, decode_optional_json};
use crate::domain::auth::{AccessToken, LoginCredentials, Registration};
use crate::domain::ports::{AuthGateway, AuthSession, BackendError};

fn decode_session(body: &[u8]) -> Result<SessionDto, BackendError> {
    match decode_optional_json(body).map_err(BackendError::decode)? {
        Value::Null => Ok(SessionDto::default()),
        value => serde_json::from_value(value)
            .map_err(|error| BackendError::decode(format!("invalid session payload: {error}"))),
    }
}

#[async_trait]
impl AuthGateway for BackendApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, BackendError> {
        let url = self.endpoint(["api", "auth", "login"])?;
        let reply = self
            .send(
                self.request(Method::POST, url)
                    .json(&LoginRequestDto::from(credentials)),
            )
            .await?;
        let email = credentials.email().to_owned();
        Ok(decode_session(&reply.body)?.into_session(|| json!({ "email": email })))
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession, BackendError> {
        let url = self.endpoint(["api", "auth", "register"])?;
        let reply = self
            .send(
                self.request(Method::POST, url)
                    .json(&RegisterRequestDto::from(registration)),
            )
            .await?;
        let echo = decode_optional_json(&reply.body).map_err(BackendError::decode)?;
        let session = serde_json::from_value::<SessionDto>(echo.clone()).unwrap_or_default();
        let email = registration.credentials().email().to_owned();
        Ok(session.into_session(|| {
            if echo.is_object() {
                echo
            } else {
                json!({ "email": email })
            }
        }))
    }

    async fn current_user(&self, token: &AccessToken) -> Result<Value, BackendError> {
        let url = self.endpoint(["api", "users", "me"])?;
        let reply = self
            .send(self.user_request(Method::GET, url, token.as_str()))
            .await?;
        serde_json::from_slice(&reply.body)
            .map_err(|error| BackendError::decode(format!("invalid user payload: {error}")))
    }
}
