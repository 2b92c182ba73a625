//! Account use-cases delegated to the backend.
//!
//! Backend failure details never reach the client for login or current-user
//! lookups: any rejection there is reported as an authentication failure.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::auth::{AccessToken, LoginCredentials, Registration};
use crate::domain::ports::{AccountService, AuthGateway, AuthSession, BackendError};

/// Account service implementing [`AccountService`] over an [`AuthGateway`].
#[derive(Clone)]
pub struct AuthService<G> {
    gateway: Arc<G>,
}

impl<G> AuthService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

fn authentication_error(err: BackendError, message: &str) -> Error {
    if err.is_unavailable() || matches!(err, BackendError::Decode { .. }) {
        return err.into();
    }
    warn!(error = %err, "backend rejected authentication");
    Error::unauthorized(message)
}

fn registration_error(err: BackendError) -> Error {
    match err.status() {
        Some(409) => Error::conflict("email already registered"),
        Some(status @ 400..=499) => {
            warn!(status, error = %err, "backend rejected registration");
            Error::from(BackendError::rejected(status, "Registration failed"))
        }
        _ => err.into(),
    }
}

#[async_trait]
impl<G> AccountService for AuthService<G>
where
    G: AuthGateway,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        let session = self
            .gateway
            .login(credentials)
            .await
            .map_err(|err| authentication_error(err, "Invalid credentials"))?;
        info!(issued_token = session.token.is_some(), "login succeeded");
        Ok(session)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error> {
        let session = self
            .gateway
            .register(registration)
            .await
            .map_err(registration_error)?;
        info!("account registered");
        Ok(session)
    }

    async fn current_user(&self, token: &AccessToken) -> Result<Value, Error> {
        self.gateway
            .current_user(token)
            .await
            .map_err(|err| authentication_error(err, "Unauthorized"))
    }
}
