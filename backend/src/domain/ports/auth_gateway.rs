//! Driven port for the backend's authentication endpoints.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::auth::{AccessToken, LoginCredentials, Registration};

use super::BackendError;

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    /// Token issued by the backend, when it issued one.
    pub token: Option<AccessToken>,
    /// User payload as returned by the backend.
    pub user: Value,
}

/// Port for delegating authentication to the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, BackendError>;

    /// Create an account.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, BackendError>;

    /// Fetch the user owning `token`.
    async fn current_user(&self, token: &AccessToken) -> Result<Value, BackendError>;
}

/// Development gateway accepting a single fixed account.
///
/// `admin@example.org` / `password` logs in with the token `fixture-token`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGateway;

impl FixtureAuthGateway {
    const EMAIL: &'static str = "admin@example.org";
    const PASSWORD: &'static str = "password";
    const TOKEN: &'static str = "fixture-token";

    fn user() -> Value {
        json!({ "email": Self::EMAIL, "name": "Admin" })
    }
}

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, BackendError> {
        if credentials.email() == Self::EMAIL && credentials.password() == Self::PASSWORD {
            Ok(AuthSession {
                token: AccessToken::new(Self::TOKEN),
                user: Self::user(),
            })
        } else {
            Err(BackendError::rejected(401_u16, "invalid credentials"))
        }
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession, BackendError> {
        if registration.credentials().email() == Self::EMAIL {
            return Err(BackendError::rejected(409_u16, "email already registered"));
        }
        Ok(AuthSession {
            token: None,
            user: json!({
                "email": registration.credentials().email(),
                "name": registration.name(),
                "surname": registration.surname(),
            }),
        })
    }

    async fn current_user(&self, token: &AccessToken) -> Result<Value, BackendError> {
        if token.as_str() == Self::TOKEN {
            Ok(Self::user())
        } else {
            Err(BackendError::rejected(401_u16, "invalid token"))
        }
    }
}
