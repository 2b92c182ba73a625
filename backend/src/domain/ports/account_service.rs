//! Driving port for login, registration and current-user lookups.
//!
//! HTTP handlers depend on this port only, so their tests substitute a mock
//! instead of a backend.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;
use crate::domain::auth::{AccessToken, LoginCredentials, Registration};

use super::AuthSession;

/// Domain use-case port for account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Authenticate and return the issued session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;

    /// Register a new account.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error>;

    /// Resolve the user owning `token`.
    async fn current_user(&self, token: &AccessToken) -> Result<Value, Error>;
}
