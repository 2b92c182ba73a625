//! Stand-in adapter used when no backend URL is configured.
//!
//! Every call fails with [`BackendError::NotConfigured`], which the HTTP
//! layer reports as `503 API URL not configured`.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::auth::{AccessToken, LoginCredentials, Registration};
use crate::domain::points::{Category, RawPoint};
use crate::domain::ports::{
    AuthGateway, AuthSession, BackendError, FilePath, FileStore, PointsRepository, StoredFile,
    Upload,
};
use crate::domain::submission::NewPoint;

/// Adapter answering every port call with [`BackendError::NotConfigured`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredBackend;

#[async_trait]
impl PointsRepository for UnconfiguredBackend {
    async fn list_points(&self) -> Result<Vec<RawPoint>, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn find_point(&self, _id: &str) -> Result<RawPoint, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn list_children(&self, _parent_id: &str) -> Result<Vec<RawPoint>, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn create_point(&self, _point: &NewPoint) -> Result<Value, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn update_point(&self, _id: &str, _point: &NewPoint) -> Result<Value, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn delete_point(&self, _id: &str) -> Result<(), BackendError> {
        Err(BackendError::not_configured())
    }
}

#[async_trait]
impl AuthGateway for UnconfiguredBackend {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthSession, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn register(&self, _registration: &Registration) -> Result<AuthSession, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn current_user(&self, _token: &AccessToken) -> Result<Value, BackendError> {
        Err(BackendError::not_configured())
    }
}

#[async_trait]
impl FileStore for UnconfiguredBackend {
    async fn fetch_file(&self, _path: &FilePath) -> Result<StoredFile, BackendError> {
        Err(BackendError::not_configured())
    }

    async fn upload_images(&self, _upload: Upload) -> Result<Value, BackendError> {
        Err(BackendError::not_configured())
    }
}
