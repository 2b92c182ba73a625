//! [`PointsRepository`] over the backend's interest-point endpoints.
//!
//! ```text
//! GET    /api/interest-points
//! GET    /api/interest-points/{id}
//! GET    /api/interest-points/parent/{id}/with-depth
//! POST   /api/interest-points
//! PUT    /api/interest-points/{id}
//! DELETE /api/interest-points/{id}
//! GET    /api/types
//! ```

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::client::BackendApi;
use super::dto::{decode_optional_json, decode_records};
use crate::domain::points::{Category, RawPoint};
use crate::domain::ports::{BackendError, PointsRepository};
use crate::domain::submission::NewPoint;

const POINTS: [&str; 2] = ["api", "interest-points"];

impl BackendApi {
    fn point_url(&self, id: &str) -> Result<reqwest::Url, BackendError> {
        self.endpoint(POINTS.into_iter().chain([id]))
    }
}

#[async_trait]
impl PointsRepository for BackendApi {
    async fn list_points(&self) -> Result<Vec<RawPoint>, BackendError> {
        let url = self.endpoint(POINTS)?;
        let reply = self.send(self.service_request(Method::GET, url)).await?;
        decode_records(&reply.body, "point").map_err(BackendError::decode)
    }

    async fn find_point(&self, id: &str) -> Result<RawPoint, BackendError> {
        let url = self.point_url(id)?;
        let reply = self.send(self.service_request(Method::GET, url)).await?;
        serde_json::from_slice(&reply.body)
            .map_err(|error| BackendError::decode(format!("invalid point {id}: {error}")))
    }

    async fn list_children(&self, parent_id: &str) -> Result<Vec<RawPoint>, BackendError> {
        let url = self.endpoint(POINTS.into_iter().chain(["parent", parent_id, "with-depth"]))?;
        let reply = self.send(self.service_request(Method::GET, url)).await?;
        decode_records(&reply.body, "child point").map_err(BackendError::decode)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        let url = self.endpoint(["api", "types"])?;
        let reply = self.send(self.service_request(Method::GET, url)).await?;
        decode_records(&reply.body, "category").map_err(BackendError::decode)
    }

    async fn create_point(&self, point: &NewPoint) -> Result<Value, BackendError> {
        let url = self.endpoint(POINTS)?;
        let reply = self
            .send(self.service_request(Method::POST, url).json(point))
            .await?;
        decode_optional_json(&reply.body).map_err(BackendError::decode)
    }

    async fn update_point(&self, id: &str, point: &NewPoint) -> Result<Value, BackendError> {
        let url = self.point_url(id)?;
        let reply = self
            .send(self.service_request(Method::PUT, url).json(point))
            .await?;
        decode_optional_json(&reply.body).map_err(BackendError::decode)
    }

    async fn delete_point(&self, id: &str) -> Result<(), BackendError> {
        let url = self.point_url(id)?;
        self.send(self.service_request(Method::DELETE, url)).await?;
        Ok(())
    }
}
