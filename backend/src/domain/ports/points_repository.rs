//! Driven port for reading and mutating points on the remote backend.
//!
//! The adapter returns records exactly as the backend shaped them; the
//! domain pipeline does all normalization.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::points::{Category, RawPoint};
use crate::domain::submission::NewPoint;

use super::BackendError;

/// Port for the backend's interest-point and category endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsRepository: Send + Sync {
    /// Fetch every point in backend order.
    ///
    /// Records that are not point-shaped objects are skipped by the adapter.
    async fn list_points(&self) -> Result<Vec<RawPoint>, BackendError>;

    /// Fetch one point, including its embedded children.
    async fn find_point(&self, id: &str) -> Result<RawPoint, BackendError>;

    /// Fetch points nested under `parent_id`.
    async fn list_children(&self, parent_id: &str) -> Result<Vec<RawPoint>, BackendError>;

    /// Fetch the category catalogue.
    async fn list_categories(&self) -> Result<Vec<Category>, BackendError>;

    /// Create a point and return the backend's echo.
    async fn create_point(&self, point: &NewPoint) -> Result<Value, BackendError>;

    /// Replace a point and return the backend's echo.
    async fn update_point(&self, id: &str, point: &NewPoint) -> Result<Value, BackendError>;

    /// Delete a point.
    async fn delete_point(&self, id: &str) -> Result<(), BackendError>;
}

/// In-memory repository serving a fixed collection.
///
/// Mutations echo their payload without storing it.
#[derive(Debug, Clone, Default)]
pub struct FixturePointsRepository {
    points: Vec<RawPoint>,
    categories: Vec<Category>,
}

impl FixturePointsRepository {
    /// Serve `points` and `categories`.
    pub fn new(points: Vec<RawPoint>, categories: Vec<Category>) -> Self {
        Self { points, categories }
    }

    fn not_found(id: &str) -> BackendError {
        BackendError::rejected(404_u16, format!("Point not found: {id}"))
    }

    fn echo(id: &str, point: &NewPoint) -> Result<Value, BackendError> {
        let mut value =
            serde_json::to_value(point).map_err(|err| BackendError::decode(err.to_string()))?;
        if let Some(object) = value.as_object_mut() {
            object.insert("objectId".to_owned(), Value::String(id.to_owned()));
        }
        Ok(value)
    }
}

#[async_trait]
impl PointsRepository for FixturePointsRepository {
    async fn list_points(&self) -> Result<Vec<RawPoint>, BackendError> {
        Ok(self.points.clone())
    }

    async fn find_point(&self, id: &str) -> Result<RawPoint, BackendError> {
        self.points
            .iter()
            .find(|point| point.object_id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn list_children(&self, parent_id: &str) -> Result<Vec<RawPoint>, BackendError> {
        Ok(self
            .points
            .iter()
            .filter(|point| point.parent_id.as_deref() == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        Ok(self.categories.clone())
    }

    async fn create_point(&self, point: &NewPoint) -> Result<Value, BackendError> {
        Self::echo(&format!("fixture-{}", self.points.len() + 1), point)
    }

    async fn update_point(&self, id: &str, point: &NewPoint) -> Result<Value, BackendError> {
        self.find_point(id).await?;
        Self::echo(id, point)
    }

    async fn delete_point(&self, id: &str) -> Result<(), BackendError> {
        self.find_point(id).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn repository() -> FixturePointsRepository {
        let points = vec![
            json!({ "objectId": "p1", "name": "Catedral", "lat": 1, "lon": 1 }),
            json!({ "objectId": "p2", "name": "Capela", "lat": 1, "lon": 1, "parentId": "p1" }),
        ]
        .into_iter()
        .map(|value| serde_json::from_value(value).expect("fixture decodes"))
        .collect();
        FixturePointsRepository::new(points, Vec::new())
    }

    #[rstest]
    #[tokio::test]
    async fn finds_points_and_children(repository: FixturePointsRepository) {
        let point = repository.find_point("p1").await.expect("point exists");
        assert_eq!(point.name, "Catedral");

        let children = repository.list_children("p1").await.expect("children");
        assert_eq!(children.len(), 1);

        let missing = repository.find_point("nope").await.expect_err("missing point");
        assert_eq!(missing.status(), Some(404));
    }

    #[rstest]
    #[tokio::test]
    async fn update_echoes_payload_with_id(repository: FixturePointsRepository) {
        let point = NewPoint {
            name: "Catedral".to_owned(),
            description: None,
            lat: 1.0,
            lon: 2.0,
            address: None,
            neighborhood: None,
            type_id: None,
            parent_id: None,
            custom_fields: Default::default(),
        };

        let echo = repository.update_point("p1", &point).await.expect("echo");
        assert_eq!(echo["objectId"], json!("p1"));
        assert_eq!(echo["lon"], json!(2.0));
    }
}
