//! Driving port for point mutations.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::domain::Error;
use crate::domain::points::NormalizedPoint;
use crate::domain::submission::PointDraft;

/// Point as echoed by the backend after a save.
///
/// The echo is normalized when it carries usable coordinates and passed
/// through verbatim otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SavedPoint {
    Normalized(Box<NormalizedPoint>),
    Raw(Value),
}

impl SavedPoint {
    /// Identifier of the saved point, when the echo exposes one.
    pub fn object_id(&self) -> Option<&str> {
        match self {
            Self::Normalized(point) => Some(point.object_id.as_str()),
            Self::Raw(value) => ["objectId", "id"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str)),
        }
    }
}

/// Outcome of a point creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<SavedPoint>,
}

/// Domain use-case port for creating, updating and deleting points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsCommand: Send + Sync {
    /// Validate and create a point.
    async fn create_point(&self, draft: PointDraft) -> Result<CreatedPoint, Error>;

    /// Validate and replace a point.
    async fn update_point(&self, id: &str, draft: PointDraft) -> Result<SavedPoint, Error>;

    /// Delete a point.
    async fn delete_point(&self, id: &str) -> Result<(), Error>;
}
