//! Point use-cases over the backend repository.
//!
//! Every call fetches fresh records and runs them through the configured
//! [`PointPipeline`]; nothing is cached between requests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::domain::Error;
use crate::domain::facets::{category_options, neighborhoods, recent};
use crate::domain::filter::PointFilter;
use crate::domain::pipeline::{MarkerLayout, PointDetail, PointPipeline};
use crate::domain::points::{Category, NormalizedPoint, RawPoint};
use crate::domain::ports::{
    CreatedPoint, PointListing, PointsCommand, PointsQuery, PointsRepository, SavedPoint,
};
use crate::domain::submission::{DraftValidationError, NewPoint, PointDraft};

/// Point service implementing the read and write driving ports.
#[derive(Clone)]
pub struct PointsService<R> {
    repository: Arc<R>,
    pipeline: PointPipeline,
}

impl<R> PointsService<R> {
    /// Create a service over `repository` shaping records with `pipeline`.
    pub fn new(repository: Arc<R>, pipeline: PointPipeline) -> Self {
        Self {
            repository,
            pipeline,
        }
    }
}

fn draft_error(err: DraftValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

impl<R> PointsService<R>
where
    R: PointsRepository,
{
    async fn normalized_points(&self) -> Result<Vec<NormalizedPoint>, Error> {
        let raw = self.repository.list_points().await?;
        let fetched = raw.len();
        let points = self.pipeline.normalize(raw);
        debug!(fetched, usable = points.len(), "normalized point collection");
        Ok(points)
    }

    fn saved_point(&self, echo: Value) -> Option<SavedPoint> {
        if echo.is_null() {
            return None;
        }
        let normalized = serde_json::from_value::<RawPoint>(echo.clone())
            .ok()
            .and_then(|raw| self.pipeline.normalize([raw]).pop());
        Some(match normalized {
            Some(point) => SavedPoint::Normalized(Box::new(point)),
            None => SavedPoint::Raw(echo),
        })
    }
}

#[async_trait]
impl<R> PointsQuery for PointsService<R>
where
    R: PointsRepository,
{
    async fn list_points(&self, filter: &PointFilter) -> Result<PointListing, Error> {
        let all = self.normalized_points().await?;
        let points: Vec<NormalizedPoint> = filter.apply(&all).into_iter().cloned().collect();
        Ok(PointListing {
            total: points.len(),
            categories: category_options(&all),
            neighborhoods: neighborhoods(&all),
            points,
        })
    }

    async fn recent_points(&self, limit: usize) -> Result<Vec<NormalizedPoint>, Error> {
        let all = self.normalized_points().await?;
        Ok(recent(&all, limit).to_vec())
    }

    async fn point_detail(&self, id: &str) -> Result<PointDetail, Error> {
        let raw = self.repository.find_point(id).await?;
        self.pipeline.detail(raw).map_err(|rejection| {
            debug!(point_id = %id, %rejection, "point has no usable location");
            Error::not_found(format!("point {id} has no usable location"))
        })
    }

    async fn child_points(&self, parent_id: &str) -> Result<Vec<NormalizedPoint>, Error> {
        let raw = self.repository.list_children(parent_id).await?;
        Ok(self.pipeline.normalize(raw))
    }

    async fn marker_layout(&self) -> Result<MarkerLayout, Error> {
        let points = self.normalized_points().await?;
        Ok(self.pipeline.layout(&points))
    }

    async fn categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.repository.list_categories().await?)
    }
}

#[async_trait]
impl<R> PointsCommand for PointsService<R>
where
    R: PointsRepository,
{
    async fn create_point(&self, draft: PointDraft) -> Result<CreatedPoint, Error> {
        let point = NewPoint::try_from(draft).map_err(draft_error)?;
        let echo = self.repository.create_point(&point).await?;
        let saved = self.saved_point(echo);
        let object_id = saved.as_ref().and_then(SavedPoint::object_id).map(str::to_owned);
        info!(point_id = ?object_id, name = %point.name, "point created");
        Ok(CreatedPoint {
            object_id,
            point: saved,
        })
    }

    async fn update_point(&self, id: &str, draft: PointDraft) -> Result<SavedPoint, Error> {
        let point = NewPoint::try_from(draft).map_err(draft_error)?;
        let echo = self.repository.update_point(id, &point).await?;
        info!(point_id = %id, "point updated");
        Ok(self
            .saved_point(echo)
            .unwrap_or_else(|| SavedPoint::Raw(Value::Null)))
    }

    async fn delete_point(&self, id: &str) -> Result<(), Error> {
        self.repository.delete_point(id).await?;
        info!(point_id = %id, "point deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "points_service_tests.rs"]
mod tests;
