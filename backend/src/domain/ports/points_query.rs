//! Driving port for point read use-cases.
//!
//! Inbound adapters call this port to obtain display-ready points without
//! knowing how they are fetched or shaped.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::Error;
use crate::domain::facets::CategoryOption;
use crate::domain::filter::PointFilter;
use crate::domain::pipeline::{MarkerLayout, PointDetail};
use crate::domain::points::{Category, NormalizedPoint};

/// Filtered list plus the option lists of the filter bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointListing {
    /// Points matching the filter, in backend order.
    pub points: Vec<NormalizedPoint>,
    /// Number of matching points.
    pub total: usize,
    /// Categories across the whole collection.
    pub categories: Vec<CategoryOption>,
    /// Neighbourhoods across the whole collection.
    pub neighborhoods: Vec<String>,
}

/// Domain use-case port for reading points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsQuery: Send + Sync {
    /// Normalized points matching `filter`.
    async fn list_points(&self, filter: &PointFilter) -> Result<PointListing, Error>;

    /// The `limit` most recently added points.
    async fn recent_points(&self, limit: usize) -> Result<Vec<NormalizedPoint>, Error>;

    /// Detail view of one point.
    async fn point_detail(&self, id: &str) -> Result<PointDetail, Error>;

    /// Normalized points nested under `parent_id`.
    async fn child_points(&self, parent_id: &str) -> Result<Vec<NormalizedPoint>, Error>;

    /// Marker groups and centre for the full map.
    async fn marker_layout(&self) -> Result<MarkerLayout, Error>;

    /// Category catalogue.
    async fn categories(&self) -> Result<Vec<Category>, Error>;
}
