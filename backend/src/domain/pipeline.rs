//! Configured composition of the point-shaping stages.
//!
//! Raw backend records flow through coordinate normalization, preview image
//! resolution and, for the map, spatial grouping. Each stage returns a new
//! collection; nothing is cached between calls.

use serde::Serialize;

use super::coordinates::{normalize_child, normalize_point, normalize_points, CoordinateRejection};
use super::facets::{map_center, GeoPoint, DEFAULT_CENTER};
use super::grouping::{MarkerGroup, MarkerGrouper};
use super::images::{ImageResolver, PhotoSources};
use super::points::{NormalizedChild, NormalizedPoint, RawPoint};

/// Map payload: centre plus marker groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerLayout {
    pub center: GeoPoint,
    pub groups: Vec<MarkerGroup>,
}

/// Detail payload for a single point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDetail {
    pub point: NormalizedPoint,
    pub gallery: Vec<String>,
    pub children: Vec<NormalizedChild>,
}

/// Stateless pipeline configured once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPipeline {
    resolver: ImageResolver,
    grouper: MarkerGrouper,
    default_center: GeoPoint,
}

impl Default for PointPipeline {
    fn default() -> Self {
        Self::new(ImageResolver::default(), MarkerGrouper::default(), DEFAULT_CENTER)
    }
}

impl PointPipeline {
    /// Assemble a pipeline from its stages.
    pub fn new(resolver: ImageResolver, grouper: MarkerGrouper, default_center: GeoPoint) -> Self {
        Self {
            resolver,
            grouper,
            default_center,
        }
    }

    /// Normalize a collection and resolve each preview image.
    pub fn normalize<I>(&self, raw: I) -> Vec<NormalizedPoint>
    where
        I: IntoIterator<Item = RawPoint>,
    {
        normalize_points(raw)
            .into_iter()
            .map(|point| self.resolver.attach_preview(point))
            .collect()
    }

    /// Build the detail view of one record.
    pub fn detail(&self, raw: RawPoint) -> Result<PointDetail, CoordinateRejection> {
        let mut point = self.resolver.attach_preview(normalize_point(raw)?);
        let gallery = self.resolver.gallery(PhotoSources::of(&point));
        let children = std::mem::take(&mut point.children)
            .into_iter()
            .map(|child| {
                let photo_urls = child.photo_urls.clone();
                self.resolver
                    .attach_child_preview(normalize_child(child), &photo_urls)
            })
            .collect();
        Ok(PointDetail {
            point,
            gallery,
            children,
        })
    }

    /// Group normalized points into map markers around their mean centre.
    pub fn layout(&self, points: &[NormalizedPoint]) -> MarkerLayout {
        MarkerLayout {
            center: map_center(points, self.default_center),
            groups: self.grouper.group(points),
        }
    }
}
