//! Derived views over a normalized collection: filter options, map centre
//! and the most recently added points.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::points::NormalizedPoint;

/// Centre used when there is nothing to average.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: -30.885,
    lon: -55.51,
};

/// Number of points shown in the "latest points" strip.
pub const DEFAULT_RECENT_COUNT: usize = 6;

/// Plain coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Entry of the category drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
}

/// Distinct categories in first-seen order.
///
/// When the same id appears with different names, the last name wins.
pub fn category_options(points: &[NormalizedPoint]) -> Vec<CategoryOption> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut options: Vec<CategoryOption> = Vec::new();
    for category in points.iter().filter_map(|p| p.category.as_ref()) {
        let name = category.name().to_owned();
        match slots.get(category.id()).and_then(|&slot| options.get_mut(slot)) {
            Some(option) => option.name = name,
            None => {
                slots.insert(category.id(), options.len());
                options.push(CategoryOption {
                    id: category.id().to_owned(),
                    name,
                });
            }
        }
    }
    options
}

/// Distinct non-empty neighbourhood names, sorted.
pub fn neighborhoods(points: &[NormalizedPoint]) -> Vec<String> {
    points
        .iter()
        .filter_map(|p| p.neighborhood.as_deref())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Arithmetic mean of the coordinates, or `fallback` for an empty slice.
pub fn map_center(points: &[NormalizedPoint], fallback: GeoPoint) -> GeoPoint {
    if points.is_empty() {
        return fallback;
    }
    let count = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    GeoPoint {
        lat: lat_sum / count,
        lon: lon_sum / count,
    }
}

/// The last `count` points in arrival order.
pub fn recent(points: &[NormalizedPoint], count: usize) -> &[NormalizedPoint] {
    let start = points.len().saturating_sub(count);
    points.get(start..).unwrap_or_default()
}
