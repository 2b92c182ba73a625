//! List-view filter predicate.

use serde::Deserialize;
use utoipa::IntoParams;

use super::points::NormalizedPoint;

/// Filter criteria for the point list.
///
/// Every empty criterion is inactive; active criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct PointFilter {
    /// Case-insensitive substring of the point name.
    pub search: String,
    /// Exact category identifier.
    pub type_id: String,
    /// Exact neighbourhood name.
    pub neighborhood: String,
}

impl PointFilter {
    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.type_id.is_empty() && self.neighborhood.is_empty()
    }

    /// Whether `point` satisfies every active criterion.
    pub fn matches(&self, point: &NormalizedPoint) -> bool {
        self.matches_search(point) && self.matches_category(point) && self.matches_neighborhood(point)
    }

    fn matches_search(&self, point: &NormalizedPoint) -> bool {
        self.search.is_empty()
            || point
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }

    fn matches_category(&self, point: &NormalizedPoint) -> bool {
        self.type_id.is_empty() || point.category_id() == Some(self.type_id.as_str())
    }

    fn matches_neighborhood(&self, point: &NormalizedPoint) -> bool {
        self.neighborhood.is_empty()
            || point.neighborhood.as_deref() == Some(self.neighborhood.as_str())
    }

    /// Matching subsequence of `points`; the input is left untouched.
    pub fn apply<'a>(&self, points: &'a [NormalizedPoint]) -> Vec<&'a NormalizedPoint> {
        points.iter().filter(|point| self.matches(point)).collect()
    }
}
