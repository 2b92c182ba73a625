//! Spatial grouping of points into map markers.
//!
//! Points whose coordinates agree after rounding share a marker, so two
//! records describing the same spot render as one marker with a multi-item
//! popup instead of two overlapping pins.

use std::collections::HashMap;

use serde::Serialize;

use super::points::NormalizedPoint;

/// Default rounding precision (about one metre).
pub const DEFAULT_MARKER_PRECISION: u8 = 5;
/// Largest supported rounding precision.
pub const MAX_MARKER_PRECISION: u8 = 10;

/// Separator between the two axes in a group key.
const KEY_SEPARATOR: char = '|';

/// Points sharing one rounded location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerGroup {
    /// Composite rounded key, e.g. `"-30.88500|-55.51000"`.
    pub key: String,
    /// Latitude parsed back from the key.
    pub lat: f64,
    /// Longitude parsed back from the key.
    pub lon: f64,
    /// Number of members.
    pub size: usize,
    /// Members in arrival order.
    pub points: Vec<NormalizedPoint>,
}

impl MarkerGroup {
    /// Whether the marker stands for more than one point.
    pub fn is_cluster(&self) -> bool {
        self.size > 1
    }
}

/// Precision outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("marker precision {0} exceeds the maximum of {MAX_MARKER_PRECISION}")]
pub struct PrecisionOutOfRange(pub u8);

/// Groups points by rounded coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerGrouper {
    precision: u8,
}

impl Default for MarkerGrouper {
    fn default() -> Self {
        Self {
            precision: DEFAULT_MARKER_PRECISION,
        }
    }
}

impl MarkerGrouper {
    /// Build a grouper rounding to `precision` decimal places.
    pub fn new(precision: u8) -> Result<Self, PrecisionOutOfRange> {
        if precision > MAX_MARKER_PRECISION {
            return Err(PrecisionOutOfRange(precision));
        }
        Ok(Self { precision })
    }

    fn round(&self, value: f64) -> String {
        let precision = usize::from(self.precision);
        let text = format!("{value:.precision$}");
        // `-0.00000` and `0.00000` are the same place.
        match text.strip_prefix('-') {
            Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_owned(),
            _ => text,
        }
    }

    /// Group key for a coordinate pair.
    ///
    /// # Examples
    /// ```
    /// use historian::domain::grouping::MarkerGrouper;
    ///
    /// let grouper = MarkerGrouper::default();
    /// assert_eq!(grouper.key(-30.885004, -55.51), "-30.88500|-55.51000");
    /// ```
    pub fn key(&self, lat: f64, lon: f64) -> String {
        format!("{}{KEY_SEPARATOR}{}", self.round(lat), self.round(lon))
    }

    /// Partition `points` into marker groups in first-encountered order.
    pub fn group(&self, points: &[NormalizedPoint]) -> Vec<MarkerGroup> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<MarkerGroup> = Vec::new();

        for point in points {
            let key = self.key(point.lat, point.lon);
            if let Some(group) = index.get(&key).and_then(|&slot| groups.get_mut(slot)) {
                group.points.push(point.clone());
                group.size += 1;
                continue;
            }
            let (lat, lon) = parse_key(&key).unwrap_or((point.lat, point.lon));
            index.insert(key.clone(), groups.len());
            groups.push(MarkerGroup {
                key,
                lat,
                lon,
                size: 1,
                points: vec![point.clone()],
            });
        }

        groups
    }
}

fn parse_key(key: &str) -> Option<(f64, f64)> {
    let (lat, lon) = key.split_once(KEY_SEPARATOR)?;
    Some((lat.parse().ok()?, lon.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coordinates::normalize_points;
    use crate::domain::points::RawPoint;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn points(values: Vec<serde_json::Value>) -> Vec<NormalizedPoint> {
        normalize_points(values.into_iter().map(|value| {
            serde_json::from_value::<RawPoint>(value).expect("fixture decodes")
        }))
    }

    #[fixture]
    fn grouper() -> MarkerGrouper {
        MarkerGrouper::default()
    }

    #[rstest]
    fn nearly_identical_points_share_a_group(grouper: MarkerGrouper) {
        let input = points(vec![
            json!({ "objectId": "1", "lat": -30.88500, "lon": -55.51000 }),
            json!({ "objectId": "2", "lat": -30.885004, "lon": -55.510004 }),
        ]);

        let groups = grouper.group(&input);

        assert_eq!(groups.len(), 1);
        let group = groups.first().expect("one group");
        assert_eq!(group.size, 2);
        assert!(group.is_cluster());
        assert_eq!(group.key, "-30.88500|-55.51000");
        assert_eq!(group.lat, -30.885);
        assert_eq!(group.lon, -55.51);
    }

    #[rstest]
    fn groups_partition_input_in_arrival_order(grouper: MarkerGrouper) {
        let input = points(vec![
            json!({ "objectId": "a", "lat": 1.0, "lon": 1.0 }),
            json!({ "objectId": "b", "lat": 2.0, "lon": 2.0 }),
            json!({ "objectId": "c", "lat": 1.000001, "lon": 1.0 }),
            json!({ "objectId": "d", "lat": 3.0, "lon": 3.0 }),
        ]);

        let groups = grouper.group(&input);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["1.00000|1.00000", "2.00000|2.00000", "3.00000|3.00000"]);

        let mut members: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.points.iter().map(|p| p.object_id.as_str()))
            .collect();
        assert_eq!(members.first().copied(), Some("a"));
        assert_eq!(members.get(1).copied(), Some("c"));
        members.sort_unstable();
        assert_eq!(members, ["a", "b", "c", "d"]);
        assert_eq!(groups.iter().map(|g| g.size).sum::<usize>(), input.len());
    }

    #[rstest]
    fn distinct_rounded_keys_stay_apart(grouper: MarkerGrouper) {
        let input = points(vec![
            json!({ "objectId": "1", "lat": -30.88500, "lon": -55.51000 }),
            json!({ "objectId": "2", "lat": -30.88502, "lon": -55.51000 }),
        ]);

        let groups = grouper.group(&input);

        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| !g.is_cluster()));
    }

    #[rstest]
    fn negative_zero_shares_key_with_zero(grouper: MarkerGrouper) {
        assert_eq!(grouper.key(-0.000001, 0.0), grouper.key(0.0, 0.000001));
        assert_eq!(grouper.key(-0.000001, -0.0), "0.00000|0.00000");
    }

    #[rstest]
    #[case(0, "-31|-56")]
    #[case(2, "-30.89|-55.51")]
    fn precision_is_configurable(#[case] precision: u8, #[case] expected: &str) {
        let grouper = MarkerGrouper::new(precision).expect("valid precision");
        assert_eq!(grouper.key(-30.885004, -55.510004), expected);
    }

    #[rstest]
    fn rejects_excessive_precision() {
        assert_eq!(MarkerGrouper::new(11), Err(PrecisionOutOfRange(11)));
    }

    #[rstest]
    fn empty_input_has_no_groups(grouper: MarkerGrouper) {
        assert!(grouper.group(&[]).is_empty());
    }
}
