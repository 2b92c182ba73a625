//! Coordinate normalization.
//!
//! Backend records and user input both carry coordinates loosely: numbers,
//! numeric strings, or strings using a comma as decimal separator. This
//! module is the single parse-and-validate boundary that turns them into
//! finite `f64` values. Records that fail are dropped, not reported.

use serde_json::Value;
use tracing::debug;

use super::points::{ChildPoint, NormalizedChild, NormalizedPoint, RawPoint};

/// Axis that failed to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude => f.write_str("lat"),
            Self::Longitude => f.write_str("lon"),
        }
    }
}

/// Reason a record was excluded from the normalized collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateRejection {
    /// The field was absent or null.
    #[error("point {object_id} has no {axis}")]
    Missing { object_id: String, axis: Axis },
    /// The field was present but not a finite number.
    #[error("point {object_id} has an unusable {axis}")]
    Invalid { object_id: String, axis: Axis },
}

/// Parse a decimal number written with `.` or `,` as separator.
///
/// Only the first comma is converted, so `"1,2,3"` is rejected. Results that
/// are not finite (`"NaN"`, `"inf"`) are rejected too.
///
/// # Examples
/// ```
/// use historian::domain::coordinates::parse_decimal;
///
/// assert_eq!(parse_decimal(" -30,885 "), Some(-30.885));
/// assert_eq!(parse_decimal("abc"), None);
/// ```
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a coordinate that may be a JSON number or a numeric string.
pub fn parse_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
}

fn require_axis(
    value: Option<&Value>,
    object_id: &str,
    axis: Axis,
) -> Result<f64, CoordinateRejection> {
    let value = value.ok_or_else(|| CoordinateRejection::Missing {
        object_id: object_id.to_owned(),
        axis,
    })?;
    parse_coordinate(value).ok_or_else(|| CoordinateRejection::Invalid {
        object_id: object_id.to_owned(),
        axis,
    })
}

/// Validate one raw record.
///
/// On success every field other than `lat`/`lon` is carried over untouched;
/// `image_url` is left empty for the image resolver to fill, and a stale
/// backend `imageUrl` is discarded so it cannot shadow the resolved one.
pub fn normalize_point(raw: RawPoint) -> Result<NormalizedPoint, CoordinateRejection> {
    let lat = require_axis(raw.lat.as_ref(), &raw.object_id, Axis::Latitude)?;
    let lon = require_axis(raw.lon.as_ref(), &raw.object_id, Axis::Longitude)?;
    let RawPoint {
        object_id,
        name,
        description,
        category,
        neighborhood,
        address,
        country,
        contact,
        photo_urls,
        photo_ids,
        parent_id,
        children,
        mut extra,
        ..
    } = raw;
    for key in NormalizedPoint::DERIVED_KEYS {
        extra.remove(key);
    }
    Ok(NormalizedPoint {
        object_id,
        name,
        description,
        lat,
        lon,
        category,
        neighborhood,
        address,
        country,
        contact,
        photo_urls,
        photo_ids,
        parent_id,
        children,
        image_url: None,
        extra,
    })
}

/// Normalize a collection, silently dropping unusable records.
///
/// Order is preserved and each record is handled independently.
pub fn normalize_points<I>(raw: I) -> Vec<NormalizedPoint>
where
    I: IntoIterator<Item = RawPoint>,
{
    raw.into_iter()
        .filter_map(|point| match normalize_point(point) {
            Ok(normalized) => Some(normalized),
            Err(rejection) => {
                debug!(%rejection, "dropping point without usable coordinates");
                None
            }
        })
        .collect()
}

/// Clean up a sub-point's coordinates, keeping the child either way.
pub fn normalize_child(child: ChildPoint) -> NormalizedChild {
    let lat = child.lat.as_ref().and_then(parse_coordinate);
    let lon = child.lon.as_ref().and_then(parse_coordinate);
    // Half a coordinate pair cannot be placed on a map.
    let (lat, lon) = match (lat, lon) {
        (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
        _ => (None, None),
    };
    NormalizedChild {
        object_id: child.object_id,
        name: child.name,
        description: child.description,
        lat,
        lon,
        category: child.category,
        image_url: None,
    }
}

impl From<&NormalizedPoint> for RawPoint {
    fn from(point: &NormalizedPoint) -> Self {
        Self {
            object_id: point.object_id.clone(),
            name: point.name.clone(),
            description: point.description.clone(),
            lat: Some(Value::from(point.lat)),
            lon: Some(Value::from(point.lon)),
            category: point.category.clone(),
            neighborhood: point.neighborhood.clone(),
            address: point.address.clone(),
            country: point.country.clone(),
            contact: point.contact.clone(),
            photo_urls: point.photo_urls.clone(),
            photo_ids: point.photo_ids.clone(),
            parent_id: point.parent_id.clone(),
            children: point.children.clone(),
            extra: point.extra.clone(),
        }
    }
}
