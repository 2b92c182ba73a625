//! Point-of-interest records.
//!
//! [`RawPoint`] mirrors the backend payload and is deliberately loose: the
//! coordinates may arrive as numbers or numeric strings and nearly every
//! field is optional. [`NormalizedPoint`] is the display-ready form produced
//! by [`crate::domain::coordinates::normalize_point`]; its coordinates are
//! always finite.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tagging type applied to points, e.g. "Monument".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable category identifier.
    #[serde(alias = "objectId")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Icon reference understood by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Marker colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Category reference attached to a point.
///
/// Most payloads embed the full category object; older detail payloads carry
/// a bare string instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// Full category object.
    Inline(Category),
    /// Bare category reference.
    Name(String),
}

impl CategoryRef {
    /// Identifier used by the category filter.
    ///
    /// A bare reference doubles as its own identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Inline(category) => category.id.as_str(),
            Self::Name(name) => name.as_str(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Inline(category) => category.name.as_str(),
            Self::Name(name) => name.as_str(),
        }
    }

    /// Full category when the payload embedded one.
    pub fn as_category(&self) -> Option<&Category> {
        match self {
            Self::Inline(category) => Some(category),
            Self::Name(_) => None,
        }
    }
}

/// Lightweight sub-point embedded in a detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ChildRecord")]
pub struct ChildPoint {
    pub object_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photo_urls: Vec<Option<String>>,
}

/// Sub-point after coordinate clean-up.
///
/// Children are listed even without a location, so an unusable coordinate
/// pair becomes `None` rather than removing the child.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedChild {
    pub object_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Point record exactly as the backend sends it.
///
/// Decoding only requires an identifier: mistyped optional fields decode as
/// absent and malformed children are skipped, so the coordinate check alone
/// decides whether the record is usable. Unknown fields are captured in
/// `extra` and survive normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PointRecord")]
pub struct RawPoint {
    pub object_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub lat: Option<Value>,
    pub lon: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photo_urls: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photo_ids: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildPoint>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Display-ready point with finite coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    pub object_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photo_urls: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photo_ids: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildPoint>,
    /// Best preview image, filled in by the image resolver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NormalizedPoint {
    /// Output keys computed here rather than copied from the backend.
    pub const DERIVED_KEYS: [&'static str; 1] = ["imageUrl"];

    /// Resolved category identifier, if the point has a category.
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::id)
    }
}

/// Record without a usable identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record has no objectId or id")]
pub struct MissingObjectId;

/// Wire shape of a point record; every field is taken as loose JSON.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointRecord {
    object_id: Option<Value>,
    name: Option<Value>,
    description: Option<Value>,
    lat: Option<Value>,
    lon: Option<Value>,
    #[serde(rename = "type")]
    category: Option<Value>,
    neighborhood: Option<Value>,
    address: Option<Value>,
    country: Option<Value>,
    contact: Option<Value>,
    photo_urls: Option<Value>,
    photo_ids: Option<Value>,
    parent_id: Option<Value>,
    children: Option<Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Wire shape of an embedded sub-point.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChildRecord {
    object_id: Option<Value>,
    id: Option<Value>,
    name: Option<Value>,
    description: Option<Value>,
    lat: Option<Value>,
    lon: Option<Value>,
    #[serde(rename = "type")]
    category: Option<Value>,
    photo_urls: Option<Value>,
}

fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        _ => None,
    }
}

fn identifier(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn coordinate(value: Option<Value>) -> Option<Value> {
    value.filter(|value| !value.is_null())
}

fn photo_list(value: Option<Value>) -> Vec<Option<String>> {
    match value {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .map(|entry| text(Some(entry)))
            .collect(),
        _ => Vec::new(),
    }
}

fn category(value: Option<Value>) -> Option<CategoryRef> {
    value.and_then(|value| serde_json::from_value(value).ok())
}

fn children(value: Option<Value>) -> Vec<ChildPoint> {
    match value {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    }
}

impl TryFrom<PointRecord> for RawPoint {
    type Error = MissingObjectId;

    fn try_from(record: PointRecord) -> Result<Self, Self::Error> {
        let PointRecord {
            object_id,
            name,
            description,
            lat,
            lon,
            category: category_value,
            neighborhood,
            address,
            country,
            contact,
            photo_urls,
            photo_ids,
            parent_id,
            children: children_value,
            mut extra,
        } = record;
        // `id` stands in for `objectId` only when the latter is absent.
        let object_id = match identifier(object_id) {
            Some(id) => id,
            None => identifier(extra.remove("id")).ok_or(MissingObjectId)?,
        };
        Ok(Self {
            object_id,
            name: text(name).unwrap_or_default(),
            description: text(description),
            lat: coordinate(lat),
            lon: coordinate(lon),
            category: category(category_value),
            neighborhood: text(neighborhood),
            address: text(address),
            country: text(country),
            contact: text(contact),
            photo_urls: photo_list(photo_urls),
            photo_ids: photo_list(photo_ids),
            parent_id: identifier(parent_id),
            children: children(children_value),
            extra,
        })
    }
}

impl TryFrom<ChildRecord> for ChildPoint {
    type Error = MissingObjectId;

    fn try_from(record: ChildRecord) -> Result<Self, Self::Error> {
        let object_id = identifier(record.object_id)
            .or_else(|| identifier(record.id))
            .ok_or(MissingObjectId)?;
        Ok(Self {
            object_id,
            name: text(record.name).unwrap_or_default(),
            description: text(record.description),
            lat: coordinate(record.lat),
            lon: coordinate(record.lon),
            category: category(record.category),
            photo_urls: photo_list(record.photo_urls),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_inline_and_bare_categories() {
        let inline: RawPoint = serde_json::from_value(json!({
            "objectId": "1",
            "name": "Catedral",
            "type": { "id": "t1", "name": "Igreja", "icon": "church", "color": "#fff" }
        }))
        .expect("inline category decodes");
        let bare: RawPoint = serde_json::from_value(json!({
            "objectId": "2",
            "name": "Praça",
            "type": "Monumento"
        }))
        .expect("bare category decodes");

        assert_eq!(inline.category.as_ref().map(CategoryRef::id), Some("t1"));
        assert_eq!(inline.category.as_ref().map(CategoryRef::name), Some("Igreja"));
        assert_eq!(bare.category.as_ref().map(CategoryRef::name), Some("Monumento"));
        assert!(bare.category.as_ref().and_then(CategoryRef::as_category).is_none());
    }

    #[rstest]
    fn tolerates_null_lists_and_entries() {
        let point: RawPoint = serde_json::from_value(json!({
            "objectId": "1",
            "photoUrls": null,
            "photoIds": ["a.jpg", null, ""],
            "children": null
        }))
        .expect("nullable lists decode");

        assert!(point.photo_urls.is_empty());
        assert_eq!(point.photo_ids.len(), 3);
        assert!(point.children.is_empty());
        assert_eq!(point.name, "");
    }

    #[rstest]
    fn keeps_unknown_fields() {
        let point: RawPoint = serde_json::from_value(json!({
            "objectId": "1",
            "lat": "-30.885",
            "lon": -55.51,
            "yearBuilt": 1913
        }))
        .expect("decodes");

        assert_eq!(point.extra.get("yearBuilt"), Some(&json!(1913)));
        assert_eq!(point.lat, Some(json!("-30.885")));
    }

    #[rstest]
    fn object_id_wins_over_id_when_both_are_sent() {
        let point: RawPoint = serde_json::from_value(json!({
            "objectId": "abc",
            "id": "legacy-7",
            "lat": "-30.885",
            "lon": "-55.51"
        }))
        .expect("record with both identifiers decodes");

        assert_eq!(point.object_id, "abc");
        assert_eq!(point.extra.get("id"), Some(&json!("legacy-7")));
    }

    #[rstest]
    fn malformed_child_is_skipped_without_losing_parent() {
        let point: RawPoint = serde_json::from_value(json!({
            "objectId": "fort",
            "lat": "-30.885",
            "lon": "-55.51",
            "children": [
                { "name": "no identifier" },
                { "objectId": "room", "name": "Armoury" },
                "not an object"
            ]
        }))
        .expect("parent decodes");

        let ids: Vec<&str> = point.children.iter().map(|c| c.object_id.as_str()).collect();
        assert_eq!(ids, ["room"]);
    }

    #[rstest]
    #[case(json!({ "objectId": "1", "name": null, "lat": "-30.885", "lon": "-55.51" }))]
    #[case(json!({ "objectId": "1", "name": 42, "lat": "-30.885", "lon": "-55.51" }))]
    #[case(json!({ "objectId": "1", "neighborhood": 3, "lat": "-30.885", "lon": "-55.51" }))]
    #[case(json!({ "objectId": "1", "photoUrls": "a.jpg", "lat": "-30.885", "lon": "-55.51" }))]
    #[case(json!({ "objectId": "1", "type": 7, "lat": "-30.885", "lon": "-55.51" }))]
    fn mistyped_optional_fields_decode_as_absent(#[case] value: Value) {
        let point: RawPoint = serde_json::from_value(value).expect("record still decodes");

        assert_eq!(point.object_id, "1");
        assert_eq!(point.lat, Some(json!("-30.885")));
    }

    #[rstest]
    #[case(json!({ "name": "anonymous", "lat": 1, "lon": 1 }))]
    #[case(json!({ "objectId": "", "lat": 1, "lon": 1 }))]
    fn records_without_identifier_are_rejected(#[case] value: Value) {
        assert!(serde_json::from_value::<RawPoint>(value).is_err());
    }

    #[rstest]
    fn accepts_id_alias() {
        let point: RawPoint =
            serde_json::from_value(json!({ "id": "abc", "name": "A" })).expect("alias decodes");
        assert_eq!(point.object_id, "abc");
    }
}
