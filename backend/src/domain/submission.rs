//! Validation of user-entered point drafts.
//!
//! The creation form sends coordinates as free text, possibly with a comma
//! as decimal separator. Drafts are validated into a [`NewPoint`] before the
//! backend is called.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::coordinates::parse_coordinate;

/// Point draft as submitted by the historian.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PointDraft {
    #[schema(example = "Palácio Moysés Vianna")]
    pub name: String,
    /// Number or text such as `"-30,885"`.
    #[schema(value_type = Option<String>, example = "-30.885")]
    pub lat: Option<Value>,
    #[schema(value_type = Option<String>, example = "-55.510")]
    pub lon: Option<Value>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub type_id: Option<String>,
    pub parent_id: Option<String>,
    /// Free-form extra attributes forwarded untouched.
    #[schema(value_type = Object)]
    pub custom_fields: BTreeMap<String, Value>,
}

/// Reasons a draft is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftValidationError {
    /// Name missing or blank.
    EmptyName,
    /// Latitude or longitude missing or blank.
    MissingCoordinates,
    /// Latitude or longitude not a finite number.
    InvalidCoordinates,
}

impl DraftValidationError {
    /// Form field the error refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::MissingCoordinates | Self::InvalidCoordinates => "coordinates",
        }
    }

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::MissingCoordinates => "missing_coordinates",
            Self::InvalidCoordinates => "invalid_coordinates",
        }
    }
}

impl fmt::Display for DraftValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "point name is required"),
            Self::MissingCoordinates => write!(f, "latitude and longitude are required"),
            Self::InvalidCoordinates => write!(
                f,
                "invalid coordinates; use numbers such as -30.885, -55.510"
            ),
        }
    }
}

impl std::error::Error for DraftValidationError {}

/// Validated payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoint {
    pub name: String,
    pub description: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub type_id: Option<String>,
    pub parent_id: Option<String>,
    #[serde(flatten)]
    pub custom_fields: BTreeMap<String, Value>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

impl TryFrom<PointDraft> for NewPoint {
    type Error = DraftValidationError;

    fn try_from(draft: PointDraft) -> Result<Self, Self::Error> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DraftValidationError::EmptyName);
        }
        if is_blank(draft.lat.as_ref()) || is_blank(draft.lon.as_ref()) {
            return Err(DraftValidationError::MissingCoordinates);
        }
        let (Some(lat), Some(lon)) = (
            draft.lat.as_ref().and_then(parse_coordinate),
            draft.lon.as_ref().and_then(parse_coordinate),
        ) else {
            return Err(DraftValidationError::InvalidCoordinates);
        };

        Ok(Self {
            name: name.to_owned(),
            description: blank_to_none(draft.description),
            lat,
            lon,
            address: blank_to_none(draft.address),
            neighborhood: blank_to_none(draft.neighborhood),
            type_id: blank_to_none(draft.type_id),
            parent_id: blank_to_none(draft.parent_id),
            custom_fields: draft.custom_fields,
        })
    }
}
