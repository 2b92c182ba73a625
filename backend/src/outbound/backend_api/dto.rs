//! DTOs for decoding backend JSON responses.
//!
//! Collections are decoded element by element so one malformed record does
//! not hide the rest of the collection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::auth::{AccessToken, LoginCredentials, Registration};
use crate::domain::ports::AuthSession;

/// Decode a JSON array, skipping elements that do not fit `T`.
pub(super) fn decode_records<T>(body: &[u8], kind: &str) -> Result<Vec<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    let values: Vec<Value> = serde_json::from_slice(body)
        .map_err(|error| format!("invalid {kind} collection: {error}"))?;
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(kind, index, %error, "skipping malformed backend record");
                None
            }
        })
        .collect();
    if records.len() < total {
        warn!(kind, total, kept = records.len(), "backend collection had malformed records");
    }
    Ok(records)
}

/// Decode an optional JSON body; an empty body decodes to `null`.
pub(super) fn decode_optional_json(body: &[u8]) -> Result<Value, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|error| format!("invalid JSON payload: {error}"))
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies are searched for `error` then `message`; anything else is
/// used verbatim.
pub(super) fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["error", "message"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_owned))
    });
    from_json.unwrap_or_else(|| body.to_owned())
}

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequestDto<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            username: credentials.email(),
            password: credentials.password(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) name: &'a str,
    pub(super) surname: &'a str,
}

impl<'a> From<&'a Registration> for RegisterRequestDto<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            email: registration.credentials().email(),
            password: registration.credentials().password(),
            name: registration.name(),
            surname: registration.surname(),
        }
    }
}

/// Token-bearing response of the login and register endpoints.
///
/// Backends disagree on the token field name, so all known spellings are
/// accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SessionDto {
    token: Option<String>,
    access_token: Option<String>,
    jwt: Option<String>,
    user: Option<Value>,
}

impl SessionDto {
    /// Build a session, falling back to `fallback_user` when no user is
    /// embedded.
    pub(super) fn into_session(self, fallback_user: impl FnOnce() -> Value) -> AuthSession {
        let token = [self.token, self.access_token, self.jwt]
            .into_iter()
            .flatten()
            .find_map(|candidate| AccessToken::new(&candidate));
        AuthSession {
            token,
            user: self.user.unwrap_or_else(fallback_user),
        }
    }
}
