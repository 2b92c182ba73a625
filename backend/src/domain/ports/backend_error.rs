//! Error contract shared by every port backed by the remote REST API.

use crate::domain::Error;

use super::define_port_error;

/// Message returned when no backend URL is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "API URL not configured";

define_port_error! {
    /// Errors surfaced while calling the remote backend.
    pub enum BackendError {
        /// No backend URL was configured at start-up.
        NotConfigured => "backend API URL not configured",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "backend transport failed: {message}",
        /// Backend call exceeded the configured timeout.
        Timeout { message: String } =>
            "backend timeout: {message}",
        /// Backend answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "backend rejected request with status {status}: {message}",
        /// Backend response could not be decoded.
        Decode { message: String } =>
            "backend response decode failed: {message}",
    }
}

impl BackendError {
    /// Upstream status for rejected calls.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured | Self::Transport { .. } | Self::Timeout { .. }
        )
    }
}

fn rejected_message(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotConfigured => Error::service_unavailable(NOT_CONFIGURED_MESSAGE),
            BackendError::Transport { message } => {
                Error::service_unavailable(format!("backend unavailable: {message}"))
            }
            BackendError::Timeout { message } => {
                Error::service_unavailable(format!("backend timed out: {message}"))
            }
            BackendError::Rejected { status, message } => match status {
                400 | 422 => Error::invalid_request(rejected_message(message, "invalid request")),
                401 => Error::unauthorized(rejected_message(message, "unauthorised")),
                403 => Error::forbidden(rejected_message(message, "forbidden")),
                404 => Error::not_found(rejected_message(message, "not found")),
                409 => Error::conflict(rejected_message(message, "conflict")),
                500..=599 => Error::service_unavailable(rejected_message(
                    message,
                    &format!("backend error: HTTP {status}"),
                )),
                _ => Error::internal(format!("unexpected backend status {status}: {message}")),
            },
            BackendError::Decode { message } => {
                Error::internal(format!("backend response decode failed: {message}"))
            }
        }
    }
}
