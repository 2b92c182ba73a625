//! Shared reqwest client for the remote REST backend.
//!
//! This adapter owns transport details only: URL construction, bearer
//! headers, timeout and HTTP status mapping. Port implementations live in the
//! sibling modules.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use tracing::debug;

use super::dto::error_message;
use crate::domain::ports::BackendError;

const USER_AGENT: &str = concat!("historian/", env!("CARGO_PKG_VERSION"));

/// Backend adapter implementing the points, auth and file ports.
#[derive(Debug, Clone)]
pub struct BackendApi {
    client: Client,
    base: Url,
    token: Option<String>,
}

/// Raw reply of a successful backend call.
pub(super) struct BackendReply {
    pub(super) headers: HeaderMap,
    pub(super) body: Vec<u8>,
}

impl BackendApi {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `token` is sent as a bearer credential on catalogue and upload calls.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, token: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base,
            token: token.filter(|value| !value.trim().is_empty()),
        })
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    pub(super) fn endpoint<'a, I>(&self, segments: I) -> Result<Url, BackendError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::transport(format!("invalid backend URL {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Request carrying the configured service token, if any.
    pub(super) fn service_request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.request(method, url);
        match self.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Request without credentials.
    pub(super) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
    }

    /// Request carrying a caller-supplied bearer token.
    pub(super) fn user_request(&self, method: Method, url: Url, token: &str) -> RequestBuilder {
        self.request(method, url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Send `request` and return the body of a successful reply.
    pub(super) async fn send(&self, request: RequestBuilder) -> Result<BackendReply, BackendError> {
        let response: Response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "backend replied");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(BackendReply {
            headers,
            body: body.to_vec(),
        })
    }
}

pub(super) fn map_transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::timeout(error.to_string())
    } else if error.is_decode() {
        BackendError::decode(error.to_string())
    } else {
        BackendError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> BackendError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            BackendError::timeout(format!("status {}", status.as_u16()))
        }
        _ => BackendError::rejected(status.as_u16(), error_message(&preview)),
    }
}

pub(super) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
