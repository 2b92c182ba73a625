//! Historian backend-for-frontend.
//!
//! Normalizes points of interest fetched from a remote REST backend, groups
//! them into map markers and proxies authentication, uploads and stored
//! files, so the web frontend talks to a single origin.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
