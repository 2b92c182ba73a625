//! Remote REST backend adapters.
//!
//! [`BackendApi`] implements the points, auth and file ports with one shared
//! reqwest connection pool. [`UnconfiguredBackend`] stands in when no
//! backend URL is set.

mod auth;
mod client;
mod dto;
mod files;
mod points;
mod unconfigured;

pub use client::BackendApi;
pub use unconfigured::UnconfiguredBackend;
