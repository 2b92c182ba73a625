//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **backend_api**: reqwest-backed adapters for the remote REST backend
//!   that stores points, accounts and files.
//!
//! Adapters are thin translators that convert between domain types and
//! transport representations. They contain no business logic.

pub mod backend_api;
