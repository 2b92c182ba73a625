//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`PointsRepository`, `AuthGateway`, `FileStore`) are
//! implemented by outbound adapters and fail with [`BackendError`]. Driving
//! ports (`PointsQuery`, `PointsCommand`, `AccountService`, `FilesProxy`) are
//! implemented by the domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod auth_gateway;
mod backend_error;
mod file_store;
mod files_proxy;
mod points_command;
mod points_query;
mod points_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{AuthGateway, AuthSession, FixtureAuthGateway};
pub use backend_error::{BackendError, NOT_CONFIGURED_MESSAGE};
#[cfg(test)]
pub use file_store::MockFileStore;
pub use file_store::{
    FALLBACK_CONTENT_TYPE, FilePath, FilePathError, FileStore, StoredFile, Upload,
};
#[cfg(test)]
pub use files_proxy::MockFilesProxy;
pub use files_proxy::FilesProxy;
#[cfg(test)]
pub use points_command::MockPointsCommand;
pub use points_command::{CreatedPoint, PointsCommand, SavedPoint};
#[cfg(test)]
pub use points_query::MockPointsQuery;
pub use points_query::{PointListing, PointsQuery};
#[cfg(test)]
pub use points_repository::MockPointsRepository;
pub use points_repository::{FixturePointsRepository, PointsRepository};
