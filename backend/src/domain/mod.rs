//! Domain primitives, the point pipeline and the use-case services.
//!
//! Purpose: turn loosely typed backend records into display-ready points
//! and markers, and orchestrate the backend calls behind the driving ports.
//! Nothing in this module knows about HTTP frameworks or HTTP clients.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId (alias to `trace_id::TraceId`): per-request correlation id.
//! - PointPipeline (alias to `pipeline::PointPipeline`): normalization,
//!   image resolution and marker grouping.
//! - PointsService, AuthService, FilesService: driving port
//!   implementations over the driven ports in [`ports`].

pub mod auth;
pub mod auth_service;
pub mod coordinates;
pub mod error;
pub mod facets;
pub mod files_service;
pub mod filter;
pub mod grouping;
pub mod images;
pub mod map;
pub mod pipeline;
pub mod points;
pub mod points_service;
pub mod ports;
pub mod submission;
pub mod trace_id;

pub use self::auth::{AccessToken, CredentialsValidationError, LoginCredentials, Registration};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::files_service::FilesService;
pub use self::map::MapConfig;
pub use self::pipeline::PointPipeline;
pub use self::points_service::PointsService;
pub use self::trace_id::TraceId;
