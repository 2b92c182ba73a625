//! Test helpers for inbound HTTP handlers.

use actix_web::dev::ServiceResponse;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use std::sync::Arc;

use super::api_scope;
use super::state::{HttpState, HttpStatePorts};
use crate::domain::MapConfig;
use crate::domain::ports::{MockAccountService, MockFilesProxy, MockPointsCommand, MockPointsQuery};

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub struct TestPorts {
    pub points: MockPointsQuery,
    pub point_commands: MockPointsCommand,
    pub accounts: MockAccountService,
    pub files: MockFilesProxy,
    pub map: MapConfig,
}

impl TestPorts {
    /// Wrap the mocks in handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        let ports = HttpStatePorts {
            points: Arc::new(self.points),
            point_commands: Arc::new(self.point_commands),
            accounts: Arc::new(self.accounts),
            files: Arc::new(self.files),
        };
        web::Data::new(HttpState::new(ports, self.map))
    }
}

/// Serve `request` through the full `/api` scope backed by `ports`.
pub async fn call_api(ports: TestPorts, request: TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(ports.into_state())
            .service(api_scope()),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}
