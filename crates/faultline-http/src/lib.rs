//! Faultline HTTP: faults as axum responses
//!
//! A handler returns [`FaultResponse`] (usually through [`ApiResult`]) and
//! the client receives the fault's HTTP status with its serialized record
//! as the JSON body. Every fault is logged on the way out.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use faultline_core::{Fault, FaultSpec, Variant};

/// Handler result whose error side renders as a fault
pub type ApiResult<T> = Result<T, FaultResponse>;

/// Response wrapper for a [`Fault`]
#[derive(Debug)]
pub struct FaultResponse(pub Fault);

impl FaultResponse {
    pub fn fault(&self) -> &Fault {
        &self.0
    }

    pub fn into_inner(self) -> Fault {
        self.0
    }
}

impl From<Fault> for FaultResponse {
    fn from(fault: Fault) -> Self {
        FaultResponse(fault)
    }
}

impl IntoResponse for FaultResponse {
    fn into_response(self) -> Response {
        let fault = self.0;
        let status = status_of(&fault);
        log_fault(&fault, status);
        (status, Json(fault.to_array())).into_response()
    }
}

/// HTTP status for a fault. Codes that are not 4xx/5xx become 500.
pub fn status_of(fault: &Fault) -> StatusCode {
    StatusCode::from_u16(fault.http_code())
        .ok()
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn log_fault(fault: &Fault, status: StatusCode) {
    let file = fault.file_relative();
    let cause = fault.cause().map(|c| c.to_string());

    if status.is_server_error() {
        tracing::error!(
            kind = fault.type_name(),
            key = fault.key(),
            code = status.as_u16(),
            file = %file,
            line = fault.line(),
            cause = ?cause,
            "{}",
            fault.message()
        );
    } else {
        tracing::warn!(
            kind = fault.type_name(),
            key = fault.key(),
            code = status.as_u16(),
            file = %file,
            line = fault.line(),
            "{}",
            fault.message()
        );
    }
}

/// Router fallback answering unknown routes with a not-found fault
pub async fn route_not_found(uri: Uri) -> FaultResponse {
    Fault::build(
        &Variant::NOT_FOUND,
        FaultSpec::new()
            .key("route.not-found")
            .fallback("No route for {{ path }}")
            .datum("path", uri.path()),
    )
    .into()
}
