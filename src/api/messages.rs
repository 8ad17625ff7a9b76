//! Request and response types exchanged between the core and the runtime.
//!
//! The core never performs I/O. It emits [`ApiRequest`] values inside actions
//! and receives the matching [`ApiResponse`] back inside an event, correlated
//! by the [`RequestContext`] that travels with the request.

use crate::domain::{Operation, VehicleId, VehicleStatus};

/// HTTP method of a remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Correlation data echoed back with the response.
///
/// `generation` identifies the mount the request was issued under; responses
/// from an older generation are dropped by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Monotonic per-dashboard request counter, for logs.
    pub request_id: u64,
    /// Mount generation at the time the request was built.
    pub generation: u64,
    /// Which remote operation this is.
    pub operation: Operation,
    /// Target vehicle for status updates.
    pub vehicle_id: Option<VehicleId>,
    /// Requested status for creates and status updates.
    pub target_status: Option<VehicleStatus>,
}

impl RequestContext {
    #[must_use]
    pub const fn new(operation: Operation, request_id: u64, generation: u64) -> Self {
        Self {
            request_id,
            generation,
            operation,
            vehicle_id: None,
            target_status: None,
        }
    }
}

/// A fully-built HTTP request ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub context: RequestContext,
    pub method: HttpMethod,
    pub url: String,
    /// JSON body; sent with `Content-Type: application/json` when present.
    pub body: Option<serde_json::Value>,
}

/// What the transport observed for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// The service answered, with any status code.
    Received {
        status: u16,
        body: Vec<u8>,
    },
    /// The request never produced a response (DNS, connect, TLS, ...).
    TransportFailed(String),
}

impl ApiResponse {
    /// Convenience constructor for a JSON body, mostly for tests and fakes.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::Received {
            status,
            body: body.to_string().into_bytes(),
        }
    }
}
