//! Remote vehicle collection client.
//!
//! [`VehicleApi`] knows the service's URL layout and wire formats. It builds
//! requests for the three remote operations and decodes their responses into
//! local outcomes; sending is left to the runtime's transport.
//!
//! # Response normalization
//!
//! The list endpoint answers either with a bare array or with an object
//! wrapping the array under `vehicles`. [`ListPayload`] decodes both shapes in
//! a single step and tags everything else as unrecognized. Each element must
//! be a JSON object.

use super::messages::{ApiRequest, ApiResponse, HttpMethod, RequestContext};
use crate::domain::{DashboardError, Operation, Result, Vehicle, VehicleId, VehicleStatus};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Collection path relative to the configured origin.
const VEHICLES_PATH: &str = "/api/vehicles";

/// Maximum number of body bytes quoted in a failure cause.
const CAUSE_EXCERPT_BYTES: usize = 200;

/// Shape of a list response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPayload {
    /// `[ {vehicle}, ... ]`
    Array(Vec<Vehicle>),
    /// `{ "vehicles": [ {vehicle}, ... ] }`
    Wrapped { vehicles: Vec<Vehicle> },
    /// Anything else, including malformed JSON.
    Unrecognized,
}

impl<'de> Deserialize<'de> for ListPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            list @ Value::Array(_) => serde_json::from_value(list)
                .map(Self::Array)
                .map_err(D::Error::custom),
            Value::Object(mut fields) => match fields.remove("vehicles") {
                Some(list @ Value::Array(_)) => serde_json::from_value(list)
                    .map(|vehicles| Self::Wrapped { vehicles })
                    .map_err(D::Error::custom),
                _ => Err(D::Error::missing_field("vehicles")),
            },
            other => Err(D::Error::custom(format!("unexpected list body: {other}"))),
        }
    }
}

impl ListPayload {
    /// Decodes a response body. Never fails: unknown shapes become `Unrecognized`.
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or(Self::Unrecognized)
    }

    /// Normalizes both recognized shapes to a plain list.
    #[must_use]
    pub fn into_vehicles(self) -> Option<Vec<Vehicle>> {
        match self {
            Self::Array(vehicles) | Self::Wrapped { vehicles } => Some(vehicles),
            Self::Unrecognized => None,
        }
    }
}

/// Request builder and response decoder for `/api/vehicles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleApi {
    base_url: String,
}

impl VehicleApi {
    /// Creates a client for the given origin. Trailing slashes are trimmed.
    ///
    /// ```
    /// use vehicle_dashboard::api::VehicleApi;
    ///
    /// let api = VehicleApi::new("http://fleet.local:5000/");
    /// assert_eq!(api.base_url(), "http://fleet.local:5000");
    /// ```
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{VEHICLES_PATH}", self.base_url)
    }

    fn item_url(&self, id: &VehicleId) -> String {
        format!("{}{VEHICLES_PATH}/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    /// Builds `GET /api/vehicles`.
    #[must_use]
    pub fn list_request(&self, request_id: u64, generation: u64) -> ApiRequest {
        ApiRequest {
            context: RequestContext::new(Operation::List, request_id, generation),
            method: HttpMethod::Get,
            url: self.collection_url(),
            body: None,
        }
    }

    /// Builds `POST /api/vehicles` with `{name, status}`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Validation`] without building anything when
    /// `name` is empty.
    pub fn create_request(
        &self,
        name: &str,
        status: VehicleStatus,
        request_id: u64,
        generation: u64,
    ) -> Result<ApiRequest> {
        if name.is_empty() {
            return Err(DashboardError::Validation("vehicle name is required".to_string()));
        }

        let mut context = RequestContext::new(Operation::Create, request_id, generation);
        context.target_status = Some(status);

        Ok(ApiRequest {
            context,
            method: HttpMethod::Post,
            url: self.collection_url(),
            body: Some(serde_json::json!({ "name": name, "status": status })),
        })
    }

    /// Builds `PUT /api/vehicles/{id}` with `{status}`.
    ///
    /// The id is not checked locally; the service reports unknown ids.
    #[must_use]
    pub fn update_status_request(
        &self,
        id: &VehicleId,
        status: VehicleStatus,
        request_id: u64,
        generation: u64,
    ) -> ApiRequest {
        let mut context = RequestContext::new(Operation::UpdateStatus, request_id, generation);
        context.vehicle_id = Some(id.clone());
        context.target_status = Some(status);

        ApiRequest {
            context,
            method: HttpMethod::Put,
            url: self.item_url(id),
            body: Some(serde_json::json!({ "status": status })),
        }
    }

    /// Decodes a list response into the full collection.
    ///
    /// # Errors
    ///
    /// - [`DashboardError::RequestFailed`] on transport failure or non-2xx status
    /// - [`DashboardError::UnexpectedFormat`] when the body is neither shape
    pub fn decode_list(response: &ApiResponse) -> Result<Vec<Vehicle>> {
        let body = Self::success_body(Operation::List, response)?;
        ListPayload::parse(body).into_vehicles().ok_or_else(|| {
            DashboardError::UnexpectedFormat(format!(
                "expected a vehicle array or {{\"vehicles\": [...]}}, got: {}",
                excerpt(body)
            ))
        })
    }

    /// Checks a create response. The created vehicle is not consumed.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::RequestFailed`] on transport failure or non-2xx status.
    pub fn decode_create(response: &ApiResponse) -> Result<()> {
        Self::success_body(Operation::Create, response).map(|_| ())
    }

    /// Checks a status update response. The body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::RequestFailed`] on transport failure or non-2xx status.
    pub fn decode_update(response: &ApiResponse) -> Result<()> {
        Self::success_body(Operation::UpdateStatus, response).map(|_| ())
    }

    fn success_body(operation: Operation, response: &ApiResponse) -> Result<&[u8]> {
        match response {
            ApiResponse::Received { status, body } if (200..300).contains(status) => Ok(body),
            ApiResponse::Received { status, body } => Err(DashboardError::RequestFailed {
                operation,
                cause: format!("HTTP {status}: {}", excerpt(body)),
            }),
            ApiResponse::TransportFailed(cause) => Err(DashboardError::RequestFailed {
                operation,
                cause: cause.clone(),
            }),
        }
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= CAUSE_EXCERPT_BYTES {
        return text.into_owned();
    }
    let mut end = CAUSE_EXCERPT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> VehicleApi {
        VehicleApi::new("http://fleet.test")
    }

    fn van_json() -> serde_json::Value {
        json!({"id": 1, "name": "Van", "status": "Inactive", "lastUpdated": "2024-01-01T00:00:00Z"})
    }

    #[test]
    fn list_request_targets_collection() {
        let req = api().list_request(7, 2);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://fleet.test/api/vehicles");
        assert_eq!(req.body, None);
        assert_eq!(req.context.operation, Operation::List);
        assert_eq!(req.context.request_id, 7);
        assert_eq!(req.context.generation, 2);
    }

    #[test]
    fn create_request_carries_name_and_status() {
        let req = api().create_request("Truck1", VehicleStatus::Active, 1, 1).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://fleet.test/api/vehicles");
        assert_eq!(req.body, Some(json!({"name": "Truck1", "status": "Active"})));
        assert_eq!(req.context.target_status, Some(VehicleStatus::Active));
    }

    #[test]
    fn create_request_rejects_empty_name() {
        let err = api().create_request("", VehicleStatus::Active, 1, 1).unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
    }

    #[test]
    fn whitespace_name_is_not_empty() {
        assert!(api().create_request(" ", VehicleStatus::Inactive, 1, 1).is_ok());
    }

    #[test]
    fn update_request_encodes_id_segment() {
        let req = api().update_status_request(&VehicleId::new("a b/c"), VehicleStatus::Maintenance, 3, 1);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://fleet.test/api/vehicles/a%20b%2Fc");
        assert_eq!(req.body, Some(json!({"status": "Maintenance"})));
        assert_eq!(req.context.vehicle_id, Some(VehicleId::new("a b/c")));
    }

    #[test]
    fn wrapped_and_bare_lists_normalize_identically() {
        let bare = ApiResponse::json(200, &json!([van_json()]));
        let wrapped = ApiResponse::json(200, &json!({"vehicles": [van_json()], "total": 1}));
        let a = VehicleApi::decode_list(&bare).unwrap();
        let b = VehicleApi::decode_list(&wrapped).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].name, "Van");
    }

    #[test]
    fn empty_list_is_valid() {
        let resp = ApiResponse::json(200, &json!([]));
        assert_eq!(VehicleApi::decode_list(&resp).unwrap(), vec![]);
    }

    #[test]
    fn unknown_shapes_are_unexpected_format() {
        for body in [json!({"data": []}), json!("nope"), json!({"vehicles": "x"}), json!(null)] {
            let resp = ApiResponse::json(200, &body);
            assert!(
                matches!(VehicleApi::decode_list(&resp), Err(DashboardError::UnexpectedFormat(_))),
                "{body}"
            );
        }
        let garbage = ApiResponse::Received { status: 200, body: b"<html>".to_vec() };
        assert!(matches!(VehicleApi::decode_list(&garbage), Err(DashboardError::UnexpectedFormat(_))));
    }

    #[test]
    fn only_object_elements_become_vehicles() {
        for body in [
            json!([["1", "Van", "Active"]]),
            json!({"vehicles": [["1", "Van", "Active"]]}),
            json!([[van_json()]]),
            json!([van_json(), 7]),
        ] {
            let resp = ApiResponse::json(200, &body);
            assert!(
                matches!(VehicleApi::decode_list(&resp), Err(DashboardError::UnexpectedFormat(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn list_with_both_id_keys_decodes() {
        let body = br#"[{"_id":"65f0c1aa","id":"65f0c1aa","name":"Van","status":"Inactive","lastUpdated":"2024-01-01T00:00:00Z","__v":0}]"#;
        let resp = ApiResponse::Received { status: 200, body: body.to_vec() };
        let vehicles = VehicleApi::decode_list(&resp).unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].id.as_str(), "65f0c1aa");
        assert_eq!(vehicles[0].status, VehicleStatus::Inactive);
    }

    #[test]
    fn non_success_status_is_request_failed_with_cause() {
        let resp = ApiResponse::Received { status: 404, body: b"no such vehicle".to_vec() };
        match VehicleApi::decode_update(&resp) {
            Err(DashboardError::RequestFailed { operation, cause }) => {
                assert_eq!(operation, Operation::UpdateStatus);
                assert_eq!(cause, "HTTP 404: no such vehicle");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn transport_failure_is_request_failed() {
        let resp = ApiResponse::TransportFailed("connection refused".into());
        assert!(matches!(
            VehicleApi::decode_list(&resp),
            Err(DashboardError::RequestFailed { operation: Operation::List, .. })
        ));
        assert!(matches!(
            VehicleApi::decode_create(&resp),
            Err(DashboardError::RequestFailed { operation: Operation::Create, .. })
        ));
    }

    #[test]
    fn create_ignores_response_body() {
        let resp = ApiResponse::Received { status: 201, body: b"not even json".to_vec() };
        assert!(VehicleApi::decode_create(&resp).is_ok());
    }

    #[test]
    fn long_bodies_are_truncated_in_causes() {
        let body = "é".repeat(300);
        let text = excerpt(body.as_bytes());
        assert!(text.ends_with("..."));
        assert!(text.len() <= CAUSE_EXCERPT_BYTES + 3);
    }
}
