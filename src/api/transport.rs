//! HTTP transport backed by `reqwest`.
//!
//! Executes an [`ApiRequest`] and reports what happened as an [`ApiResponse`].
//! Every outcome, including connection failures, comes back as a value so the
//! runtime can always hand a response event to the core.

use super::messages::{ApiRequest, ApiResponse, HttpMethod};
use reqwest::Client;

/// Shared HTTP client. Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Sends the request and collects status and body.
    #[tracing::instrument(level = "debug", skip(self, request), fields(
        request_id = request.context.request_id,
        method = request.method.as_str(),
        url = %request.url,
    ))]
    pub async fn execute(&self, request: &ApiRequest) -> ApiResponse {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "request did not complete");
                return ApiResponse::TransportFailed(e.to_string());
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => {
                tracing::debug!(status, body_len = body.len(), "response received");
                ApiResponse::Received { status, body: body.to_vec() }
            }
            Err(e) => {
                tracing::debug!(status, error = %e, "failed to read response body");
                ApiResponse::TransportFailed(format!("HTTP {status}: failed to read body: {e}"))
            }
        }
    }
}
