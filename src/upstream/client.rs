//! Outbound request forwarding.

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::config::{RouteConfig, TimeoutConfig};

/// Error type for upstream calls. Never surfaces to the client directly;
/// every variant collapses into an opaque 500 at the edge.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    BuildClient(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("upstream returned a non-JSON body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Result of one forwarded call: the upstream status and its JSON body,
/// or a synthesized 500 when the call failed.
#[derive(Debug)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Stateless forwarder: one inbound request maps to one outbound request.
///
/// The wrapped client is cheaply cloneable and manages its own connections;
/// the forwarder itself holds no per-request state.
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Build a forwarder with the configured outbound timeouts.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()
            .map_err(UpstreamError::BuildClient)?;

        Ok(Self { client })
    }

    /// Forward a matched request to its upstream and relay the result.
    ///
    /// The inbound method is preserved; the only outbound header is
    /// `Content-Type: application/json`. The upstream status code is relayed
    /// as-is on success. Transport failures and non-JSON bodies both yield a
    /// 500 with a fixed message naming the upstream.
    pub async fn forward(
        &self,
        route: &RouteConfig,
        method: Method,
        rest: &str,
        query: Option<&str>,
    ) -> ForwardedResponse {
        let target = route.target_url(rest, query);

        tracing::info!(
            upstream = %route.name,
            url = %target,
            "Forwarding to upstream"
        );

        match self.fetch_json(method, &target).await {
            Ok((status, body)) => ForwardedResponse { status, body },
            Err(e) => {
                tracing::error!(
                    upstream = %route.name,
                    url = %target,
                    error = %e,
                    "Upstream call failed"
                );
                ForwardedResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: json!({
                        "error": format!("Failed to fetch from {} upstream", route.name),
                    }),
                }
            }
        }
    }

    /// Issue the outbound call and parse the body as JSON.
    async fn fetch_json(
        &self,
        method: Method,
        url: &str,
    ) -> Result<(StatusCode, Value), UpstreamError> {
        let response = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .map_err(UpstreamError::Decode)?;

        Ok((status, body))
    }
}
