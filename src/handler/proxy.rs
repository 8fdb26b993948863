//! Upstream proxy module
//!
//! Fetch-and-relay for the price endpoints: one outbound GET per inbound
//! request, upstream bytes relayed untouched, any failure turned into a 500
//! with a JSON error envelope.

use crate::config::{ProxyConfig, UpstreamTarget};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use std::error::Error as _;
use thiserror::Error;

/// Why an upstream fetch produced no payload
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build upstream client: {}", describe(.0))]
    Client(#[source] reqwest::Error),
    /// Connect, DNS, TLS or timeout failure
    #[error("{}", describe(.0))]
    Request(#[source] reqwest::Error),
    #[error("HTTP Error {}: {}", .0.as_u16(), .0.canonical_reason().unwrap_or("Unknown"))]
    Status(StatusCode),
    #[error("failed to read upstream body: {}", describe(.0))]
    Body(#[source] reqwest::Error),
}

/// reqwest keeps the useful part (refused, timed out, bad cert) in the
/// source chain, so flatten it into one line.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Outbound HTTP client shared by every proxied request
pub struct UpstreamClient {
    client: reqwest::Client,
    user_agent: String,
    accept: String,
}

impl UpstreamClient {
    pub fn new(config: &ProxyConfig) -> Result<Self, FetchError> {
        // With rustls, accepting invalid certs swaps in a verifier that also
        // skips the hostname check.
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.insecure_skip_verify);
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            accept: config.accept.clone(),
        })
    }

    /// GET `url` with browser headers; 2xx bodies only
    pub async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, self.accept.as_str())
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.bytes().await.map_err(FetchError::Body)
    }
}

/// Fetch the target and build the browser-facing response
pub async fn relay(client: &UpstreamClient, target: &UpstreamTarget) -> Response<Full<Bytes>> {
    match client.fetch(&target.url).await {
        Ok(body) => http::build_proxied_response(body),
        Err(e) => {
            logger::log_warning(&format!("Upstream '{}' failed: {e}", target.name));
            http::build_json_error_response(&e.to_string())
        }
    }
}
