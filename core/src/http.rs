//! HTTP transport types and the `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data. `CacheflyClient` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network; a `Transport` executes the round-trip in between. The default
//! transport is a blocking `ureq` agent, tests swap in recording or scripted
//! transports to count calls.
//!
//! All fields use owned types (`String`, `Vec`) so values can be logged,
//! recorded and replayed freely.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `CacheflyClient::build_*` methods and handed to a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Returned by a `Transport`, then passed to `CacheflyClient::parse_*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok` data; only failures
/// to complete the exchange (connect, timeout, read) are errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// Status-code-as-error is disabled so 4xx/5xx responses reach the client's
/// status handling. The global timeout bounds the whole exchange.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&url), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&url), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty(),
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    v.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(%method, %url, status, "cachefly round-trip complete");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
