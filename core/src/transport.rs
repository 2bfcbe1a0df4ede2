//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the only seam that performs I/O. `UreqTransport` disables
//! ureq's status-code-as-error behavior so 4xx/5xx responses come back as
//! data and the interceptor and normalizer decide what they mean; only "no
//! response at all" is a transport error.

use std::time::Duration;

use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, CONTENT_TYPE, JSON};

pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport built on a shared ureq agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    origin: String,
}

impl UreqTransport {
    pub fn new(origin: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.origin, path.trim_start_matches('/'))
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "sending request");

        let result = match request.method {
            HttpMethod::Get => decorate(self.agent.get(&url), request).call(),
            HttpMethod::Delete => decorate(self.agent.delete(&url), request).call(),
            HttpMethod::Post => with_body(decorate(self.agent.post(&url), request), request),
            HttpMethod::Put => with_body(decorate(self.agent.put(&url), request), request),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(%url, status, "response received");
        Ok(HttpResponse { status, headers, body })
    }
}

fn decorate<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}

fn with_body(
    builder: RequestBuilder<ureq::typestate::WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match &request.body {
        Some(body) if request.header(CONTENT_TYPE).is_some() => builder.send(body.as_bytes()),
        Some(body) => builder.content_type(JSON).send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_origin_and_path() {
        let t = UreqTransport::new("http://localhost:3000/", Duration::from_secs(1));
        assert_eq!(t.url("/api/v1/users/list"), "http://localhost:3000/api/v1/users/list");
    }

    #[test]
    fn absolute_paths_bypass_origin() {
        let t = UreqTransport::new("http://localhost:3000", Duration::from_secs(1));
        assert_eq!(t.url("https://other.example.com/api"), "https://other.example.com/api");
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        // Port 9 (discard) on loopback is closed on test machines.
        let t = UreqTransport::new("http://127.0.0.1:9", Duration::from_secs(2));
        let err = t.send(&HttpRequest::new(HttpMethod::Get, "/api/v1/ping")).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
