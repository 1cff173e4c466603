//! HTTP transport types and the blocking `ureq` transport.
//!
//! # Design
//! Requests and responses are plain owned data. `GekkoClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and parses the `HttpResponse`
//! it gets back. A transport reports non-2xx statuses as ordinary responses;
//! only a failure to complete the round-trip is an `Err`. Deciding what a
//! status means is left to the client's parse step.
//!
//! URLs are requoted before they reach ureq: characters that are never legal
//! in a URI are percent-encoded, everything else (reserved characters and
//! existing `%` escapes included) is sent as built.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::debug;

use crate::error::HttpError;

/// Bytes that may not appear anywhere in a URI.
const URI_ILLEGAL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'^');

/// Percent-encode the characters of `url` that are not legal in a URI.
/// Non-ASCII text is encoded as UTF-8.
pub fn requote_url(url: &str) -> String {
    utf8_percent_encode(url, URI_ILLEGAL).to_string()
}

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// The agent is built with `http_status_as_error(false)` so 4xx/5xx come back
/// as `HttpResponse` values.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = requote_url(&request.url);
        debug!(method = request.method.as_str(), url = %url, "sending request");

        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &request.headers).call(),
            (HttpMethod::Delete, _) => {
                with_headers(self.agent.delete(&url), &request.headers).call()
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&url), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(self.agent.post(&url), &request.headers).send_empty()
            }
        };
        let mut response = result.map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        debug!(status, url = %url, "received response");
        Ok(HttpResponse { status, headers, body })
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
