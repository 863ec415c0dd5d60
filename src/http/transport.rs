// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Blocking transport
//!
//! Performs exactly one request/response exchange and hands back the raw
//! capture (status line, headers, blank line, body) for [`Response`] to parse.
//!
//! [`Response`]: super::Response

use std::time::{Duration, Instant};

use bytes::{BufMut, Bytes, BytesMut};
use reqwest::blocking::{Client, Response as WireResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;

use super::request::Method;
use super::DEFAULT_USER_AGENT;
use crate::error::Result;

/// Content type of POST bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Longest timeout handed to the client; longer values are clamped
pub const MAX_TIMEOUT: Duration = Duration::from_secs(u32::MAX as u64);

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Verify TLS certificates and host names
    pub validate_tls: bool,
    /// Connect timeout and total request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            validate_tls: true,
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
        }
    }
}

impl TransportConfig {
    /// Create a new transport config
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable TLS validation (disable for debugging only)
    pub fn validate_tls(mut self, validate: bool) -> Self {
        self.validate_tls = validate;
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set max redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }
}

/// Wire-level request: final URL, method and encoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Request method
    pub method: Method,
    /// Full URL including the query string
    pub url: String,
    /// Form-encoded body, POST only
    pub body: Option<String>,
}

/// Performs one exchange and returns the raw capture
///
/// Only failures below HTTP are errors. 4xx and 5xx responses must come back
/// as ordinary captures.
pub trait Transport: Send + Sync {
    /// Execute the request
    fn execute(&self, request: &PreparedRequest, config: &TransportConfig) -> Result<Bytes>;
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Transport backed by a blocking reqwest client
///
/// A fresh client is built for every exchange, so no connection outlives it.
///
/// The capture is rebuilt from the final response as reqwest reports it:
/// header names arrive lower-cased and the reason phrase is the canonical one
/// for the status code. Look headers up with [`Response::header`], which falls
/// back to a case-insensitive match.
///
/// [`Response::header`]: super::Response::header
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl HttpTransport {
    /// Create a new transport
    pub fn new() -> Self {
        Self
    }

    fn client(config: &TransportConfig) -> Result<Client> {
        // reqwest adds the timeout to `Instant::now()`, which overflows for
        // huge durations
        let timeout = config.timeout.min(MAX_TIMEOUT);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(timeout)
            .timeout(timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(!config.validate_tls)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(client)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &PreparedRequest, config: &TransportConfig) -> Result<Bytes> {
        let start = Instant::now();
        let client = Self::client(config)?;

        let mut builder = client.request(request.method.into(), request.url.as_str());
        if let Some(ref body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone());
        }

        let response = builder.send().map_err(|e| {
            tracing::debug!(url = %request.url, error = %e, "Transport failure");
            e
        })?;

        let final_url = response.url().to_string();
        let raw = capture(response)?;

        tracing::debug!(
            url = %request.url,
            final_url = %final_url,
            bytes = raw.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        Ok(raw)
    }
}

/// Serialize the final response back into a raw capture
fn capture(response: WireResponse) -> Result<Bytes> {
    let status = response.status();
    let mut raw = BytesMut::new();

    raw.put_slice(
        format!(
            "{:?} {} {}\r\n",
            response.version(),
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .as_bytes(),
    );

    for (name, value) in response.headers() {
        raw.put_slice(name.as_str().as_bytes());
        raw.put_slice(b": ");
        raw.put_slice(value.as_bytes());
        raw.put_slice(b"\r\n");
    }
    raw.put_slice(b"\r\n");

    let body = response.bytes()?;
    raw.put_slice(&body);

    Ok(raw.freeze())
}
