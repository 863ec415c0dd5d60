// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request builder
//!
//! A [`Request`] accumulates validated configuration, assembles the final
//! URL and performs one blocking exchange per [`Request::send`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::params::{ParamValue, Params};
use super::response::Response;
use super::transport::{HttpTransport, PreparedRequest, Transport, TransportConfig};
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Supported request methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    /// Every supported method
    pub const ALL: [Method; 2] = [Method::Get, Method::Post];

    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Names are matched exactly, `get` is not a valid method
    fn from_str(s: &str) -> Result<Self> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::invalid_method(s))
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values accepted as a timeout
///
/// Every value coerces to whole seconds: integers as-is, floats truncated,
/// strings by their leading sign and digits (`"15s"` is 15, `"foo"` is 0).
pub trait TimeoutValue: fmt::Display {
    /// Coerce to whole seconds
    fn as_timeout_secs(&self) -> i64;
}

macro_rules! impl_timeout_for_int {
    ($($t:ty),*) => {
        $(
            impl TimeoutValue for $t {
                fn as_timeout_secs(&self) -> i64 {
                    i64::try_from(*self).unwrap_or(i64::MAX)
                }
            }
        )*
    };
}

impl_timeout_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl TimeoutValue for f32 {
    fn as_timeout_secs(&self) -> i64 {
        f64::from(*self).as_timeout_secs()
    }
}

impl TimeoutValue for f64 {
    fn as_timeout_secs(&self) -> i64 {
        if self.is_finite() {
            self.trunc() as i64
        } else {
            0
        }
    }
}

impl TimeoutValue for &str {
    fn as_timeout_secs(&self) -> i64 {
        leading_integer(self)
    }
}

impl TimeoutValue for String {
    fn as_timeout_secs(&self) -> i64 {
        leading_integer(self)
    }
}

/// Integer value of the leading `[+-]digits` of a string, 0 if there are none
fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let value = digits
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -value
    } else {
        value
    }
}

/// HTTP request builder
///
/// Setters validate their input and leave the request untouched on error.
///
/// ```rust,no_run
/// use kirje::{Method, Request};
///
/// # fn main() -> kirje::Result<()> {
/// let mut request = Request::new();
/// request
///     .set_url("https://www.example.com/search")?
///     .set_method(Method::Post)?
///     .set_timeout(10)?
///     .add_query_parameter("q", "kirje")
///     .add_post_parameter("tags", vec!["http", "html"]);
///
/// let response = request.send()?;
/// println!("{}", response.status_code());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    url: Option<String>,
    method: Method,
    query_parameters: Params,
    post_parameters: Params,
    timeout: u64,
    validate_tls: bool,
    user_agent: String,
    last_response: Option<Response>,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            url: None,
            method: Method::Get,
            query_parameters: Params::new(),
            post_parameters: Params::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
            validate_tls: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            last_response: None,
        }
    }
}

impl Request {
    /// Create an empty GET request with no URL
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request with an optional URL, method and TLS validation flag
    ///
    /// Only pass `validate_tls = false` for debugging.
    pub fn with(url: Option<&str>, method: impl AsRef<str>, validate_tls: bool) -> Result<Self> {
        let mut request = Self::new();
        if let Some(url) = url {
            request.set_url(url)?;
        }
        request
            .set_method(method)?
            .set_validate_tls(validate_tls);
        Ok(request)
    }

    /// Set the request URL
    pub fn set_url(&mut self, url: impl Into<String>) -> Result<&mut Self> {
        let url = url.into();
        if !Self::is_valid_url(&url) {
            return Err(Error::invalid_url(url));
        }
        self.url = Some(url);
        Ok(self)
    }

    /// Get the request URL, if one is set
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Set the request method (`Method` or its exact name)
    pub fn set_method(&mut self, method: impl AsRef<str>) -> Result<&mut Self> {
        self.method = method.as_ref().parse()?;
        Ok(self)
    }

    /// Get the request method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Set the timeout in seconds, used for both connect and total time
    pub fn set_timeout<T: TimeoutValue>(&mut self, timeout: T) -> Result<&mut Self> {
        let secs = timeout.as_timeout_secs();
        if secs <= 0 {
            return Err(Error::invalid_timeout(timeout.to_string()));
        }
        self.timeout = secs as u64;
        Ok(self)
    }

    /// Get the timeout in seconds
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Enable or disable TLS certificate validation
    pub fn set_validate_tls(&mut self, validate: bool) -> &mut Self {
        if !validate {
            tracing::warn!("TLS certificate validation disabled");
        }
        self.validate_tls = validate;
        self
    }

    /// Whether TLS certificates are validated
    pub fn validate_tls(&self) -> bool {
        self.validate_tls
    }

    /// Override the user agent
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) -> &mut Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Get the user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Add or overwrite a query string parameter
    pub fn add_query_parameter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> &mut Self {
        self.query_parameters.insert(key, value);
        self
    }

    /// Get all query parameters
    pub fn query_parameters(&self) -> &Params {
        &self.query_parameters
    }

    /// Add or overwrite a POST parameter
    ///
    /// This does not change the method; POST parameters are ignored for GET.
    pub fn add_post_parameter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> &mut Self {
        self.post_parameters.insert(key, value);
        self
    }

    /// Get all POST parameters
    pub fn post_parameters(&self) -> &Params {
        &self.post_parameters
    }

    /// Full request URL: the base URL plus the encoded query parameters
    ///
    /// `None` until a URL is set.
    pub fn request_url(&self) -> Option<String> {
        let base = self.url.as_deref()?;

        if self.query_parameters.is_empty() {
            return Some(base.to_string());
        }

        let separator = match base.find('?') {
            Some(pos) if pos > 0 => '&',
            _ => '?',
        };

        Some(format!(
            "{}{}{}",
            base,
            separator,
            self.query_parameters.encode()
        ))
    }

    /// Build the wire-level request
    pub fn prepare(&self) -> Result<PreparedRequest> {
        let url = self.request_url().ok_or(Error::MissingUrl)?;

        let body = match self.method {
            Method::Post if !self.post_parameters.is_empty() => {
                Some(self.post_parameters.encode())
            }
            _ => None,
        };

        Ok(PreparedRequest {
            method: self.method,
            url,
            body,
        })
    }

    /// Transport settings derived from this request
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::default()
            .validate_tls(self.validate_tls)
            .timeout(Duration::from_secs(self.timeout))
            .user_agent(self.user_agent.clone())
    }

    /// Submit the request and return the parsed response
    ///
    /// HTTP error statuses are returned as ordinary responses; only
    /// transport failures are errors. Redirects are followed by the client,
    /// and header names in the returned response are lower-case.
    pub fn send(&mut self) -> Result<&Response> {
        self.send_with(&HttpTransport::new())
    }

    /// Submit the request through a specific transport
    pub fn send_with<T: Transport + ?Sized>(&mut self, transport: &T) -> Result<&Response> {
        let prepared = self.prepare()?;
        let config = self.transport_config();

        tracing::debug!(
            method = %prepared.method,
            url = %prepared.url,
            timeout_secs = self.timeout,
            "Sending request"
        );

        let raw = transport.execute(&prepared, &config)?;
        let response = Response::from_bytes(&raw);

        Ok(&*self.last_response.insert(response))
    }

    /// The response of the most recent successful send
    pub fn last_response(&self) -> Option<&Response> {
        self.last_response.as_ref()
    }

    /// Check whether a string is an absolute URL with a scheme and a host
    pub fn is_valid_url(url: &str) -> bool {
        if url.is_empty()
            || url
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || c == '\\')
        {
            return false;
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        // The parser inserts a missing `//` for special schemes, so the
        // authority marker has to be checked on the input itself.
        let has_authority = url
            .get(parsed.scheme().len() + 1..)
            .map(|rest| rest.starts_with("//"))
            .unwrap_or(false);

        has_authority && parsed.host_str().map(|h| !h.is_empty()).unwrap_or(false)
    }

    /// Check whether a string names a supported method
    pub fn is_valid_method(method: &str) -> bool {
        method.parse::<Method>().is_ok()
    }

    /// Check whether a value coerces to a positive timeout
    pub fn is_valid_timeout<T: TimeoutValue>(timeout: T) -> bool {
        timeout.as_timeout_secs() > 0
    }
}
