// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for kirje
//!
//! Two families matter to callers: validation errors raised synchronously by
//! the request setters, and transport errors raised by `send` when the network
//! layer fails below HTTP. HTTP error statuses (4xx/5xx) are never errors.

use thiserror::Error;

/// Result type alias for kirje operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for kirje
#[derive(Error, Debug)]
pub enum Error {
    /// Request URL is not an absolute URL with a scheme and a host
    #[error("Invalid request URL '{0}' given")]
    InvalidUrl(String),

    /// Request method is not one of the supported methods
    #[error("Invalid request method '{0}' given")]
    InvalidMethod(String),

    /// Timeout does not coerce to a positive number of seconds
    #[error("Invalid timeout '{0}' given")]
    InvalidTimeout(String),

    /// `send` was called before a request URL was set
    #[error("Request URL has not been set")]
    MissingUrl,

    /// Network layer failed (DNS, TLS, refused connection, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// I/O error while reading a saved raw response
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Error::InvalidUrl(url.into())
    }

    /// Create an invalid method error
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Error::InvalidMethod(method.into())
    }

    /// Create an invalid timeout error
    pub fn invalid_timeout(timeout: impl Into<String>) -> Self {
        Error::InvalidTimeout(timeout.into())
    }

    /// Check if this error was raised by input validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidUrl(_)
                | Error::InvalidMethod(_)
                | Error::InvalidTimeout(_)
                | Error::MissingUrl
        )
    }

    /// Check if this error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a transport timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors() {
        assert!(Error::invalid_url("example.com").is_validation());
        assert!(Error::invalid_method("PUT").is_validation());
        assert!(Error::invalid_timeout("0").is_validation());
        assert!(Error::MissingUrl.is_validation());
        assert!(!Error::MissingUrl.is_transport());
        assert!(!Error::MissingUrl.is_timeout());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::invalid_url("$!$").to_string(),
            "Invalid request URL '$!$' given"
        );
        assert_eq!(
            Error::invalid_method("DELETE").to_string(),
            "Invalid request method 'DELETE' given"
        );
    }

    #[test]
    fn test_io_error_is_not_validation() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_validation());
        assert!(!err.is_transport());
    }
}
