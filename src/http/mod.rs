// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for kirje
//!
//! [`Request`] builds and sends a single blocking request; the raw capture it
//! gets back is parsed into a [`Response`].

mod params;
mod request;
mod response;
mod transport;

pub use params::{ParamValue, Params};
pub use request::{Method, Request, TimeoutValue, DEFAULT_TIMEOUT_SECS};
pub use response::{Headers, Response, MAX_UNWRAP_DEPTH};
pub use transport::{
    HttpTransport, PreparedRequest, Transport, TransportConfig, FORM_CONTENT_TYPE, MAX_TIMEOUT,
};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("kirje/", env!("CARGO_PKG_VERSION"));

/// Header names the parser looks up
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
}
