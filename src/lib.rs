// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # kirje - minimal blocking HTTP client
//!
//! Builds a request from a URL, method, query/POST parameters and a timeout,
//! submits it with one blocking exchange and parses the raw response into a
//! status code, headers, the raw body and, for `text/html`, a document tree.
//!
//! ## Features
//!
//! - Validating setters: bad URLs, methods and timeouts are rejected up front
//! - Form-array encoding for list parameters (`key[0]=a&key[1]=b`)
//! - HTTP error statuses are ordinary responses, only transport failures error
//! - Interim `100 Continue` and 301/302/303 blocks are unwrapped when parsing
//! - HTML bodies parsed with html5ever, tolerant of malformed markup
//!
//! ## Example
//!
//! ```rust,no_run
//! use kirje::{Method, Request};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut request = Request::with(Some("https://example.com"), Method::Get, true)?;
//!     request.add_query_parameter("page", 2);
//!
//!     let response = request.send()?;
//!     println!("{} {:?}", response.status_code(), response.content_type());
//!
//!     if let Some(doc) = response.parsed_body() {
//!         println!("title: {:?}", doc.title());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod http;

// Re-exports for convenience

// DOM
pub use dom::{parse_html, Document, Node, NodeType};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    Headers, HttpTransport, Method, ParamValue, Params, PreparedRequest, Request, Response,
    Transport, TransportConfig, DEFAULT_USER_AGENT,
};

/// kirje version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
