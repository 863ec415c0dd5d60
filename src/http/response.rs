// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response parsing
//!
//! A [`Response`] is built once from a raw capture: status line(s), headers,
//! a blank line and the body. Interim and redirect status lines (100, 301,
//! 302, 303) are unwrapped so the response reflects the final block only.

use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::headers::CONTENT_TYPE;
use crate::dom::{parse_html, Document};
use crate::error::Result;

/// Boundary between the header section and the body
const HEADER_BODY_SEPARATOR: &str = "\r\n\r\n";

/// Line separator inside the header section
const LINE_SEPARATOR: &str = "\r\n";

/// Status codes whose body holds a further status line, headers and body
const UNWRAPPED_STATUS_CODES: [u16; 4] = [100, 301, 302, 303];

/// Maximum number of interim blocks unwrapped before the current block is
/// kept as final
pub const MAX_UNWRAP_DEPTH: usize = 10;

/// Offset of the 3-digit code in `HTTP/x.y NNN reason`
const STATUS_CODE_OFFSET: usize = 9;

/// Response headers
///
/// Keys are kept exactly as received. A repeated name overwrites the earlier
/// value but keeps its position.
///
/// Captures produced by [`HttpTransport`] carry lower-case names, so prefer
/// [`Headers::find`] or [`Response::header`] over exact-case [`Headers::get`]
/// for live responses.
///
/// [`HttpTransport`]: super::HttpTransport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a header (case-sensitive name)
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get a header by its exact name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by exact name, falling back to the first
    /// case-insensitive match
    pub fn find(&self, name: &str) -> Option<&str> {
        self.get(name).or_else(|| {
            self.entries
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }

    /// Check whether a header with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over headers in the order they were first seen
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// HTTP response representation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    headers: Headers,
    raw_body: String,
    parsed_body: Option<Document>,
}

/// Result of splitting one raw capture
struct RawParts<'a> {
    status_code: u16,
    headers: Headers,
    body: &'a str,
}

impl Response {
    /// Parse a raw response capture
    pub fn parse(raw: &str) -> Self {
        let parts = split_raw(raw);
        let parsed_body = parse_body(&parts.headers, parts.body);

        tracing::debug!(
            status = parts.status_code,
            headers = parts.headers.len(),
            body_len = parts.body.len(),
            parsed = parsed_body.is_some(),
            "Parsed response"
        );

        Self {
            status_code: parts.status_code,
            headers: parts.headers,
            raw_body: parts.body.to_string(),
            parsed_body,
        }
    }

    /// Parse a raw response capture from bytes (invalid UTF-8 is replaced)
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(raw))
    }

    /// Parse a raw response capture saved to disk
    ///
    /// Files without any CRLF have their line endings converted first, so
    /// captures that lost their `\r` still split correctly.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let raw = String::from_utf8_lossy(&bytes);
        Ok(Self::parse(&normalize_line_endings(&raw)))
    }

    /// 3-digit status code, 0 if no status line was found
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Headers of the final response block
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Everything after the header/body separator
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// Parsed body, present only for `text/html` responses
    pub fn parsed_body(&self) -> Option<&Document> {
        self.parsed_body.as_ref()
    }

    /// Get a header value (exact name, then case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.find(name)
    }

    /// Get the full Content-Type value
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Get the media type, without `;` parameters
    pub fn media_type(&self) -> Option<&str> {
        self.content_type().map(media_type)
    }

    /// Check if the media type is `text/html`
    pub fn is_html(&self) -> bool {
        self.media_type()
            .map(|mt| mt.eq_ignore_ascii_case("text/html"))
            .unwrap_or(false)
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Check if status is client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Check if status is server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }
}

impl From<&str> for Response {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Split a capture into status, headers and body, unwrapping interim blocks
fn split_raw(raw: &str) -> RawParts<'_> {
    let mut payload = raw;
    let mut depth = 0;

    'block: loop {
        let (header_section, body) = payload
            .split_once(HEADER_BODY_SEPARATOR)
            .unwrap_or((payload, ""));

        let mut status_code = 0;
        let mut headers = Headers::new();

        for line in header_section.split(LINE_SEPARATOR) {
            if line.is_empty() {
                continue;
            }

            if is_status_line(line) {
                status_code = status_code_of(line);

                if UNWRAPPED_STATUS_CODES.contains(&status_code) {
                    if depth < MAX_UNWRAP_DEPTH {
                        depth += 1;
                        payload = body;
                        continue 'block;
                    }
                    tracing::warn!(
                        status = status_code,
                        depth,
                        "Unwrap depth limit reached, keeping interim response"
                    );
                }
            } else if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim(), value.trim());
            }
        }

        return RawParts {
            status_code,
            headers,
            body,
        };
    }
}

fn is_status_line(line: &str) -> bool {
    line.as_bytes()
        .get(..5)
        .map(|prefix| prefix.eq_ignore_ascii_case(b"HTTP/"))
        .unwrap_or(false)
}

/// Read up to three digits at the fixed status code offset
fn status_code_of(line: &str) -> u16 {
    line.as_bytes()
        .iter()
        .skip(STATUS_CODE_OFFSET)
        .take(3)
        .take_while(|b| b.is_ascii_digit())
        .fold(0u16, |code, b| code * 10 + u16::from(b - b'0'))
}

/// Media type of a Content-Type value
fn media_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
}

fn parse_body(headers: &Headers, body: &str) -> Option<Document> {
    if body.trim().is_empty() {
        return None;
    }

    let content_type = headers.find(CONTENT_TYPE)?;

    match media_type(content_type).to_ascii_lowercase().as_str() {
        "text/html" => Some(parse_html(body)),
        _ => None,
    }
}

fn normalize_line_endings(raw: &str) -> String {
    if raw.contains(LINE_SEPARATOR) {
        raw.to_string()
    } else if raw.contains('\n') {
        raw.replace('\n', LINE_SEPARATOR)
    } else {
        raw.replace('\r', LINE_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML_BODY: &str =
        "<!DOCTYPE html><html><head><title>Test</title></head><body>Test Body</body></html>";

    #[test]
    fn test_empty_response() {
        let resp = Response::parse("");
        assert_eq!(resp.status_code(), 0);
        assert!(resp.headers().is_empty());
        assert_eq!(resp.raw_body(), "");
        assert!(resp.parsed_body().is_none());
        assert_eq!(resp, Response::default());
    }

    #[test]
    fn test_status_line_only() {
        let resp = Response::parse("HTTP/1.1 200 OK");
        assert_eq!(resp.status_code(), 200);
        assert!(resp.headers().is_empty());
        assert_eq!(resp.raw_body(), "");
        assert!(resp.is_success());
    }

    #[test]
    fn test_headers_without_body() {
        let resp = Response::parse(
            "HTTP/1.1 200 OK\r\nConnection: Close\r\nContent-Type: text/html",
        );
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.headers().len(), 2);
        assert_eq!(resp.headers().get("Connection"), Some("Close"));
        assert_eq!(resp.headers().get("Content-Type"), Some("text/html"));
        assert_eq!(resp.raw_body(), "");
        assert!(resp.parsed_body().is_none());
    }

    #[test]
    fn test_malformed_header_lines_are_skipped() {
        let resp = Response::parse(
            "HTTP/1.1 200 OK\r\n\
             Connection: Close\r\n\
             \0\r\n\
             Content-type: text/html; charset=utf-8\r\n\
             Content-Length 4096",
        );
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.headers().len(), 2);
        assert_eq!(resp.headers().get("Connection"), Some("Close"));
        assert_eq!(
            resp.headers().get("Content-type"),
            Some("text/html; charset=utf-8")
        );
        assert!(!resp.headers().contains("Content-Length 4096"));
        assert_eq!(resp.raw_body(), "");
    }

    #[test]
    fn test_continue_block_is_unwrapped() {
        let resp = Response::parse(
            "HTTP/1.1 100 Continue\r\n\
             \r\n\
             HTTP/1.1 200 OK\r\n\
             Content-Type: text/html\r\n\
             \r\n\
             This should be the body",
        );
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.headers().len(), 1);
        assert_eq!(resp.headers().get("Content-Type"), Some("text/html"));
        assert_eq!(resp.raw_body(), "This should be the body");
    }

    #[test]
    fn test_redirect_chain_is_unwrapped() {
        let resp = Response::parse(
            "HTTP/1.1 301 Moved Permanently\r\n\
             Location: http://www.example.com/a\r\n\
             \r\n\
             HTTP/1.1 302 Found\r\n\
             Location: http://www.example.com/b\r\n\
             \r\n\
             HTTP/1.1 404 Not Found\r\n\
             Content-Type: text/plain\r\n\
             \r\n\
             missing",
        );
        assert_eq!(resp.status_code(), 404);
        assert!(resp.is_client_error());
        assert_eq!(resp.header("Location"), None);
        assert_eq!(resp.raw_body(), "missing");
        assert!(resp.parsed_body().is_none());
    }

    #[test]
    fn test_other_redirects_are_not_unwrapped() {
        let resp = Response::parse(
            "HTTP/1.1 307 Temporary Redirect\r\nLocation: /x\r\n\r\nHTTP/1.1 200 OK",
        );
        assert_eq!(resp.status_code(), 307);
        assert!(resp.is_redirect());
        assert_eq!(resp.header("Location"), Some("/x"));
        assert_eq!(resp.raw_body(), "HTTP/1.1 200 OK");
    }

    #[test]
    fn test_unwrap_depth_is_bounded() {
        let interim = "HTTP/1.1 100 Continue\r\n\r\n";
        let last = "HTTP/1.1 200 OK\r\n\r\nbody";

        let within = format!("{}{}", interim.repeat(MAX_UNWRAP_DEPTH), last);
        let resp = Response::parse(&within);
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.raw_body(), "body");

        let beyond = format!("{}{}", interim.repeat(MAX_UNWRAP_DEPTH + 1), last);
        let resp = Response::parse(&beyond);
        assert_eq!(resp.status_code(), 100);
        assert_eq!(resp.raw_body(), last);
    }

    #[test]
    fn test_html_body_is_parsed() {
        let raw = format!(
            "HTTP/1.1 200 OK\r\nConnection: Close\r\nContent-Type: text/html\r\n\r\n{}",
            HTML_BODY
        );
        let resp = Response::parse(&raw);
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.headers().len(), 2);
        assert_eq!(resp.raw_body(), HTML_BODY);
        assert!(resp.is_html());

        let doc = resp.parsed_body().unwrap();
        assert_eq!(doc.title().as_deref(), Some("Test"));
        assert_eq!(doc.body().unwrap().text_content(), "Test Body");
    }

    #[test]
    fn test_minimal_html_body_is_parsed() {
        let resp =
            Response::parse("HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<html></html>");
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.headers().get("Content-Type"), Some("text/html"));
        assert_eq!(resp.raw_body(), "<html></html>");
        assert!(resp.parsed_body().is_some());
    }

    #[test]
    fn test_lowercase_content_type_with_charset() {
        let raw = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: TEXT/HTML; charset=UTF-8\r\n\r\n{}",
            HTML_BODY
        );
        let resp = Response::parse(&raw);
        assert_eq!(resp.content_type(), Some("TEXT/HTML; charset=UTF-8"));
        assert_eq!(resp.media_type(), Some("TEXT/HTML"));
        assert!(resp.parsed_body().is_some());
    }

    #[test]
    fn test_exact_content_type_wins() {
        let raw = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\nContent-Type: text/plain\r\n\r\n{}",
            HTML_BODY
        );
        let resp = Response::parse(&raw);
        assert_eq!(resp.content_type(), Some("text/plain"));
        assert!(resp.parsed_body().is_none());
    }

    #[test]
    fn test_whitespace_body_is_not_parsed() {
        let resp = Response::parse("HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n  \r\n ");
        assert_eq!(resp.raw_body(), "  \r\n ");
        assert!(resp.parsed_body().is_none());
    }

    #[test]
    fn test_missing_or_other_content_type_is_not_parsed() {
        let raw = format!("HTTP/1.1 200 OK\r\n\r\n{}", HTML_BODY);
        assert!(Response::parse(&raw).parsed_body().is_none());

        let raw = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"a\":1}";
        let resp = Response::parse(raw);
        assert_eq!(resp.raw_body(), "{\"a\":1}");
        assert!(resp.parsed_body().is_none());
    }

    #[test]
    fn test_body_keeps_later_separators() {
        let resp = Response::parse("HTTP/1.1 200 OK\r\n\r\npart one\r\n\r\npart two");
        assert_eq!(resp.raw_body(), "part one\r\n\r\npart two");
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let resp = Response::parse("HTTP/1.1 200 OK\r\nX-A: 1\r\nX-B: 2\r\nX-A: 3\r\n\r\n");
        let names: Vec<_> = resp.headers().iter().collect();
        assert_eq!(names, vec![("X-A", "3"), ("X-B", "2")]);
    }

    #[test]
    fn test_header_value_keeps_later_colons() {
        let resp = Response::parse("HTTP/1.1 200 OK\r\nLocation:  http://x.com:8080/ \r\n\r\n");
        assert_eq!(resp.header("location"), Some("http://x.com:8080/"));
    }

    #[test]
    fn test_status_line_variants() {
        assert_eq!(Response::parse("http/1.0 503 Busy").status_code(), 503);
        assert_eq!(Response::parse("HTTP/2.0 204 No Content").status_code(), 204);
        assert_eq!(Response::parse("HTTP/1.1 OK").status_code(), 0);
        assert_eq!(Response::parse("HTTP/1.1 20").status_code(), 20);
        assert_eq!(Response::parse("HTTP/").status_code(), 0);
        assert!(Response::parse("HTTP/1.1 503 Busy").is_server_error());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = format!(
            "HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n{}",
            HTML_BODY
        );
        assert_eq!(Response::parse(&raw), Response::parse(&raw));
    }

    #[test]
    fn test_from_bytes_is_lossy() {
        let resp = Response::from_bytes(b"HTTP/1.1 200 OK\r\n\r\nab\xffcd");
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.raw_body(), "ab\u{fffd}cd");
    }

    #[test]
    fn test_from_file_restores_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.txt");
        std::fs::write(
            &path,
            "HTTP/1.1 200 OK\nContent-Type: text/html; charset=UTF-8\n\n<!doctype html><title>Example Domain</title>",
        )
        .unwrap();

        let resp = Response::from_file(&path).unwrap();
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.raw_body(), "<!doctype html><title>Example Domain</title>");
        assert_eq!(
            resp.parsed_body().and_then(|d| d.title()).as_deref(),
            Some("Example Domain")
        );
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Response::from_file(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }

    #[test]
    fn test_headers_serialize_in_order() {
        let resp = Response::parse("HTTP/1.1 200 OK\r\nB: 2\r\nA: 1\r\n\r\n");
        let json = serde_json::to_string(resp.headers()).unwrap();
        assert_eq!(json, r#"{"B":"2","A":"1"}"#);
    }
}
