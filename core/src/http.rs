//! HTTP requests and responses as plain data.
//!
//! # Design
//! `FriendsClient` builds `HttpRequest` values without touching the network,
//! and a `Transport` turns each one into an `HttpResponse`. Keeping both sides
//! as owned data lets the request shape be asserted in tests and lets any
//! HTTP library sit behind the transport seam.

use std::fmt;

pub const AUTHORIZATION: &str = "authorization";
pub const CONTENT_TYPE: &str = "content-type";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
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
/// `url` is absolute and used verbatim: identifiers are interpolated by the
/// caller without escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A request carrying `Authorization: Bearer <token>`.
    ///
    /// A body, when present, goes out as `text/plain`; the friends service
    /// takes raw strings, not JSON, on its only write endpoint with a body.
    pub fn authorized(method: HttpMethod, url: String, token: &str, body: Option<String>) -> Self {
        let mut headers = vec![(AUTHORIZATION.to_string(), format!("Bearer {token}"))];
        if body.is_some() {
            headers.push((CONTENT_TYPE.to_string(), "text/plain; charset=utf-8".to_string()));
        }
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// Produced for every completed call, whatever its status. The body is kept
/// as raw bytes; whether they are text or JSON is for the caller to decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: String::new(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Anything below 300 counts as success.
    pub fn is_success(&self) -> bool {
        self.status < 300
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
