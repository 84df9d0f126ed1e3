//! HTTP transport boundary.
//!
//! # Responsibility
//! - Describe requests/responses as plain values independent of any client.
//! - Define the async transport contract repositories are written against.
//! - Encode generic list options (page, size, sort, filters).
//!
//! # Invariants
//! - Request paths are relative to the configured API base URL.
//! - Transports never interpret status codes; repositories do.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod client;
pub mod options;

pub use client::ReqwestTransport;

/// Header carrying the unpaged row count on list responses.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Content type used for request bodies sent with this method.
    pub fn body_content_type(self) -> &'static str {
        match self {
            Self::Patch => "application/merge-patch+json",
            _ => "application/json",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path relative to the API base URL, e.g. `api/comics/12`.
    pub path: String,
    /// Ordered query pairs; repeated keys are allowed.
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// One received response, body not yet decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are stored lowercase.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true for an empty body or a literal JSON `null`.
    pub fn has_null_body(&self) -> bool {
        let trimmed = self.body.trim_ascii();
        trimmed.is_empty() || trimmed == b"null"
    }
}

/// Failures below the HTTP status layer.
#[derive(Debug)]
pub enum TransportError {
    Request(reqwest::Error),
    Timeout,
    InvalidUrl(String),
    /// Server could not be reached; used by non-reqwest transports.
    Unreachable(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(err) => write!(f, "http request failed: {err}"),
            Self::Timeout => write!(f, "http request timed out"),
            Self::InvalidUrl(url) => write!(f, "invalid request url `{url}`"),
            Self::Unreachable(details) => write!(f, "server unreachable: {details}"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(value)
        }
    }
}

/// Async request executor used by every repository.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::{HttpMethod, HttpResponse};

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, "[]").with_header("X-Total-Count", "42");
        assert_eq!(response.header("x-total-count"), Some("42"));
        assert_eq!(response.header("X-TOTAL-COUNT"), Some("42"));
        assert_eq!(response.header("link"), None);
    }

    #[test]
    fn null_body_detection() {
        assert!(HttpResponse::new(200, "").has_null_body());
        assert!(HttpResponse::new(200, " null \n").has_null_body());
        assert!(!HttpResponse::new(200, "{}").has_null_body());
    }

    #[test]
    fn patch_uses_merge_patch_content_type() {
        assert_eq!(
            HttpMethod::Patch.body_content_type(),
            "application/merge-patch+json"
        );
        assert_eq!(HttpMethod::Put.body_content_type(), "application/json");
    }
}
