//! HTTP transport to the downloader backend.
//!
//! Flows only see the [`Transport`] trait; [`CurlTransport`] is the libcurl
//! implementation used by the CLI and the integration tests.

mod easy;
mod parse;

pub use easy::CurlTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::TransportError;

/// Body of a POST request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent as `application/json`.
    Json(serde_json::Value),
    /// Sent as `multipart/form-data`, one part per field, in order.
    Form(Vec<(String, String)>),
}

/// A POST to `path`: an endpoint path (`/thumbnail`) resolved against the
/// backend base URL, or an absolute URL used as is.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub path: String,
    pub body: RequestBody,
}

impl Request {
    pub fn json(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            path: path.into(),
            body: RequestBody::Json(value),
        }
    }

    pub fn form(path: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            body: RequestBody::Form(fields),
        }
    }
}

/// Status, headers and full body of a completed exchange.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub status: u32,
    /// Headers of the final response (after redirects), in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u32, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header with this name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// One POST, one response. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: Request) -> Result<Response, TransportError>;
}

/// Resolves an endpoint path against the backend base URL.
///
/// A base with a path prefix (`https://host/app`) keeps it:
/// `/thumbnail` becomes `https://host/app/thumbnail`.
pub fn resolve_endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    if let Ok(absolute) = Url::parse(path) {
        return Ok(absolute);
    }
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
}
