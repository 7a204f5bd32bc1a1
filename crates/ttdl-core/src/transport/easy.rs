//! libcurl-backed transport (JSON and multipart POSTs).

use async_trait::async_trait;
use curl::easy::{Easy, Form, List};
use std::str;
use std::time::Duration;
use url::Url;

use super::{parse, resolve_endpoint, Request, RequestBody, Response, Transport};
use crate::config::TtdlConfig;
use crate::error::TransportError;

/// Posts to the backend with one curl `Easy` handle per request.
///
/// Each request runs on tokio's blocking pool; the async side never blocks.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    base: Url,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlTransport {
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        Ok(Self {
            base: Url::parse(base_url)?,
            connect_timeout,
            timeout,
        })
    }

    pub fn from_config(cfg: &TtdlConfig) -> Result<Self, TransportError> {
        Self::new(&cfg.base_url, cfg.connect_timeout(), cfg.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Performs the request on the current thread.
    pub fn post_blocking(&self, request: &Request) -> Result<Response, TransportError> {
        let url = resolve_endpoint(&self.base, &request.path)?;

        let mut easy = Easy::new();
        easy.url(url.as_str())?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = List::new();
        // Suppress `Expect: 100-continue` round trips on multipart bodies.
        list.append("Expect:")?;
        match &request.body {
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(value)?;
                list.append("Content-Type: application/json")?;
                easy.post(true)?;
                easy.post_fields_copy(&bytes)?;
            }
            RequestBody::Form(fields) => {
                let mut form = Form::new();
                for (name, value) in fields {
                    form.part(name).contents(value.as_bytes()).add()?;
                }
                easy.httppost(form)?;
            }
        }
        easy.http_headers(list)?;

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(url = %url, status, bytes = body.len(), "POST completed");
        Ok(Response::new(status, parse::parse_headers(&header_lines), body))
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn post(&self, request: Request) -> Result<Response, TransportError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.post_blocking(&request)).await?
    }
}
