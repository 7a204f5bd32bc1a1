//! Error types for the transport layer and the user-facing flows.

use thiserror::Error;

/// Failure to complete an HTTP exchange at all (no usable response).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("multipart form: {0}")]
    Form(#[from] curl::FormError),
    #[error("request encoding: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("transport task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Why a flow ended without its success status.
///
/// Every variant terminates at the status region; none of them is fatal.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(&'static str),
    /// Backend answered with `ok: false` or an `error` field.
    #[error("{0}")]
    Application(String),
    /// Non-2xx on an endpoint that returns a binary body.
    #[error("HTTP {status}: {body}")]
    Http { status: u32, body: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Body was expected to be JSON but was not.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Saving the downloaded body failed.
    #[error("saving file: {0}")]
    Delivery(#[from] std::io::Error),
}
