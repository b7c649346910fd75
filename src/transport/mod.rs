// The HTTP exchange is pluggable: the client builds the request and reads the
// response, a `Transport` moves the bytes.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

#[cfg(feature = "reqwest")]
mod reqwest_transport;

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

/// One POST to the SQL endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: JsonValue,
    /// Passed through from `FetchOptions`
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Value of header `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A completed exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The exchange did not complete.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}

/// Performs the HTTP POST for a prepared request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    /// Returns `TransportError` when no response was received. Non-success
    /// statuses are responses, not errors.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
