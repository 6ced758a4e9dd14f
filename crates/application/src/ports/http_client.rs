//! HTTP Client port

use async_trait::async_trait;
use indexmap::IndexMap;
use litmus_domain::{HttpMethod, ResponseHeaders, TestCase};
use thiserror::Error;

/// Errors raised by the HTTP transport. The driver surfaces them unmodified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be built (bad header name or value, etc.).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// A fully resolved request handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL without the query parameters below.
    pub url: String,
    /// Request headers, in declared order.
    pub headers: IndexMap<String, String>,
    /// Query parameters appended to `url`.
    pub query: IndexMap<String, String>,
    /// Raw request body.
    pub body: String,
}

impl From<&TestCase> for HttpRequest {
    fn from(case: &TestCase) -> Self {
        Self {
            method: case.method,
            url: case.url.clone(),
            headers: case.headers.clone(),
            query: case.query.clone(),
            body: case.body.clone(),
        }
    }
}

/// A response body that has not been read yet.
///
/// Reading consumes the body, so it can happen at most once. Dropping an
/// unread body releases the underlying connection without reading it.
#[async_trait]
pub trait ResponseBody: Send {
    /// Reads the whole body into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails while streaming the body.
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, HttpClientError>;
}

#[async_trait]
impl ResponseBody for Vec<u8> {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, HttpClientError> {
        Ok(*self)
    }
}

/// A response whose status and headers are available but whose body is
/// still unread.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: ResponseHeaders,
    /// The unread body.
    pub body: Box<dyn ResponseBody>,
}

impl HttpResponse {
    /// Creates a response from its parts.
    pub fn new(status: u16, headers: ResponseHeaders, body: impl ResponseBody + 'static) -> Self {
        Self {
            status,
            headers,
            body: Box::new(body),
        }
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the engine to be independent of specific HTTP libraries. The
/// implementation owns the per-request timeout.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response head plus an
    /// unread body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other HTTP-related problems.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError>;
}
