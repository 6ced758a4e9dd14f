//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Response bodies are handed back unread; dropping one releases the
//! connection without reading it.

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use litmus_application::ports::{
    HttpClient, HttpClientError, HttpRequest, HttpResponse, ResponseBody,
};
use litmus_domain::{HttpMethod, ResponseHeaders};
use reqwest::{Client, Method};
use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Settings for [`ReqwestHttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-request timeout in milliseconds, covering the whole exchange.
    pub timeout_ms: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: concat!("litmus/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// HTTP client implementation using reqwest.
///
/// Wraps a single `reqwest::Client` so the connection pool is shared by
/// every case in a run.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a new HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_config(config: &ClientConfig) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: config.timeout_ms,
        })
    }

    /// Returns the per-request timeout in milliseconds.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Parses `url` and appends `query` after any query it already has.
    fn build_url(url: &str, query: &IndexMap<String, String>) -> Result<Url, HttpClientError> {
        let mut parsed =
            Url::parse(url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

        if query.is_empty() {
            return Ok(parsed);
        }

        let encoded = serde_urlencoded::to_string(query)
            .map_err(|e| HttpClientError::InvalidRequest(e.to_string()))?;
        let merged = match parsed.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
            _ => encoded,
        };
        parsed.set_query(Some(&merged));

        Ok(parsed)
    }

    fn convert_headers(headers: &reqwest::header::HeaderMap) -> ResponseHeaders {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        if error.is_builder() {
            return HttpClientError::InvalidRequest(error.to_string());
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::Body(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

/// An unread reqwest response body.
struct ReqwestBody {
    response: reqwest::Response,
    timeout_ms: u64,
}

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, HttpClientError> {
        let timeout_ms = self.timeout_ms;
        let bytes = self.response.bytes().await.map_err(|e| {
            match ReqwestHttpClient::map_error(&e, timeout_ms) {
                HttpClientError::Other(message) => HttpClientError::Body(message),
                other => other,
            }
        })?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError> {
        let url = Self::build_url(&request.url, &request.query)?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());
        tracing::debug!(status, headers = headers.len(), "response received");

        Ok(HttpResponse::new(
            status,
            headers,
            ReqwestBody {
                response,
                timeout_ms: self.timeout_ms,
            },
        ))
    }
}
