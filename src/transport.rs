//! Transport trait for HTTP exchanges

use reqwest::Method;
use url::Url;

use crate::Result;

/// A single outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute target URL, query included
    pub url: Url,
    /// Extra headers, in order
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// GET request without headers.
    pub fn get(url: Url) -> Self {
        Self { method: Method::GET, url, headers: Vec::new(), body: None }
    }

    /// POST request with a JSON body.
    pub fn post_json(url: Url, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            url,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of a header, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Canonical reason phrase, empty when unknown
    pub status_text: String,
    /// `Content-Type` header, if present
    pub content_type: Option<String>,
    /// Body as text
    pub body: String,
}

impl HttpResponse {
    /// Build a response, filling the reason phrase from the status code.
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            status,
            status_text,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// JSON response with status 200.
    pub fn json(body: impl Into<String>) -> Self {
        Self::new(200, Some("application/json"), body)
    }

    /// Success means 2xx; anything at or above 300 is a failure.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network layer used by the client.
///
/// Supplied at construction so tests can substitute the network without any
/// global state. Implementations perform exactly one exchange per call: no
/// retries, no redirects to other hosts' credentials, no caching.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Send a request and read the whole response.
    ///
    /// Returns:
    /// - `Ok(response)` - Exchange completed, whatever the status code
    /// - `Err(e)` - Exchange could not be completed
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
