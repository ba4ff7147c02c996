//! HTTP client for fetching JSON documents.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::error::SourceError;

const USER_AGENT: &str = concat!("learnview/", env!("CARGO_PKG_VERSION"));

/// Resolve user agent from config value.
/// - None => default learnview user agent
/// - other => custom user agent string
pub fn resolve_user_agent(config: Option<&str>) -> String {
    match config {
        None => USER_AGENT.to_string(),
        Some(custom) => custom.to_string(),
    }
}

/// True for `application/json` and any `+json` structured syntax type.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// HTTP client that only accepts successful JSON responses.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(timeout, None)
    }

    /// Create a new HTTP client with custom user agent configuration.
    pub fn with_user_agent(
        timeout: Duration,
        user_agent_config: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let user_agent = resolve_user_agent(user_agent_config);
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, SourceError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: url.to_string(),
                source,
            })?;

        // Extract response headers
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.to_string(), v.to_string());
            }
        }

        debug!(
            "GET {} -> {} in {}ms",
            url,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );

        Ok(HttpResponse {
            url: url.to_string(),
            status: response.status(),
            headers,
            response,
        })
    }

    /// Fetch a URL and return its body, requiring HTTP success and a JSON content type.
    pub async fn get_json_bytes(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self.get(url).await?;

        if !response.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: response.status.as_u16(),
            });
        }

        if !response.content_type().is_some_and(is_json_content_type) {
            return Err(SourceError::ContentType {
                url: url.to_string(),
                content_type: response.content_type().map(str::to_string),
            });
        }

        response.bytes().await
    }
}

/// HTTP response wrapper.
pub struct HttpResponse {
    pub url: String,
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    response: Response,
}

impl HttpResponse {
    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(|s| s.as_str())
    }

    /// Get response body as bytes.
    pub async fn bytes(self) -> Result<Vec<u8>, SourceError> {
        let url = self.url;
        self.response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|source| SourceError::Http { url, source })
    }
}
