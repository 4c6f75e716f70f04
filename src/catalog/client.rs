use crate::catalog::types::{CatalogItem, MediaKind};
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout. The upstream API contract specifies none; 20s keeps
/// a hung edge server from stalling the whole feed load.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Catalog payloads are small JSON documents; anything larger is broken.
const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Errors from a single catalog request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request exceeded the 20-second timeout
    #[error("Request timed out")]
    Timeout,
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the 2MB size limit
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Response body was not the expected JSON shape
    #[error("Malformed catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the remote metadata API.
///
/// Routes are pre-built query paths (pagination, locale, and
/// `append_to_response` flags encoded by the caller); the client joins them
/// onto the configured base URL and attaches the bearer key when one is
/// configured. No retries: a failed request surfaces to the caller.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl CatalogClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// GET `base_url + route` and parse the body as JSON.
    pub async fn fetch(&self, route: &str) -> Result<serde_json::Value, FetchError> {
        let url = format!("{}{}", self.base_url, route);
        let mut request = self.http.get(&url);

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key.expose_secret()));
        }

        let response = tokio::time::timeout(REQUEST_TIMEOUT, request.send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch a list endpoint. Items live under the payload's `results` key;
    /// a missing key yields an empty list rather than an error.
    pub async fn fetch_list(&self, route: &str) -> Result<Vec<CatalogItem>, FetchError> {
        let payload = self.fetch(route).await?;
        match payload.get("results") {
            Some(results) => Ok(serde_json::from_value(results.clone())?),
            None => Ok(Vec::new()),
        }
    }

    /// Fetch the extended detail record for one item.
    ///
    /// Requests images and rating metadata in the same response; movies
    /// additionally get release-date detail for certifications.
    pub async fn fetch_detail(&self, kind: MediaKind, id: i64) -> Result<CatalogItem, FetchError> {
        let extras = match kind {
            MediaKind::Movie => "images,content_ratings,release_dates",
            MediaKind::Series => "images,content_ratings",
        };
        let route = format!(
            "/{}/{}?language=en-US&append_to_response={}&include_image_language=en",
            kind.route_segment(),
            id,
            extras
        );
        let payload = self.fetch(&route).await?;
        Ok(serde_json::from_value(payload)?)
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
