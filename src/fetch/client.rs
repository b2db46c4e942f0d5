//! HTTP client wrapper for fetching resource bytes.
//!
//! Resources are fetched whole as bytes, never as text: the transport layer
//! must not guess at an encoding, since charset detection and decoding
//! happen downstream against the raw bytes.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, instrument};
use url::Url;

use super::error::FetchError;

/// Default per-fetch timeout (10 seconds). Applies to the whole request,
/// connect through body.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Accept header sent with every fetch. The catalog only references
/// text-shaped resources.
pub const ACCEPT_HEADER: &str = "text/*, application/json";

/// Raw bytes fetched for one catalog resource, plus the transport-reported
/// content type used by encoding detection.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The full response body.
    pub bytes: Vec<u8>,
    /// The `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
}

/// HTTP client for fetching catalog resources as bytes.
///
/// Designed to be created once and cloned into each fetch task, taking
/// advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Creates a new client with the default 10 second timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new client with an explicit per-fetch timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches a resource as raw bytes.
    ///
    /// Each call is independent: there are no retries, and a failure here
    /// never affects sibling fetches.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (non-2xx)
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_bytes(&self, url: &str) -> Result<RawResponse, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, ACCEPT_HEADER)
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        debug!(
            bytes = bytes.len(),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            "fetched resource"
        );

        Ok(RawResponse {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// Maps a reqwest error to the fetch taxonomy, separating timeouts from
/// other network failures.
fn classify_request_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::timeout(url)
    } else {
        FetchError::network(url, error)
    }
}
