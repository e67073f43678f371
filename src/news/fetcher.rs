use futures::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::redirect::{Action, Attempt, Policy};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const READ_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB
const MAX_REDIRECTS: usize = 3;

/// Errors that can occur while retrieving a response body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Connect or read exceeded its timeout
    #[error("Request timed out")]
    Timeout,
    /// Any status other than 200 OK
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the configured size limit
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Body bytes are not valid UTF-8
    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,
}

impl FetchError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(e)
        }
    }
}

/// Tunables for the HTTP client used by the fetcher.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub max_response_bytes: usize,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
            max_response_bytes: MAX_RESPONSE_SIZE,
            user_agent: concat!("newsfeed/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Redirect step: `previous` holds the original URL plus every hop taken, so
/// its length is the number of this redirect.
fn follow_bounded(attempt: Attempt) -> Action {
    let hop = attempt.previous().len();
    if hop > MAX_REDIRECTS {
        return attempt.error(format!("Too many redirects (max {MAX_REDIRECTS})"));
    }
    if attempt.previous().contains(attempt.url()) {
        return attempt.error("Redirect loop detected");
    }

    tracing::debug!(to = %attempt.url(), hop, "Following redirect");
    attempt.follow()
}

/// Builds the HTTP client with the connect/read timeouts from `settings`.
pub fn build_client(settings: &HttpSettings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .redirect(Policy::custom(follow_bounded))
        .connect_timeout(settings.connect_timeout)
        .read_timeout(settings.read_timeout)
        .user_agent(settings.user_agent.as_str())
        .build()
        .map_err(FetchError::Network)
}

/// Fetches the response body for a request target as text.
///
/// An absent target returns empty text without touching the network. Only a
/// `200 OK` response is read; the connection and body stream are released on
/// every return path.
///
/// # Errors
///
/// - [`FetchError::Timeout`] - connect or read timed out
/// - [`FetchError::Network`] - connection, TLS or mid-body failure
/// - [`FetchError::HttpStatus`] - any status other than 200
/// - [`FetchError::ResponseTooLarge`] - body exceeded `max_bytes`
/// - [`FetchError::InvalidUtf8`] - body is not UTF-8
pub async fn fetch_text(
    client: &reqwest::Client,
    target: Option<&Url>,
    max_bytes: usize,
) -> Result<String, FetchError> {
    let Some(url) = target else {
        tracing::debug!("No request target, skipping fetch");
        return Ok(String::new());
    };

    tracing::debug!(url = %url, "Requesting news results");
    let response = client
        .get(url.as_str())
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!(url = %url, status = status.as_u16(), "Error response code");
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    read_limited_text(response, max_bytes).await
}

/// Like [`fetch_text`], but logs any failure and returns empty text.
pub async fn fetch_text_lossy(
    client: &reqwest::Client,
    target: Option<&Url>,
    max_bytes: usize,
) -> String {
    match fetch_text(client, target, max_bytes).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Problem retrieving the news JSON results");
            String::new()
        }
    }
}

async fn read_limited_text(
    response: reqwest::Response,
    limit: usize,
) -> Result<String, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::from_reqwest)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| FetchError::InvalidUtf8)
}
