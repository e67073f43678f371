use thiserror::Error;
use url::Url;

/// Errors that can occur while turning a string into a request target.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Validates a URL string for use as a news search endpoint.
///
/// Surrounding whitespace is ignored. Only `http` and `https` URLs are
/// accepted since nothing else can be fetched by the HTTP client.
///
/// # Errors
///
/// - [`UrlValidationError::InvalidUrl`] if the string is not a well-formed URL
/// - [`UrlValidationError::UnsupportedScheme`] for `file://`, `ftp://`, etc.
///
/// # Examples
///
/// ```
/// use newsfeed::util::validate_url;
///
/// assert!(validate_url("https://content.guardianapis.com/search?q=rust").is_ok());
/// assert!(validate_url("not a url").is_err());
/// assert!(validate_url("ftp://example.com/feed").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}

/// Builds the request target for a fetch, logging instead of failing.
///
/// Returns `None` when the string does not validate; the fetcher treats an
/// absent target as "nothing to fetch" and makes no network call.
pub fn build_request_target(url_str: &str) -> Option<Url> {
    match validate_url(url_str) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(url = %url_str, error = %e, "Problem building the request URL");
            None
        }
    }
}
