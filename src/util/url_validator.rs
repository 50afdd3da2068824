use thiserror::Error;
use url::Url;

/// Errors from validating configured URLs.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// Plain HTTP converter endpoint on a non-loopback host.
    #[error("Insecure API base URL: HTTPS required (except localhost)")]
    InsecureApiBase,
}

/// Validates a configured feed source URL.
///
/// Only `http`/`https` URLs with a host are accepted.
///
/// # Examples
///
/// ```
/// use magstand::util::validate_feed_url;
///
/// assert!(validate_feed_url("https://example.com/feed.xml").is_ok());
/// assert!(validate_feed_url("file:///etc/passwd").is_err());
/// assert!(validate_feed_url("not a url").is_err());
/// ```
pub fn validate_feed_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// Validates the converter endpoint.
///
/// HTTPS is required, with plain HTTP allowed only for loopback hosts so that
/// tests can point at a local mock server.
pub fn validate_api_base(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = validate_feed_url(url_str)?;

    if url.scheme() == "http" {
        let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
        if !loopback {
            return Err(UrlValidationError::InsecureApiBase);
        }
        tracing::warn!(api_base = %url, "Using non-HTTPS converter endpoint (localhost only)");
    }

    Ok(url)
}
