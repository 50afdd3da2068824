use super::parser::parse_feed;
use super::types::{FeedOutcome, FeedResult, FeedSource};
use crate::util::{validate_feed_url, UrlValidationError};
use futures::future::join_all;
use futures::StreamExt;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
const MAX_ERROR_BODY: usize = 16 * 1024;

/// Where feed data comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    /// Hosted converter: `GET <api_base>?<rss_param>=<feed-url>` returning JSON.
    Rss2Json { api_base: Url, rss_param: String },
    /// Fetch the feed URL itself and parse RSS/Atom locally.
    Direct,
}

/// Errors that can occur while fetching one feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {status}")]
    HttpStatus { status: u16, body: String },
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Converter response was not the expected JSON
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Converter answered with `"status": "error"`
    #[error("Converter error: {0}")]
    Api(String),
    /// Feed XML could not be parsed as RSS or Atom (direct backend)
    #[error("Parse error: {0}")]
    Parse(String),
    /// Feed source URL failed validation
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),
}

/// rss2json wraps the payload with a status and, on failure, a message.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    result: FeedResult,
}

/// Builds the converter request URL for one feed. The feed URL is
/// percent-encoded as a query value.
///
/// # Examples
///
/// ```
/// use magstand::feed::endpoint_url;
/// use url::Url;
///
/// let base = Url::parse("https://api.rss2json.com/v1/api.json").unwrap();
/// let url = endpoint_url(&base, "rss_url", "https://mag.example/feed");
/// assert_eq!(
///     url.as_str(),
///     "https://api.rss2json.com/v1/api.json?rss_url=https%3A%2F%2Fmag.example%2Ffeed"
/// );
/// ```
pub fn endpoint_url(api_base: &Url, rss_param: &str, feed_url: &str) -> Url {
    let mut url = api_base.clone();
    url.query_pairs_mut().append_pair(rss_param, feed_url);
    url
}

/// Fetches one feed, returning `None` on any failure.
///
/// Failures are logged with their detail; callers treat `None` as "no data
/// for this source". One attempt, no retry.
pub async fn get_feed_data(
    client: &reqwest::Client,
    backend: &Backend,
    source: &FeedSource,
) -> Option<FeedResult> {
    match fetch_feed(client, backend, source).await {
        Ok(feed) => Some(feed),
        Err(e) => {
            log_failure(source, &e);
            None
        }
    }
}

/// Fetches one feed and reports why it failed.
///
/// # Errors
///
/// - [`FetchError::Network`] - Connection or TLS errors
/// - [`FetchError::HttpStatus`] - Non-2xx HTTP response (body captured for logging)
/// - [`FetchError::ResponseTooLarge`] - Response exceeded 10MB
/// - [`FetchError::Decode`] - Converter response was not valid JSON
/// - [`FetchError::Api`] - Converter reported an error in its envelope
/// - [`FetchError::Parse`] - Invalid RSS/Atom XML (direct backend)
/// - [`FetchError::InvalidUrl`] - Source URL is not http(s)
pub async fn fetch_feed(
    client: &reqwest::Client,
    backend: &Backend,
    source: &FeedSource,
) -> Result<FeedResult, FetchError> {
    match backend {
        Backend::Rss2Json {
            api_base,
            rss_param,
        } => {
            let url = endpoint_url(api_base, rss_param, source.url());
            tracing::debug!(feed = %source, endpoint = %url, "Requesting feed conversion");
            let bytes = get_bytes(client, url).await?;
            decode_envelope(&bytes)
        }
        Backend::Direct => {
            let url = validate_feed_url(source.url())?;
            tracing::debug!(feed = %source, "Requesting feed directly");
            let bytes = get_bytes(client, url).await?;
            parse_feed(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
        }
    }
}

/// Fetches every source concurrently and waits for all of them to settle.
///
/// The returned outcomes are in the same order as `sources`. A failed source
/// never fails the batch.
pub async fn fetch_all(
    client: &reqwest::Client,
    backend: &Backend,
    sources: &[FeedSource],
) -> Vec<FeedOutcome> {
    let requests = sources.iter().map(|source| async move {
        match fetch_feed(client, backend, source).await {
            Ok(feed) => FeedOutcome::Loaded {
                source: source.clone(),
                feed,
            },
            Err(e) => {
                log_failure(source, &e);
                FeedOutcome::Failed {
                    source: source.clone(),
                    reason: e.to_string(),
                }
            }
        }
    });

    let outcomes = join_all(requests).await;

    let loaded = outcomes.iter().filter(|o| o.is_loaded()).count();
    tracing::info!(
        total = outcomes.len(),
        loaded = loaded,
        failed = outcomes.len() - loaded,
        "Feed fetch complete"
    );

    outcomes
}

fn log_failure(source: &FeedSource, error: &FetchError) {
    match error {
        FetchError::HttpStatus { status, body } => {
            tracing::warn!(feed = %source, status = status, body = %body, "Feed request failed");
        }
        e => {
            tracing::warn!(feed = %source, error = %e, "Feed request failed");
        }
    }
}

fn decode_envelope(bytes: &[u8]) -> Result<FeedResult, FetchError> {
    let envelope: ApiEnvelope = serde_json::from_slice(bytes)?;

    if envelope.status.as_deref() == Some("error") {
        return Err(FetchError::Api(
            envelope
                .message
                .unwrap_or_else(|| "unknown converter error".to_string()),
        ));
    }

    Ok(envelope.result)
}

async fn get_bytes(client: &reqwest::Client, url: Url) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = match read_limited_bytes(response, MAX_ERROR_BODY).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => String::from("<unreadable body>"),
        };
        return Err(FetchError::HttpStatus { status, body });
    }

    read_limited_bytes(response, MAX_FEED_SIZE).await
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
