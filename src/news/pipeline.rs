use super::extract::{extract_news, ExtractError, Extraction};
use super::fetcher::{build_client, fetch_text, FetchError, HttpSettings};
use super::item::NewsItem;
use crate::util::build_request_target;
use thiserror::Error;
use tracing::{Instrument, Span};

/// Reasons a fetch produced no records at all.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The URL string did not validate; no request was made
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    /// The request failed or answered with a status other than 200
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
    /// The server answered 200 with an empty body
    #[error("Empty response body")]
    EmptyBody,
}

/// Result of one pass through the pipeline.
///
/// Distinguishes "nothing fetched" from "fetched, zero items" from "fetched,
/// but the response was truncated by a malformed element".
#[derive(Debug)]
pub enum FeedOutcome {
    /// Nothing was extracted
    Unavailable(FeedError),
    /// Every result mapped (possibly none)
    Complete(Vec<NewsItem>),
    /// Extraction stopped at `error`; `items` are the results before it
    Partial {
        items: Vec<NewsItem>,
        error: ExtractError,
    },
}

impl FeedOutcome {
    /// Records extracted so far; empty when unavailable.
    pub fn items(&self) -> &[NewsItem] {
        match self {
            FeedOutcome::Unavailable(_) => &[],
            FeedOutcome::Complete(items) | FeedOutcome::Partial { items, .. } => items.as_slice(),
        }
    }

    /// `None` when nothing was extracted, otherwise the (possibly empty) records.
    pub fn into_items(self) -> Option<Vec<NewsItem>> {
        match self {
            FeedOutcome::Unavailable(_) => None,
            FeedOutcome::Complete(items) | FeedOutcome::Partial { items, .. } => Some(items),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, FeedOutcome::Unavailable(_))
    }
}

impl From<Extraction> for FeedOutcome {
    fn from(extraction: Extraction) -> Self {
        match extraction.error {
            None => FeedOutcome::Complete(extraction.items),
            Some(error) => FeedOutcome::Partial {
                items: extraction.items,
                error,
            },
        }
    }
}

/// Runs URL validation, fetch and extraction for a news search endpoint.
///
/// Holds no per-call state: clones share the connection pool and concurrent
/// calls need no coordination. Log records are emitted inside the span given
/// to [`NewsClient::with_span`].
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    max_response_bytes: usize,
    span: Span,
}

impl NewsClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, FetchError> {
        Ok(Self {
            http: build_client(settings)?,
            max_response_bytes: settings.max_response_bytes,
            span: tracing::debug_span!("news_feed"),
        })
    }

    /// Replaces the span that wraps every record this client logs.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Fetches `url` once and maps the response.
    ///
    /// Does not retry and never panics; every failure is logged and reported
    /// through the returned [`FeedOutcome`].
    pub async fn fetch_news(&self, url: &str) -> FeedOutcome {
        self.run(url).instrument(self.span.clone()).await
    }

    /// Shorthand for `fetch_news(url).await.into_items()`.
    pub async fn fetch_news_items(&self, url: &str) -> Option<Vec<NewsItem>> {
        self.fetch_news(url).await.into_items()
    }

    async fn run(&self, url: &str) -> FeedOutcome {
        let Some(target) = build_request_target(url) else {
            return FeedOutcome::Unavailable(FeedError::InvalidUrl(url.to_string()));
        };

        let text = match fetch_text(&self.http, Some(&target), self.max_response_bytes).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(url = %target, error = %e, "Problem making the HTTP request");
                return FeedOutcome::Unavailable(FeedError::Fetch(e));
            }
        };

        match extract_news(&text) {
            Some(extraction) => extraction.into(),
            None => {
                tracing::warn!(url = %target, "Response body was empty");
                FeedOutcome::Unavailable(FeedError::EmptyBody)
            }
        }
    }
}
