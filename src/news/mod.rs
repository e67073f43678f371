//! News search retrieval: fetch a Guardian-style JSON response and map it
//! into article records.
//!
//! - `fetcher` - HTTP GET with fixed connect/read timeouts and a size cap
//! - `extract` - maps `response.results[]` into [`NewsItem`]s
//! - `pipeline` - [`NewsClient`] runs both and reports a [`FeedOutcome`]
//!
//! # Example
//!
//! ```ignore
//! use newsfeed::news::{FeedOutcome, HttpSettings, NewsClient};
//!
//! let client = NewsClient::new(&HttpSettings::default())?;
//! match client.fetch_news(url).await {
//!     FeedOutcome::Complete(items) => println!("{} articles", items.len()),
//!     FeedOutcome::Partial { items, error } => eprintln!("stopped after {}: {error}", items.len()),
//!     FeedOutcome::Unavailable(e) => eprintln!("no data: {e}"),
//! }
//! ```

mod extract;
mod fetcher;
mod item;
mod pipeline;

pub use extract::{extract_news, ExtractError, Extraction};
pub use fetcher::{
    build_client, fetch_text, fetch_text_lossy, FetchError, HttpSettings, CONNECT_TIMEOUT,
    MAX_RESPONSE_SIZE, READ_TIMEOUT,
};
pub use item::{NewsItem, AUTHOR_NOT_AVAILABLE};
pub use pipeline::{FeedError, FeedOutcome, NewsClient};
