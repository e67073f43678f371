//! Fetch a Guardian-style JSON news search and parse it into article records.
//!
//! The crate is a single linear pipeline:
//!
//! 1. [`util::build_request_target`] validates the URL string
//! 2. [`news::fetch_text`] issues the GET with fixed connect/read timeouts
//! 3. [`news::extract_news`] maps `response.results[]` into [`news::NewsItem`]s
//! 4. [`news::NewsClient::fetch_news`] runs the three and reports a
//!    [`news::FeedOutcome`]
//!
//! # Example
//!
//! ```no_run
//! use newsfeed::news::{HttpSettings, NewsClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NewsClient::new(&HttpSettings::default())?;
//! let outcome = client
//!     .fetch_news("https://content.guardianapis.com/search?q=technology&show-tags=contributor")
//!     .await;
//! for item in outcome.items() {
//!     println!("{} ({})", item.title(), item.author());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod news;
pub mod util;
