//! Feed retrieval for configured magazine sources.
//!
//! - [`types`] - Wire types: [`FeedSource`], [`FeedResult`], [`ArticleRecord`]
//! - [`fetcher`] - One-shot HTTP retrieval through the rss2json converter or directly
//! - [`parser`] - RSS/Atom parsing for the direct backend using `feed-rs`
//!
//! # Example
//!
//! ```ignore
//! use magstand::feed::{fetch_all, Backend, FeedSource};
//!
//! let outcomes = fetch_all(&client, &backend, &sources).await;
//! ```

mod fetcher;
mod parser;
mod types;

pub use fetcher::{endpoint_url, fetch_all, fetch_feed, get_feed_data, Backend, FetchError};
pub use parser::parse_feed;
pub use types::{ArticleRecord, Enclosure, FeedInfo, FeedOutcome, FeedResult, FeedSource};
