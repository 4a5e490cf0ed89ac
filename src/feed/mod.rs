//! Feed loading: fetch the raw table, map rows to posts, order newest first.

pub mod envelope;
pub mod images;
pub mod post;

use std::ops::Range;
use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, trace};

pub use envelope::{decode_rows, RawRow};
pub use images::resolve_image_refs;
pub use post::{truncate_text, PostRecord};

use crate::config::Config;
use crate::constants::FEED_USER_AGENT;

/// The data source could not be reached or refused the request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// The payload arrived but does not have the expected shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("payload is not valid UTF-8")]
    Encoding,
    #[error("payload of {len} bytes is too short for the response wrapper")]
    Envelope { len: usize },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing `{0}` in response")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not reach the feed source: {0}")]
    Transport(#[from] TransportError),
    #[error("could not read the feed: {0}")]
    Parse(#[from] ParseError),
}

/// Posts ordered most recent first. A post's index is its identity for the
/// lifetime of the collection.
///
/// Cloning is cheap; the records are shared.
#[derive(Debug, Clone, Default)]
pub struct FeedCollection {
    posts: Arc<[PostRecord]>,
}

impl FeedCollection {
    /// Build a collection from posts in source (oldest first) order.
    #[must_use]
    pub fn from_source_order(mut posts: Vec<PostRecord>) -> Self {
        posts.reverse();
        Self {
            posts: posts.into(),
        }
    }

    /// Build from raw table rows: skip the header, drop blank-topic rows,
    /// reverse once.
    #[must_use]
    pub fn from_rows(rows: &[Option<RawRow>]) -> Self {
        let posts: Vec<PostRecord> = rows
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, row)| {
                let record = row.as_ref().and_then(PostRecord::from_row);
                if record.is_none() {
                    trace!(row = index, "Skipping row without a topic");
                }
                record
            })
            .collect();

        Self::from_source_order(posts)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PostRecord> {
        self.posts.get(index)
    }

    /// Posts in `range`, clamped to the collection, paired with their index.
    pub fn slice(&self, range: Range<usize>) -> impl Iterator<Item = (usize, &PostRecord)> {
        let end = range.end.min(self.posts.len());
        let start = range.start.min(end);
        self.posts[start..end]
            .iter()
            .enumerate()
            .map(move |(offset, post)| (start + offset, post))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostRecord> {
        self.posts.iter()
    }
}

/// Reads the feed table from the external source.
#[derive(Debug, Clone)]
pub struct FeedRepository {
    client: reqwest::Client,
    url: String,
}

impl FeedRepository {
    /// Create a repository for the configured source.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(FEED_USER_AGENT)
            .build()?;

        Ok(Self::with_client(client, &config.feed_url))
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the whole feed. No retries; every call hits the source.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the source is unreachable or
    /// answers with a non-success status, and [`FetchError::Parse`] when the
    /// payload cannot be decoded.
    pub async fn fetch(&self) -> Result<FeedCollection, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(TransportError::from)?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()).into());
        }

        let body = response.bytes().await.map_err(TransportError::from)?;
        let rows = decode_rows(&body)?;
        let feed = FeedCollection::from_rows(&rows);

        debug!(rows = rows.len(), posts = feed.len(), "Feed loaded");
        Ok(feed)
    }
}
