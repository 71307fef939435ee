//! Web search and page fetch boundaries.
//!
//! Both providers are treated as unreliable: an empty search response is
//! valid, and any call may fail. [`ContentAcquisition`] turns failures into
//! empty results so they never reach the pipeline.
//!
//! [`ContentAcquisition`]: crate::acquisition::ContentAcquisition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderResult;

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: Option<String>,
    pub snippet: Option<String>,
}

impl SearchResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            snippet: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// Page text returned by a fetch provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    pub url: String,
    pub markdown: String,
    pub title: Option<String>,
}

impl ScrapedPage {
    pub fn new(url: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            markdown: markdown.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Web search provider.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning at most `limit` results in ranked order.
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<SearchResult>>;

    fn name(&self) -> &str;
}

/// Page fetch provider.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one URL as markdown.
    async fn fetch(&self, url: &str) -> ProviderResult<ScrapedPage>;

    fn name(&self) -> &str;
}
