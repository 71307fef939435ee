//! Content acquisition: search, fetch, and corpus assembly.
//!
//! All outbound calls pass through one shared [`Throttle`] and run strictly
//! one after another. Provider failures are logged and turned into empty
//! values here; nothing in this module returns an error.

mod throttle;

pub use throttle::Throttle;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::StageLimits;
use crate::traits::web::{PageFetcher, SearchResult, WebSearcher};

/// URLs longer than this are never fetched.
pub const MAX_URL_LEN: usize = 500;

/// Provider error messages are cut to this many characters before logging.
pub const MAX_LOGGED_ERROR_CHARS: usize = 500;

/// Appended to content cut by a character budget.
pub const TRUNCATION_MARKER: &str = "...";

/// Result of a fetch. Failures carry empty text and an error annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub markdown: String,
    pub title: Option<String>,
    pub error: Option<String>,
}

impl FetchedPage {
    fn failed(url: &str, error: String) -> Self {
        Self {
            url: url.to_string(),
            markdown: String::new(),
            title: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Budgets for [`ContentAcquisition::gather_with_limits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatherLimits {
    /// Total characters in the corpus, headers included.
    pub max_chars: usize,
    /// URLs fetched at most.
    pub max_urls: usize,
    /// Usable sources kept at most.
    pub max_sources: usize,
    /// Characters kept from one page.
    pub max_chars_per_source: usize,
    /// Pages with fewer characters (after trimming) are skipped.
    pub min_content_chars: usize,
}

impl GatherLimits {
    /// Only the total and URL budgets; every non-blank page is usable.
    pub fn new(max_chars: usize, max_urls: usize) -> Self {
        Self {
            max_chars,
            max_urls,
            max_sources: usize::MAX,
            max_chars_per_source: usize::MAX,
            min_content_chars: 1,
        }
    }
}

impl From<&StageLimits> for GatherLimits {
    fn from(limits: &StageLimits) -> Self {
        Self {
            max_chars: limits.max_chars,
            max_urls: limits.max_urls,
            max_sources: limits.max_sources,
            max_chars_per_source: limits.max_chars_per_source,
            min_content_chars: limits.min_content_chars.max(1),
        }
    }
}

/// A bounded corpus and the URLs it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatheredContent {
    pub text: String,
    /// URLs whose text made it into the corpus, in ranking order.
    pub sources: Vec<String>,
    /// URLs handed to the fetch provider, usable or not.
    pub fetched: usize,
}

impl GatheredContent {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Search and fetch behind a shared throttle.
#[derive(Clone)]
pub struct ContentAcquisition {
    searcher: Arc<dyn WebSearcher>,
    fetcher: Arc<dyn PageFetcher>,
    throttle: Arc<Throttle>,
}

impl ContentAcquisition {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        fetcher: Arc<dyn PageFetcher>,
        throttle: Arc<Throttle>,
    ) -> Self {
        Self {
            searcher,
            fetcher,
            throttle,
        }
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Search, returning an empty list if the provider fails.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        self.throttle.wait().await;

        match self.searcher.search(query, max_results).await {
            Ok(mut results) => {
                results.truncate(max_results);
                debug!(
                    provider = self.searcher.name(),
                    query = %query,
                    results = results.len(),
                    "Search completed"
                );
                results
            }
            Err(e) => {
                warn!(
                    provider = self.searcher.name(),
                    query = %query,
                    error = %truncate_chars(&e.to_string(), MAX_LOGGED_ERROR_CHARS),
                    "Search failed"
                );
                Vec::new()
            }
        }
    }

    /// Fetch one URL. Failures come back as a page with an error annotation.
    pub async fn fetch(&self, url: &str) -> FetchedPage {
        self.throttle.wait().await;

        match self.fetcher.fetch(url).await {
            Ok(page) => FetchedPage {
                url: url.to_string(),
                markdown: page.markdown,
                title: page.title,
                error: None,
            },
            Err(e) => {
                let message = truncate_chars(&e.to_string(), MAX_LOGGED_ERROR_CHARS).to_string();
                warn!(
                    provider = self.fetcher.name(),
                    url = %url,
                    error = %message,
                    "Fetch failed"
                );
                FetchedPage::failed(url, message)
            }
        }
    }

    /// Fetch results in ranked order into a corpus of at most `max_chars`
    /// characters (plus one truncation marker), fetching at most `max_urls`.
    pub async fn gather_content(
        &self,
        results: &[SearchResult],
        max_chars: usize,
        max_urls: usize,
    ) -> GatheredContent {
        self.gather_with_limits(results, &GatherLimits::new(max_chars, max_urls))
            .await
    }

    /// General form of [`gather_content`](Self::gather_content).
    pub async fn gather_with_limits(
        &self,
        results: &[SearchResult],
        limits: &GatherLimits,
    ) -> GatheredContent {
        let mut gathered = GatheredContent::default();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut used_chars = 0usize;

        for result in results {
            if gathered.fetched >= limits.max_urls
                || gathered.sources.len() >= limits.max_sources
                || used_chars >= limits.max_chars
            {
                break;
            }

            let url = result.url.trim();
            if url.is_empty() || !seen.insert(url) {
                continue;
            }
            if url.chars().count() > MAX_URL_LEN {
                warn!(url_len = url.chars().count(), "Skipping overlong URL");
                continue;
            }

            debug!(url = %url, "Fetching");
            gathered.fetched += 1;
            let page = self.fetch(url).await;

            let content = page.markdown.trim();
            if content.chars().count() < limits.min_content_chars {
                debug!(url = %url, chars = content.chars().count(), "Skipping page without usable content");
                continue;
            }

            let entry = format_entry(url, result.title.as_deref(), content, limits.max_chars_per_source);
            let entry_chars = entry.chars().count();
            let remaining = limits.max_chars - used_chars;

            gathered.sources.push(url.to_string());
            if entry_chars <= remaining {
                gathered.text.push_str(&entry);
                used_chars += entry_chars;
            } else {
                gathered.text.push_str(truncate_chars(&entry, remaining));
                gathered.text.push_str(TRUNCATION_MARKER);
                used_chars = limits.max_chars;
            }
        }

        info!(
            sources = gathered.sources.len(),
            fetched = gathered.fetched,
            chars = used_chars,
            "Gathered content"
        );

        gathered
    }

    /// Search and gather in one step, using per-stage caps.
    pub async fn research(&self, query: &str, limits: &StageLimits) -> GatheredContent {
        let results = self.search(query, limits.max_results).await;
        if results.is_empty() {
            return GatheredContent::default();
        }
        self.gather_with_limits(&results, &GatherLimits::from(limits))
            .await
    }
}

/// One corpus entry: source header, optional title, page text.
fn format_entry(url: &str, title: Option<&str>, content: &str, max_content_chars: usize) -> String {
    let mut entry = format!("## Source: {}\n", url);
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        entry.push_str("### ");
        entry.push_str(title);
        entry.push('\n');
    }
    entry.push('\n');
    entry.push_str(truncate_chars(content, max_content_chars));
    entry.push_str("\n\n");
    entry
}

/// First `max_chars` characters of `s`, never splitting a character.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
