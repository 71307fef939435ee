//! Scripted providers for tests and offline demos.
//!
//! None of these make network calls. Clones share state, so a test can keep
//! a handle and inspect [`calls`](MockFetcher::calls) after handing a clone
//! to the pipeline.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{ProviderError, ProviderResult};
use crate::traits::model::{ChatMessage, LanguageModel};
use crate::traits::web::{PageFetcher, ScrapedPage, SearchResult, WebSearcher};

/// Mock search provider.
///
/// Results are registered against a query fragment; a search returns the
/// results of the first fragment contained in the query, or nothing.
#[derive(Clone, Default)]
pub struct MockSearcher {
    results: Arc<RwLock<Vec<(String, Vec<SearchResult>)>>>,
    failing: bool,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results for queries containing `fragment`.
    pub fn with_results(self, fragment: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.results.write().unwrap().push((fragment.into(), results));
        self
    }

    /// Untitled results for queries containing `fragment`.
    pub fn with_urls(self, fragment: impl Into<String>, urls: &[&str]) -> Self {
        let results = urls.iter().map(|url| SearchResult::new(*url)).collect();
        self.with_results(fragment, results)
    }

    /// Every search fails.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Queries received, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<SearchResult>> {
        self.calls.write().unwrap().push(query.to_string());

        if self.failing {
            return Err(ProviderError::Api {
                status: 500,
                body: "mock search failure".into(),
            });
        }

        let results = self.results.read().unwrap();
        Ok(results
            .iter()
            .find(|(fragment, _)| query.contains(fragment.as_str()))
            .map(|(_, hits)| hits.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock fetch provider. Unknown URLs fail with a 404.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, ScrapedPage>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, markdown: impl Into<String>) -> Self {
        let url = url.into();
        let page = ScrapedPage::new(url.clone(), markdown);
        self.pages.write().unwrap().insert(url, page);
        self
    }

    /// URLs requested, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> ProviderResult<ScrapedPage> {
        self.calls.write().unwrap().push(url.to_string());

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ProviderError::Api {
                status: 404,
                body: format!("no mock page for {}", url),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock language model.
///
/// Replies are consumed in order. Once the queue is empty every call fails
/// with [`ProviderError::EmptyResponse`].
#[derive(Clone, Default)]
pub struct MockModel {
    replies: Arc<RwLock<VecDeque<Result<String, String>>>>,
    calls: Arc<RwLock<Vec<Vec<ChatMessage>>>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.replies.write().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failed call.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.replies.write().unwrap().push_back(Err(message.into()));
        self
    }

    /// Messages of every call, in order.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, messages: &[ChatMessage]) -> ProviderResult<String> {
        self.calls.write().unwrap().push(messages.to_vec());

        match self.replies.write().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ProviderError::Network(message)),
            None => Err(ProviderError::EmptyResponse("mock model")),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
