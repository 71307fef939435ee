//! Firecrawl search and scrape client.
//!
//! One client serves both provider boundaries: `POST /search` for
//! [`WebSearcher`] and `POST /scrape` (markdown, main content only) for
//! [`PageFetcher`].
//!
//! # Example
//!
//! ```rust,ignore
//! use interview_research::FirecrawlClient;
//!
//! let client = FirecrawlClient::new("fc-...")?;
//! let results = client.search("Acme careers", 5).await?;
//! let page = client.fetch(&results[0].url).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, http_client};
use crate::config::ResearchConfig;
use crate::error::{ProviderError, ProviderResult, ResearchError};
use crate::security::SecretString;
use crate::traits::web::{PageFetcher, ScrapedPage, SearchResult, WebSearcher};

/// Production API root.
pub const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Firecrawl API client.
#[derive(Clone)]
pub struct FirecrawlClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    limit: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<SearchHit>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SearchHit {
    url: Option<String>,
    title: Option<String>,
    description: Option<String>,
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 1],
    #[serde(rename = "onlyMainContent")]
    only_main_content: bool,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<ScrapeData>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    metadata: Option<PageMetadata>,
}

#[derive(Deserialize)]
struct PageMetadata {
    title: Option<String>,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<SecretString>) -> ProviderResult<Self> {
        Ok(Self {
            client: http_client(REQUEST_TIMEOUT)?,
            api_key: api_key.into(),
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }

    /// Build from config, honoring a base URL override.
    pub fn from_config(config: &ResearchConfig) -> Result<Self, ResearchError> {
        if config.firecrawl_api_key.is_empty() {
            return Err(ResearchError::MissingCredential("FIRECRAWL_API_KEY"));
        }

        let mut client = Self::new(config.firecrawl_api_key.clone())?;
        if let Some(url) = &config.firecrawl_base_url {
            client = client.with_base_url(url);
        }
        Ok(client)
    }

    /// Point at a different API root (self-hosted Firecrawl, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> ProviderResult<R> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(body)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }
}

#[async_trait]
impl WebSearcher for FirecrawlClient {
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<SearchResult>> {
        let response: SearchResponse = self.post("/search", &SearchRequest { query, limit }).await?;

        if !response.success {
            return Err(ProviderError::Api {
                status: 200,
                body: response.error.unwrap_or_else(|| "search unsuccessful".into()),
            });
        }

        let results = response
            .data
            .into_iter()
            .filter_map(|hit| {
                let url = hit.url.filter(|u| !u.trim().is_empty())?;
                let mut result = SearchResult::new(url);
                result.title = hit.title;
                result.snippet = hit.description;
                Some(result)
            })
            .take(limit)
            .collect();

        Ok(results)
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

#[async_trait]
impl PageFetcher for FirecrawlClient {
    async fn fetch(&self, url: &str) -> ProviderResult<ScrapedPage> {
        let request = ScrapeRequest {
            url,
            formats: ["markdown"],
            only_main_content: true,
        };
        let response: ScrapeResponse = self.post("/scrape", &request).await?;

        if !response.success {
            return Err(ProviderError::Api {
                status: 200,
                body: response.error.unwrap_or_else(|| "scrape unsuccessful".into()),
            });
        }

        let data = response.data.ok_or(ProviderError::EmptyResponse("firecrawl scrape"))?;

        let mut page = ScrapedPage::new(url, data.markdown.unwrap_or_default());
        if let Some(title) = data.metadata.and_then(|m| m.title) {
            page = page.with_title(title);
        }
        Ok(page)
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}
