//! Configuration loaded from the environment.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::{ResearchError, Result};
use crate::security::SecretString;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default minimum interval between outbound search/scrape requests.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(2);

/// Per-stage acquisition caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageLimits {
    /// Results requested from the search provider.
    pub max_results: usize,

    /// URLs fetched at most (usable or not).
    pub max_urls: usize,

    /// Usable sources kept in the corpus.
    pub max_sources: usize,

    /// Characters kept from any single page.
    pub max_chars_per_source: usize,

    /// Total corpus budget, headers included.
    pub max_chars: usize,

    /// Pages with less text than this are not usable.
    pub min_content_chars: usize,
}

impl Default for StageLimits {
    fn default() -> Self {
        Self {
            max_results: 5,
            max_urls: 5,
            max_sources: 3,
            max_chars_per_source: 5000,
            max_chars: 16_000,
            min_content_chars: 50,
        }
    }
}

impl StageLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn with_max_urls(mut self, max: usize) -> Self {
        self.max_urls = max;
        self
    }

    pub fn with_max_sources(mut self, max: usize) -> Self {
        self.max_sources = max;
        self
    }

    pub fn with_max_chars_per_source(mut self, max: usize) -> Self {
        self.max_chars_per_source = max;
        self
    }

    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = max;
        self
    }

    pub fn with_min_content_chars(mut self, min: usize) -> Self {
        self.min_content_chars = min;
        self
    }
}

/// Application configuration.
///
/// Credentials are required; everything else has a default. Missing
/// credentials fail here, before any stage runs.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    pub firecrawl_api_key: SecretString,
    pub firecrawl_base_url: Option<String>,
    pub openai_api_key: SecretString,
    pub openai_base_url: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub min_request_interval: Duration,
    pub limits: StageLimits,
}

impl ResearchConfig {
    /// Create a config with explicit credentials and default settings.
    pub fn new(firecrawl_api_key: impl Into<String>, openai_api_key: impl Into<String>) -> Self {
        Self {
            firecrawl_api_key: SecretString::new(firecrawl_api_key),
            firecrawl_base_url: None,
            openai_api_key: SecretString::new(openai_api_key),
            openai_base_url: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            min_request_interval: DEFAULT_MIN_INTERVAL,
            limits: StageLimits::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ResearchError::MissingCredential(name))
        };

        let mut config = Self::new(required("FIRECRAWL_API_KEY")?, required("OPENAI_API_KEY")?);

        config.firecrawl_base_url = lookup("FIRECRAWL_BASE_URL").filter(|v| !v.is_empty());
        config.openai_base_url = lookup("OPENAI_BASE_URL").filter(|v| !v.is_empty());

        if let Some(model) = lookup("OPENAI_MODEL").filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }

        if let Some(raw) = lookup("OPENAI_TEMPERATURE") {
            config.temperature =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseFloatError| ResearchError::InvalidSetting {
                        name: "OPENAI_TEMPERATURE",
                        reason: e.to_string(),
                    })?;
        }

        if let Some(raw) = lookup("RESEARCH_MIN_INTERVAL_MS") {
            let millis: u64 =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ResearchError::InvalidSetting {
                        name: "RESEARCH_MIN_INTERVAL_MS",
                        reason: e.to_string(),
                    })?;
            config.min_request_interval = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    pub fn with_limits(mut self, limits: StageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_firecrawl_base_url(mut self, url: impl Into<String>) -> Self {
        self.firecrawl_base_url = Some(url.into());
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = Some(url.into());
        self
    }
}
