//! Interview preparation research pipeline.
//!
//! Given a company and a job role, the pipeline searches the web, scrapes the
//! top results into a bounded corpus, asks a language model to extract
//! structured facts, and finally produces a preparation guide.
//!
//! # Design
//!
//! - Three stages run strictly in order over one [`ResearchRecord`]
//! - Every stage always produces a value, real or placeholder
//! - Provider failures are recovered at the component boundary and never
//!   reach the caller of [`ResearchPipeline::run`]
//! - Whether a field holds extracted data or a placeholder is recorded in
//!   [`ResearchRecord::reports`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use interview_research::{ResearchConfig, ResearchPipeline};
//!
//! let config = ResearchConfig::from_env()?;
//! let pipeline = ResearchPipeline::from_config(&config)?;
//!
//! let record = pipeline.run("Acme", "Backend Engineer").await;
//! println!("{:?}", record.background);
//! ```
//!
//! # Modules
//!
//! - [`acquisition`] - Search, fetch and corpus assembly behind a throttle
//! - [`extraction`] - Prompting and parse-with-defaults for typed records
//! - [`pipeline`] - The three-stage controller
//! - [`providers`] - Firecrawl and OpenAI clients
//! - [`testing`] - Scripted providers for tests

pub mod acquisition;
pub mod config;
pub mod error;
pub mod extraction;
pub mod pipeline;
pub mod providers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

pub use acquisition::{ContentAcquisition, FetchedPage, GatherLimits, GatheredContent, Throttle};
pub use config::{ResearchConfig, StageLimits};
pub use error::{ParseError, ProviderError, ProviderResult, ResearchError, Result};
pub use extraction::{Extract, ExtractionContext, ExtractionKind, Extractor};
pub use pipeline::{ResearchPipeline, Stage};
pub use traits::{
    model::{ChatMessage, LanguageModel, Role},
    web::{PageFetcher, ScrapedPage, SearchResult, WebSearcher},
};
pub use types::{
    outcome::{FallbackReason, Provenance, StageOutput, StageReport},
    record::{ResearchRecord, StagePatch},
    records::{CompanyBackground, InterviewProcess, PreparationGuide, UNKNOWN},
};

#[cfg(feature = "firecrawl")]
pub use providers::firecrawl::FirecrawlClient;

#[cfg(feature = "openai")]
pub use providers::openai::OpenAiChat;
