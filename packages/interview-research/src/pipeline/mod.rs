//! The three-stage research controller.
//!
//! Stages run strictly in order over one [`ResearchRecord`]. Each stage reads
//! the record, produces a [`StagePatch`] and the controller applies it. No
//! stage can fail: acquisition and extraction already turn provider failures
//! into empty corpora or placeholder records.

mod stage;

pub use stage::Stage;

use chrono::Utc;
use tracing::info;

use crate::acquisition::{ContentAcquisition, GatheredContent};
use crate::config::StageLimits;
use crate::extraction::{ExtractionContext, Extractor};
use crate::types::outcome::{FallbackReason, StageOutput};
use crate::types::record::{ResearchRecord, StagePatch};
use crate::types::records::{CompanyBackground, InterviewProcess, PreparationGuide};

/// Key of the company corpus in [`PreparationGuide::sources`].
pub const COMPANY_SOURCES_KEY: &str = "company_research";

/// Key of the interview corpus in [`PreparationGuide::sources`].
pub const INTERVIEW_SOURCES_KEY: &str = "interview_research";

/// Search query for the company stage.
pub fn company_query(company: &str) -> String {
    format!(
        "{} company profile, culture, values, size, industry, recent news, funding, leadership, and tech stack",
        company
    )
}

/// Search query for the interview-process stage.
pub fn interview_query(company: &str, role: &str) -> String {
    format!(
        "{} {} interview process stages questions technical assessment coding challenge system design behavioral",
        company, role
    )
}

/// Research pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = ResearchPipeline::new(acquisition, extractor)
///     .with_limits(StageLimits::default().with_max_sources(2));
///
/// let record = pipeline.run("Acme", "Backend Engineer").await;
/// assert!(record.is_complete());
/// ```
#[derive(Clone)]
pub struct ResearchPipeline {
    acquisition: ContentAcquisition,
    extractor: Extractor,
    limits: StageLimits,
}

impl ResearchPipeline {
    pub fn new(acquisition: ContentAcquisition, extractor: Extractor) -> Self {
        Self {
            acquisition,
            extractor,
            limits: StageLimits::default(),
        }
    }

    /// Build Firecrawl and OpenAI clients from config.
    ///
    /// Fails on missing credentials before any request is made.
    #[cfg(all(feature = "firecrawl", feature = "openai"))]
    pub fn from_config(config: &crate::config::ResearchConfig) -> crate::error::Result<Self> {
        use std::sync::Arc;

        use crate::acquisition::Throttle;
        use crate::providers::{firecrawl::FirecrawlClient, openai::OpenAiChat};

        let firecrawl = Arc::new(FirecrawlClient::from_config(config)?);
        let model = Arc::new(OpenAiChat::from_config(config)?);
        let throttle = Arc::new(Throttle::new(config.min_request_interval));

        let acquisition = ContentAcquisition::new(firecrawl.clone(), firecrawl, throttle);

        Ok(Self::new(acquisition, Extractor::new(model)).with_limits(config.limits))
    }

    pub fn with_limits(mut self, limits: StageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &StageLimits {
        &self.limits
    }

    /// Run all stages for one company and role.
    ///
    /// Always returns a complete record; fallbacks are visible in
    /// [`ResearchRecord::reports`].
    pub async fn run(&self, company: &str, role: &str) -> ResearchRecord {
        let mut record = ResearchRecord::new(company, role);
        info!(company = %company, role = %role, "Starting research");

        let mut stage = Some(Stage::first());
        while let Some(current) = stage {
            let patch = self.execute(current, &record).await;
            record.apply(patch);

            if let Some(provenance) = record.provenance(current) {
                info!(
                    stage = %current,
                    placeholder = provenance.is_placeholder(),
                    "Stage complete"
                );
            }
            stage = current.next();
        }

        record
    }

    /// Run one stage against the current record.
    pub async fn execute(&self, stage: Stage, record: &ResearchRecord) -> StagePatch {
        match stage {
            Stage::ResearchCompany => self.research_company(record).await,
            Stage::ResearchInterviewProcess => self.research_interview_process(record).await,
            Stage::GenerateGuide => self.generate_guide(record).await,
        }
    }

    async fn research_company(&self, record: &ResearchRecord) -> StagePatch {
        info!(company = %record.company(), "Researching company background");

        let gathered = self
            .acquisition
            .research(&company_query(record.company()), &self.limits)
            .await;

        let background = if gathered.is_empty() {
            info!(company = %record.company(), "No company content found");
            empty_corpus(CompanyBackground::placeholder())
        } else {
            let ctx = ExtractionContext::new(record.company(), record.role()).with_corpus(&gathered.text);
            self.extractor.extract::<CompanyBackground>(&ctx).await
        };

        let GatheredContent { text, sources, .. } = gathered;
        StagePatch::Company {
            background,
            research_content: text,
            sources,
        }
    }

    async fn research_interview_process(&self, record: &ResearchRecord) -> StagePatch {
        info!(
            company = %record.company(),
            role = %record.role(),
            "Researching interview process"
        );

        let gathered = self
            .acquisition
            .research(&interview_query(record.company(), record.role()), &self.limits)
            .await;

        let process = if gathered.is_empty() {
            info!(company = %record.company(), role = %record.role(), "No interview content found");
            empty_corpus(InterviewProcess::placeholder())
        } else {
            let ctx = ExtractionContext::new(record.company(), record.role()).with_corpus(&gathered.text);
            self.extractor.extract::<InterviewProcess>(&ctx).await
        };

        let GatheredContent { text, sources, .. } = gathered;
        StagePatch::InterviewProcess {
            process,
            research_content: text,
            sources,
        }
    }

    async fn generate_guide(&self, record: &ResearchRecord) -> StagePatch {
        info!(
            company = %record.company(),
            role = %record.role(),
            "Generating preparation guide"
        );

        let mut ctx = ExtractionContext::new(record.company(), record.role())
            .with_corpus(&record.research_content)
            .with_interview_corpus(&record.interview_research_content);
        if let Some(background) = &record.background {
            ctx = ctx.with_background(background);
        }
        if let Some(process) = &record.interview_process {
            ctx = ctx.with_process(process);
        }

        let guide = self
            .extractor
            .extract::<PreparationGuide>(&ctx)
            .await
            .map(|guide| {
                guide
                    .with_sources(COMPANY_SOURCES_KEY, &record.sources)
                    .with_sources(INTERVIEW_SOURCES_KEY, &record.interview_sources)
                    .with_last_updated(Utc::now().to_rfc3339())
            });

        StagePatch::Guide { guide }
    }
}

fn empty_corpus<T>(placeholder: T) -> StageOutput<T> {
    StageOutput::placeholder(placeholder, FallbackReason::EmptyCorpus)
}
