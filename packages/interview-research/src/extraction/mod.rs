//! Structured extraction: prompt, complete, parse with defaults.
//!
//! One model call per extraction, no retries. Whatever happens, the caller
//! gets a value back: the parsed record, or the record type's placeholder
//! together with a [`FallbackReason`].
//!
//! # Example
//!
//! ```rust,ignore
//! let extractor = Extractor::new(Arc::new(model));
//! let ctx = ExtractionContext::new("Acme", "Backend Engineer").with_corpus(&corpus);
//!
//! let background = extractor.extract::<CompanyBackground>(&ctx).await;
//! if background.is_placeholder() {
//!     println!("no usable background");
//! }
//! ```

pub mod parse;
pub mod prompts;

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::acquisition::truncate_chars;
use crate::error::ParseError;
use crate::traits::model::{ChatMessage, LanguageModel};
use crate::types::outcome::{FallbackReason, StageOutput};
use crate::types::records::{CompanyBackground, InterviewProcess, PreparationGuide};

/// Model responses are cut to this many characters in diagnostics.
const MAX_LOGGED_RESPONSE_CHARS: usize = 500;

/// Which record an extraction produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionKind {
    Background,
    Process,
    Guide,
}

impl ExtractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionKind::Background => "background",
            ExtractionKind::Process => "process",
            ExtractionKind::Guide => "guide",
        }
    }
}

/// Inputs for one extraction.
///
/// Background uses `corpus`; process uses `corpus` and `role`; the guide uses
/// both corpora plus the earlier records.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub corpus: &'a str,
    pub interview_corpus: &'a str,
    pub background: Option<&'a CompanyBackground>,
    pub process: Option<&'a InterviewProcess>,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(company: &'a str, role: &'a str) -> Self {
        Self {
            company,
            role,
            corpus: "",
            interview_corpus: "",
            background: None,
            process: None,
        }
    }

    pub fn with_corpus(mut self, corpus: &'a str) -> Self {
        self.corpus = corpus;
        self
    }

    pub fn with_interview_corpus(mut self, corpus: &'a str) -> Self {
        self.interview_corpus = corpus;
        self
    }

    pub fn with_background(mut self, background: &'a CompanyBackground) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_process(mut self, process: &'a InterviewProcess) -> Self {
        self.process = Some(process);
        self
    }
}

/// A record type that can be extracted from model output.
pub trait Extract: Sized {
    const KIND: ExtractionKind;

    /// Map a parsed object onto the record, defaulting every bad field.
    fn from_json(obj: &Map<String, Value>) -> Self;

    /// Value used when nothing usable came back.
    fn placeholder() -> Self;

    /// Outcome when the model answered but not with a JSON object.
    fn on_malformed(_raw: &str, error: &ParseError) -> StageOutput<Self> {
        StageOutput::placeholder(
            Self::placeholder(),
            FallbackReason::MalformedOutput(error.to_string()),
        )
    }
}

impl Extract for CompanyBackground {
    const KIND: ExtractionKind = ExtractionKind::Background;

    fn from_json(obj: &Map<String, Value>) -> Self {
        parse::background_from_json(obj)
    }

    fn placeholder() -> Self {
        CompanyBackground::placeholder()
    }
}

impl Extract for InterviewProcess {
    const KIND: ExtractionKind = ExtractionKind::Process;

    fn from_json(obj: &Map<String, Value>) -> Self {
        parse::process_from_json(obj)
    }

    fn placeholder() -> Self {
        InterviewProcess::placeholder()
    }
}

impl Extract for PreparationGuide {
    const KIND: ExtractionKind = ExtractionKind::Guide;

    fn from_json(obj: &Map<String, Value>) -> Self {
        parse::guide_from_json(obj)
    }

    fn placeholder() -> Self {
        PreparationGuide::placeholder()
    }

    /// Keeps unstructured guide text as the overview.
    fn on_malformed(raw: &str, error: &ParseError) -> StageOutput<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return StageOutput::placeholder(
                Self::placeholder(),
                FallbackReason::MalformedOutput(error.to_string()),
            );
        }
        StageOutput::raw_text(PreparationGuide::from_text(text))
    }
}

/// Builds prompts, calls the model and parses the answer.
#[derive(Clone)]
pub struct Extractor {
    model: Arc<dyn LanguageModel>,
}

impl Extractor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// System and user messages for an extraction.
    pub fn messages(kind: ExtractionKind, ctx: &ExtractionContext<'_>) -> Vec<ChatMessage> {
        let (system, user) = match kind {
            ExtractionKind::Background => (
                prompts::BACKGROUND_SYSTEM,
                prompts::format_background_prompt(ctx.company, ctx.corpus),
            ),
            ExtractionKind::Process => (
                prompts::PROCESS_SYSTEM,
                prompts::format_process_prompt(ctx.company, ctx.role, ctx.corpus),
            ),
            ExtractionKind::Guide => (
                prompts::GUIDE_SYSTEM,
                prompts::format_guide_prompt(
                    ctx.company,
                    ctx.role,
                    &to_json_or_empty(ctx.background),
                    &to_json_or_empty(ctx.process),
                    ctx.corpus,
                    ctx.interview_corpus,
                ),
            ),
        };

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }

    /// Extract a record of type `T`. Never fails.
    pub async fn extract<T: Extract>(&self, ctx: &ExtractionContext<'_>) -> StageOutput<T> {
        let kind = T::KIND;
        let messages = Self::messages(kind, ctx);

        debug!(
            kind = kind.as_str(),
            model = self.model.name(),
            company = %ctx.company,
            "Requesting extraction"
        );

        let response = match self.model.complete(&messages).await {
            Ok(response) => response,
            Err(e) => {
                let message = truncate_chars(&e.to_string(), MAX_LOGGED_RESPONSE_CHARS).to_string();
                warn!(
                    kind = kind.as_str(),
                    model = self.model.name(),
                    error = %message,
                    "Model call failed, using placeholder"
                );
                return StageOutput::placeholder(
                    T::placeholder(),
                    FallbackReason::ProviderUnavailable(message),
                );
            }
        };

        match parse::parse_object(&response) {
            Ok(obj) => {
                info!(kind = kind.as_str(), company = %ctx.company, "Extracted structured record");
                StageOutput::extracted(T::from_json(&obj))
            }
            Err(e) => {
                warn!(
                    kind = kind.as_str(),
                    error = %e,
                    response = %truncate_chars(&response, MAX_LOGGED_RESPONSE_CHARS),
                    "Malformed model output"
                );
                T::on_malformed(&response, &e)
            }
        }
    }
}

fn to_json_or_empty<T: serde::Serialize>(record: Option<&T>) -> String {
    record
        .and_then(|r| serde_json::to_string_pretty(r).ok())
        .unwrap_or_else(|| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;
    use crate::traits::model::Role;
    use crate::types::outcome::Provenance;

    fn extractor(model: &MockModel) -> Extractor {
        Extractor::new(Arc::new(model.clone()))
    }

    #[test]
    fn test_messages_are_system_then_user() {
        let ctx = ExtractionContext::new("Acme", "SRE").with_corpus("Acme corpus");
        let messages = Extractor::messages(ExtractionKind::Background, &ctx);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("Acme corpus"));
    }

    #[test]
    fn test_guide_messages_embed_prior_records() {
        let background = CompanyBackground {
            industry: "Anvils".into(),
            ..CompanyBackground::placeholder()
        };
        let ctx = ExtractionContext::new("Acme", "SRE")
            .with_corpus("company text")
            .with_interview_corpus("interview text")
            .with_background(&background);
        let user = &Extractor::messages(ExtractionKind::Guide, &ctx)[1].content;

        assert!(user.contains("\"industry\": \"Anvils\""));
        assert!(user.contains("company text"));
        assert!(user.contains("interview text"));
    }

    #[tokio::test]
    async fn test_extracts_fenced_background() {
        let model = MockModel::new().with_response(
            "Here you go:\n```json\n{\"company_size\": \"500\", \"industry\": \"Logistics\", \"values\": [\"Grit\"]}\n```",
        );
        let ctx = ExtractionContext::new("Acme", "SRE").with_corpus("text");

        let out = extractor(&model).extract::<CompanyBackground>(&ctx).await;

        assert_eq!(out.provenance, Provenance::Extracted);
        assert_eq!(out.value.company_size, "500");
        assert_eq!(out.value.industry, "Logistics");
        assert_eq!(out.value.company_culture, "Unknown");
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_gives_placeholder() {
        let model = MockModel::new().with_error("503 Service Unavailable");
        let ctx = ExtractionContext::new("Acme", "SRE").with_corpus("text");

        let out = extractor(&model).extract::<InterviewProcess>(&ctx).await;

        assert!(out.value.is_placeholder());
        assert!(matches!(
            out.provenance,
            Provenance::Placeholder { reason: FallbackReason::ProviderUnavailable(_) }
        ));
    }

    #[tokio::test]
    async fn test_malformed_background_gives_placeholder() {
        let model = MockModel::new().with_response("I could not find anything useful.");
        let ctx = ExtractionContext::new("Acme", "SRE").with_corpus("text");

        let out = extractor(&model).extract::<CompanyBackground>(&ctx).await;

        assert!(out.value.is_placeholder());
        assert!(matches!(
            out.provenance,
            Provenance::Placeholder { reason: FallbackReason::MalformedOutput(_) }
        ));
    }

    #[tokio::test]
    async fn test_malformed_guide_keeps_raw_text() {
        let model = MockModel::new().with_response("  # Prep plan\n\nPractice graphs.  ");
        let ctx = ExtractionContext::new("Acme", "SRE");

        let out = extractor(&model).extract::<PreparationGuide>(&ctx).await;

        assert_eq!(out.provenance, Provenance::RawText);
        assert_eq!(out.value.overview, "# Prep plan\n\nPractice graphs.");
        assert!(out.value.is_unstructured());
    }

    #[tokio::test]
    async fn test_blank_guide_response_gives_placeholder() {
        let model = MockModel::new().with_response("   ");
        let ctx = ExtractionContext::new("Acme", "SRE");

        let out = extractor(&model).extract::<PreparationGuide>(&ctx).await;

        assert_eq!(out.value, PreparationGuide::placeholder());
        assert!(out.is_placeholder());
    }
}
