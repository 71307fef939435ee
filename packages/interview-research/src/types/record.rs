//! The research record threaded through the pipeline.

use serde::{Deserialize, Serialize};

use crate::pipeline::Stage;
use crate::types::outcome::{Provenance, StageOutput, StageReport};
use crate::types::records::{CompanyBackground, InterviewProcess, PreparationGuide};

/// Accumulated state of one research run.
///
/// Created with only `company` and `role`; each stage adds its own fields
/// through a [`StagePatch`]. Nothing outside the pipeline mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRecord {
    company: String,
    role: String,
    pub background: Option<CompanyBackground>,
    pub interview_process: Option<InterviewProcess>,
    pub preparation_guide: Option<PreparationGuide>,
    /// Corpus gathered by the company stage.
    pub research_content: String,
    /// Corpus gathered by the interview-process stage.
    pub interview_research_content: String,
    /// URLs used by the company stage, in ranking order, unique.
    pub sources: Vec<String>,
    /// URLs used by the interview-process stage, in ranking order, unique.
    pub interview_sources: Vec<String>,
    /// One entry per completed stage, in execution order.
    pub reports: Vec<StageReport>,
}

impl ResearchRecord {
    pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            background: None,
            interview_process: None,
            preparation_guide: None,
            research_content: String::new(),
            interview_research_content: String::new(),
            sources: Vec::new(),
            interview_sources: Vec::new(),
            reports: Vec::new(),
        }
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// True once all three stage fields are set.
    pub fn is_complete(&self) -> bool {
        self.background.is_some()
            && self.interview_process.is_some()
            && self.preparation_guide.is_some()
    }

    /// Provenance recorded for a stage, if it has run.
    pub fn provenance(&self, stage: Stage) -> Option<&Provenance> {
        self.reports
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.provenance)
    }

    /// Apply a stage result by explicit field assignment.
    pub(crate) fn apply(&mut self, patch: StagePatch) {
        let stage = patch.stage();
        let provenance = match patch {
            StagePatch::Company {
                background,
                research_content,
                sources,
            } => {
                self.background = Some(background.value);
                self.research_content = research_content;
                self.sources = sources;
                background.provenance
            }
            StagePatch::InterviewProcess {
                process,
                research_content,
                sources,
            } => {
                self.interview_process = Some(process.value);
                self.interview_research_content = research_content;
                self.interview_sources = sources;
                process.provenance
            }
            StagePatch::Guide { guide } => {
                self.preparation_guide = Some(guide.value);
                guide.provenance
            }
        };
        self.reports.push(StageReport { stage, provenance });
    }
}

/// The contribution of one stage, produced without touching the record.
#[derive(Debug, Clone, PartialEq)]
pub enum StagePatch {
    Company {
        background: StageOutput<CompanyBackground>,
        research_content: String,
        sources: Vec<String>,
    },
    InterviewProcess {
        process: StageOutput<InterviewProcess>,
        research_content: String,
        sources: Vec<String>,
    },
    Guide {
        guide: StageOutput<PreparationGuide>,
    },
}

impl StagePatch {
    pub fn stage(&self) -> Stage {
        match self {
            StagePatch::Company { .. } => Stage::ResearchCompany,
            StagePatch::InterviewProcess { .. } => Stage::ResearchInterviewProcess,
            StagePatch::Guide { .. } => Stage::GenerateGuide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::outcome::FallbackReason;

    #[test]
    fn test_new_record_is_empty() {
        let record = ResearchRecord::new("Acme", "Backend Engineer");
        assert_eq!(record.company(), "Acme");
        assert_eq!(record.role(), "Backend Engineer");
        assert!(record.background.is_none());
        assert!(!record.is_complete());
        assert!(record.reports.is_empty());
    }

    #[test]
    fn test_apply_company_patch() {
        let mut record = ResearchRecord::new("Acme", "Backend Engineer");
        record.apply(StagePatch::Company {
            background: StageOutput::placeholder(
                CompanyBackground::placeholder(),
                FallbackReason::EmptyCorpus,
            ),
            research_content: String::new(),
            sources: vec![],
        });

        assert_eq!(record.background, Some(CompanyBackground::placeholder()));
        assert_eq!(
            record.provenance(Stage::ResearchCompany),
            Some(&Provenance::Placeholder {
                reason: FallbackReason::EmptyCorpus
            })
        );
        assert!(record.provenance(Stage::GenerateGuide).is_none());
    }

    #[test]
    fn test_apply_all_patches_completes_record() {
        let mut record = ResearchRecord::new("Acme", "Backend Engineer");
        record.apply(StagePatch::Company {
            background: StageOutput::extracted(CompanyBackground::placeholder()),
            research_content: "corpus".into(),
            sources: vec!["https://acme.test/about".into()],
        });
        record.apply(StagePatch::InterviewProcess {
            process: StageOutput::extracted(InterviewProcess::placeholder()),
            research_content: "interview corpus".into(),
            sources: vec!["https://acme.test/careers".into()],
        });
        record.apply(StagePatch::Guide {
            guide: StageOutput::raw_text(PreparationGuide::from_text("study")),
        });

        assert!(record.is_complete());
        assert_eq!(record.research_content, "corpus");
        assert_eq!(record.interview_research_content, "interview corpus");
        assert_eq!(record.sources, vec!["https://acme.test/about".to_string()]);
        assert_eq!(record.interview_sources, vec!["https://acme.test/careers".to_string()]);
        let stages: Vec<Stage> = record.reports.iter().map(|r| r.stage).collect();
        assert_eq!(
            stages,
            vec![
                Stage::ResearchCompany,
                Stage::ResearchInterviewProcess,
                Stage::GenerateGuide
            ]
        );
    }
}
