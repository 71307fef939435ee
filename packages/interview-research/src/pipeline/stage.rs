//! Pipeline stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One node of the research graph.
///
/// `START -> ResearchCompany -> ResearchInterviewProcess -> GenerateGuide -> DONE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ResearchCompany,
    ResearchInterviewProcess,
    GenerateGuide,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 3] = [
        Stage::ResearchCompany,
        Stage::ResearchInterviewProcess,
        Stage::GenerateGuide,
    ];

    /// Entry stage.
    pub fn first() -> Self {
        Stage::ResearchCompany
    }

    /// The following stage, or `None` after the last one.
    pub fn next(self) -> Option<Self> {
        match self {
            Stage::ResearchCompany => Some(Stage::ResearchInterviewProcess),
            Stage::ResearchInterviewProcess => Some(Stage::GenerateGuide),
            Stage::GenerateGuide => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ResearchCompany => "research_company",
            Stage::ResearchInterviewProcess => "research_interview_process",
            Stage::GenerateGuide => "generate_guide",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
