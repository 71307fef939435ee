//! Typed research records produced by the extraction stages.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Sentinel used for string fields that could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Max URLs kept per corpus in [`PreparationGuide::sources`].
pub const MAX_GUIDE_SOURCES: usize = 5;

/// Company background relevant to interview preparation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyBackground {
    pub company_size: String,
    pub industry: String,
    pub company_culture: String,
    /// Core values, insertion-ordered and unique.
    #[serde(default)]
    pub values: IndexSet<String>,
    #[serde(default)]
    pub recent_news: Vec<String>,
}

impl Default for CompanyBackground {
    fn default() -> Self {
        Self {
            company_size: UNKNOWN.to_string(),
            industry: UNKNOWN.to_string(),
            company_culture: UNKNOWN.to_string(),
            values: IndexSet::new(),
            recent_news: Vec::new(),
        }
    }
}

impl CompanyBackground {
    /// The all-"Unknown" placeholder.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

/// Interview process for a role at a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewProcess {
    /// Never empty; `["Unknown"]` when nothing could be determined.
    pub typical_stages: Vec<String>,
    pub duration: String,
    #[serde(default)]
    pub common_questions: Vec<String>,
    #[serde(default)]
    pub technical_assessment: bool,
    #[serde(default)]
    pub system_design: bool,
    #[serde(default)]
    pub behavioral_focus: bool,
    #[serde(default)]
    pub coding_challenges: bool,
    #[serde(default)]
    pub take_home_projects: bool,
}

impl Default for InterviewProcess {
    fn default() -> Self {
        Self {
            typical_stages: vec![UNKNOWN.to_string()],
            duration: UNKNOWN.to_string(),
            common_questions: Vec::new(),
            technical_assessment: false,
            system_design: false,
            behavioral_focus: false,
            coding_challenges: false,
            take_home_projects: false,
        }
    }
}

impl InterviewProcess {
    /// `typical_stages = ["Unknown"]`, `duration = "Unknown"`, everything else empty.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// Assessment formats flagged for this process, in display order.
    pub fn assessment_methods(&self) -> Vec<&'static str> {
        [
            (self.technical_assessment, "Technical Assessments"),
            (self.coding_challenges, "Coding Challenges"),
            (self.system_design, "System Design"),
            (self.behavioral_focus, "Behavioral Interviews"),
            (self.take_home_projects, "Take-home Projects"),
        ]
        .into_iter()
        .filter_map(|(flag, label)| flag.then_some(label))
        .collect()
    }
}

/// Actionable preparation guide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationGuide {
    /// Free-text overview. Holds the raw model response when it was not
    /// structured.
    pub overview: String,
    /// Merged from the one-week, three-day and day-before buckets, in that order.
    #[serde(default)]
    pub preparation_timeline: Vec<String>,
    #[serde(default)]
    pub technical_preparation: Vec<String>,
    #[serde(default)]
    pub behavioral_preparation: Vec<String>,
    #[serde(default)]
    pub company_specific_prep: Vec<String>,
    #[serde(default)]
    pub additional_resources: Vec<String>,
    /// RFC 3339 timestamp of generation.
    pub last_updated: String,
    /// Corpus name to source URLs, at most [`MAX_GUIDE_SOURCES`] each.
    #[serde(default)]
    pub sources: BTreeMap<String, Vec<String>>,
}

impl PreparationGuide {
    /// Guide used when the model could not be reached at all.
    pub fn placeholder() -> Self {
        Self {
            overview: "Preparation guide could not be generated.".to_string(),
            ..Default::default()
        }
    }

    /// Guide carrying unstructured model text as its overview.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            overview: text.into(),
            ..Default::default()
        }
    }

    /// True when none of the structured sections were filled.
    pub fn is_unstructured(&self) -> bool {
        self.preparation_timeline.is_empty()
            && self.technical_preparation.is_empty()
            && self.behavioral_preparation.is_empty()
            && self.company_specific_prep.is_empty()
            && self.additional_resources.is_empty()
    }

    /// Attach source attribution for one corpus, capped at [`MAX_GUIDE_SOURCES`].
    pub fn with_sources(mut self, corpus: impl Into<String>, urls: &[String]) -> Self {
        let capped = urls.iter().take(MAX_GUIDE_SOURCES).cloned().collect();
        self.sources.insert(corpus.into(), capped);
        self
    }

    pub fn with_last_updated(mut self, timestamp: impl Into<String>) -> Self {
        self.last_updated = timestamp.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_placeholder_is_all_unknown() {
        let bg = CompanyBackground::placeholder();
        assert_eq!(bg.company_size, "Unknown");
        assert_eq!(bg.industry, "Unknown");
        assert_eq!(bg.company_culture, "Unknown");
        assert!(bg.values.is_empty());
        assert!(bg.recent_news.is_empty());
        assert!(bg.is_placeholder());
    }

    #[test]
    fn test_process_placeholder() {
        let process = InterviewProcess::placeholder();
        assert_eq!(process.typical_stages, vec!["Unknown".to_string()]);
        assert_eq!(process.duration, "Unknown");
        assert!(process.assessment_methods().is_empty());
    }

    #[test]
    fn test_assessment_methods_order() {
        let process = InterviewProcess {
            system_design: true,
            technical_assessment: true,
            take_home_projects: true,
            ..InterviewProcess::placeholder()
        };
        assert_eq!(
            process.assessment_methods(),
            vec!["Technical Assessments", "System Design", "Take-home Projects"]
        );
    }

    #[test]
    fn test_guide_sources_capped() {
        let urls: Vec<String> = (0..8).map(|i| format!("https://example.com/{}", i)).collect();
        let guide = PreparationGuide::default().with_sources("company_research", &urls);
        assert_eq!(guide.sources["company_research"].len(), MAX_GUIDE_SOURCES);
        assert_eq!(guide.sources["company_research"][0], "https://example.com/0");
    }

    #[test]
    fn test_values_serialize_as_list() {
        let mut bg = CompanyBackground::placeholder();
        bg.values.insert("Ownership".to_string());
        bg.values.insert("Frugality".to_string());
        let json = serde_json::to_value(&bg).unwrap();
        assert_eq!(json["values"], serde_json::json!(["Ownership", "Frugality"]));
    }
}
