//! Stage outcomes: a value plus where it came from.
//!
//! Every stage yields *some* value. [`Provenance`] keeps "extracted from the
//! model" apart from "placeholder because something failed".

use serde::{Deserialize, Serialize};

use crate::pipeline::Stage;

/// Why a stage fell back to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No usable content was gathered; extraction was skipped.
    EmptyCorpus,
    /// The language model call failed.
    ProviderUnavailable(String),
    /// The model answered, but not with the expected structure.
    MalformedOutput(String),
}

/// Where a stage's value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Provenance {
    /// Parsed from structured model output.
    Extracted,
    /// Unstructured model text kept as-is (guide overview).
    RawText,
    /// Placeholder value.
    Placeholder { reason: FallbackReason },
}

impl Provenance {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Provenance::Placeholder { .. })
    }
}

/// A stage value together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> StageOutput<T> {
    pub fn extracted(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Extracted,
        }
    }

    pub fn raw_text(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::RawText,
        }
    }

    pub fn placeholder(value: T, reason: FallbackReason) -> Self {
        Self {
            value,
            provenance: Provenance::Placeholder { reason },
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.provenance.is_placeholder()
    }

    /// Transform the value, keeping provenance.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StageOutput<U> {
        StageOutput {
            value: f(self.value),
            provenance: self.provenance,
        }
    }
}

/// Provenance of one completed stage, as kept on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    pub provenance: Provenance,
}
