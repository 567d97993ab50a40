use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const INCORRECT_CTA: &str = "Incorrect CTA";
pub const INCORRECT_AD_NAME: &str = "Incorrect Ad Name";
pub const INCORRECT_LANDING_PAGE: &str = "Incorrect Landing Page";
pub const UNEXPECTED_PLACEMENT: &str = "Ad in unexpected campaign and/or ad set";
pub const MISSING_PLACEMENT: &str = "Ad is missing from expected ad set and campaign";

/// Failure reasons keyed by `campaign > ad set[ > ad]` path, in the order
/// paths first failed.
pub type FailureMap = IndexMap<String, Vec<String>>;

/// Outcome of one QA run.
///
/// Serializes to `{"success":true}` or `{"success":false,"failures":{...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failures: Option<FailureMap>,
}

impl QaReport {
    pub fn passed() -> Self {
        Self {
            success: true,
            failures: None,
        }
    }

    pub fn from_failures(failures: FailureMap) -> Self {
        if failures.is_empty() {
            return Self::passed();
        }
        Self {
            success: false,
            failures: Some(failures),
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures
            .as_ref()
            .map(|failures| failures.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}

/// Diagnostics report emitted when `--emit-pipeline` is enabled.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineReport {
    pub command: String,
    pub input: PipelineInput,
    pub steps: Vec<String>,
    pub deterministic_guards: Vec<String>,
}

impl PipelineReport {
    pub fn new(
        command: impl Into<String>,
        input: PipelineInput,
        steps: Vec<String>,
        deterministic_guards: Vec<String>,
    ) -> Self {
        Self {
            command: command.into(),
            input,
            steps,
            deterministic_guards,
        }
    }
}

/// Input-source descriptors used in pipeline diagnostics.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineInput {
    pub sources: Vec<PipelineInputSource>,
}

impl PipelineInput {
    pub fn new(sources: Vec<PipelineInputSource>) -> Self {
        Self { sources }
    }
}

/// Single input source descriptor.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineInputSource {
    pub label: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl PipelineInputSource {
    pub fn stdin(label: impl Into<String>, format: Option<&str>) -> Self {
        Self {
            label: label.into(),
            source: "stdin".to_string(),
            path: None,
            format: format.map(ToOwned::to_owned),
        }
    }

    pub fn path(label: impl Into<String>, path: impl Into<String>, format: Option<&str>) -> Self {
        Self {
            label: label.into(),
            source: "path".to_string(),
            path: Some(path.into()),
            format: format.map(ToOwned::to_owned),
        }
    }
}
