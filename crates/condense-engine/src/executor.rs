//! Executor seam

use condense_model::Dataset;
use serde::{Deserialize, Serialize};

/// Result of running one analysis recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecOutcome {
    pub success: bool,
    pub stdout: String,
    #[serde(default)]
    pub result_value: String,
    #[serde(default)]
    pub chart_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecOutcome {
    pub fn success(stdout: String) -> Self {
        Self {
            success: true,
            stdout,
            result_value: String::new(),
            chart_path: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            result_value: String::new(),
            chart_path: None,
            error: Some(error.into()),
        }
    }
}

/// Runs analysis recipes against a dataset
pub trait Executor {
    fn execute(&self, code: &str, dataset: &Dataset) -> ExecOutcome;
}
