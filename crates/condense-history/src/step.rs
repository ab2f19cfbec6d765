//! Single analysis step

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const COMPACT_RESULT_CHARS: usize = 150;

/// One recorded analysis action; immutable once appended to the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisStep {
    pub action: String,
    pub description: String,
    pub result_summary: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub chart_path: Option<String>,
    #[serde(default)]
    pub tokens_used: usize,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisStep {
    pub fn new(
        action: impl Into<String>,
        description: impl Into<String>,
        result_summary: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            result_summary: result_summary.into(),
            code: String::new(),
            chart_path: None,
            tokens_used: 0,
            timestamp: Utc::now(),
        }
    }

    /// Compact single-line form used by the middle history tiers
    pub fn to_compact(&self) -> String {
        let mut parts = vec![format!("[{}]", self.action), self.description.clone()];
        if !self.result_summary.is_empty() {
            parts.push(format!(
                "→ {}",
                truncate_with_ellipsis(&self.result_summary, COMPACT_RESULT_CHARS)
            ));
        }
        if self.chart_path.is_some() {
            parts.push("📊".to_string());
        }
        parts.join(" | ")
    }
}

/// First `max` characters, with an ellipsis when anything was cut
fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut cut: String = text.chars().take(max).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

/// First `max` characters, no ellipsis
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
