//! Tiered history rendering and token accounting

use std::collections::HashMap;

use condense_tokens::{estimate_tokens, savings_pct};
use serde::{Deserialize, Serialize};

use crate::step::{truncate_chars, AnalysisStep};

const DEFAULT_MAX_DETAILED_STEPS: usize = 5;
const DEFAULT_MAX_SUMMARY_STEPS: usize = 20;
const NO_HISTORY_SENTINEL: &str = "No analysis performed yet.";
const FINDINGS_DISPLAY_LIMIT: usize = 10;
const DETAILED_RESULT_CHARS: usize = 200;

/// Token savings achieved by rendering history in tiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavingsReport {
    pub uncompressed_tokens: usize,
    pub compressed_tokens: usize,
    pub savings_pct: f64,
}

/// Ledger counters and distinct actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_steps: usize,
    pub total_tokens_used: usize,
    pub total_tokens_saved: usize,
    pub key_findings_count: usize,
    /// Distinct actions in first-seen order
    pub actions_performed: Vec<String>,
}

/// Append-only analysis history with bounded rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLedger {
    steps: Vec<AnalysisStep>,
    max_detailed_steps: usize,
    max_summary_steps: usize,
    key_findings: Vec<String>,
    total_tokens_used: usize,
    total_tokens_saved: usize,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_DETAILED_STEPS, DEFAULT_MAX_SUMMARY_STEPS)
    }

    pub fn with_limits(max_detailed_steps: usize, max_summary_steps: usize) -> Self {
        Self {
            steps: Vec::new(),
            max_detailed_steps,
            max_summary_steps,
            key_findings: Vec::new(),
            total_tokens_used: 0,
            total_tokens_saved: 0,
        }
    }

    pub fn add_step(&mut self, step: AnalysisStep) {
        self.total_tokens_used += step.tokens_used;
        self.steps.push(step);
    }

    pub fn add_finding(&mut self, finding: impl Into<String>) {
        self.key_findings.push(finding.into());
    }

    pub fn add_tokens_saved(&mut self, tokens: usize) {
        self.total_tokens_saved += tokens;
    }

    pub fn steps(&self) -> &[AnalysisStep] {
        &self.steps
    }

    pub fn key_findings(&self) -> &[String] {
        &self.key_findings
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_tokens_used(&self) -> usize {
        self.total_tokens_used
    }

    pub fn total_tokens_saved(&self) -> usize {
        self.total_tokens_saved
    }

    /// Render the history in tiers
    ///
    /// Oldest steps collapse into an aggregate count line, the middle band
    /// keeps compact one-liners, the newest `max_detailed_steps` keep full
    /// detail. Findings always lead and the token counters always trail.
    pub fn render_compressed_history(&self) -> String {
        if self.steps.is_empty() {
            return NO_HISTORY_SENTINEL.to_string();
        }

        let mut lines: Vec<String> = Vec::new();

        if !self.key_findings.is_empty() {
            lines.push("KEY FINDINGS:".to_string());
            let start = self.key_findings.len().saturating_sub(FINDINGS_DISPLAY_LIMIT);
            for (i, finding) in self.key_findings[start..].iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, finding));
            }
            lines.push(String::new());
        }

        let total = self.steps.len();
        if total <= self.max_detailed_steps {
            lines.push(format!("ANALYSIS HISTORY ({} steps):", total));
            for step in &self.steps {
                lines.push(format!("  • {}", step.to_compact()));
            }
        } else {
            let old_cutoff = total.saturating_sub(self.max_summary_steps);
            if old_cutoff > 0 {
                lines.push(format!(
                    "EARLIER: {} steps ({})",
                    old_cutoff,
                    action_counts(&self.steps[..old_cutoff]).join(", ")
                ));
                lines.push(String::new());
            }

            let detail_start = total - self.max_detailed_steps;
            if old_cutoff < detail_start {
                lines.push("RECENT STEPS:".to_string());
                for step in &self.steps[old_cutoff..detail_start] {
                    lines.push(format!("  → {}", step.to_compact()));
                }
                lines.push(String::new());
            }

            lines.push("LATEST STEPS:".to_string());
            for step in &self.steps[detail_start..] {
                lines.push(format!("  • [{}] {}", step.action, step.description));
                if !step.result_summary.is_empty() {
                    lines.push(format!(
                        "    Result: {}",
                        truncate_chars(&step.result_summary, DETAILED_RESULT_CHARS)
                    ));
                }
                if let Some(path) = &step.chart_path {
                    lines.push(format!("    Chart: {}", path));
                }
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "TOKENS: used={}, saved={}",
            self.total_tokens_used, self.total_tokens_saved
        ));

        lines.join("\n")
    }

    /// Full step dump as JSON, the baseline the tiered render is measured
    /// against
    pub fn serialize_full(&self) -> String {
        serde_json::to_string(&self.steps).unwrap_or_default()
    }

    pub fn savings_report(&self) -> SavingsReport {
        let uncompressed = estimate_tokens(&self.serialize_full());
        let compressed = estimate_tokens(&self.render_compressed_history());
        SavingsReport {
            uncompressed_tokens: uncompressed,
            compressed_tokens: compressed,
            savings_pct: savings_pct(uncompressed, compressed),
        }
    }

    pub fn stats(&self) -> LedgerStats {
        let mut actions: Vec<String> = Vec::new();
        for step in &self.steps {
            if !actions.contains(&step.action) {
                actions.push(step.action.clone());
            }
        }
        LedgerStats {
            total_steps: self.steps.len(),
            total_tokens_used: self.total_tokens_used,
            total_tokens_saved: self.total_tokens_saved,
            key_findings_count: self.key_findings.len(),
            actions_performed: actions,
        }
    }

    pub fn clear(&mut self) {
        self.steps.clear();
        self.key_findings.clear();
        self.total_tokens_used = 0;
        self.total_tokens_saved = 0;
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// `Nx action` fragments in first-seen order
fn action_counts(steps: &[AnalysisStep]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for step in steps {
        let action = step.action.as_str();
        if !counts.contains_key(action) {
            order.push(action);
        }
        *counts.entry(action).or_insert(0) += 1;
    }
    order
        .into_iter()
        .map(|a| format!("{}x {}", counts[a], a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(action: &str, i: usize) -> AnalysisStep {
        AnalysisStep::new(action, format!("step number {}", i), format!("result {}", i))
    }

    #[test]
    fn test_empty_ledger_renders_sentinel() {
        let ledger = HistoryLedger::new();
        assert_eq!(ledger.render_compressed_history(), "No analysis performed yet.");
    }

    #[test]
    fn test_small_history_is_fully_detailed() {
        let mut ledger = HistoryLedger::new();
        for i in 0..3 {
            ledger.add_step(step("overview", i));
        }
        let out = ledger.render_compressed_history();
        assert!(out.starts_with("ANALYSIS HISTORY (3 steps):"));
        assert_eq!(out.matches("  • ").count(), 3);
        assert!(!out.contains("RECENT STEPS:"));
        assert!(!out.contains("LATEST STEPS:"));
        assert!(out.ends_with("TOKENS: used=0, saved=0"));
    }

    #[test]
    fn test_three_tier_boundaries() {
        let mut ledger = HistoryLedger::new();
        for i in 0..30 {
            let action = if i < 10 {
                if i % 2 == 0 { "overview" } else { "describe" }
            } else {
                "correlations"
            };
            ledger.add_step(step(action, i));
        }
        let out = ledger.render_compressed_history();

        assert!(
            out.contains("EARLIER: 10 steps (5x overview, 5x describe)"),
            "Got {}",
            out
        );
        // middle band is steps 10..25
        assert_eq!(out.matches("  → ").count(), 15);
        assert!(out.contains("step number 10"));
        assert!(out.contains("step number 24"));
        // detailed band is steps 25..30
        assert!(out.contains("LATEST STEPS:"));
        assert!(out.contains("  • [correlations] step number 29"));
        assert!(out.contains("    Result: result 29"));
    }

    #[test]
    fn test_exactly_at_detailed_limit_stays_flat() {
        let mut ledger = HistoryLedger::new();
        for i in 0..5 {
            ledger.add_step(step("overview", i));
        }
        let out = ledger.render_compressed_history();
        assert!(out.contains("ANALYSIS HISTORY (5 steps):"));
        assert!(!out.contains("EARLIER:"));
    }

    #[test]
    fn test_findings_show_last_ten_renumbered() {
        let mut ledger = HistoryLedger::new();
        ledger.add_step(step("overview", 0));
        for i in 0..12 {
            ledger.add_finding(format!("finding {}", i));
        }
        let out = ledger.render_compressed_history();
        assert!(out.contains("KEY FINDINGS:"));
        assert!(out.contains("  1. finding 2"));
        assert!(out.contains("  10. finding 11"));
        assert!(!out.contains("finding 0\n"));
    }

    #[test]
    fn test_detailed_result_truncates_without_ellipsis() {
        let mut ledger = HistoryLedger::with_limits(2, 4);
        for i in 0..3 {
            let mut s = step("custom", i);
            s.result_summary = "y".repeat(300);
            ledger.add_step(s);
        }
        let out = ledger.render_compressed_history();
        let expected = format!("    Result: {}", "y".repeat(200));
        assert!(out.contains(&expected));
        assert!(!out.contains(&format!("{}...", "y".repeat(200))));
    }

    #[test]
    fn test_chart_line_in_detail() {
        let mut ledger = HistoryLedger::new();
        let mut s = step("distributions", 0);
        s.chart_path = Some("charts/dist.png".to_string());
        ledger.add_step(s);
        let out = ledger.render_compressed_history();
        assert!(out.contains("📊"));

        // push past the detailed threshold so the chart shows as its own line
        for i in 1..7 {
            ledger.add_step(step("describe", i));
        }
        let mut s = step("pairplot", 7);
        s.chart_path = Some("charts/pair.png".to_string());
        ledger.add_step(s);
        let out = ledger.render_compressed_history();
        assert!(out.contains("    Chart: charts/pair.png"));
    }

    #[test]
    fn test_token_counters_accumulate() {
        let mut ledger = HistoryLedger::new();
        let mut s = step("overview", 0);
        s.tokens_used = 7;
        ledger.add_step(s);
        let mut s = step("describe", 1);
        s.tokens_used = 7;
        ledger.add_step(s);
        ledger.add_tokens_saved(5);
        assert_eq!(ledger.total_tokens_used(), 14);
        assert!(ledger
            .render_compressed_history()
            .ends_with("TOKENS: used=14, saved=5"));
    }

    #[test]
    fn test_savings_report_positive_for_verbose_steps() {
        let mut ledger = HistoryLedger::new();
        for i in 0..20 {
            let mut s = step("describe", i);
            s.result_summary = "long result text ".repeat(40);
            s.code = "print('x')\n".repeat(20);
            ledger.add_step(s);
        }
        let report = ledger.savings_report();
        assert!(report.uncompressed_tokens > report.compressed_tokens);
        assert!(report.savings_pct > 0.0);
    }

    #[test]
    fn test_stats_actions_first_seen_order() {
        let mut ledger = HistoryLedger::new();
        ledger.add_step(step("describe", 0));
        ledger.add_step(step("overview", 1));
        ledger.add_step(step("describe", 2));
        let stats = ledger.stats();
        assert_eq!(stats.total_steps, 3);
        assert_eq!(stats.actions_performed, vec!["describe", "overview"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut ledger = HistoryLedger::new();
        let mut s = step("overview", 0);
        s.tokens_used = 9;
        ledger.add_step(s);
        ledger.add_finding("something");
        ledger.add_tokens_saved(4);
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_tokens_used(), 0);
        assert_eq!(ledger.total_tokens_saved(), 0);
        assert_eq!(ledger.render_compressed_history(), "No analysis performed yet.");
    }
}
