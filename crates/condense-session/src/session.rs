//! Session state and dispatch

use condense_compress::{ClientStats, CompressionClient};
use condense_engine::{ExecOutcome, Executor, StatsEngine};
use condense_history::{AnalysisStep, HistoryLedger, SavingsReport};
use condense_model::Dataset;
use condense_schema::{DatasetSchema, SchemaComparison, SchemaCompressor};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::catalogue;
use crate::findings;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no dataset loaded")]
    NoDataset,
}

/// Schema produced by a load, with the full-vs-compact comparison
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub schema: DatasetSchema,
    pub comparison: SchemaComparison,
}

/// Everything a single dispatched action produced
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub tool: String,
    pub success: bool,
    pub stdout: String,
    pub result_value: String,
    pub chart_path: Option<String>,
    pub error: Option<String>,
    pub code: String,
    pub tokens_used: usize,
    pub compression_savings: f64,
}

/// Token accounting across schema, history, and the compression client
#[derive(Debug, Clone, Serialize)]
pub struct TokenStats {
    pub schema_compression: Option<SchemaComparison>,
    pub history_compression: SavingsReport,
    pub compression_api: ClientStats,
    pub total_analysis_steps: usize,
}

/// One dataset, its compact schema, and the analysis history against it.
///
/// Holds at most one dataset at a time; loading another clears the ledger.
/// No internal locking: callers serialize access per session.
pub struct Session {
    executor: Box<dyn Executor>,
    compressor: SchemaCompressor,
    client: CompressionClient,
    ledger: HistoryLedger,
    dataset: Option<Dataset>,
    schema: Option<DatasetSchema>,
    dataset_name: String,
}

impl Session {
    /// Session backed by the built-in stats engine
    pub fn new() -> Self {
        Self::with_executor(Box::new(StatsEngine::new()))
    }

    pub fn with_executor(executor: Box<dyn Executor>) -> Self {
        Self {
            executor,
            compressor: SchemaCompressor::new(),
            client: CompressionClient::new(),
            ledger: HistoryLedger::new(),
            dataset: None,
            schema: None,
            dataset_name: "dataset".to_string(),
        }
    }

    /// Load a dataset, clearing any previous history
    pub fn load(&mut self, dataset: Dataset, name: &str) -> LoadReport {
        debug!(name, rows = dataset.row_count(), "loading dataset");
        self.ledger.clear();

        let schema = self.compressor.compress(&dataset, name);
        let comparison = self.compressor.compare_full_vs_compressed(&dataset);
        self.schema = Some(schema.clone());
        self.dataset = Some(dataset);
        self.dataset_name = name.to_string();

        LoadReport { schema, comparison }
    }

    /// Run one action and fold the result into history.
    ///
    /// Executor failure is recorded as step data, not returned as an error;
    /// only a missing dataset fails the call.
    pub fn dispatch(&mut self, action: &str, query: &str) -> Result<StepReport, SessionError> {
        let dataset = self.dataset.as_ref().ok_or(SessionError::NoDataset)?;
        debug!(action, "dispatching analysis");

        let code = catalogue::recipe(action, query);
        let outcome = self.executor.execute(&code, dataset);

        let summary = result_summary(&outcome);
        let compressed = self.client.compress(&summary);
        let saved = compressed.input_tokens as i64 - compressed.output_tokens as i64;
        self.ledger.add_tokens_saved(saved.max(0) as usize);

        let mut step = AnalysisStep::new(
            action,
            catalogue::description(action, query),
            compressed.compressed_text,
        );
        step.code = code.clone();
        step.chart_path = outcome.chart_path.clone();
        step.tokens_used = compressed.output_tokens;
        let tokens_used = step.tokens_used;
        self.ledger.add_step(step);

        if outcome.success && !outcome.stdout.is_empty() {
            for finding in findings::extract(&outcome.stdout) {
                self.ledger.add_finding(finding);
            }
        }

        Ok(StepReport {
            tool: action.to_string(),
            success: outcome.success,
            stdout: outcome.stdout,
            result_value: outcome.result_value,
            chart_path: outcome.chart_path,
            error: outcome.error,
            code,
            tokens_used,
            compression_savings: compressed.savings_pct,
        })
    }

    /// Free-form query routed through the keyword rules
    pub fn analyze(&mut self, query: &str) -> Result<StepReport, SessionError> {
        self.dispatch("custom", query)
    }

    /// Canned analysis sequence driven by dataset shape
    pub fn auto_analyze(&mut self) -> Result<Vec<StepReport>, SessionError> {
        let (has_nulls, number_count, categorical_count) = {
            let dataset = self.dataset.as_ref().ok_or(SessionError::NoDataset)?;
            (
                dataset.columns().iter().any(|c| c.null_count() > 0),
                dataset.number_columns().len(),
                dataset.categorical_columns().len(),
            )
        };

        let mut reports = Vec::new();
        reports.push(self.dispatch("overview", "")?);
        reports.push(self.dispatch("describe", "")?);
        if has_nulls {
            reports.push(self.dispatch("missing_analysis", "")?);
        }
        if number_count > 0 {
            reports.push(self.dispatch("distributions", "")?);
        }
        if number_count >= 2 {
            reports.push(self.dispatch("correlations", "")?);
        }
        if categorical_count > 0 {
            reports.push(self.dispatch("value_counts", "")?);
        }
        if number_count > 0 {
            reports.push(self.dispatch("outliers", "")?);
        }
        Ok(reports)
    }

    /// Compact schema plus tiered history, compressed once more on the way
    /// out
    pub fn assemble_context(&mut self) -> String {
        let mut parts = Vec::new();
        if let Some(schema) = &self.schema {
            parts.push("DATASET SCHEMA:".to_string());
            parts.push(schema.compact_string.clone());
            parts.push(String::new());
        }
        parts.push(self.ledger.render_compressed_history());

        let full = parts.join("\n");
        self.client.compress(&full).compressed_text
    }

    pub fn token_stats(&self) -> TokenStats {
        let schema_compression = self
            .dataset
            .as_ref()
            .map(|ds| self.compressor.compare_full_vs_compressed(ds));
        TokenStats {
            schema_compression,
            history_compression: self.ledger.savings_report(),
            compression_api: self.client.stats(),
            total_analysis_steps: self.ledger.len(),
        }
    }

    pub fn schema(&self) -> Option<&DatasetSchema> {
        self.schema.as_ref()
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    pub fn has_dataset(&self) -> bool {
        self.dataset.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// History-facing text for an executor outcome
fn result_summary(outcome: &ExecOutcome) -> String {
    if !outcome.success {
        return format!(
            "Error: {}",
            outcome.error.as_deref().unwrap_or("execution failed")
        );
    }
    let mut summary = outcome.stdout.clone();
    if !outcome.result_value.is_empty() {
        summary.push_str("\nResult: ");
        summary.push_str(&outcome.result_value);
    }
    summary
}
