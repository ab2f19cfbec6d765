//! Deterministic in-process executor

use condense_model::Dataset;
use tracing::debug;

use crate::executor::{ExecOutcome, Executor};
use crate::tools;

/// Recipe header line naming the analysis to run
const TOOL_HEADER: &str = "# tool:";

/// Executor that computes every canned analysis in-process.
///
/// Recipes are dispatched on their `# tool: <id>` header; the rest of the
/// recipe text is kept only for the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine;

impl StatsEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for StatsEngine {
    fn execute(&self, code: &str, dataset: &Dataset) -> ExecOutcome {
        let Some(tool) = parse_tool_header(code) else {
            return ExecOutcome::failure("recipe is missing a '# tool:' header");
        };
        debug!(tool, "running analysis");
        let stdout = match tool {
            "overview" => tools::overview(dataset),
            "describe" => tools::describe(dataset),
            "correlations" => tools::correlations(dataset),
            "distributions" => tools::distributions(dataset),
            "value_counts" => tools::value_counts(dataset),
            "missing_analysis" => tools::missing_analysis(dataset),
            "outliers" => tools::outliers(dataset),
            "pairplot" => tools::pairplot(dataset),
            "time_analysis" => tools::time_analysis(dataset),
            "custom" => tools::custom(dataset),
            other => format!("Unknown tool: {}", other),
        };
        ExecOutcome::success(stdout)
    }
}

/// First `# tool: <id>` line of a recipe, trimmed
fn parse_tool_header(code: &str) -> Option<&str> {
    code.lines()
        .find_map(|line| line.trim().strip_prefix(TOOL_HEADER).map(str::trim))
        .filter(|t| !t.is_empty())
}
