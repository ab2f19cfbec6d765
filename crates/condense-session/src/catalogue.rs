//! Tool catalogue and free-form query routing

/// A canned analysis the session can dispatch
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub id: &'static str,
    pub description: &'static str,
}

/// Every tool the session knows how to run
pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        id: "overview",
        description: "Get dataset overview (shape, types, memory, null counts)",
    },
    ToolSpec {
        id: "describe",
        description: "Statistical summary of numeric columns",
    },
    ToolSpec {
        id: "correlations",
        description: "Correlation matrix and top correlations",
    },
    ToolSpec {
        id: "distributions",
        description: "Distribution plots for numeric columns",
    },
    ToolSpec {
        id: "value_counts",
        description: "Value counts for categorical columns",
    },
    ToolSpec {
        id: "missing_analysis",
        description: "Analyze missing value patterns",
    },
    ToolSpec {
        id: "outliers",
        description: "Detect outliers using IQR method",
    },
    ToolSpec {
        id: "pairplot",
        description: "Pairwise scatter plots for numeric columns",
    },
    ToolSpec {
        id: "time_analysis",
        description: "Time-based analysis (if datetime columns exist)",
    },
    ToolSpec {
        id: "custom",
        description: "Run custom analysis based on user query",
    },
];

/// Ordered keyword groups for free-form queries; the first group with a
/// hit wins, so order is part of the contract
const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (&["correlat", "relationship", "relation"], "correlations"),
    (&["distribut", "histogram", "hist"], "distributions"),
    (&["missing", "null", "nan"], "missing_analysis"),
    (&["outlier", "anomal"], "outliers"),
    (&["categor", "value count", "unique"], "value_counts"),
    (&["describe", "summary", "stats", "statistic"], "describe"),
    (&["overview", "info", "shape"], "overview"),
    (&["pair", "scatter"], "pairplot"),
    (&["time", "date", "trend", "temporal"], "time_analysis"),
];

/// Tool id a free-form query maps to, None when nothing matches
pub fn resolve_query(query: &str) -> Option<&'static str> {
    let lower = query.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, tool)| *tool)
}

/// Description recorded for a dispatched action
pub fn description(action: &str, query: &str) -> String {
    match TOOLS.iter().find(|t| t.id == action) {
        Some(spec) => spec.description.to_string(),
        None if !query.is_empty() => query.to_string(),
        None => action.to_string(),
    }
}

/// Recipe text handed to the executor.
///
/// A custom action first tries the keyword rules and borrows the matching
/// tool's recipe; only unmatched queries fall through to the generic one.
pub fn recipe(action: &str, query: &str) -> String {
    if action == "custom" {
        if let Some(resolved) = resolve_query(query) {
            return format!("# tool: {}\n", resolved);
        }
        if !query.is_empty() {
            return format!("# tool: custom\n# query: {}\n", query);
        }
    }
    format!("# tool: {}\n", action)
}
