//! Schema profile types

use serde::{Deserialize, Serialize};

/// Direction of pronounced skew (|skewness| > 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkewTag {
    HighRight,
    HighLeft,
}

impl SkewTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkewTag::HighRight => "high_right",
            SkewTag::HighLeft => "high_left",
        }
    }
}

/// Reparse suggestion for text columns whose values look typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseHint {
    ParseableAsNumeric,
    ParseableAsDatetime,
}

impl ParseHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseHint::ParseableAsNumeric => "parseable_as_numeric",
            ParseHint::ParseableAsDatetime => "parseable_as_datetime",
        }
    }
}

/// Per-family column statistics
///
/// A column with zero present values is always `AllNull`, whatever its
/// declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric {
        min: String,
        max: String,
        mean: String,
        median: String,
        std: String,
        likely_categorical: bool,
        /// Up to five smallest distinct values, ascending; only populated
        /// when the column is flagged likely-categorical
        sample_values: Vec<f64>,
        skew: Option<SkewTag>,
    },
    Categorical {
        /// (value, count) pairs, frequency descending, first-appearance
        /// order on ties
        top_values: Vec<(String, u64)>,
        avg_len: f64,
        hint: Option<ParseHint>,
    },
    Datetime {
        range: String,
        span_days: i64,
    },
    AllNull,
}

/// Compressed profile of a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Short type code (i64, f64, str, cat, dt, ...)
    pub dtype: String,
    pub null_count: usize,
    pub null_pct: f64,
    pub unique_count: usize,
    /// None for opaque columns that still hold values
    pub stats: Option<ColumnStats>,
}

/// Compressed profile of a whole dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub memory_mb: f64,
    /// Column summaries in source order
    pub columns: Vec<ColumnSummary>,
    pub compact_string: String,
    pub token_estimate: usize,
}

/// Token cost of the full table representation against the compact string
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SchemaComparison {
    pub full_tokens: usize,
    pub compressed_tokens: usize,
    pub savings_pct: f64,
    pub compression_ratio: f64,
}
