//! Column profiling and schema compression

use std::collections::HashMap;

use condense_model::{
    parse_naive_date, parse_naive_datetime, stats, Column, Dataset, TypeFamily, Value,
};
use condense_tokens::{estimate_tokens, round1};
use tracing::debug;

use crate::compact;
use crate::format::format_num;
use crate::types::{ColumnStats, ColumnSummary, DatasetSchema, ParseHint, SchemaComparison, SkewTag};

/// Distinct-count ceiling for the likely-categorical flag
const CATEGORICAL_UNIQUE_LIMIT: usize = 20;
/// Distinct values must also stay under this fraction of present values
const CATEGORICAL_UNIQUE_FRACTION: f64 = 0.05;
/// Skew magnitude beyond which a tag is emitted
const SKEW_TAG_THRESHOLD: f64 = 1.0;
/// Head sample size for the text-column reparse probe
const PARSE_HINT_SAMPLE: usize = 20;

/// Compresses a dataset profile into a compact representation
///
/// Deterministic and side-effect free; the same dataset always yields the
/// same compact string.
#[derive(Debug, Clone)]
pub struct SchemaCompressor {
    max_unique_display: usize,
}

impl SchemaCompressor {
    pub fn new() -> Self {
        Self {
            max_unique_display: 5,
        }
    }

    /// Profile every column and derive the compact string
    pub fn compress(&self, dataset: &Dataset, name: &str) -> DatasetSchema {
        let columns: Vec<ColumnSummary> = dataset
            .columns()
            .iter()
            .map(|col| self.compress_column(col))
            .collect();

        let mut schema = DatasetSchema {
            name: name.to_string(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            memory_mb: round2(dataset.memory_estimate_mb()),
            columns,
            compact_string: String::new(),
            token_estimate: 0,
        };
        schema.compact_string = compact::render(&schema);
        schema.token_estimate = estimate_tokens(&schema.compact_string);

        debug!(
            name,
            rows = schema.row_count,
            cols = schema.column_count,
            tokens = schema.token_estimate,
            "compressed schema"
        );
        schema
    }

    /// Token cost of the full representation against the compact string
    pub fn compare_full_vs_compressed(&self, dataset: &Dataset) -> SchemaComparison {
        let full = crate::compare::full_render(dataset);
        let full_tokens = estimate_tokens(&full);
        let compressed_tokens = self.compress(dataset, "dataset").token_estimate;
        SchemaComparison {
            full_tokens,
            compressed_tokens,
            savings_pct: condense_tokens::savings_pct(full_tokens, compressed_tokens),
            compression_ratio: condense_tokens::compression_ratio(full_tokens, compressed_tokens),
        }
    }

    fn compress_column(&self, col: &Column) -> ColumnSummary {
        let total = col.len();
        let null_count = col.null_count();
        let null_pct = if total == 0 {
            0.0
        } else {
            round1(null_count as f64 / total as f64 * 100.0)
        };
        let unique_count = distinct_count(col);
        let present = total - null_count;

        let stats = if present == 0 {
            Some(ColumnStats::AllNull)
        } else {
            match col.dtype.family() {
                TypeFamily::Numeric => Some(self.numeric_stats(col)),
                TypeFamily::Categorical => Some(self.categorical_stats(col)),
                TypeFamily::Datetime => Some(datetime_stats(col)),
                TypeFamily::Opaque => None,
            }
        };

        ColumnSummary {
            name: col.name.clone(),
            dtype: col.dtype.code(),
            null_count,
            null_pct,
            unique_count,
            stats,
        }
    }

    fn numeric_stats(&self, col: &Column) -> ColumnStats {
        let clean = col.numeric_values();
        let mut sorted = clean.clone();
        sorted.sort_by(f64::total_cmp);
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return ColumnStats::AllNull;
        };

        let mut distinct = sorted.clone();
        distinct.dedup();

        let likely_categorical = distinct.len() < CATEGORICAL_UNIQUE_LIMIT
            && (distinct.len() as f64) < clean.len() as f64 * CATEGORICAL_UNIQUE_FRACTION;
        let sample_values = if likely_categorical {
            distinct.iter().take(self.max_unique_display).copied().collect()
        } else {
            Vec::new()
        };

        let skew = stats::skewness(&clean).and_then(|s| {
            if s.abs() > SKEW_TAG_THRESHOLD {
                Some(if s > 0.0 {
                    SkewTag::HighRight
                } else {
                    SkewTag::HighLeft
                })
            } else {
                None
            }
        });

        ColumnStats::Numeric {
            min: format_num(min),
            max: format_num(max),
            mean: format_or_nan(stats::mean(&clean)),
            median: format_or_nan(stats::median(&clean)),
            std: format_or_nan(stats::sample_std(&clean)),
            likely_categorical,
            sample_values,
            skew,
        }
    }

    fn categorical_stats(&self, col: &Column) -> ColumnStats {
        let texts = col.text_values();

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u64> = HashMap::new();
        for t in &texts {
            if !counts.contains_key(t) {
                order.push(t.clone());
            }
            *counts.entry(t.clone()).or_insert(0) += 1;
        }
        let mut top_values: Vec<(String, u64)> = order
            .into_iter()
            .map(|k| {
                let n = counts[&k];
                (k, n)
            })
            .collect();
        // Stable sort keeps first-appearance order on count ties
        top_values.sort_by(|a, b| b.1.cmp(&a.1));
        top_values.truncate(self.max_unique_display);

        let total_chars: usize = texts.iter().map(|t| t.chars().count()).sum();
        let avg_len = round1(total_chars as f64 / texts.len() as f64);

        let hint = parse_hint(&texts[..texts.len().min(PARSE_HINT_SAMPLE)]);

        ColumnStats::Categorical {
            top_values,
            avg_len,
            hint,
        }
    }
}

impl Default for SchemaCompressor {
    fn default() -> Self {
        Self::new()
    }
}

fn datetime_stats(col: &Column) -> ColumnStats {
    let vals = col.datetime_values();
    let (Some(min), Some(max)) = (vals.iter().min(), vals.iter().max()) else {
        return ColumnStats::AllNull;
    };
    ColumnStats::Datetime {
        range: format!(
            "{} to {}",
            min.format("%Y-%m-%d"),
            max.format("%Y-%m-%d")
        ),
        span_days: (*max - *min).num_days(),
    }
}

/// Probe the head of a text column for values that parse as something
/// stronger than text
///
/// First-rows sampling is a documented approximation; it keeps the probe
/// deterministic and cheap on wide datasets.
fn parse_hint(sample: &[String]) -> Option<ParseHint> {
    if sample.is_empty() {
        return None;
    }
    if sample.iter().all(|s| s.trim().parse::<f64>().is_ok()) {
        return Some(ParseHint::ParseableAsNumeric);
    }
    if sample
        .iter()
        .all(|s| parse_naive_date(s).is_some() || parse_naive_datetime(s).is_some())
    {
        return Some(ParseHint::ParseableAsDatetime);
    }
    None
}

fn distinct_count(col: &Column) -> usize {
    let mut vals: Vec<&Value> = col.non_null().collect();
    vals.sort();
    vals.dedup();
    vals.len()
}

fn format_or_nan(val: Option<f64>) -> String {
    val.map_or_else(|| "NaN".to_string(), format_num)
}

fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use condense_model::ColumnType;

    fn dataset(columns: Vec<Column>) -> Dataset {
        Dataset::new(columns).expect("valid dataset")
    }

    fn float_col(name: &str, vals: &[Option<f64>]) -> Column {
        Column::new(
            name,
            ColumnType::Float64,
            vals.iter().map(|v| v.map(Value::Float)).collect(),
        )
    }

    fn text_col(name: &str, vals: &[&str]) -> Column {
        Column::new(
            name,
            ColumnType::Text,
            vals.iter().map(|v| Some(Value::Text(v.to_string()))).collect(),
        )
    }

    #[test]
    fn test_numeric_profile() {
        let col = float_col("x", &[Some(1.0), Some(2.0), None, Some(4.0)]);
        let schema = SchemaCompressor::new().compress(&dataset(vec![col]), "t");
        let summary = &schema.columns[0];
        assert_eq!(summary.null_count, 1);
        assert_eq!(summary.null_pct, 25.0);
        assert_eq!(summary.unique_count, 3);
        match summary.stats.as_ref().expect("stats") {
            ColumnStats::Numeric { min, max, mean, std, .. } => {
                assert_eq!(min, "1");
                assert_eq!(max, "4");
                assert_eq!(mean, "2.33");
                assert_ne!(std, "NaN");
            }
            other => panic!("expected numeric stats, got {:?}", other),
        }
    }

    #[test]
    fn test_single_value_column_has_nan_std() {
        let col = float_col("x", &[Some(5.0), None]);
        let schema = SchemaCompressor::new().compress(&dataset(vec![col]), "t");
        match schema.columns[0].stats.as_ref().expect("stats") {
            ColumnStats::Numeric { std, .. } => assert_eq!(std, "NaN"),
            other => panic!("expected numeric stats, got {:?}", other),
        }
    }

    #[test]
    fn test_likely_categorical_flag() {
        // 3 distinct over 100 present: 3 < 20 and 3 < 5
        let vals: Vec<Option<f64>> = (0..100).map(|i| Some((i % 3) as f64)).collect();
        let schema =
            SchemaCompressor::new().compress(&dataset(vec![float_col("code", &vals)]), "t");
        match schema.columns[0].stats.as_ref().expect("stats") {
            ColumnStats::Numeric {
                likely_categorical,
                sample_values,
                ..
            } => {
                assert!(*likely_categorical);
                assert_eq!(sample_values, &vec![0.0, 1.0, 2.0]);
            }
            other => panic!("expected numeric stats, got {:?}", other),
        }
    }

    #[test]
    fn test_categorical_flag_needs_both_bounds() {
        // 10 distinct over 100 present: 10 < 20 but 10 >= 5
        let vals: Vec<Option<f64>> = (0..100).map(|i| Some((i % 10) as f64)).collect();
        let schema =
            SchemaCompressor::new().compress(&dataset(vec![float_col("code", &vals)]), "t");
        match schema.columns[0].stats.as_ref().expect("stats") {
            ColumnStats::Numeric {
                likely_categorical, ..
            } => assert!(!*likely_categorical),
            other => panic!("expected numeric stats, got {:?}", other),
        }
    }

    #[test]
    fn test_skew_tag() {
        let col = float_col("x", &[Some(1.0), Some(1.0), Some(1.0), Some(10.0)]);
        let schema = SchemaCompressor::new().compress(&dataset(vec![col]), "t");
        match schema.columns[0].stats.as_ref().expect("stats") {
            ColumnStats::Numeric { skew, .. } => assert_eq!(*skew, Some(SkewTag::HighRight)),
            other => panic!("expected numeric stats, got {:?}", other),
        }
    }

    #[test]
    fn test_top_values_tie_break_is_first_appearance() {
        let col = text_col("city", &["b", "a", "b", "a", "c"]);
        let schema = SchemaCompressor::new().compress(&dataset(vec![col]), "t");
        match schema.columns[0].stats.as_ref().expect("stats") {
            ColumnStats::Categorical { top_values, .. } => {
                assert_eq!(
                    top_values,
                    &vec![("b".to_string(), 2), ("a".to_string(), 2), ("c".to_string(), 1)]
                );
            }
            other => panic!("expected categorical stats, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hints() {
        let numbers = text_col("n", &["1", "2.5", "-3"]);
        let dates = text_col("d", &["2024-01-01", "2024-02-01"]);
        let mixed = text_col("m", &["1", "apple"]);
        let schema =
            SchemaCompressor::new().compress(&dataset(vec![numbers, dates, mixed]), "t");

        let hint_of = |i: usize| match schema.columns[i].stats.as_ref().expect("stats") {
            ColumnStats::Categorical { hint, .. } => *hint,
            other => panic!("expected categorical stats, got {:?}", other),
        };
        assert_eq!(hint_of(0), Some(ParseHint::ParseableAsNumeric));
        assert_eq!(hint_of(1), Some(ParseHint::ParseableAsDatetime));
        assert_eq!(hint_of(2), None);
    }

    #[test]
    fn test_all_null_column_any_type() {
        let floats = float_col("f", &[None, None]);
        let texts = Column::new("t", ColumnType::Text, vec![None, None]);
        let schema = SchemaCompressor::new().compress(&dataset(vec![floats, texts]), "t");
        assert_eq!(schema.columns[0].stats, Some(ColumnStats::AllNull));
        assert_eq!(schema.columns[1].stats, Some(ColumnStats::AllNull));
    }

    #[test]
    fn test_opaque_column_has_no_stats() {
        let col = Column::new(
            "blob",
            ColumnType::Other("complex128".into()),
            vec![Some(Value::Text("1+2j".into()))],
        );
        let schema = SchemaCompressor::new().compress(&dataset(vec![col]), "t");
        assert_eq!(schema.columns[0].dtype, "comp");
        assert!(schema.columns[0].stats.is_none());
    }

    #[test]
    fn test_datetime_range_and_span() {
        let d = |y, m, day| {
            Some(Value::Date(
                NaiveDate::from_ymd_opt(y, m, day).expect("valid date"),
            ))
        };
        let col = Column::new(
            "day",
            ColumnType::Date,
            vec![d(2024, 1, 1), d(2024, 3, 1), None],
        );
        let schema = SchemaCompressor::new().compress(&dataset(vec![col]), "t");
        match schema.columns[0].stats.as_ref().expect("stats") {
            ColumnStats::Datetime { range, span_days } => {
                assert_eq!(range, "2024-01-01 to 2024-03-01");
                assert_eq!(*span_days, 60);
            }
            other => panic!("expected datetime stats, got {:?}", other),
        }
    }

    #[test]
    fn test_comparison_floors_denominators() {
        let col = float_col("x", &[Some(1.0), Some(2.0)]);
        let cmp = SchemaCompressor::new().compare_full_vs_compressed(&dataset(vec![col]));
        assert!(cmp.full_tokens > 0);
        assert!(cmp.compression_ratio >= 1.0);
    }
}
