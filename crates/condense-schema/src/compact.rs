//! Compact string rendering
//!
//! One header line, a `COLS:` marker, then one pipe-joined line per column.
//! Absent fields are omitted, never rendered empty.

use crate::types::{ColumnStats, DatasetSchema};

pub(crate) fn render(schema: &DatasetSchema) -> String {
    let mut lines = Vec::with_capacity(schema.columns.len() + 2);
    lines.push(format!(
        "DS:{}|{}r×{}c|{}MB",
        schema.name,
        schema.row_count,
        schema.column_count,
        py_float(schema.memory_mb)
    ));
    lines.push("COLS:".to_string());

    for col in &schema.columns {
        let mut parts = vec![format!("  {}({})", col.name, col.dtype)];

        if col.null_pct > 0.0 {
            parts.push(format!("null:{}%", py_float(col.null_pct)));
        }
        parts.push(format!("uniq:{}", col.unique_count));

        match &col.stats {
            Some(ColumnStats::Numeric {
                min,
                max,
                mean,
                likely_categorical,
                skew,
                ..
            }) => {
                parts.push(format!("[{}..{}]", min, max));
                parts.push(format!("μ={}", mean));
                if *likely_categorical {
                    parts.push("⚠cat".to_string());
                }
                if let Some(tag) = skew {
                    parts.push(format!("skew:{}", tag.as_str()));
                }
            }
            Some(ColumnStats::Categorical {
                top_values, hint, ..
            }) => {
                let top: Vec<&str> = top_values.iter().take(3).map(|(v, _)| v.as_str()).collect();
                parts.push(format!("top:{}", top.join(",")));
                if let Some(h) = hint {
                    parts.push(format!("hint:{}", h.as_str()));
                }
            }
            Some(ColumnStats::Datetime { range, .. }) => {
                parts.push(format!("range:{}", range));
            }
            Some(ColumnStats::AllNull) | None => {}
        }

        lines.push(parts.join("|"));
    }

    lines.join("\n")
}

/// Render a rounded float the way a dynamic language would: whole values
/// keep one decimal (`2.0`), everything else prints shortest (`0.31`)
fn py_float(val: f64) -> String {
    if val.fract() == 0.0 {
        format!("{:.1}", val)
    } else {
        format!("{}", val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemaCompressor;
    use condense_model::{Column, ColumnType, Dataset, Value};

    #[test]
    fn test_py_float() {
        assert_eq!(py_float(2.0), "2.0");
        assert_eq!(py_float(0.0), "0.0");
        assert_eq!(py_float(0.31), "0.31");
        assert_eq!(py_float(33.3), "33.3");
    }

    #[test]
    fn test_compact_string_golden() {
        let id = Column::new(
            "id",
            ColumnType::Int64,
            (1..=5).map(|i| Some(Value::Int(i))).collect(),
        );
        let amount = Column::new(
            "amount",
            ColumnType::Float64,
            vec![
                Some(Value::Float(10.5)),
                Some(Value::Float(20.25)),
                None,
                Some(Value::Float(40.0)),
                Some(Value::Float(101.25)),
            ],
        );
        let city = Column::new(
            "city",
            ColumnType::Text,
            ["NY", "LA", "NY", "SF", "LA"]
                .iter()
                .map(|s| Some(Value::Text(s.to_string())))
                .collect(),
        );
        let ds = Dataset::new(vec![id, amount, city]).expect("valid dataset");
        let schema = SchemaCompressor::new().compress(&ds, "sales");

        let expected = "\
DS:sales|5r×3c|0.0MB
COLS:
  id(i64)|uniq:5|[1..5]|μ=3
  amount(f64)|null:20.0%|uniq:4|[10.50..101.25]|μ=43
  city(str)|uniq:3|top:NY,LA,SF";
        assert_eq!(schema.compact_string, expected);
        assert_eq!(
            schema.token_estimate,
            schema.compact_string.chars().count() / 4
        );
    }

    #[test]
    fn test_zero_null_pct_is_omitted() {
        let col = Column::new("x", ColumnType::Int64, vec![Some(Value::Int(1))]);
        let ds = Dataset::new(vec![col]).expect("valid dataset");
        let schema = SchemaCompressor::new().compress(&ds, "t");
        assert!(!schema.compact_string.contains("null:"));
    }

    #[test]
    fn test_all_null_column_renders_bare() {
        let col = Column::new("gone", ColumnType::Float64, vec![None, None]);
        let ds = Dataset::new(vec![col]).expect("valid dataset");
        let schema = SchemaCompressor::new().compress(&ds, "t");
        let line = schema
            .compact_string
            .lines()
            .find(|l| l.contains("gone"))
            .expect("column line");
        assert_eq!(line, "  gone(f64)|null:100.0%|uniq:0");
    }
}
