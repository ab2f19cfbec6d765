//! CSV ingestion with per-column type inference

use std::path::Path;

use anyhow::Context;
use condense_model::{parse_naive_date, parse_naive_datetime, Column, ColumnType, Dataset, Value};

/// Load a CSV file into a typed dataset.
///
/// Column types are inferred from the present values, narrowest first:
/// Int64, Float64, Bool, Date, DateTime, then Text. Empty cells load as
/// nulls. Ragged rows fail the load.
pub fn load_csv(path: &str) -> anyhow::Result<Dataset> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening CSV file {path:?}"))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading CSV headers from {path:?}"))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading row {} of {path:?}", idx + 1))?;
        for (col, field) in record.iter().enumerate() {
            let trimmed = field.trim();
            cells[col].push(if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            });
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| {
            let dtype = infer_type(&raw);
            let values = raw
                .into_iter()
                .map(|cell| cell.and_then(|s| convert_cell(&s, &dtype)))
                .collect();
            Column::new(name, dtype, values)
        })
        .collect();

    Ok(Dataset::new(columns)?)
}

/// File stem of the CSV path, for schema headers
pub fn dataset_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

fn infer_type(raw: &[Option<String>]) -> ColumnType {
    let present: Vec<&str> = raw.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        return ColumnType::Text;
    }
    if present.iter().all(|v| v.parse::<i64>().is_ok()) {
        return ColumnType::Int64;
    }
    if present.iter().all(|v| v.parse::<f64>().is_ok()) {
        return ColumnType::Float64;
    }
    if present.iter().all(|v| parse_bool(v).is_some()) {
        return ColumnType::Bool;
    }
    if present.iter().all(|v| parse_naive_date(v).is_some()) {
        return ColumnType::Date;
    }
    if present.iter().all(|v| parse_naive_datetime(v).is_some()) {
        return ColumnType::DateTime;
    }
    ColumnType::Text
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn convert_cell(raw: &str, dtype: &ColumnType) -> Option<Value> {
    match dtype {
        ColumnType::Int64 => raw.parse::<i64>().ok().map(Value::Int),
        ColumnType::Float64 => raw.parse::<f64>().ok().map(Value::Float),
        ColumnType::Bool => parse_bool(raw).map(Value::Bool),
        ColumnType::Date => parse_naive_date(raw).map(Value::Date),
        ColumnType::DateTime => parse_naive_datetime(raw).map(Value::DateTime),
        _ => Some(Value::Text(raw.to_string())),
    }
}
