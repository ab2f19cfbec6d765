//! Canned analysis routines
//!
//! Stdout keeps the glyph conventions downstream findings extraction keys
//! on: ⚠ for anomalies, 🔴/🟡/🟢 for correlation strength, ✅ for clean
//! results.

use std::collections::HashMap;

use chrono::{NaiveDateTime, NaiveTime};
use condense_model::{
    parse_naive_date, parse_naive_datetime, stats, Column, Dataset, TypeFamily,
};

const CORRELATION_FLOOR: f64 = 0.3;
const TOP_CORRELATIONS: usize = 10;
const DISTRIBUTION_COLUMN_LIMIT: usize = 12;
const VALUE_COUNT_DISPLAY: usize = 10;
const HEAD_ROWS: usize = 5;

fn header(title: &str) -> Vec<String> {
    let rule = "=".repeat(50);
    vec![rule.clone(), title.to_string(), rule]
}

pub(crate) fn overview(ds: &Dataset) -> String {
    let mut lines = header("DATASET OVERVIEW");
    lines.push(format!(
        "Shape: {} rows × {} columns",
        ds.row_count(),
        ds.column_count()
    ));
    lines.push(format!("Memory Usage: {:.2} MB", ds.memory_estimate_mb()));
    lines.push(String::new());
    lines.push("Column Types:".to_string());
    for (code, n) in type_counts(ds) {
        lines.push(format!("{}    {}", code, n));
    }
    lines.push(String::new());
    lines.push("Null Summary:".to_string());
    let nulls = null_columns(ds);
    if nulls.is_empty() {
        lines.push("  No missing values!".to_string());
    } else {
        for (name, count, pct) in nulls {
            lines.push(format!("  {}: {} ({:.1}%)", name, count, pct));
        }
    }
    lines.push(String::new());
    lines.push(format!("First {} rows:", HEAD_ROWS));
    lines.push(render_head(ds, HEAD_ROWS));
    lines.join("\n")
}

pub(crate) fn describe(ds: &Dataset) -> String {
    let mut lines = header("STATISTICAL SUMMARY");
    lines.extend(describe_lines(ds));
    let zero_var: Vec<&str> = ds
        .number_columns()
        .iter()
        .filter(|c| stats::sample_std(&c.numeric_values()) == Some(0.0))
        .map(|c| c.name.as_str())
        .collect();
    if !zero_var.is_empty() {
        lines.push(String::new());
        lines.push(format!("⚠ Zero-variance columns: {:?}", zero_var));
    }
    lines.join("\n")
}

pub(crate) fn correlations(ds: &Dataset) -> String {
    let cols = ds.number_columns();
    if cols.len() < 2 {
        return "Need at least 2 numeric columns for correlation analysis".to_string();
    }

    let mut pairs: Vec<(&str, &str, f64)> = Vec::new();
    for j in 1..cols.len() {
        for i in 0..j {
            let (xs, ys) = paired_values(cols[i], cols[j]);
            if let Some(r) = pearson(&xs, &ys) {
                let r = (r * 1000.0).round() / 1000.0;
                if r.abs() > CORRELATION_FLOOR {
                    pairs.push((&cols[i].name, &cols[j].name, r));
                }
            }
        }
    }
    pairs.sort_by(|a, b| b.2.abs().total_cmp(&a.2.abs()));

    let mut lines = header("CORRELATION ANALYSIS");
    lines.push(String::new());
    if pairs.is_empty() {
        lines.push("No strong correlations found (|r| > 0.3)".to_string());
    } else {
        lines.push("Top Correlations (|r| > 0.3):".to_string());
        for (a, b, r) in pairs.iter().take(TOP_CORRELATIONS) {
            let glyph = if r.abs() > 0.7 {
                "🔴"
            } else if r.abs() > 0.5 {
                "🟡"
            } else {
                "🟢"
            };
            lines.push(format!("  {} {} ↔ {}: {:+.3}", glyph, a, b, r));
        }
    }
    lines.join("\n")
}

pub(crate) fn distributions(ds: &Dataset) -> String {
    let mut lines = header("DISTRIBUTION ANALYSIS");
    for col in ds.number_columns().iter().take(DISTRIBUTION_COLUMN_LIMIT) {
        let clean = col.numeric_values();
        let skew = stats::skewness(&clean);
        let kurt = stats::kurtosis(&clean);
        let mut line = format!("  {}: skew={}, kurtosis={}", col.name, fmt2(skew), fmt2(kurt));
        if skew.is_some_and(|s| s.abs() > 2.0) {
            line.push_str(" ⚠ highly skewed");
        }
        if kurt.is_some_and(|k| k > 7.0) {
            line.push_str(" ⚠ heavy tails");
        }
        lines.push(line);
    }
    lines.join("\n")
}

pub(crate) fn value_counts(ds: &Dataset) -> String {
    let mut lines = header("CATEGORICAL ANALYSIS");
    for col in ds.categorical_columns() {
        let counts = count_values(col);
        lines.push(String::new());
        lines.push(format!("{} ({} unique values):", col.name, counts.len()));
        let width = counts
            .iter()
            .take(VALUE_COUNT_DISPLAY)
            .map(|(v, _)| v.chars().count())
            .max()
            .unwrap_or(0);
        for (value, n) in counts.iter().take(VALUE_COUNT_DISPLAY) {
            lines.push(format!("{}    {}", pad_right(value, width), n));
        }
        if counts.len() > VALUE_COUNT_DISPLAY {
            lines.push(format!("  ... and {} more", counts.len() - VALUE_COUNT_DISPLAY));
        }
    }
    lines.join("\n")
}

pub(crate) fn missing_analysis(ds: &Dataset) -> String {
    let mut lines = header("MISSING VALUE ANALYSIS");
    let total_cells = ds.row_count() * ds.column_count();
    let total_missing: usize = ds.columns().iter().map(Column::null_count).sum();
    let overall = if total_cells == 0 {
        0.0
    } else {
        total_missing as f64 / total_cells as f64 * 100.0
    };
    lines.push(format!(
        "Total missing: {}/{} ({:.1}%)",
        total_missing, total_cells, overall
    ));
    lines.push(String::new());

    let with_nulls = null_columns(ds);
    if with_nulls.is_empty() {
        lines.push("  ✅ No missing values found!".to_string());
    } else {
        for (name, count, pct) in with_nulls {
            let filled = ((pct / 5.0) as usize).min(20);
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled));
            lines.push(format!("  {:<30} {} {:>5.1}% ({})", name, bar, pct, count));
        }
    }
    lines.join("\n")
}

pub(crate) fn outliers(ds: &Dataset) -> String {
    let cols = ds.number_columns();
    let mut lines = header("OUTLIER ANALYSIS (IQR Method)");
    let total_rows = ds.row_count();
    let mut affected = 0usize;
    for col in &cols {
        let clean = col.numeric_values();
        let (Some(q1), Some(q3)) = (
            stats::quantile(&clean, 0.25),
            stats::quantile(&clean, 0.75),
        ) else {
            continue;
        };
        let iqr = q3 - q1;
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;
        let count = clean.iter().filter(|v| **v < lower || **v > upper).count();
        if count > 0 {
            affected += 1;
            let pct = if total_rows == 0 {
                0.0
            } else {
                count as f64 / total_rows as f64 * 100.0
            };
            lines.push(format!(
                "  {}: {} outliers ({:.1}%) | bounds: [{:.2}, {:.2}]",
                col.name, count, pct, lower, upper
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!("{}/{} columns have outliers", affected, cols.len()));
    lines.join("\n")
}

pub(crate) fn pairplot(ds: &Dataset) -> String {
    let names: Vec<&str> = ds
        .number_columns()
        .iter()
        .take(5)
        .map(|c| c.name.as_str())
        .collect();
    if names.len() >= 2 {
        format!("Pairplot generated for columns: {:?}", names)
    } else {
        "Need at least 2 numeric columns for pairplot".to_string()
    }
}

pub(crate) fn time_analysis(ds: &Dataset) -> String {
    let mut candidates: Vec<(&str, Vec<NaiveDateTime>)> = ds
        .datetime_columns()
        .iter()
        .map(|c| (c.name.as_str(), c.datetime_values()))
        .collect();
    if candidates.is_empty() {
        // date-like text columns qualify when their head parses cleanly
        for col in ds.categorical_columns() {
            let texts = col.text_values();
            let sample = &texts[..texts.len().min(20)];
            if sample.is_empty() {
                continue;
            }
            let parses = sample
                .iter()
                .all(|s| parse_naive_date(s).is_some() || parse_naive_datetime(s).is_some());
            if parses {
                let parsed: Vec<NaiveDateTime> = texts
                    .iter()
                    .filter_map(|s| {
                        parse_naive_datetime(s)
                            .or_else(|| parse_naive_date(s).map(|d| d.and_time(NaiveTime::MIN)))
                    })
                    .collect();
                candidates.push((col.name.as_str(), parsed));
            }
        }
    }

    let Some((_, vals)) = candidates.first() else {
        return "No datetime columns found".to_string();
    };
    let names: Vec<&str> = candidates.iter().map(|(n, _)| *n).collect();
    let mut lines = vec![format!("DateTime columns found: {:?}", names)];
    if let (Some(min), Some(max)) = (vals.iter().min(), vals.iter().max()) {
        lines.push(format!("Range: {} to {}", min, max));
        lines.push(format!("Span: {} days", (*max - *min).num_days()));
    }
    lines.join("\n")
}

pub(crate) fn custom(ds: &Dataset) -> String {
    let mut lines = header("CUSTOM ANALYSIS");
    lines.push(format!(
        "Dataset: {} rows × {} columns",
        ds.row_count(),
        ds.column_count()
    ));
    lines.push(String::new());
    let names: Vec<&str> = ds.columns().iter().map(|c| c.name.as_str()).collect();
    lines.push(format!("Columns: {:?}", names));
    lines.push(String::new());
    lines.extend(describe_lines(ds));
    lines.join("\n")
}

fn describe_lines(ds: &Dataset) -> Vec<String> {
    let mut lines = Vec::new();
    for col in ds.columns() {
        let line = match col.dtype.family() {
            TypeFamily::Numeric => {
                let clean = col.numeric_values();
                format!(
                    "{}: count={}, mean={}, std={}, min={}, p25={}, p50={}, p75={}, max={}",
                    col.name,
                    clean.len(),
                    fmt2(stats::mean(&clean)),
                    fmt2(stats::sample_std(&clean)),
                    fmt2(stats::quantile(&clean, 0.0)),
                    fmt2(stats::quantile(&clean, 0.25)),
                    fmt2(stats::quantile(&clean, 0.5)),
                    fmt2(stats::quantile(&clean, 0.75)),
                    fmt2(stats::quantile(&clean, 1.0)),
                )
            }
            TypeFamily::Categorical => {
                let counts = count_values(col);
                match counts.first() {
                    Some((top, freq)) => format!(
                        "{}: count={}, unique={}, top={}, freq={}",
                        col.name,
                        col.len() - col.null_count(),
                        counts.len(),
                        top,
                        freq
                    ),
                    None => format!("{}: count=0", col.name),
                }
            }
            TypeFamily::Datetime => {
                let vals = col.datetime_values();
                match (vals.iter().min(), vals.iter().max()) {
                    (Some(min), Some(max)) => format!(
                        "{}: count={}, range={} to {}",
                        col.name,
                        vals.len(),
                        min.format("%Y-%m-%d"),
                        max.format("%Y-%m-%d")
                    ),
                    _ => format!("{}: count=0", col.name),
                }
            }
            TypeFamily::Opaque => {
                format!("{}: count={}", col.name, col.len() - col.null_count())
            }
        };
        lines.push(line);
    }
    lines
}

/// (name, null count, rounded pct) for columns with any nulls, worst first
fn null_columns(ds: &Dataset) -> Vec<(&str, usize, f64)> {
    let mut cols: Vec<(&str, usize, f64)> = ds
        .columns()
        .iter()
        .filter_map(|c| {
            let nulls = c.null_count();
            if nulls == 0 {
                return None;
            }
            let pct = (nulls as f64 / c.len() as f64 * 1000.0).round() / 10.0;
            Some((c.name.as_str(), nulls, pct))
        })
        .collect();
    cols.sort_by(|a, b| b.1.cmp(&a.1));
    cols
}

fn type_counts(ds: &Dataset) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for col in ds.columns() {
        let code = col.dtype.code();
        if !counts.contains_key(&code) {
            order.push(code.clone());
        }
        *counts.entry(code).or_insert(0) += 1;
    }
    let mut pairs: Vec<(String, usize)> = order
        .into_iter()
        .map(|k| {
            let n = counts[&k];
            (k, n)
        })
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

fn count_values(col: &Column) -> Vec<(String, u64)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for t in col.text_values() {
        if !counts.contains_key(&t) {
            order.push(t.clone());
        }
        *counts.entry(t).or_insert(0) += 1;
    }
    let mut pairs: Vec<(String, u64)> = order
        .into_iter()
        .map(|k| {
            let n = counts[&k];
            (k, n)
        })
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

/// Pairwise-complete numeric values from two columns
fn paired_values(a: &Column, b: &Column) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (va, vb) in a.values.iter().zip(&b.values) {
        let (Some(va), Some(vb)) = (va, vb) else {
            continue;
        };
        if va.is_nan() || vb.is_nan() {
            continue;
        }
        let (Some(x), Some(y)) = (va.as_f64(), vb.as_f64()) else {
            continue;
        };
        xs.push(x);
        ys.push(y);
    }
    (xs, ys)
}

fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 {
        return None;
    }
    let mx = xs.iter().sum::<f64>() / n as f64;
    let my = ys.iter().sum::<f64>() / n as f64;
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    Some(cov / (vx * vy).sqrt())
}

fn render_head(ds: &Dataset, limit: usize) -> String {
    let rows = ds.row_count().min(limit);
    let idx_width = rows.saturating_sub(1).to_string().len().max(1);
    let mut widths: Vec<usize> = ds
        .columns()
        .iter()
        .map(|c| c.name.chars().count())
        .collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows);
    for i in 0..rows {
        let mut row = Vec::with_capacity(ds.column_count());
        for (j, col) in ds.columns().iter().enumerate() {
            let cell = match &col.values[i] {
                Some(v) => v.as_display(),
                None => "NaN".to_string(),
            };
            widths[j] = widths[j].max(cell.chars().count());
            row.push(cell);
        }
        cells.push(row);
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(idx_width));
    for (j, col) in ds.columns().iter().enumerate() {
        out.push_str("  ");
        out.push_str(&pad_left(&col.name, widths[j]));
    }
    for (i, row) in cells.iter().enumerate() {
        out.push('\n');
        out.push_str(&pad_left(&i.to_string(), idx_width));
        for (j, cell) in row.iter().enumerate() {
            out.push_str("  ");
            out.push_str(&pad_left(cell, widths[j]));
        }
    }
    out
}

fn fmt2(v: Option<f64>) -> String {
    v.map_or_else(|| "NaN".to_string(), |v| format!("{:.2}", v))
}

fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), s)
    }
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}
