//! Full-representation rendering
//!
//! The verbose counterpart the compact string is measured against: the whole
//! table, a per-column statistical description, and a dtype listing.

use condense_model::{stats, Column, Dataset};

const DESCRIBE_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Render the dataset the long way: table dump, describe block, dtypes
pub fn full_render(dataset: &Dataset) -> String {
    let mut sections = vec![render_table(dataset)];
    let describe = render_describe(dataset);
    if !describe.is_empty() {
        sections.push(describe);
    }
    sections.push(render_dtypes(dataset));
    sections.join("\n")
}

fn render_table(dataset: &Dataset) -> String {
    let rows = dataset.row_count();
    let idx_width = rows.saturating_sub(1).to_string().len().max(1);

    let mut widths: Vec<usize> = dataset
        .columns()
        .iter()
        .map(|c| c.name.chars().count())
        .collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows);
    for i in 0..rows {
        let mut row = Vec::with_capacity(dataset.column_count());
        for (j, col) in dataset.columns().iter().enumerate() {
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
    for (j, col) in dataset.columns().iter().enumerate() {
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

fn render_describe(dataset: &Dataset) -> String {
    let cols = dataset.numeric_columns();
    if cols.is_empty() {
        return String::new();
    }

    let label_width = DESCRIBE_LABELS
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(0);
    let metrics: Vec<Vec<String>> = cols.iter().map(|c| describe_column(c)).collect();
    let widths: Vec<usize> = cols
        .iter()
        .zip(&metrics)
        .map(|(col, vals)| {
            vals.iter()
                .map(|v| v.chars().count())
                .chain([col.name.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(label_width));
    for (j, col) in cols.iter().enumerate() {
        out.push_str("  ");
        out.push_str(&pad_left(&col.name, widths[j]));
    }
    for (row, label) in DESCRIBE_LABELS.iter().enumerate() {
        out.push('\n');
        out.push_str(&pad_right(label, label_width));
        for (j, vals) in metrics.iter().enumerate() {
            out.push_str("  ");
            out.push_str(&pad_left(&vals[row], widths[j]));
        }
    }
    out
}

fn describe_column(col: &Column) -> Vec<String> {
    let clean = col.numeric_values();
    let fmt = |v: Option<f64>| v.map_or_else(|| "NaN".to_string(), |v| format!("{:.6}", v));
    vec![
        format!("{:.6}", clean.len() as f64),
        fmt(stats::mean(&clean)),
        fmt(stats::sample_std(&clean)),
        fmt(stats::quantile(&clean, 0.0)),
        fmt(stats::quantile(&clean, 0.25)),
        fmt(stats::quantile(&clean, 0.5)),
        fmt(stats::quantile(&clean, 0.75)),
        fmt(stats::quantile(&clean, 1.0)),
    ]
}

fn render_dtypes(dataset: &Dataset) -> String {
    let width = dataset
        .columns()
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    dataset
        .columns()
        .iter()
        .map(|c| format!("{}  {}", pad_right(&c.name, width), c.dtype.code()))
        .collect::<Vec<_>>()
        .join("\n")
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
