//! Dataset container with construction-time validation

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::column::{Column, ColumnType, TypeFamily};

const STRING_OVERHEAD_BYTES: usize = 48;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("column '{name}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },
}

/// An in-memory table: named, typed, equal-length columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset, rejecting ragged or duplicate-named columns
    pub fn new(columns: Vec<Column>) -> Result<Self, ModelError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for col in &columns {
                if col.len() != expected {
                    return Err(ModelError::LengthMismatch {
                        name: col.name.clone(),
                        expected,
                        actual: col.len(),
                    });
                }
            }
        }
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    name: col.name.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Numeric-family columns (ints, floats, bools)
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.family_columns(TypeFamily::Numeric)
    }

    /// Number columns only: ints and floats, no bools
    pub fn number_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.dtype.is_number())
            .collect()
    }

    pub fn categorical_columns(&self) -> Vec<&Column> {
        self.family_columns(TypeFamily::Categorical)
    }

    pub fn datetime_columns(&self) -> Vec<&Column> {
        self.family_columns(TypeFamily::Datetime)
    }

    fn family_columns(&self, family: TypeFamily) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.dtype.family() == family)
            .collect()
    }

    /// Rough in-memory footprint in megabytes
    ///
    /// Fixed-width slots per declared type; text costs its byte length plus
    /// a per-string overhead. Display-only approximation.
    pub fn memory_estimate_mb(&self) -> f64 {
        let mut bytes = 0usize;
        for col in &self.columns {
            bytes += match &col.dtype {
                ColumnType::Int64 | ColumnType::Float64 | ColumnType::DateTime => col.len() * 8,
                ColumnType::Int32 | ColumnType::Float32 | ColumnType::Date => col.len() * 4,
                ColumnType::Bool => col.len(),
                ColumnType::Text | ColumnType::Categorical | ColumnType::Other(_) => col
                    .values
                    .iter()
                    .map(|v| {
                        v.as_ref()
                            .map_or(8, |v| v.as_display().len() + STRING_OVERHEAD_BYTES)
                    })
                    .sum(),
            };
        }
        bytes as f64 / (1024.0 * 1024.0)
    }
}
