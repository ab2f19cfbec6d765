//! Column containers and type classification

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Declared column type, mapped to a short code in compact output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Int64,
    Int32,
    Float64,
    Float32,
    Bool,
    Text,
    Categorical,
    Date,
    DateTime,
    Other(String),
}

impl ColumnType {
    /// Short code used in the compact schema string
    pub fn code(&self) -> String {
        match self {
            ColumnType::Int64 => "i64".to_string(),
            ColumnType::Int32 => "i32".to_string(),
            ColumnType::Float64 => "f64".to_string(),
            ColumnType::Float32 => "f32".to_string(),
            ColumnType::Bool => "bool".to_string(),
            ColumnType::Text => "str".to_string(),
            ColumnType::Categorical => "cat".to_string(),
            ColumnType::Date | ColumnType::DateTime => "dt".to_string(),
            ColumnType::Other(name) => name.chars().take(4).collect(),
        }
    }

    /// Broad family that decides which statistics the column gets
    pub fn family(&self) -> TypeFamily {
        match self {
            ColumnType::Int64
            | ColumnType::Int32
            | ColumnType::Float64
            | ColumnType::Float32
            | ColumnType::Bool => TypeFamily::Numeric,
            ColumnType::Text | ColumnType::Categorical => TypeFamily::Categorical,
            ColumnType::Date | ColumnType::DateTime => TypeFamily::Datetime,
            ColumnType::Other(_) => TypeFamily::Opaque,
        }
    }

    /// Ints and floats only; bools profile as numeric but are not numbers
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            ColumnType::Int64 | ColumnType::Int32 | ColumnType::Float64 | ColumnType::Float32
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Numeric,
    Categorical,
    Datetime,
    Opaque,
}

/// A named column of optional cell values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<Option<Value>>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: ColumnType, values: Vec<Option<Value>>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Missing cells: explicit nulls plus float NaN
    pub fn null_count(&self) -> usize {
        self.values
            .iter()
            .filter(|v| v.as_ref().is_none_or(Value::is_nan))
            .count()
    }

    /// Present (non-null, non-NaN) values in row order
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values
            .iter()
            .filter_map(|v| v.as_ref())
            .filter(|v| !v.is_nan())
    }

    /// Present values coerced to f64; bools count as 0/1
    pub fn numeric_values(&self) -> Vec<f64> {
        self.non_null().filter_map(Value::as_f64).collect()
    }

    /// Display forms of present values
    pub fn text_values(&self) -> Vec<String> {
        self.non_null().map(Value::as_display).collect()
    }

    /// Present datetime values; plain dates anchor to midnight
    pub fn datetime_values(&self) -> Vec<NaiveDateTime> {
        self.non_null()
            .filter_map(|v| match v {
                Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
                Value::DateTime(dt) => Some(*dt),
                _ => None,
            })
            .collect()
    }
}
