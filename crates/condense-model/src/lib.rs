//! In-memory tabular model shared across the workspace

mod column;
mod dataset;
mod parse;
pub mod stats;
mod value;

pub use column::{Column, ColumnType, TypeFamily};
pub use dataset::{Dataset, ModelError};
pub use parse::{parse_naive_date, parse_naive_datetime};
pub use value::Value;
