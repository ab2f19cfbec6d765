//! Dataset schema compression
//!
//! Profiles a dataset column by column and renders the profile as a compact
//! pipe-delimited string whose token cost is a fraction of the full table
//! representation.

mod compact;
mod compare;
mod compressor;
mod format;
mod types;

pub use compare::full_render;
pub use compressor::SchemaCompressor;
pub use format::format_num;
pub use types::{
    ColumnStats, ColumnSummary, DatasetSchema, ParseHint, SchemaComparison, SkewTag,
};
