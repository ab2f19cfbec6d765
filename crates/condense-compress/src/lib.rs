//! Prompt compression via a remote API with a local heuristic fallback

mod client;
mod fallback;
mod types;

pub use client::{CompressionClient, API_KEY_ENV, API_URL_ENV};
pub use fallback::HeuristicCompressor;
pub use types::{ClientStats, CompressionMethod, CompressionOutcome, ConnectionReport};
