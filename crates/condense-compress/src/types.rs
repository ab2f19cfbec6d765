//! Compression outcomes and cumulative stats

use serde::{Deserialize, Serialize};

/// How a compression result was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMethod {
    Api,
    LocalFallback,
}

impl CompressionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionMethod::Api => "api",
            CompressionMethod::LocalFallback => "local_fallback",
        }
    }
}

/// Outcome of a single compression request.
///
/// Lengths are in characters; token counts use the 4-chars-per-token
/// estimate. `api_error` is set only when an API attempt degraded to the
/// local fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionOutcome {
    pub success: bool,
    pub compressed_text: String,
    pub original_length: usize,
    pub compressed_length: usize,
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub savings_pct: f64,
    pub latency_ms: f64,
    pub method: CompressionMethod,
    #[serde(default)]
    pub api_error: Option<String>,
}

/// Running totals across every request a client has served
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClientStats {
    pub total_requests: u64,
    pub total_input_tokens: usize,
    pub total_output_tokens: usize,
    pub total_tokens_saved: i64,
    pub overall_savings_pct: f64,
}

/// Result of probing the remote endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub connected: bool,
    pub method: CompressionMethod,
    #[serde(default)]
    pub api_error: Option<String>,
}
