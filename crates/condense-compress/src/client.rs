//! Remote compression client

use std::time::{Duration, Instant};

use condense_tokens::{estimate_tokens, round1, savings_pct};
use tracing::warn;

use crate::fallback::HeuristicCompressor;
use crate::types::{ClientStats, CompressionMethod, CompressionOutcome, ConnectionReport};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "CONDENSE_API_KEY";
/// Environment variable overriding the API endpoint
pub const API_URL_ENV: &str = "CONDENSE_API_URL";

const DEFAULT_API_URL: &str = "https://api.scaledown.xyz/compress/raw/";
const DEFAULT_TARGET_RATIO: f64 = 0.5;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const PROBE_TEXT: &str =
    "This is a test prompt to verify the compression API connection is working properly.";

/// Client for a remote prompt-compression API.
///
/// `compress` never fails: with no key configured it compresses locally,
/// and any API error degrades to the same local path with the error
/// recorded on the outcome.
pub struct CompressionClient {
    api_key: Option<String>,
    api_url: String,
    http: reqwest::blocking::Client,
    fallback: HeuristicCompressor,
    total_requests: u64,
    total_input_tokens: usize,
    total_output_tokens: usize,
}

impl CompressionClient {
    /// Client configured from the environment
    pub fn new() -> Self {
        Self::with_key(std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }

    pub fn with_key(api_key: Option<String>) -> Self {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            api_key,
            api_url,
            http,
            fallback: HeuristicCompressor::new(),
            total_requests: 0,
            total_input_tokens: 0,
            total_output_tokens: 0,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn compress(&mut self, text: &str) -> CompressionOutcome {
        self.compress_with_ratio(text, DEFAULT_TARGET_RATIO)
    }

    pub fn compress_with_ratio(&mut self, text: &str, target_ratio: f64) -> CompressionOutcome {
        let Some(key) = self.api_key.clone() else {
            return self.fallback_outcome(text, None);
        };

        let start = Instant::now();
        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &key)
            .json(&serde_json::json!({
                "text": text,
                "target_ratio": target_ratio,
            }))
            .send();

        let response = match response {
            Ok(resp) => resp,
            Err(err) => {
                warn!(error = %err, "compression API unreachable");
                return self.fallback_outcome(text, Some(err.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "compression API returned an error");
            return self.fallback_outcome(text, Some(format!("HTTP {}", status.as_u16())));
        }

        let body: serde_json::Value = match response.json() {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "compression API sent an unreadable body");
                return self.fallback_outcome(text, Some(err.to_string()));
            }
        };
        let compressed = body
            .get("compressed")
            .or_else(|| body.get("text"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or(text)
            .to_string();
        let latency_ms = round1(start.elapsed().as_secs_f64() * 1000.0);
        self.outcome(text, compressed, CompressionMethod::Api, None, latency_ms)
    }

    /// Cumulative totals over every request served so far
    pub fn stats(&self) -> ClientStats {
        ClientStats {
            total_requests: self.total_requests,
            total_input_tokens: self.total_input_tokens,
            total_output_tokens: self.total_output_tokens,
            total_tokens_saved: self.total_input_tokens as i64 - self.total_output_tokens as i64,
            overall_savings_pct: savings_pct(self.total_input_tokens, self.total_output_tokens),
        }
    }

    /// Compress a fixed probe and report which path handled it
    pub fn test_connection(&mut self) -> ConnectionReport {
        let outcome = self.compress(PROBE_TEXT);
        ConnectionReport {
            connected: outcome.success,
            method: outcome.method,
            api_error: outcome.api_error,
        }
    }

    fn fallback_outcome(&mut self, text: &str, api_error: Option<String>) -> CompressionOutcome {
        let compressed = self.fallback.compress(text);
        self.outcome(
            text,
            compressed,
            CompressionMethod::LocalFallback,
            api_error,
            0.0,
        )
    }

    fn outcome(
        &mut self,
        original: &str,
        compressed: String,
        method: CompressionMethod,
        api_error: Option<String>,
        latency_ms: f64,
    ) -> CompressionOutcome {
        let original_length = original.chars().count();
        let compressed_length = compressed.chars().count();
        let input_tokens = estimate_tokens(original);
        let output_tokens = estimate_tokens(&compressed);
        self.total_requests += 1;
        self.total_input_tokens += input_tokens;
        self.total_output_tokens += output_tokens;
        CompressionOutcome {
            success: true,
            compressed_text: compressed,
            original_length,
            compressed_length,
            input_tokens,
            output_tokens,
            savings_pct: savings_pct(original_length, compressed_length),
            latency_ms,
            method,
            api_error,
        }
    }
}

impl Default for CompressionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_no_key_compresses_locally() {
        let mut client = CompressionClient::with_key(None);
        let outcome =
            client.compress("Please note that the correlation between columns is high");
        assert!(outcome.success);
        assert_eq!(outcome.method, CompressionMethod::LocalFallback);
        assert!(outcome.api_error.is_none());
        assert_eq!(outcome.latency_ms, 0.0);
        assert_eq!(outcome.compressed_text, "the corr between cols is high");
    }

    #[test]
    fn test_outcome_lengths_and_tokens() {
        let mut client = CompressionClient::with_key(None);
        let text = "maximum value here";
        let outcome = client.compress(text);
        assert_eq!(outcome.original_length, 18);
        assert_eq!(outcome.compressed_text, "max value here");
        assert_eq!(outcome.compressed_length, 14);
        assert_eq!(outcome.input_tokens, 4);
        assert_eq!(outcome.output_tokens, 3);
        assert_eq!(outcome.savings_pct, 22.2);
    }

    #[test]
    fn test_stats_accumulate_across_requests() {
        let mut client = CompressionClient::with_key(None);
        client.compress("the average of the first column");
        client.compress("the minimum of the second column");
        let stats = client.stats();
        assert_eq!(stats.total_requests, 2);
        assert!(stats.total_input_tokens >= stats.total_output_tokens);
        assert_eq!(
            stats.total_tokens_saved,
            stats.total_input_tokens as i64 - stats.total_output_tokens as i64
        );
    }

    #[test]
    fn test_connection_without_key_reports_fallback() {
        let mut client = CompressionClient::with_key(None);
        let report = client.test_connection();
        assert!(report.connected);
        assert_eq!(report.method, CompressionMethod::LocalFallback);
        assert!(report.api_error.is_none());
    }

    #[test]
    #[serial]
    fn test_new_reads_key_from_environment() {
        let original = std::env::var(API_KEY_ENV).ok();

        unsafe { std::env::set_var(API_KEY_ENV, "test-key") };
        assert!(CompressionClient::new().has_api_key());

        unsafe { std::env::set_var(API_KEY_ENV, "") };
        assert!(!CompressionClient::new().has_api_key());

        match original {
            Some(value) => unsafe { std::env::set_var(API_KEY_ENV, value) },
            None => unsafe { std::env::remove_var(API_KEY_ENV) },
        }
    }
}
