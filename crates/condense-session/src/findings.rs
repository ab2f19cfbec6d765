//! Key-finding extraction from raw analysis output

/// Marker substrings that promote a line to a finding
const MARKERS: &[&str] = &["⚠", "🔴", "✅", "outlier", "skew", "correlation"];
const MAX_PER_STEP: usize = 5;
const MIN_CHARS: usize = 10;
const MAX_CHARS: usize = 200;

/// Marked lines of reasonable length, at most five per output
pub(crate) fn extract(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| MARKERS.iter().any(|m| line.contains(m)))
        .filter(|line| {
            let len = line.chars().count();
            len > MIN_CHARS && len < MAX_CHARS
        })
        .map(str::to_string)
        .take(MAX_PER_STEP)
        .collect()
}
