//! Heuristic local compression
//!
//! Whitespace cleanup, filler removal, and abbreviation of common analysis
//! terms. Used directly when no API key is configured and as the degraded
//! path when the API call fails.

use std::sync::OnceLock;

use regex::Regex;

static BLANK_RUNS_RE: OnceLock<Regex> = OnceLock::new();
static SPACE_RUNS_RE: OnceLock<Regex> = OnceLock::new();
static FILLER_RES: OnceLock<Vec<Regex>> = OnceLock::new();
static ABBREVIATION_RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

/// Filler phrases dropped outright
const FILLER_PATTERNS: &[&str] = &[
    r"(?i)\bplease note that\b",
    r"(?i)\bit is important to\b",
    r"(?i)\bit should be noted that\b",
    r"(?i)\bas we can see\b",
    r"(?i)\bin other words\b",
    r"(?i)\bbasically\b",
    r"(?i)\bessentially\b",
    r"(?i)\bthe following\b",
];

/// Long-form terms and their replacements, applied in order
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("column", "col"),
    ("columns", "cols"),
    ("number", "num"),
    ("average", "avg"),
    ("maximum", "max"),
    ("minimum", "min"),
    ("standard deviation", "std"),
    ("correlation", "corr"),
    ("distribution", "dist"),
    ("percentage", "pct"),
    ("approximately", "~"),
    ("greater than", ">"),
    ("less than", "<"),
    ("missing values", "nulls"),
    ("null values", "nulls"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCompressor;

impl HeuristicCompressor {
    pub fn new() -> Self {
        Self
    }

    pub fn compress(&self, text: &str) -> String {
        let blank_runs = BLANK_RUNS_RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap());
        let space_runs = SPACE_RUNS_RE.get_or_init(|| Regex::new(r" {2,}").unwrap());
        let fillers = FILLER_RES.get_or_init(|| {
            FILLER_PATTERNS
                .iter()
                .map(|p| Regex::new(p).unwrap())
                .collect()
        });
        let abbreviations = ABBREVIATION_RES.get_or_init(|| {
            ABBREVIATIONS
                .iter()
                .map(|(long, short)| {
                    (Regex::new(&format!(r"(?i)\b{}\b", long)).unwrap(), *short)
                })
                .collect()
        });

        let mut out = blank_runs.replace_all(text, "\n\n").into_owned();
        out = space_runs.replace_all(&out, " ").into_owned();
        out = out.replace('\t', " ");
        for re in fillers {
            out = re.replace_all(&out, "").into_owned();
        }
        for (re, short) in abbreviations {
            out = re.replace_all(&out, *short).into_owned();
        }
        out = space_runs.replace_all(&out, " ").into_owned();
        out.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        let c = HeuristicCompressor::new();
        assert_eq!(c.compress("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(c.compress("a\t  b"), "a b");
    }

    #[test]
    fn test_removes_filler_phrases() {
        let c = HeuristicCompressor::new();
        assert_eq!(
            c.compress("Please note that the mean is 5."),
            "the mean is 5."
        );
    }

    #[test]
    fn test_abbreviates_terms_case_insensitively() {
        let c = HeuristicCompressor::new();
        assert_eq!(
            c.compress("The Correlation between columns is greater than zero"),
            "The corr between cols is > zero"
        );
    }

    #[test]
    fn test_word_boundaries_keep_substrings_intact() {
        // "columnar" must not become "colar"
        let c = HeuristicCompressor::new();
        assert_eq!(c.compress("columnar storage"), "columnar storage");
    }

    #[test]
    fn test_missing_values_becomes_nulls() {
        let c = HeuristicCompressor::new();
        assert_eq!(
            c.compress("count of missing values and null values"),
            "count of nulls and nulls"
        );
    }
}
