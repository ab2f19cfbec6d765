//! Token estimation and savings arithmetic

/// Estimate token count as character count / 4
///
/// Characters, not bytes: compact strings carry multi-byte glyphs and the
/// estimate must not inflate with them.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Percentage saved going from `full` to `compressed` tokens, 1 decimal
///
/// The denominator floors at 1 so empty inputs cannot divide by zero.
pub fn savings_pct(full: usize, compressed: usize) -> f64 {
    round1((1.0 - compressed as f64 / full.max(1) as f64) * 100.0)
}

/// Ratio of full to compressed tokens, 1 decimal, denominator floored at 1
pub fn compression_ratio(full: usize, compressed: usize) -> f64 {
    round1(full as f64 / compressed.max(1) as f64)
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_floors() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcdefghi"), 2);
    }

    #[test]
    fn test_estimate_tokens_counts_chars_not_bytes() {
        // four 2-byte glyphs are one token, not two
        assert_eq!(estimate_tokens("μμμμ"), 1);
        assert_eq!(estimate_tokens("××××××××"), 2);
    }

    #[test]
    fn test_savings_pct() {
        assert_eq!(savings_pct(100, 25), 75.0);
        assert_eq!(savings_pct(3, 1), 66.7);
        // zero full floors to 1, savings can go negative
        assert_eq!(savings_pct(0, 4), -300.0);
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio(100, 25), 4.0);
        assert_eq!(compression_ratio(10, 0), 10.0);
        assert_eq!(compression_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.66666), 66.7);
        assert_eq!(round1(-2.04), -2.0);
    }
}
