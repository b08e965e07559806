//! Normalizer & tokenizer (C1).
//!
//! Pipeline, strictly in order:
//! 1. lowercase using byte-wise ASCII rules (non-ASCII letters pass through unchanged)
//! 2. strip `https?://\S+` sequences
//! 3. replace any character outside `[A-Za-z0-9_\s]` with a single space
//! 4. collapse runs of whitespace to one space and trim
//!
//! Tokens are the whitespace-split pieces of the normalized string,
//! with empty tokens discarded.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes `input` per the four-step pipeline above. Total, never fails.
pub fn normalize_text(input: &str) -> String {
    let lowered = ascii_lowercase(input);
    let without_urls = URL_PATTERN.replace_all(&lowered, "");
    let scrubbed = scrub_non_word_characters(&without_urls);
    let collapsed = WHITESPACE_RUN.replace_all(&scrubbed, " ");
    collapsed.trim().to_string()
}

/// Splits already-normalized text on whitespace, discarding empty tokens.
/// Callers that have not normalized their input should call
/// [`normalize_text`] first — tokenizing raw text defeats the point of
/// a stable token stream for fingerprinting.
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn ascii_lowercase(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

fn scrub_non_word_characters(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_ascii_only() {
        assert_eq!(normalize_text("HÉllo WORLD"), "hÉllo world");
    }

    #[test]
    fn strips_urls() {
        assert_eq!(
            normalize_text("see https://example.com/a?b=c for details"),
            "see for details"
        );
    }

    #[test]
    fn collapses_punctuation_and_whitespace() {
        assert_eq!(normalize_text("Fed raises   rates, 0.25%!!"), "fed raises rates 0 25");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(normalize_text(""), "");
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn idempotent() {
        let cases = [
            "Apple Stock Rises 5% on Strong Earnings",
            "",
            "   weird \t whitespace\n\nhere  ",
            "https://a.com/x already-normalized text 123",
        ];
        for case in cases {
            let once = normalize_text(case);
            let twice = normalize_text(&once);
            assert_eq!(once, twice, "not idempotent for {case:?}");
        }
    }

    #[test]
    fn tokenizes_on_whitespace() {
        assert_eq!(
            tokenize("fed raises rates 0 25"),
            vec!["fed", "raises", "rates", "0", "25"]
        );
    }
}
