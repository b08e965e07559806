//! Numeric-literal extractor (C3).
//!
//! Applies an ordered family of case-insensitive regexes over *raw*
//! (non-normalized) text and collects every match verbatim, tagged
//! with its kind. Overlapping matches across kinds are kept — nothing
//! here deduplicates, that's left to set-membership checks downstream
//! (the summary verification invariant, C4 step 6).

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Currency,
    Percentage,
    Number,
    Decimal,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericToken {
    pub literal: String,
    pub kind: NumericKind,
}

struct Pattern {
    kind: NumericKind,
    regex: &'static Lazy<Regex>,
}

static CURRENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\$£€¥]\s?\d+(?:\.\d+)?(?:[bmk])?").unwrap());
static PERCENTAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[+-]?\d+(?:\.\d+)?%").unwrap());
static GROUPED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d{1,3}(?:,\d{3})+(?:\.\d+)?").unwrap());
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\d+\.\d+").unwrap());
static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d{4}-\d{2}-\d{2}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2},?\s+\d{4}").unwrap()
});

static PATTERNS: Lazy<[Pattern; 5]> = Lazy::new(|| {
    [
        Pattern { kind: NumericKind::Currency, regex: &CURRENCY },
        Pattern { kind: NumericKind::Percentage, regex: &PERCENTAGE },
        Pattern { kind: NumericKind::Number, regex: &GROUPED_NUMBER },
        Pattern { kind: NumericKind::Decimal, regex: &DECIMAL },
        Pattern { kind: NumericKind::Date, regex: &DATE },
    ]
});

/// Extracts every numeric literal from `text`, applying each pattern
/// family in turn (currency, percentage, grouped number, decimal,
/// date). Matches are not deduplicated across families — a substring
/// like `"5.0%"` yields both a percentage and, depending on context,
/// may also surface as a decimal elsewhere.
pub fn extract_numbers(text: &str) -> Vec<NumericToken> {
    let mut found = Vec::new();
    for pattern in PATTERNS.iter() {
        for m in pattern.regex.find_iter(text) {
            found.push(NumericToken {
                literal: m.as_str().to_string(),
                kind: pattern.kind,
            });
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(text: &str) -> Vec<String> {
        extract_numbers(text).into_iter().map(|t| t.literal).collect()
    }

    #[test]
    fn extracts_currency() {
        assert_eq!(literals("revenue up to $120.5B"), vec!["$120.5B"]);
    }

    #[test]
    fn extracts_percentage() {
        assert_eq!(literals("revenue up 5% to"), vec!["5%"]);
    }

    #[test]
    fn extracts_grouped_number() {
        assert_eq!(literals("population of 1,234,567 people"), vec!["1,234,567"]);
    }

    #[test]
    fn extracts_decimal() {
        assert_eq!(literals("grew by 7.25 points"), vec!["7.25"]);
    }

    #[test]
    fn extracts_iso_date() {
        assert_eq!(literals("filed on 2026-07-29"), vec!["2026-07-29"]);
    }

    #[test]
    fn extracts_month_name_date() {
        assert_eq!(literals("reported on Jan 5, 2026"), vec!["Jan 5, 2026"]);
    }

    #[test]
    fn no_numbers_yields_empty() {
        assert!(extract_numbers("no figures mentioned here").is_empty());
    }
}
