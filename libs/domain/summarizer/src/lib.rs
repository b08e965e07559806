//! Summary generator (C4): a deterministic rule-based extractive
//! scorer guarded by a numerical-fact verification invariant.
//!
//! Every numeric token (currency, percentage, date, decimal) in the
//! emitted summary must appear verbatim in the source text, or the
//! summary is rejected and a fallback is emitted instead. This
//! protects a financial news feed against hallucinated or reformatted
//! figures — the rule-based scorer is deterministic and explainable
//! by construction, which matters for operator trust.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use newsroom_core_text::extract_numbers;

const MIN_SENTENCE_LENGTH: usize = 20;
const TOP_K: usize = 2;
const FALLBACK_TRUNCATE_CHARS: usize = 300;

const SIGNAL_KEYWORDS: [&str; 10] = [
    "announced",
    "reported",
    "said",
    "revealed",
    "confirmed",
    "declined",
    "rose",
    "fell",
    "gained",
    "lost",
];

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub summary_2: String,
    pub verified: bool,
}

struct Candidate {
    text: String,
    position: usize,
    score: i32,
}

/// Generates `summary_2` for an article from its `(title, content,
/// summary_raw)` triple: compose, split into sentence candidates,
/// score, select the top two, and verify every numeric literal in the
/// result against the input before accepting it.
pub fn generate_summary(title: &str, content: Option<&str>, summary_raw: Option<&str>) -> SummaryOutcome {
    let full_text = compose_full_text(title, content, summary_raw);
    let candidates = score_candidates(&full_text);

    if candidates.is_empty() {
        return SummaryOutcome {
            summary_2: no_candidates_fallback(title, content, summary_raw),
            verified: false,
        };
    }

    let selected = select_top_k(candidates);
    let summary = join_in_order(selected);

    if numbers_are_verified(&summary, &full_text) {
        return SummaryOutcome { summary_2: summary, verified: true };
    }

    match summary_raw {
        Some(raw) => SummaryOutcome {
            summary_2: truncate_with_ellipsis_if_overflow(raw),
            verified: false,
        },
        // No summary_raw to fall back to: the extracted summary stands,
        // just unverified.
        None => SummaryOutcome { summary_2: summary, verified: false },
    }
}

fn compose_full_text(title: &str, content: Option<&str>, summary_raw: Option<&str>) -> String {
    let body = content.or(summary_raw).unwrap_or("");
    format!("{title} {body}")
}

fn score_candidates(full_text: &str) -> Vec<Candidate> {
    SENTENCE_BOUNDARY
        .split(full_text)
        .map(str::trim)
        .filter(|text| text.chars().count() > MIN_SENTENCE_LENGTH)
        .enumerate()
        .map(|(position, text)| Candidate {
            score: score_sentence(text, position),
            text: text.to_string(),
            position,
        })
        .collect()
}

fn score_sentence(sentence: &str, position: usize) -> i32 {
    let mut score = 0;

    if position == 0 {
        score += 10;
    }
    if sentence.chars().any(|c| c.is_ascii_digit()) {
        score += 5;
    }
    let lower = sentence.to_ascii_lowercase();
    if SIGNAL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        score += 3;
    }
    let word_count = sentence.split_whitespace().count();
    if (10..=30).contains(&word_count) {
        score += 2;
    }

    score
}

/// Top `TOP_K` by score descending, ties broken by original position
/// (earlier first) — stable sort on `(-score, position)` gives both in
/// one pass.
fn select_top_k(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then(a.position.cmp(&b.position)));
    candidates.truncate(TOP_K);
    candidates
}

fn join_in_order(mut selected: Vec<Candidate>) -> String {
    selected.sort_by_key(|c| c.position);
    selected
        .into_iter()
        .map(|c| c.text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn numbers_are_verified(summary: &str, full_text: &str) -> bool {
    let summary_numbers: HashSet<String> =
        extract_numbers(summary).into_iter().map(|t| t.literal).collect();
    let input_numbers: HashSet<String> =
        extract_numbers(full_text).into_iter().map(|t| t.literal).collect();
    summary_numbers.is_subset(&input_numbers)
}

fn no_candidates_fallback(title: &str, content: Option<&str>, summary_raw: Option<&str>) -> String {
    if let Some(content) = content {
        let first_paragraph = content.split("\n\n").next().unwrap_or(content);
        format!("{}...", take_chars(first_paragraph, FALLBACK_TRUNCATE_CHARS))
    } else if let Some(raw) = summary_raw {
        truncate_with_ellipsis_if_overflow(raw)
    } else {
        title.to_string()
    }
}

/// Asymmetric by design: the content path always appends an ellipsis,
/// the `summary_raw` path only appends one when the original text
/// actually overflowed 300 chars.
fn truncate_with_ellipsis_if_overflow(text: &str) -> String {
    let truncated = take_chars(text, FALLBACK_TRUNCATE_CHARS);
    if text.chars().count() > FALLBACK_TRUNCATE_CHARS {
        format!("{truncated}...")
    } else {
        truncated
    }
}

fn take_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_sentence_and_verifies_when_numbers_stay_intact() {
        let outcome = generate_summary(
            "Apple Reports Strong Earnings",
            Some(
                "Apple Inc announced that quarterly revenue increased to $120 million during \
                 the period, beating analyst estimates across Wall Street. Shares rose sharply \
                 in after hours trading following the announcement today.",
            ),
            None,
        );
        assert!(outcome.verified);
        assert!(outcome.summary_2.starts_with("Apple Reports Strong Earnings"));
        assert!(outcome.summary_2.contains("$120"));
    }

    /// A sentence boundary that lands inside a decimal number (`"…to
    /// $120.5B by year end."` splits on the `.` between `120` and `5`,
    /// not just the trailing one) truncates the figure the candidate
    /// carries forward. The truncated literal then fails the subset
    /// check against the untouched input text, so the fallback kicks
    /// in exactly as it would for any other unverifiable figure.
    #[test]
    fn fragmented_number_fails_verification_and_falls_back_to_summary_raw() {
        let outcome = generate_summary(
            "Market Update",
            Some(
                "Shares climbed sharply today after the company reported upbeat guidance for \
                 the upcoming quarter, with revenue seen rising to $120.5B by year end.",
            ),
            Some("Revenue expected to reach $120.5 billion by year end"),
        );
        assert!(!outcome.verified);
        assert_eq!(outcome.summary_2, "Revenue expected to reach $120.5 billion by year end");
    }

    /// With no `summary_raw` to fall back to, a failed verification
    /// still surfaces the extracted (top-2) summary rather than
    /// dropping all the way back to the bare title.
    #[test]
    fn fragmented_number_without_summary_raw_keeps_extracted_summary() {
        let outcome = generate_summary(
            "Market Update",
            Some(
                "Shares climbed sharply today after the company reported upbeat guidance for \
                 the upcoming quarter, with revenue seen rising to $120.5B by year end.",
            ),
            None,
        );
        assert!(!outcome.verified);
        assert!(outcome.summary_2.starts_with("Shares climbed sharply today"));
    }

    #[test]
    fn no_surviving_candidates_falls_back_to_title() {
        let outcome = generate_summary("Short headline only", None, None);
        assert_eq!(outcome.summary_2, "Short headline only");
        assert!(!outcome.verified);
    }

    #[test]
    fn no_surviving_candidates_prefers_content_first_paragraph() {
        let outcome = generate_summary("Headline", Some("too short."), None);
        assert!(!outcome.verified);
        assert!(outcome.summary_2.ends_with("..."));
    }

    #[test]
    fn deterministic_across_repeated_calls() {
        let title = "Fed raises rates 0.25%";
        let content = Some("The Federal Reserve announced today that it raised interest rates by 0.25% to combat persistent inflation pressures across the economy. Markets reacted calmly to the widely expected decision made by policymakers.");
        let first = generate_summary(title, content, None);
        let second = generate_summary(title, content, None);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_article_falls_back_to_title() {
        let outcome = generate_summary("Empty Article", None, None);
        assert_eq!(outcome.summary_2, "Empty Article");
        assert!(!outcome.verified);
    }
}
