//! Sentence-level redaction of confidentiality and privilege markers
//!
//! Any sentence containing a marker term is replaced wholesale by a single
//! `[REDACTED - CATEGORY, ...]` marker. Categories are listed in catalogue
//! order without duplicates; the original sentence text is never retained.

use crate::anonymization::detector::vocabulary;
use crate::domain::DetectionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Kind of sensitive marker that triggered a redaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitiveCategory {
    Confidential,
    Privileged,
    TradeSecret,
    Proprietary,
    Classified,
}

impl SensitiveCategory {
    /// Every category, in catalogue order
    pub const ALL: [SensitiveCategory; 5] = [
        SensitiveCategory::Confidential,
        SensitiveCategory::Privileged,
        SensitiveCategory::TradeSecret,
        SensitiveCategory::Proprietary,
        SensitiveCategory::Classified,
    ];

    /// Label used inside the redaction marker
    pub fn label(&self) -> &'static str {
        match self {
            Self::Confidential => "CONFIDENTIAL",
            Self::Privileged => "PRIVILEGED",
            Self::TradeSecret => "TRADE_SECRET",
            Self::Proprietary => "PROPRIETARY",
            Self::Classified => "CLASSIFIED",
        }
    }

    /// Case-insensitive marker pattern for this category
    pub fn marker_pattern(&self) -> &'static str {
        match self {
            Self::Confidential => r"(?i)\b(?:confidential(?:ity)?|strictly\s+private)\b",
            Self::Privileged => {
                r"(?i)\b(?:privileged?|legal\s+privilege|attorney[-\s]client|without\s+prejudice)\b"
            }
            Self::TradeSecret => r"(?i)\btrade\s+secrets?\b",
            Self::Proprietary => r"(?i)\bproprietary\b",
            Self::Classified => {
                r"(?i)\b(?:classified|top\s+secret|restricted\s+(?:information|material|document))\b"
            }
        }
    }
}

impl fmt::Display for SensitiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compiled marker patterns, one per category
#[derive(Debug, Clone)]
pub struct SensitiveMarkers {
    patterns: Vec<(SensitiveCategory, Regex)>,
}

impl SensitiveMarkers {
    /// Compile the marker catalogue
    pub fn new() -> Result<Self, DetectionError> {
        let patterns = SensitiveCategory::ALL
            .iter()
            .map(|category| {
                Regex::new(category.marker_pattern())
                    .map(|regex| (*category, regex))
                    .map_err(|e| DetectionError::InvalidPattern {
                        name: format!("sensitive_{}", category.label().to_lowercase()),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Categories present in `text`, in catalogue order
    pub fn categories_in(&self, text: &str) -> Vec<SensitiveCategory> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(category, _)| *category)
            .collect()
    }

    /// Compiled pattern for each category
    pub fn patterns(&self) -> impl Iterator<Item = (SensitiveCategory, &Regex)> {
        self.patterns.iter().map(|(category, regex)| (*category, regex))
    }
}

/// One sentence replaced by a marker
///
/// Only the categories and the marker are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redaction {
    /// Categories that triggered the redaction, catalogue order
    pub categories: Vec<SensitiveCategory>,
    /// Marker text written in place of the sentence
    pub marker: String,
}

impl Redaction {
    fn new(categories: Vec<SensitiveCategory>) -> Self {
        let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
        let marker = format!("[REDACTED - {}]", labels.join(", "));
        Self { categories, marker }
    }
}

/// Sentence redactor
#[derive(Debug, Clone)]
pub struct Redactor {
    markers: SensitiveMarkers,
}

impl Redactor {
    /// Create a redactor with the built-in marker catalogue
    pub fn new() -> Result<Self, DetectionError> {
        Ok(Self {
            markers: SensitiveMarkers::new()?,
        })
    }

    /// Marker catalogue used by this redactor
    pub fn markers(&self) -> &SensitiveMarkers {
        &self.markers
    }

    /// Replace every sentence containing a marker term
    ///
    /// Returns the rewritten text and one [`Redaction`] per replaced sentence.
    pub fn redact(&self, text: &str) -> (String, Vec<Redaction>) {
        let mut output = String::with_capacity(text.len());
        let mut redactions = Vec::new();
        let mut last = 0;

        for span in sentence_spans(text) {
            let categories = self.markers.categories_in(&text[span.clone()]);
            if categories.is_empty() {
                continue;
            }
            let redaction = Redaction::new(categories);
            output.push_str(&text[last..span.start]);
            output.push_str(&redaction.marker);
            last = span.end;
            redactions.push(redaction);
        }
        output.push_str(&text[last..]);

        (output, redactions)
    }
}

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 7] = ['.', '!', '?', '"', '\'', ')', ']'];
const CURLY_CLOSERS: [char; 2] = ['\u{201D}', '\u{2019}'];

/// Split text into sentence byte ranges
///
/// A sentence ends at `.`, `!` or `?` (plus trailing quotes and brackets)
/// followed by whitespace or end of text, or at a blank line. Full stops after
/// known abbreviations, single-letter initials and leading clause numbers
/// ("1.", "2.3.") do not end a sentence. Ranges exclude surrounding whitespace.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let Some(s) = start else {
            if !b.is_ascii_whitespace() {
                start = Some(i);
            } else {
                i += 1;
            }
            continue;
        };

        if b == b'\n' && is_paragraph_break(bytes, i) {
            let end = s + text[s..i].trim_end().len();
            if end > s {
                spans.push(s..end);
            }
            start = None;
            i += 1;
            continue;
        }

        if TERMINATORS.contains(&char::from(b)) {
            let mut end = i + 1;
            while let Some(c) = text[end..].chars().next() {
                if CLOSERS.contains(&c) || CURLY_CLOSERS.contains(&c) {
                    end += c.len_utf8();
                } else {
                    break;
                }
            }
            let at_boundary = text[end..]
                .chars()
                .next()
                .map_or(true, char::is_whitespace);
            if at_boundary && !(b == b'.' && is_non_terminal_stop(&text[s..i])) {
                spans.push(s..end);
                start = None;
                i = end;
                continue;
            }
            if !at_boundary {
                // every closer in this run ends at the same non-boundary
                i = end;
                continue;
            }
        }

        i += 1;
    }

    if let Some(s) = start {
        let end = s + text[s..].trim_end().len();
        if end > s {
            spans.push(s..end);
        }
    }

    spans
}

fn is_paragraph_break(bytes: &[u8], newline: usize) -> bool {
    bytes[newline + 1..]
        .iter()
        .find(|b| !matches!(b, b' ' | b'\t' | b'\r'))
        .is_some_and(|b| *b == b'\n')
}

/// Whether a full stop after `sentence_so_far` is part of an abbreviation
fn is_non_terminal_stop(sentence_so_far: &str) -> bool {
    // a sentence may span the whole document, so look only at its last word
    let trimmed = sentence_so_far.trim();
    if trimmed.is_empty() {
        return false;
    }
    let (word, is_first_word) = match trimmed.rfind(char::is_whitespace) {
        Some(i) => (trimmed[i..].trim_start(), false),
        None => (trimmed, true),
    };
    let word = word.trim_start_matches(['(', '[']);

    if is_first_word && !word.is_empty() && word.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        return true;
    }
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_alphabetic() {
            return true;
        }
    }
    vocabulary::is_abbreviation(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_text(text: &str) -> Vec<&str> {
        sentence_spans(text).into_iter().map(|r| &text[r]).collect()
    }

    #[test]
    fn test_sentence_split_basic() {
        let text = "First sentence. Second one! Third?";
        assert_eq!(
            spans_text(text),
            vec!["First sentence.", "Second one!", "Third?"]
        );
    }

    #[test]
    fn test_sentence_split_abbreviations() {
        let text = "Mr. Smith v. Jones was heard. It was adjourned.";
        assert_eq!(
            spans_text(text),
            vec!["Mr. Smith v. Jones was heard.", "It was adjourned."]
        );
    }

    #[test]
    fn test_sentence_split_clause_numbers_and_years() {
        let text = "1. The parties agree. Signed in 2023. Done";
        assert_eq!(
            spans_text(text),
            vec!["1. The parties agree.", "Signed in 2023.", "Done"]
        );
    }

    #[test]
    fn test_sentence_split_paragraph_break() {
        let text = "HEADING\n\nBody text here.";
        assert_eq!(spans_text(text), vec!["HEADING", "Body text here."]);
    }

    #[test]
    fn test_sentence_split_long_abbreviation_runs() {
        let initials = "A. B. ".repeat(16_000);
        let titles = "see Mr. Patel and Dr. Jones, ".repeat(8_000);
        let ellipsis = format!("Wait{}then", ".".repeat(50_000));

        let start = std::time::Instant::now();
        let initial_spans = sentence_spans(&initials);
        let title_spans = sentence_spans(&titles);
        let ellipsis_spans = sentence_spans(&ellipsis);
        let elapsed = start.elapsed();

        assert_eq!(initial_spans.len(), 1);
        assert_eq!(ellipsis_spans.len(), 1);
        assert_eq!(title_spans.len(), 1);
        assert_eq!(&titles[title_spans[0].clone()], titles.trim_end());
        assert!(elapsed.as_secs() < 2, "splitting took {elapsed:?}");
    }

    #[test]
    fn test_sentence_split_clause_number_only_as_first_word() {
        let text = "(2.) Notice given. The fee rose by 3. Then it fell.";
        assert_eq!(
            spans_text(text),
            vec!["(2.) Notice given.", "The fee rose by 3.", "Then it fell."]
        );
    }

    #[test]
    fn test_redact_single_sentence() {
        let redactor = Redactor::new().unwrap();
        let (out, redactions) = redactor.redact("This information is confidential and proprietary.");
        assert_eq!(out, "[REDACTED - CONFIDENTIAL, PROPRIETARY]");
        assert_eq!(redactions.len(), 1);
        assert_eq!(
            redactions[0].categories,
            vec![SensitiveCategory::Confidential, SensitiveCategory::Proprietary]
        );
    }

    #[test]
    fn test_redact_keeps_other_sentences() {
        let redactor = Redactor::new().unwrap();
        let text = "The meeting took place. This letter is without prejudice. Costs reserved.";
        let (out, redactions) = redactor.redact(text);
        assert_eq!(
            out,
            "The meeting took place. [REDACTED - PRIVILEGED] Costs reserved."
        );
        assert_eq!(redactions.len(), 1);
    }

    #[test]
    fn test_category_order_is_catalogue_order() {
        let redactor = Redactor::new().unwrap();
        let (out, _) = redactor.redact("Proprietary trade secrets, strictly confidential.");
        assert_eq!(
            out,
            "[REDACTED - CONFIDENTIAL, TRADE_SECRET, PROPRIETARY]"
        );
    }

    #[test]
    fn test_no_markers_is_identity() {
        let redactor = Redactor::new().unwrap();
        let text = "Nothing to see here.\n\nOr here.";
        let (out, redactions) = redactor.redact(text);
        assert_eq!(out, text);
        assert!(redactions.is_empty());
    }
}
