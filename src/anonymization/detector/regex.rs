//! Regex-based entity detector

use super::{vocabulary, EntityDetector};
use crate::anonymization::models::{Detection, EntityType};
use crate::domain::DetectionError;
use regex::Regex;
use serde::Deserialize;
use std::ops::Range;

/// Post-match check applied to a regex hit
///
/// A check may reject the hit or narrow it to a sub-span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanCheck {
    /// Card numbers must pass the Luhn checksum
    Luhn,
    /// NHS numbers must pass the modulus 11 check digit
    NhsChecksum,
    /// Every dotted quad must be in 0..=255
    Octets,
    /// Numeric dates must name a real day and month (either order)
    CalendarDate,
    /// Value must be at least four characters and contain a digit
    Reference,
    /// Phone numbers need 9-15 digits and must not be a run of years
    PhoneDigits,
    /// Strip leading sentence words ("The", "Between") off a capitalised run
    TrimLeadingCommon,
}

impl SpanCheck {
    /// Returns the accepted sub-range of `value`, or `None` to reject it
    pub fn apply(&self, value: &str) -> Option<Range<usize>> {
        match self {
            Self::Luhn => luhn_valid(value).then_some(0..value.len()),
            Self::NhsChecksum => nhs_valid(value).then_some(0..value.len()),
            Self::Octets => value
                .split('.')
                .all(|octet| octet.parse::<u16>().map(|n| n <= 255).unwrap_or(false))
                .then_some(0..value.len()),
            Self::CalendarDate => calendar_date_valid(value).then_some(0..value.len()),
            Self::Reference => {
                (value.chars().count() >= 4 && value.chars().any(|c| c.is_ascii_digit()))
                    .then_some(0..value.len())
            }
            Self::PhoneDigits => phone_valid(value).then_some(0..value.len()),
            Self::TrimLeadingCommon => {
                let words = words_with_offsets(value);
                let mut first = 0;
                // keep at least one word before the legal-form suffix
                while words.len() - first > 2 && vocabulary::is_common_word(words[first].1) {
                    first += 1;
                }
                let (start, head) = *words.get(first)?;
                // "the Company Limited" is a defined term, not a name
                if vocabulary::is_common_word(head) {
                    return None;
                }
                Some(start..value.len())
            }
        }
    }
}

fn words_with_offsets(value: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in value.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, &value[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, &value[s..]));
    }
    words
}

fn digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn luhn_valid(value: &str) -> bool {
    let digits = digits(value);
    if !(13..=19).contains(&digits.len()) {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

fn nhs_valid(value: &str) -> bool {
    let digits = digits(value);
    let [body @ .., check] = &digits[..] else {
        return false;
    };
    if body.len() != 9 {
        return false;
    }
    let sum: u32 = body
        .iter()
        .zip((2..=10).rev())
        .map(|(&d, weight)| d * weight)
        .sum();
    match 11 - sum % 11 {
        11 => *check == 0,
        10 => false,
        expected => *check == expected,
    }
}

fn calendar_date_valid(value: &str) -> bool {
    let parts: Vec<u32> = value
        .split(['/', '-', '.'])
        .filter_map(|p| p.parse().ok())
        .collect();
    let [a, b, _year] = parts[..] else {
        return false;
    };
    let day_month = (1..=31).contains(&a) && (1..=12).contains(&b);
    let month_day = (1..=12).contains(&a) && (1..=31).contains(&b);
    day_month || month_day
}

fn phone_valid(value: &str) -> bool {
    let count = digits(value).len();
    if !(9..=15).contains(&count) {
        return false;
    }
    let groups: Vec<&str> = value
        .split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .collect();
    let all_years = groups
        .iter()
        .all(|g| g.len() == 4 && (g.starts_with("19") || g.starts_with("20")));
    !all_years
}

/// Detector backed by a single compiled regex
///
/// If the pattern declares a capture group named `value`, only that group is
/// reported; otherwise the whole match is.
#[derive(Debug, Clone)]
pub struct RegexDetector {
    name: String,
    entity_type: EntityType,
    regex: Regex,
    confidence: f32,
    specificity: u8,
    check: Option<SpanCheck>,
}

impl RegexDetector {
    /// Compile a new regex detector
    pub fn new(
        name: impl Into<String>,
        entity_type: EntityType,
        pattern: &str,
        confidence: f32,
        specificity: u8,
    ) -> Result<Self, DetectionError> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|e| DetectionError::InvalidPattern {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            name,
            entity_type,
            regex,
            confidence: confidence.clamp(0.0, 1.0),
            specificity,
            check: None,
        })
    }

    /// Attach a post-match check
    pub fn with_check(mut self, check: SpanCheck) -> Self {
        self.check = Some(check);
        self
    }

    /// Confidence reported for every match
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Regex source, for diagnostics
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl EntityDetector for RegexDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    fn specificity(&self) -> u8 {
        self.specificity
    }

    fn detect(&self, text: &str) -> Result<Vec<Detection>, DetectionError> {
        let mut detections = Vec::new();

        for captures in self.regex.captures_iter(text) {
            let Some(matched) = captures.name("value").or_else(|| captures.get(0)) else {
                continue;
            };
            if matched.as_str().trim().is_empty() {
                continue;
            }

            let range = match self.check {
                Some(check) => match check.apply(matched.as_str()) {
                    Some(range) => range,
                    None => continue,
                },
                None => 0..matched.len(),
            };
            let start = matched.start() + range.start;
            let end = matched.start() + range.end;

            detections.push(Detection {
                entity_type: self.entity_type,
                value: text[start..end].to_string(),
                start,
                end,
                confidence: self.confidence,
                pattern: self.name.clone(),
                specificity: self.specificity,
            });
        }

        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(pattern: &str) -> RegexDetector {
        RegexDetector::new("test", EntityType::Identifier, pattern, 0.9, 80).unwrap()
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = RegexDetector::new("broken", EntityType::Date, "([a-z", 0.9, 70).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_value_group_narrows_match() {
        let d = detector(r"(?i)ref(?:erence)?:\s*(?P<value>[A-Z0-9/]+)");
        let found = d.detect("Our reference: ABC/123 applies").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "ABC/123");
        assert_eq!(&"Our reference: ABC/123 applies"[found[0].start..found[0].end], "ABC/123");
    }

    #[test]
    fn test_luhn_check() {
        let d = detector(r"\b(?:\d{4}[ -]?){3}\d{4}\b").with_check(SpanCheck::Luhn);
        assert_eq!(d.detect("card 4111 1111 1111 1111").unwrap().len(), 1);
        assert!(d.detect("card 4111 1111 1111 1112").unwrap().is_empty());
    }

    #[test]
    fn test_nhs_checksum() {
        let d = detector(r"\b\d{3}[\s-]?\d{3}[\s-]?\d{4}\b").with_check(SpanCheck::NhsChecksum);
        assert_eq!(d.detect("NHS number 943 476 5919").unwrap().len(), 1);
        assert_eq!(d.detect("patient 401-023-2137").unwrap().len(), 1);
        assert!(d.detect("NHS number 943 476 5918").unwrap().is_empty());
        // remainder 1 leaves check value 10, which no number may carry
        assert!(!nhs_valid("1000000010"));
        assert!(!nhs_valid("94347659"));
    }

    #[test]
    fn test_octet_check() {
        let d = detector(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").with_check(SpanCheck::Octets);
        assert_eq!(d.detect("host 192.168.0.1").unwrap().len(), 1);
        assert!(d.detect("version 300.1.1.1").unwrap().is_empty());
    }

    #[test]
    fn test_calendar_check_accepts_either_order() {
        assert!(SpanCheck::CalendarDate.apply("15/03/2023").is_some());
        assert!(SpanCheck::CalendarDate.apply("03/15/2023").is_some());
        assert!(SpanCheck::CalendarDate.apply("45/13/2023").is_none());
    }

    #[test]
    fn test_phone_check_rejects_year_runs() {
        assert!(SpanCheck::PhoneDigits.apply("020 7946 0958").is_some());
        assert!(SpanCheck::PhoneDigits.apply("2019 2020 2021").is_none());
        assert!(SpanCheck::PhoneDigits.apply("12 34").is_none());
    }

    #[test]
    fn test_trim_leading_common_words() {
        let value = "Between Acme Widgets Ltd";
        let range = SpanCheck::TrimLeadingCommon.apply(value).unwrap();
        assert_eq!(&value[range], "Acme Widgets Ltd");

        let value = "Acme Ltd";
        let range = SpanCheck::TrimLeadingCommon.apply(value).unwrap();
        assert_eq!(&value[range], "Acme Ltd");

        assert!(SpanCheck::TrimLeadingCommon
            .apply("The Company Limited")
            .is_none());
    }
}
