//! Magnitude classes for monetary amounts
//!
//! Amounts are tokenised as `AMOUNT_<CLASS>_<n>` so downstream readers keep a
//! sense of scale without seeing the figure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size class of a monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Magnitude {
    Small,
    Medium,
    Large,
    Major,
    Massive,
}

impl Magnitude {
    /// Label used inside amount tokens
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Large => "LARGE",
            Self::Major => "MAJOR",
            Self::Massive => "MASSIVE",
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower bounds of each class above `Small`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnitudeThresholds {
    pub medium: f64,
    pub large: f64,
    pub major: f64,
    pub massive: f64,
}

impl Default for MagnitudeThresholds {
    fn default() -> Self {
        Self {
            medium: 1_000.0,
            large: 10_000.0,
            major: 100_000.0,
            massive: 1_000_000.0,
        }
    }
}

impl MagnitudeThresholds {
    /// Thresholds must be finite, positive and strictly ascending
    pub fn validate(&self) -> Result<(), String> {
        let bounds = [self.medium, self.large, self.major, self.massive];
        if bounds.iter().any(|b| !b.is_finite() || *b <= 0.0) {
            return Err("magnitude thresholds must be finite and positive".to_string());
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(format!(
                "magnitude thresholds must be strictly ascending (got {}, {}, {}, {})",
                self.medium, self.large, self.major, self.massive
            ));
        }
        Ok(())
    }

    /// Class of an amount; each bound is inclusive on the lower side
    pub fn classify(&self, amount: f64) -> Magnitude {
        let amount = amount.abs();
        if amount >= self.massive {
            Magnitude::Massive
        } else if amount >= self.major {
            Magnitude::Major
        } else if amount >= self.large {
            Magnitude::Large
        } else if amount >= self.medium {
            Magnitude::Medium
        } else {
            Magnitude::Small
        }
    }

    /// Class of a raw amount string; unparseable text falls back to `Small`
    pub fn classify_text(&self, raw: &str) -> Magnitude {
        parse_amount(raw).map_or(Magnitude::Small, |amount| self.classify(amount))
    }
}

/// Parse the numeric value of an amount as written in a document
///
/// Understands thousands grouped by commas, dots or spaces, a decimal point
/// or decimal comma, and the scale words `k`/`thousand`, `m`/`million` and
/// `bn`/`billion`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let lower = raw.trim().to_lowercase();
    let start = lower.find(|c: char| c.is_ascii_digit())?;
    let (number, rest) = split_number(&lower[start..]);

    let scale = match rest.split_whitespace().next().unwrap_or("") {
        "k" | "thousand" => 1_000.0,
        "m" | "million" => 1_000_000.0,
        "bn" | "billion" => 1_000_000_000.0,
        _ => 1.0,
    };
    let value: f64 = normalise(number, scale > 1.0).parse().ok()?;

    Some(value * scale)
}

const SEPARATORS: [char; 5] = [',', '.', ' ', '\u{00A0}', '\u{202F}'];

/// Split off the leading run of digits and separators that sit between digits
fn split_number(text: &str) -> (&str, &str) {
    let mut end = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next_is_digit = chars.peek().is_some_and(|(_, n)| n.is_ascii_digit());
        if c.is_ascii_digit() || (SEPARATORS.contains(&c) && next_is_digit) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    text.split_at(end)
}

/// Rewrite a grouped number as plain digits with an optional `.` decimal
///
/// The last separator is the decimal mark when it differs from the others,
/// when fewer or more than three digits follow it, or when it is a lone `.`
/// ahead of a scale word (`2.500m`). Spaces only ever group.
fn normalise(number: &str, scaled: bool) -> String {
    let separators: Vec<(usize, char)> = number
        .char_indices()
        .filter(|(_, c)| !c.is_ascii_digit())
        .collect();

    let decimal_at = separators.last().and_then(|&(at, last)| {
        if !matches!(last, ',' | '.') {
            return None;
        }
        let mixed = separators.iter().any(|(_, c)| *c != last);
        let tail = number.len() - at - 1;
        let lone_scaled_point = last == '.' && scaled && separators.len() == 1;
        (mixed || tail != 3 || lone_scaled_point).then_some(at)
    });

    number
        .char_indices()
        .filter_map(|(i, c)| {
            if c.is_ascii_digit() {
                Some(c)
            } else {
                (Some(i) == decimal_at).then_some('.')
            }
        })
        .collect()
}
