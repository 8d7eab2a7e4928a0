//! Single-pass replacement of original values by their tokens

use crate::domain::{LexShieldError, Result};
use regex::RegexBuilder;
use std::collections::{HashMap, HashSet};

const REGEX_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Text with every original replaced, plus how often each was replaced
#[derive(Debug, Clone, Default)]
pub struct Substituted {
    pub text: String,
    pub occurrences: HashMap<String, usize>,
}

/// Replace every occurrence of each original with its token
///
/// All originals are matched in one left-to-right pass, longest first at any
/// position, so a replaced token is never scanned again and an original that
/// is a substring of another (`Smith` inside `John Smith`) cannot split it.
/// Originals match as whole words (`Ward` never inside `Wardrobe`), unless
/// the value only ever occurs glued to other word characters. Occurrences
/// are replaced even where no detector fired.
pub fn substitute(text: &str, replacements: &HashMap<String, String>) -> Result<Substituted> {
    let mut originals: Vec<&str> = replacements
        .keys()
        .map(String::as_str)
        .filter(|original| !original.is_empty())
        .collect();
    if originals.is_empty() {
        return Ok(Substituted {
            text: text.to_string(),
            occurrences: HashMap::new(),
        });
    }

    originals.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let (text_out, occurrences) = replace_pass(text, &originals, replacements, &HashSet::new())?;

    // A value the detectors found glued to a word never matches at a word
    // boundary; such values fall back to plain substring matching.
    let glued: HashSet<&str> = originals
        .iter()
        .copied()
        .filter(|original| !occurrences.contains_key(*original) && text.contains(*original))
        .collect();
    if glued.is_empty() {
        return Ok(Substituted {
            text: text_out,
            occurrences,
        });
    }
    let (text_out, occurrences) = replace_pass(text, &originals, replacements, &glued)?;
    Ok(Substituted {
        text: text_out,
        occurrences,
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Escaped pattern for one original, anchored at word boundaries on any end
/// that is itself a word character
fn bounded(original: &str) -> String {
    let mut pattern = String::with_capacity(original.len() + 6);
    if original.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(original));
    if original.chars().next_back().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

fn replace_pass(
    text: &str,
    originals: &[&str],
    replacements: &HashMap<String, String>,
    unbounded: &HashSet<&str>,
) -> Result<(String, HashMap<String, usize>)> {
    let alternation = originals
        .iter()
        .map(|original| {
            if unbounded.contains(original) {
                regex::escape(original)
            } else {
                bounded(original)
            }
        })
        .collect::<Vec<_>>()
        .join("|");
    let matcher = RegexBuilder::new(&alternation)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| LexShieldError::Other(format!("Failed to build substitution matcher: {e}")))?;

    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let replaced = matcher.replace_all(text, |caps: &regex::Captures<'_>| {
        let original = &caps[0];
        *occurrences.entry(original.to_string()).or_insert(0) += 1;
        replacements
            .get(original)
            .cloned()
            .unwrap_or_else(|| original.to_string())
    });

    Ok((replaced.into_owned(), occurrences))
}
