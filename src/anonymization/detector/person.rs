//! Heuristic personal-name detector
//!
//! Names in legal prose have no fixed shape, so this detector works on runs
//! of capitalised words. Runs are split at ordinary legal vocabulary and at
//! honorifics; the remaining segments are scored by how name-like they are.
//! Place-like segments are emitted below the default threshold so the
//! location patterns win them.

use super::{vocabulary, EntityDetector};
use crate::anonymization::models::{Detection, EntityType};
use crate::domain::DetectionError;
use regex::Regex;

/// Confidence for a name introduced by an honorific ("Mr Smith")
pub const TITLED_CONFIDENCE: f32 = 0.92;
/// Confidence for a run that opens with a common given name
pub const KNOWN_FIRST_NAME_CONFIDENCE: f32 = 0.85;
/// Confidence for any other run of two to four capitalised words
pub const CAPITALISED_RUN_CONFIDENCE: f32 = 0.65;
/// Confidence for runs that look like place names
pub const PLACE_LIKE_CONFIDENCE: f32 = 0.45;

const PATTERN_NAME: &str = "person_name";
const SPECIFICITY: u8 = 40;
const MAX_NAME_WORDS: usize = 4;

/// Detects personal names from capitalised word runs
#[derive(Debug, Clone)]
pub struct PersonNameDetector {
    run: Regex,
}

impl PersonNameDetector {
    /// Create a new person-name detector
    pub fn new() -> Result<Self, DetectionError> {
        // words separated by spaces or tabs only, so headings on separate
        // lines never merge into one name
        let word = r"[A-Z][a-z]*(?:['’-]?[A-Z][a-z]+)*";
        let pattern = format!(r"\b{word}\b(?:[ \t]+{word}\b)*");
        let run = Regex::new(&pattern).map_err(|e| DetectionError::InvalidPattern {
            name: PATTERN_NAME.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { run })
    }

    fn preceded_by_title(text: &str, start: usize) -> bool {
        text[..start]
            .split_whitespace()
            .next_back()
            .is_some_and(vocabulary::is_title)
    }

    fn score(words: &[&str], titled: bool) -> Option<f32> {
        if words.is_empty() || words.len() > MAX_NAME_WORDS {
            return None;
        }
        if vocabulary::looks_like_place(words) {
            return Some(PLACE_LIKE_CONFIDENCE);
        }
        if titled {
            return Some(TITLED_CONFIDENCE);
        }
        if words.len() < 2 {
            return None;
        }
        if vocabulary::is_first_name(words[0]) {
            Some(KNOWN_FIRST_NAME_CONFIDENCE)
        } else {
            Some(CAPITALISED_RUN_CONFIDENCE)
        }
    }

    fn flush(
        text: &str,
        segment: &mut Vec<(usize, &str)>,
        titled: bool,
        detections: &mut Vec<Detection>,
    ) {
        let words: Vec<&str> = segment.iter().map(|(_, w)| *w).collect();
        if let (Some(confidence), Some(first), Some(last)) =
            (Self::score(&words, titled), segment.first(), segment.last())
        {
            let start = first.0;
            let end = last.0 + last.1.len();
            detections.push(Detection {
                entity_type: EntityType::Person,
                value: text[start..end].to_string(),
                start,
                end,
                confidence,
                pattern: PATTERN_NAME.to_string(),
                specificity: SPECIFICITY,
            });
        }
        segment.clear();
    }
}

impl EntityDetector for PersonNameDetector {
    fn name(&self) -> &str {
        PATTERN_NAME
    }

    fn entity_type(&self) -> EntityType {
        EntityType::Person
    }

    fn specificity(&self) -> u8 {
        SPECIFICITY
    }

    fn detect(&self, text: &str) -> Result<Vec<Detection>, DetectionError> {
        let mut detections = Vec::new();

        for run in self.run.find_iter(text) {
            let mut titled = Self::preceded_by_title(text, run.start());
            let mut segment: Vec<(usize, &str)> = Vec::new();
            let mut offset = run.start();

            for word in run.as_str().split([' ', '\t']) {
                let word_start = offset;
                offset += word.len() + 1;
                if word.is_empty() {
                    continue;
                }

                if vocabulary::is_title(word) {
                    Self::flush(text, &mut segment, titled, &mut detections);
                    titled = true;
                    continue;
                }

                // middle initials only count inside a name
                let lone_initial = word.len() == 1 && segment.is_empty();
                if vocabulary::is_common_word(word) || lone_initial {
                    Self::flush(text, &mut segment, titled, &mut detections);
                    titled = false;
                    continue;
                }

                segment.push((word_start, word));
            }
            Self::flush(text, &mut segment, titled, &mut detections);
        }

        Ok(detections)
    }
}
