//! Detector for confidentiality and privilege markers

use super::EntityDetector;
use crate::anonymization::anonymizer::redaction::SensitiveMarkers;
use crate::anonymization::models::{Detection, EntityType};
use crate::domain::DetectionError;

const SPECIFICITY: u8 = 30;
const CONFIDENCE: f32 = 0.95;

/// Reports each marker term ("confidential", "without prejudice") as a
/// sensitive entity so it is counted and risk-scored like any other
#[derive(Debug, Clone)]
pub struct SensitiveTermDetector {
    markers: SensitiveMarkers,
}

impl SensitiveTermDetector {
    pub fn new() -> Result<Self, DetectionError> {
        Ok(Self {
            markers: SensitiveMarkers::new()?,
        })
    }
}

impl EntityDetector for SensitiveTermDetector {
    fn name(&self) -> &str {
        "sensitive_marker"
    }

    fn entity_type(&self) -> EntityType {
        EntityType::Sensitive
    }

    fn specificity(&self) -> u8 {
        SPECIFICITY
    }

    fn detect(&self, text: &str) -> Result<Vec<Detection>, DetectionError> {
        let mut detections = Vec::new();
        for (category, regex) in self.markers.patterns() {
            for matched in regex.find_iter(text) {
                detections.push(Detection {
                    entity_type: EntityType::Sensitive,
                    value: matched.as_str().to_string(),
                    start: matched.start(),
                    end: matched.end(),
                    confidence: CONFIDENCE,
                    pattern: format!("sensitive_{}", category.label().to_lowercase()),
                    specificity: SPECIFICITY,
                });
            }
        }
        detections.sort_by_key(|d| d.start);
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_marker() {
        let detector = SensitiveTermDetector::new().unwrap();
        let found = detector
            .detect("This information is confidential and proprietary.")
            .unwrap();
        let values: Vec<_> = found.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, vec!["confidential", "proprietary"]);
        assert!(found.iter().all(|d| d.entity_type == EntityType::Sensitive));
        assert_eq!(found[0].pattern, "sensitive_confidential");
    }

    #[test]
    fn test_clean_text() {
        let detector = SensitiveTermDetector::new().unwrap();
        assert!(detector.detect("The hearing is listed.").unwrap().is_empty());
    }
}
