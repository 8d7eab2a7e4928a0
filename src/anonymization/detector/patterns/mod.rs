//! Pattern library for entity detection

use super::person::PersonNameDetector;
use super::regex::{RegexDetector, SpanCheck};
use super::sensitive::SensitiveTermDetector;
use super::vocabulary::KNOWN_PLACES;
use super::EntityDetector;
use crate::anonymization::models::EntityType;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this entry
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Entity type label
    pub category: String,
    /// Overlap priority; defaults per entity type
    #[serde(default)]
    pub specificity: Option<u8>,
    /// Optional post-match check
    #[serde(default)]
    pub check: Option<SpanCheck>,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Default overlap priority for library patterns that omit `specificity`
pub fn default_specificity(entity_type: EntityType) -> u8 {
    match entity_type {
        EntityType::CaseNumber => 90,
        EntityType::Identifier => 80,
        EntityType::Contact => 75,
        EntityType::Date | EntityType::Financial => 70,
        EntityType::Organization => 60,
        EntityType::Location => 50,
        EntityType::Person => 40,
        EntityType::Sensitive => 30,
    }
}

/// Ordered set of detectors
///
/// Order is stable: built-in regex entries sorted by name, then the
/// heuristic detectors, then any custom library entries.
#[derive(Clone, Default)]
pub struct PatternRegistry {
    detectors: Vec<Arc<dyn EntityDetector>>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut registry = Self::new();
        for (name, def) in library.patterns {
            let entity_type: EntityType = def
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .with_context(|| {
                    format!("Invalid category in pattern '{}': {}", name, def.category)
                })?;

            if !(0.0..=1.0).contains(&def.confidence) {
                anyhow::bail!(
                    "Invalid confidence in pattern '{}': {} (must be 0.0-1.0)",
                    name,
                    def.confidence
                );
            }

            let specificity = def
                .specificity
                .unwrap_or_else(|| default_specificity(entity_type));

            for pattern_str in &def.patterns {
                let mut detector = RegexDetector::new(
                    name.clone(),
                    entity_type,
                    pattern_str,
                    def.confidence,
                    specificity,
                )
                .with_context(|| format!("Invalid regex in pattern '{name}': {pattern_str}"))?;
                if let Some(check) = def.check {
                    detector = detector.with_check(check);
                }
                registry.register(Arc::new(detector));
            }
        }

        Ok(registry)
    }

    /// Create the built-in registry used for legal documents
    pub fn builtin() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/legal_patterns.toml");
        let mut registry = Self::from_toml(default_toml)?;

        let places = KNOWN_PLACES
            .iter()
            .map(|place| regex::escape(place))
            .collect::<Vec<_>>()
            .join("|");
        registry.register(Arc::new(RegexDetector::new(
            "known_place",
            EntityType::Location,
            &format!(r"\b(?:{places})\b"),
            0.75,
            45,
        )?));
        registry.register(Arc::new(PersonNameDetector::new()?));
        registry.register(Arc::new(SensitiveTermDetector::new()?));

        Ok(registry)
    }

    /// Append a detector
    pub fn register(&mut self, detector: Arc<dyn EntityDetector>) {
        self.detectors.push(detector);
    }

    /// Append every detector from another registry
    pub fn extend(&mut self, other: PatternRegistry) {
        self.detectors.extend(other.detectors);
    }

    /// All detectors, in execution order
    pub fn detectors(&self) -> &[Arc<dyn EntityDetector>] {
        &self.detectors
    }

    /// Detectors producing a given entity type
    pub fn detectors_for_type(&self, entity_type: EntityType) -> Vec<Arc<dyn EntityDetector>> {
        self.detectors
            .iter()
            .filter(|d| d.entity_type() == entity_type)
            .cloned()
            .collect()
    }

    /// Distinct pattern names, sorted
    pub fn pattern_names(&self) -> Vec<String> {
        self.detectors
            .iter()
            .map(|d| d.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entity types covered by at least one detector, catalogue order
    pub fn entity_types(&self) -> Vec<EntityType> {
        EntityType::ALL
            .into_iter()
            .filter(|t| self.detectors.iter().any(|d| d.entity_type() == *t))
            .collect()
    }

    /// Number of detectors
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Returns true when no detector is registered
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl std::fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRegistry")
            .field("detectors", &self.pattern_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_all(registry: &PatternRegistry, entity_type: EntityType, text: &str) -> Vec<String> {
        registry
            .detectors_for_type(entity_type)
            .iter()
            .flat_map(|d| d.detect(text).unwrap())
            .map(|d| d.value)
            .collect()
    }

    #[test]
    fn test_load_builtin_patterns() {
        let registry = PatternRegistry::builtin().unwrap();
        assert!(!registry.is_empty());
        assert_eq!(registry.entity_types(), EntityType::ALL.to_vec());
        assert!(registry.pattern_names().contains(&"person_name".to_string()));
    }

    #[test]
    fn test_email_pattern() {
        let registry = PatternRegistry::builtin().unwrap();
        let found = detect_all(&registry, EntityType::Contact, "Write to j.smith@example.co.uk today");
        assert!(found.contains(&"j.smith@example.co.uk".to_string()));
    }

    #[test]
    fn test_phone_pattern() {
        let registry = PatternRegistry::builtin().unwrap();
        let found = detect_all(&registry, EntityType::Contact, "Call (555) 123-4567 or 020 7946 0958");
        assert!(found.contains(&"(555) 123-4567".to_string()));
        assert!(found.contains(&"020 7946 0958".to_string()));
    }

    #[test]
    fn test_case_number_patterns() {
        let registry = PatternRegistry::builtin().unwrap();
        let text = "Claim HC2023/001234, see [2023] EWHC 1234 (Ch) and Case No. 2023-CV-01234.";
        let found = detect_all(&registry, EntityType::CaseNumber, text);
        assert!(found.contains(&"HC2023/001234".to_string()));
        assert!(found.contains(&"[2023] EWHC 1234 (Ch)".to_string()));
        assert!(found.contains(&"2023-CV-01234".to_string()));
    }

    #[test]
    fn test_date_patterns() {
        let registry = PatternRegistry::builtin().unwrap();
        let text = "Dated 15/03/2023, served 1st April 2023 and heard on March 3, 2024.";
        let found = detect_all(&registry, EntityType::Date, text);
        assert!(found.contains(&"15/03/2023".to_string()));
        assert!(found.contains(&"1st April 2023".to_string()));
        assert!(found.contains(&"March 3, 2024".to_string()));
    }

    #[test]
    fn test_amount_patterns() {
        let registry = PatternRegistry::builtin().unwrap();
        let text = "Damages of £50,000 and costs of $2.5m, plus 300 pounds.";
        let found = detect_all(&registry, EntityType::Financial, text);
        assert!(found.contains(&"£50,000".to_string()));
        assert!(found.contains(&"$2.5m".to_string()));
        assert!(found.contains(&"300 pounds".to_string()));
    }

    #[test]
    fn test_company_pattern_trims_sentence_words() {
        let registry = PatternRegistry::builtin().unwrap();
        let found = detect_all(
            &registry,
            EntityType::Organization,
            "Between Acme Widgets Ltd. and Smith & Partners LLP.",
        );
        assert!(found.contains(&"Acme Widgets Ltd".to_string()));
        assert!(found.iter().any(|v| v.ends_with("Partners LLP")));
    }

    #[test]
    fn test_identifier_patterns() {
        let registry = PatternRegistry::builtin().unwrap();
        let text = "NI number AB 12 34 56 C, card 4111 1111 1111 1111, Company No. 01234567.";
        let found = detect_all(&registry, EntityType::Identifier, text);
        assert!(found.contains(&"AB 12 34 56 C".to_string()));
        assert!(found.contains(&"4111 1111 1111 1111".to_string()));
        assert!(found.contains(&"01234567".to_string()));
    }

    #[test]
    fn test_nhs_number_pattern() {
        let registry = PatternRegistry::builtin().unwrap();
        let text = "Patient NHS No. 943 476 5919; an invalid 943 476 5918 is ignored.";
        let found = detect_all(&registry, EntityType::Identifier, text);
        assert!(found.contains(&"943 476 5919".to_string()));
        assert!(!found.contains(&"943 476 5918".to_string()));
        assert!(registry.pattern_names().contains(&"nhs_number".to_string()));
    }

    #[test]
    fn test_driving_licence_patterns() {
        let registry = PatternRegistry::builtin().unwrap();
        let text = "Licence MORGA753116SM9IJ on file; driver's license no. D1234-56789 (CA). \
                    His driving licence was valid.";
        let found = detect_all(&registry, EntityType::Identifier, text);
        assert!(found.contains(&"MORGA753116SM9IJ".to_string()));
        assert!(found.contains(&"D1234-56789".to_string()));
        assert!(!found.iter().any(|v| v == "was" || v == "valid"));
    }

    #[test]
    fn test_location_patterns() {
        let registry = PatternRegistry::builtin().unwrap();
        let text = "Served at 221B Baker Street, London NW1 6XE.";
        let found = detect_all(&registry, EntityType::Location, text);
        assert!(found.contains(&"221B Baker Street".to_string()));
        assert!(found.contains(&"London".to_string()));
        assert!(found.contains(&"NW1 6XE".to_string()));
    }

    #[test]
    fn test_custom_library() {
        let toml = r#"
            [patterns.matter_number]
            category = "case_number"
            confidence = 0.9
            patterns = ['\bMAT-\d{6}\b']
        "#;
        let registry = PatternRegistry::from_toml(toml).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.detectors()[0].specificity(), 90);
        let found = registry.detectors()[0].detect("Matter MAT-123456 opened").unwrap();
        assert_eq!(found[0].value, "MAT-123456");
    }

    #[test]
    fn test_invalid_library_entries() {
        let bad_category = r#"
            [patterns.x]
            category = "shoe_size"
            confidence = 0.9
            patterns = ['\d+']
        "#;
        assert!(PatternRegistry::from_toml(bad_category).is_err());

        let bad_regex = r#"
            [patterns.x]
            category = "date"
            confidence = 0.9
            patterns = ['([0-9']
        "#;
        assert!(PatternRegistry::from_toml(bad_regex).is_err());

        let bad_confidence = r#"
            [patterns.x]
            category = "date"
            confidence = 1.5
            patterns = ['\d+']
        "#;
        assert!(PatternRegistry::from_toml(bad_confidence).is_err());
    }
}
