//! Engine introspection

use crate::anonymization::detector::patterns::PatternRegistry;
use crate::anonymization::models::EntityType;
use serde::{Deserialize, Serialize};

/// Feature flags reported by [`AnonymizerStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub reversible_tokens: bool,
    pub cross_document_consistency: bool,
    pub magnitude_bucketing: bool,
    pub sentence_redaction: bool,
    pub entity_consolidation: bool,
    pub risk_analysis: bool,
    pub custom_patterns: bool,
    pub batch_processing: bool,
    pub audit_log: bool,
}

/// What the engine can detect and how it protects data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizerStats {
    /// Number of registered detectors
    pub patterns_supported: usize,
    /// Distinct detector names
    pub pattern_names: Vec<String>,
    /// Entity types covered by at least one detector
    pub entity_types: Vec<EntityType>,
    pub capabilities: Capabilities,
    pub security_features: Vec<String>,
    /// Crate version
    pub version: String,
}

impl AnonymizerStats {
    /// Collect stats for a registry and the engine's switches
    pub fn collect(
        registry: &PatternRegistry,
        redaction_enabled: bool,
        custom_patterns: bool,
        audit_enabled: bool,
    ) -> Self {
        let mut security_features = vec![
            "Original values never leave the session mapping store".to_string(),
            "Secure mapping export contains aggregate counts only".to_string(),
            "Mapping store zeroized on clear and on drop".to_string(),
            "Unknown tokens fail lookup instead of returning placeholders".to_string(),
            "Detector faults are isolated per document".to_string(),
        ];
        if redaction_enabled {
            security_features.push("Sentences with privilege markers are redacted wholesale".to_string());
        }
        if audit_enabled {
            security_features.push("Audit log records counts and content digests only".to_string());
        }

        Self {
            patterns_supported: registry.len(),
            pattern_names: registry.pattern_names(),
            entity_types: registry.entity_types(),
            capabilities: Capabilities {
                reversible_tokens: true,
                cross_document_consistency: true,
                magnitude_bucketing: true,
                sentence_redaction: redaction_enabled,
                entity_consolidation: true,
                risk_analysis: true,
                custom_patterns,
                batch_processing: true,
                audit_log: audit_enabled,
            },
            security_features,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
