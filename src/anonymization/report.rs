//! Batch reporting for anonymization runs
//!
//! Summarises a batch of anonymized documents: entity counts per type,
//! redactions and warnings. The report carries counts only, never original
//! values or token pairings, so it can be written next to the output.

use crate::anonymization::models::{AnonymizationResult, EntityType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Documents anonymized successfully
    pub total_documents: usize,

    /// Entities found across all documents (one per distinct value per document)
    pub total_entities: usize,

    /// Entities by type
    pub entities_by_type: BTreeMap<EntityType, usize>,

    /// Sentences redacted across all documents
    pub total_redactions: usize,

    /// Failed documents and isolated detector faults
    pub warnings: Vec<String>,

    /// Processing statistics
    pub stats: ProcessingStats,
}

/// Processing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Average processing time per document (ms)
    pub avg_processing_time_ms: u64,

    /// Total processing time (ms)
    pub total_processing_time_ms: u64,

    /// Documents in which at least one entity was found
    pub documents_with_entities: usize,

    /// Documents with no entity
    pub documents_without_entities: usize,
}

impl BatchReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one anonymized document
    pub fn add_document(&mut self, result: &AnonymizationResult, processing_time_ms: u64) {
        self.total_documents += 1;
        self.stats.total_processing_time_ms += processing_time_ms;
        self.total_redactions += result.redactions.len();

        if result.has_entities() {
            self.stats.documents_with_entities += 1;
            self.total_entities += result.total_entities();
            for (entity_type, count) in &result.stats_by_type {
                *self.entities_by_type.entry(*entity_type).or_insert(0) += count;
            }
        } else {
            self.stats.documents_without_entities += 1;
        }

        for warning in &result.warnings {
            self.add_warning(format!("{}: {}", result.anonymized_doc.id, warning));
        }

        self.stats.avg_processing_time_ms =
            self.stats.total_processing_time_ms / self.total_documents as u64;
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                   ANONYMIZATION BATCH REPORT                  \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Documents Anonymized:        {}\n",
            self.total_documents
        ));
        output.push_str(&format!(
            "  Documents with Entities:     {}\n",
            self.stats.documents_with_entities
        ));
        output.push_str(&format!(
            "  Documents without Entities:  {}\n",
            self.stats.documents_without_entities
        ));
        output.push_str(&format!(
            "  Total Entities Detected:     {}\n",
            self.total_entities
        ));
        output.push_str(&format!(
            "  Sentences Redacted:          {}\n",
            self.total_redactions
        ));
        output.push_str(&format!(
            "  Avg Processing Time:         {} ms\n",
            self.stats.avg_processing_time_ms
        ));
        output.push('\n');

        if !self.entities_by_type.is_empty() {
            output.push_str("🔍 ENTITIES BY TYPE\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut types: Vec<_> = self.entities_by_type.iter().collect();
            types.sort_by(|a, b| b.1.cmp(a.1));

            for (entity_type, count) in types {
                output.push_str(&format!("  {:30} {:>5}\n", entity_type.as_str(), count));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::Entity;
    use crate::domain::{Document, DocumentId};

    fn result_with(entities: Vec<Entity>, warnings: Vec<String>) -> AnonymizationResult {
        let id = DocumentId::new("brief.txt").unwrap();
        AnonymizationResult::new(Document::new(id, "text"), entities, vec![], warnings, 0)
    }

    #[test]
    fn test_batch_report_creation() {
        let report = BatchReport::new();
        assert_eq!(report.total_documents, 0);
        assert_eq!(report.total_entities, 0);
        assert!(report.entities_by_type.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_add_document_without_entities() {
        let mut report = BatchReport::new();
        report.add_document(&result_with(vec![], vec![]), 10);

        assert_eq!(report.total_documents, 1);
        assert_eq!(report.total_entities, 0);
        assert_eq!(report.stats.documents_without_entities, 1);
        assert_eq!(report.stats.documents_with_entities, 0);
        assert_eq!(report.stats.avg_processing_time_ms, 10);
    }

    #[test]
    fn test_add_document_with_entities_and_warnings() {
        let mut report = BatchReport::new();
        let id = DocumentId::new("brief.txt").unwrap();
        let entity = Entity::new(
            EntityType::Contact,
            "jane@example.com",
            "CONTACT_001",
            "email",
            id,
        );

        report.add_document(
            &result_with(vec![entity], vec!["detector 'x' failed: boom".into()]),
            20,
        );
        report.add_document(&result_with(vec![], vec![]), 10);

        assert_eq!(report.total_documents, 2);
        assert_eq!(report.total_entities, 1);
        assert_eq!(report.entities_by_type.get(&EntityType::Contact), Some(&1));
        assert_eq!(report.stats.avg_processing_time_ms, 15);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("brief.txt: "));
    }

    #[test]
    fn test_format_console() {
        let mut report = BatchReport::new();
        report.total_documents = 10;
        report.total_entities = 5;
        report.entities_by_type.insert(EntityType::Person, 5);

        let output = report.format_console();
        assert!(output.contains("ANONYMIZATION BATCH REPORT"));
        assert!(output.contains("Documents Anonymized:        10"));
        assert!(output.contains("Total Entities Detected:     5"));
        assert!(output.contains("person"));
    }

    #[test]
    fn test_json_never_contains_originals() {
        let mut report = BatchReport::new();
        let id = DocumentId::new("a").unwrap();
        let entity = Entity::new(EntityType::Person, "John Smith", "PERSON_001", "p", id);
        report.add_document(&result_with(vec![entity], vec![]), 1);

        let json = report.format_json().unwrap();
        assert!(!json.contains("John Smith"));
        assert!(!json.contains("PERSON_001"));
    }
}
