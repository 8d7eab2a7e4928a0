//! Entity data models

use crate::anonymization::anonymizer::redaction::Redaction;
use crate::domain::{Document, DocumentId, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Entity type catalogue
///
/// Closed set: adding a variant forces every detector, token rule and risk
/// rule to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Natural persons (parties, witnesses, counsel)
    Person,
    /// Companies, firms and other organisations
    Organization,
    /// Calendar dates
    Date,
    /// Addresses, postcodes and named places
    Location,
    /// Email addresses and telephone numbers
    Contact,
    /// Registration numbers, national IDs, account and card numbers
    Identifier,
    /// Monetary amounts
    Financial,
    /// Case, claim and citation numbers
    CaseNumber,
    /// Confidentiality and privilege markers
    Sensitive,
}

impl EntityType {
    /// Every entity type, in catalogue order
    pub const ALL: [EntityType; 9] = [
        EntityType::Person,
        EntityType::Organization,
        EntityType::Date,
        EntityType::Location,
        EntityType::Contact,
        EntityType::Identifier,
        EntityType::Financial,
        EntityType::CaseNumber,
        EntityType::Sensitive,
    ];

    /// Prefix used when building tokens for this type
    ///
    /// Financial amounts extend the prefix with a magnitude class.
    pub fn token_prefix(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORG",
            Self::Date => "DATE",
            Self::Location => "LOCATION",
            Self::Contact => "CONTACT",
            Self::Identifier => "IDENTIFIER",
            Self::Financial => "AMOUNT",
            Self::CaseNumber => "CASE",
            Self::Sensitive => "SENSITIVE",
        }
    }

    /// Snake-case name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Organization => "organization",
            Self::Date => "date",
            Self::Location => "location",
            Self::Contact => "contact",
            Self::Identifier => "identifier",
            Self::Financial => "financial",
            Self::CaseNumber => "case_number",
            Self::Sensitive => "sensitive",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "PERSON" | "NAME" => Ok(Self::Person),
            "ORGANIZATION" | "ORGANISATION" | "ORG" | "COMPANY" => Ok(Self::Organization),
            "DATE" => Ok(Self::Date),
            "LOCATION" | "ADDRESS" | "PLACE" => Ok(Self::Location),
            "CONTACT" | "EMAIL" | "PHONE" => Ok(Self::Contact),
            "IDENTIFIER" | "ID" | "ACCOUNT" => Ok(Self::Identifier),
            "FINANCIAL" | "AMOUNT" | "MONEY" => Ok(Self::Financial),
            "CASE_NUMBER" | "CASE" | "CITATION" => Ok(Self::CaseNumber),
            "SENSITIVE" => Ok(Self::Sensitive),
            _ => Err(format!("Unknown entity type: {s}")),
        }
    }
}

/// A candidate span reported by a detector, before any token is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Entity type
    pub entity_type: EntityType,
    /// Matched text (the original value)
    pub value: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Name of the pattern that produced the match
    pub pattern: String,
    /// Overlap priority, higher wins
    pub specificity: u8,
}

impl Detection {
    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for a zero-length span
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Whether two detections share at least one byte
    pub fn overlaps(&self, other: &Detection) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Detected and tokenised entity
///
/// `original_value` must never reach an exported or audit artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Entity record ID
    pub id: EntityId,
    /// Entity type
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Original value as it appeared in the source text
    pub original_value: String,
    /// Token substituted for the original value
    pub anonymized_value: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Snippet of anonymized text around the first mention
    pub context: String,
    /// Pattern that detected the entity
    pub detection_pattern: String,
    /// Documents the entity was observed in
    pub source_documents: BTreeSet<DocumentId>,
    /// Number of mentions across the source documents
    pub occurrences: usize,
}

impl Entity {
    /// Create a new entity observed once in a single document
    pub fn new(
        entity_type: EntityType,
        original_value: impl Into<String>,
        anonymized_value: impl Into<String>,
        detection_pattern: impl Into<String>,
        document_id: DocumentId,
    ) -> Self {
        let mut source_documents = BTreeSet::new();
        source_documents.insert(document_id);

        Self {
            id: EntityId::generate(),
            entity_type,
            original_value: original_value.into(),
            anonymized_value: anonymized_value.into(),
            confidence: 1.0,
            context: String::new(),
            detection_pattern: detection_pattern.into(),
            source_documents,
            occurrences: 1,
        }
    }

    /// Set the confidence score
    pub fn set_confidence(&mut self, confidence: f32) {
        self.confidence = confidence.clamp(0.0, 1.0);
    }

    /// Builder-style confidence setter
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.set_confidence(confidence);
        self
    }
}

/// Result of anonymizing one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// Anonymized document (same ID, rewritten content)
    pub anonymized_doc: Document,
    /// Entities found in the document, one record per distinct original value
    pub doc_entities: Vec<Entity>,
    /// Sentences replaced wholesale by the redactor
    pub redactions: Vec<Redaction>,
    /// Detector faults that were isolated while processing
    pub warnings: Vec<String>,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of anonymization
    pub timestamp: DateTime<Utc>,
    /// Entity count by type
    pub stats_by_type: BTreeMap<EntityType, usize>,
}

impl AnonymizationResult {
    /// Create a new result
    pub fn new(
        anonymized_doc: Document,
        doc_entities: Vec<Entity>,
        redactions: Vec<Redaction>,
        warnings: Vec<String>,
        processing_time_ms: u64,
    ) -> Self {
        let mut stats_by_type = BTreeMap::new();
        for entity in &doc_entities {
            *stats_by_type.entry(entity.entity_type).or_insert(0) += 1;
        }

        Self {
            anonymized_doc,
            doc_entities,
            redactions,
            warnings,
            processing_time_ms,
            timestamp: Utc::now(),
            stats_by_type,
        }
    }

    /// Get total number of entities
    pub fn total_entities(&self) -> usize {
        self.doc_entities.len()
    }

    /// Check if any entity was detected
    pub fn has_entities(&self) -> bool {
        !self.doc_entities.is_empty()
    }
}
