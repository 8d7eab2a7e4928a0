//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`], one anonymization session
//! over plain-text legal documents.
//!
//! # Architecture
//!
//! The engine coordinates:
//! - **Scanner**: runs every registered detector, isolates faults and resolves
//!   overlapping spans
//! - **Mapping session**: issues one token per distinct original value and
//!   keeps the reverse map for deanonymization
//! - **Redactor**: replaces sentences carrying privilege or confidentiality
//!   markers
//! - **Risk analyzer / audit logger**: downstream reporting that never sees
//!   original values
//!
//! # Examples
//!
//! ```no_run
//! use lexshield::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use lexshield::domain::{Document, DocumentId};
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//!
//! let document = Document::new(
//!     DocumentId::new("contract.txt").map_err(anyhow::Error::msg)?,
//!     "John Smith signed the contract on 15/03/2023",
//! );
//! let result = engine.anonymize_document(&document)?;
//! println!("{}", result.anonymized_doc.content);
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    anonymizer::{
        mapping::token_regex, substitution::substitute, MappingSession, Redactor,
    },
    audit::{AuditLogger, SecureMapping},
    config::AnonymizationConfig,
    consolidation,
    detector::{
        patterns::PatternRegistry,
        scanner::{EntityScanner, ScanOutcome},
    },
    models::{AnonymizationResult, Detection, Entity, EntityType},
    report::BatchReport,
    risk::{PrivacyRiskAnalyzer, RiskReport},
    stats::AnonymizerStats,
};
use crate::domain::{Document, DocumentId, LexShieldError, LookupError, SessionId};
use crate::{log_document_complete, log_document_start, log_error_with_context};
use anyhow::Context;
use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One anonymization session
///
/// Clones share the detectors and the mapping store, so a cloned engine can be
/// handed to worker tasks and every document still receives session-wide
/// consistent tokens. Use [`new_session`](Self::new_session) for an
/// independent store (e.g. per case).
///
/// # Thread Safety
///
/// Detection is stateless and runs in parallel; token allocation is
/// serialized by the mapping session's lock.
#[derive(Debug, Clone)]
pub struct AnonymizationEngine {
    config: Arc<AnonymizationConfig>,
    scanner: EntityScanner,
    redactor: Arc<Redactor>,
    mappings: MappingSession,
    risk_analyzer: Arc<PrivacyRiskAnalyzer>,
    audit_logger: Option<Arc<AuditLogger>>,
    session_id: SessionId,
}

/// Distinct original value found in one document
#[derive(Debug)]
struct ValueGroup {
    entity_type: EntityType,
    value: String,
    pattern: String,
    confidence: f32,
    specificity: u8,
    mentions: usize,
}

/// Detection stage output, before any token is assigned
#[derive(Debug)]
struct ScannedDocument {
    document: Document,
    groups: Vec<ValueGroup>,
    warnings: Vec<String>,
    elapsed: Duration,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    ///
    /// Builds the built-in detector registry, appends the configured pattern
    /// library (if any) and opens the audit log when enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - A built-in or library pattern cannot be compiled
    /// - The audit log directory cannot be created
    pub fn new(config: AnonymizationConfig) -> anyhow::Result<Self> {
        config
            .validate()
            .context("Invalid anonymization configuration")?;

        let mut registry =
            PatternRegistry::builtin().context("Failed to build built-in pattern registry")?;
        if let Some(ref pattern_path) = config.pattern_library {
            let library = PatternRegistry::from_file(pattern_path)?;
            tracing::info!(
                path = %pattern_path.display(),
                detectors = library.len(),
                "Loaded pattern library"
            );
            registry.extend(library);
        }

        let redactor = Redactor::new().context("Failed to build sentence redactor")?;

        let audit_logger = if config.audit.enabled {
            Some(Arc::new(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
                true,
            )?))
        } else {
            None
        };

        let session_id = SessionId::generate();
        tracing::debug!(
            session_id = %session_id,
            detectors = registry.len(),
            "Anonymization session started"
        );

        Ok(Self {
            scanner: EntityScanner::new(registry, config.confidence_threshold),
            redactor: Arc::new(redactor),
            mappings: MappingSession::new(),
            risk_analyzer: Arc::new(PrivacyRiskAnalyzer::new(config.risk.clone())),
            audit_logger,
            session_id,
            config: Arc::new(config),
        })
    }

    /// Engine sharing these detectors but with an empty mapping store
    pub fn new_session(&self) -> Self {
        Self {
            mappings: MappingSession::new(),
            session_id: SessionId::generate(),
            ..self.clone()
        }
    }

    /// Session identifier
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Active configuration
    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Number of mappings issued by this session
    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    /// Anonymize a single document
    ///
    /// # Behavior
    ///
    /// 1. Rejects documents above `max_input_bytes`
    /// 2. Detects entities (faulty detectors are skipped with a warning)
    /// 3. Reuses or allocates one token per distinct original value
    /// 4. Replaces every occurrence of every original value
    /// 5. Redacts sentences carrying sensitive markers
    ///
    /// Blank documents yield an empty entity list.
    ///
    /// # Errors
    ///
    /// Returns [`LexShieldError::InputTooLarge`] for oversized input, or an
    /// error when the audit log cannot be written.
    pub fn anonymize_document(&self, document: &Document) -> crate::domain::Result<AnonymizationResult> {
        let scanned = self.scan_document(document.clone())?;
        self.finish_document(scanned)
    }

    /// Run detection only; the mapping store is not touched
    pub fn detect(&self, document: &Document) -> crate::domain::Result<ScanOutcome> {
        self.check_size(document)?;
        Ok(self.scanner.scan(&document.content))
    }

    /// Anonymize a batch of documents
    ///
    /// Documents are scanned in parallel on the blocking pool, then tokens are
    /// assigned in input order so numbering does not depend on scheduling.
    /// Failed documents are logged and left out of the output.
    pub async fn anonymize_batch(&self, documents: Vec<Document>) -> Vec<AnonymizationResult> {
        self.run_batch(documents)
            .await
            .into_iter()
            .filter_map(|(document_id, outcome)| match outcome {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::error!(document_id = %document_id, error = %e, "Failed to anonymize document");
                    None
                }
            })
            .collect()
    }

    /// Anonymize a batch and build a [`BatchReport`]
    pub async fn anonymize_batch_with_report(
        &self,
        documents: Vec<Document>,
    ) -> (Vec<AnonymizationResult>, BatchReport) {
        let mut results = Vec::new();
        let mut report = BatchReport::new();

        for (document_id, outcome) in self.run_batch(documents).await {
            match outcome {
                Ok(result) => {
                    report.add_document(&result, result.processing_time_ms);
                    results.push(result);
                }
                Err(e) => {
                    tracing::error!(document_id = %document_id, error = %e, "Failed to anonymize document");
                    report.add_warning(format!("Failed to anonymize {document_id}: {e}"));
                }
            }
        }

        (results, report)
    }

    async fn run_batch(
        &self,
        documents: Vec<Document>,
    ) -> Vec<(DocumentId, crate::domain::Result<AnonymizationResult>)> {
        let total = documents.len();
        let handles = documents.into_iter().map(|document| {
            let engine = self.clone();
            let document_id = document.id.clone();
            let task = tokio::task::spawn_blocking(move || engine.scan_document(document));
            async move { (document_id, task.await) }
        });

        let mut outcomes = Vec::with_capacity(total);
        for (position, (document_id, joined)) in join_all(handles).await.into_iter().enumerate() {
            crate::log_batch_processing!(position + 1, total);
            let outcome = match joined {
                Ok(Ok(scanned)) => self.finish_document(scanned),
                Ok(Err(e)) => Err(e),
                Err(e) => Err(LexShieldError::Other(format!("Detection task failed: {e}"))),
            };
            outcomes.push((document_id, outcome));
        }
        outcomes
    }

    /// Original value behind a token issued by this session
    ///
    /// # Errors
    ///
    /// [`LookupError::UnknownToken`] if the token was never issued here or
    /// the mappings were cleared since.
    pub fn deanonymize(&self, token: &str) -> Result<String, LookupError> {
        self.mappings.resolve(token)
    }

    /// Restore every token of this session found in `text`
    ///
    /// Token-shaped strings from other sessions are left as they are.
    pub fn deanonymize_text(&self, text: &str) -> String {
        let (restored, unknown) = self.mappings.restore_text(text);
        if !unknown.is_empty() {
            tracing::debug!(unknown = unknown.len(), "Left unknown tokens in place");
        }
        restored
    }

    /// Zeroize every mapping and restart the token counters
    ///
    /// Returns the number of mappings discarded.
    pub fn clear_mappings(&self) -> usize {
        let cleared = self.mappings.clear();
        tracing::info!(session_id = %self.session_id, cleared, "Mappings cleared");

        if let Some(ref logger) = self.audit_logger {
            if let Err(e) = logger.log_clear(&self.session_id, cleared) {
                log_error_with_context!(e, "Failed to write audit entry for mapping purge");
            }
        }
        cleared
    }

    /// Merge entities that share a token
    pub fn consolidate_entities(&self, entities: &[Entity]) -> Vec<Entity> {
        consolidation::consolidate_entities(entities)
    }

    /// Score a population of entities
    pub fn analyze_privacy_risk(&self, entities: &[Entity]) -> RiskReport {
        self.risk_analyzer.analyze(entities)
    }

    /// Score raw detections, counting each distinct value once
    pub fn analyze_detections(&self, detections: &[Detection]) -> RiskReport {
        let distinct: BTreeSet<(EntityType, &str)> = detections
            .iter()
            .map(|d| (d.entity_type, d.value.as_str()))
            .collect();
        let mut counts = BTreeMap::new();
        for (entity_type, _) in distinct {
            *counts.entry(entity_type).or_insert(0) += 1;
        }
        self.risk_analyzer.analyze_counts(&counts)
    }

    /// Count-only manifest of the mapping store
    pub fn create_secure_mapping(&self) -> SecureMapping {
        SecureMapping::new(self.session_id, self.mappings.counts_by_type())
    }

    /// Detector catalogue and feature flags
    pub fn stats(&self) -> AnonymizerStats {
        AnonymizerStats::collect(
            self.scanner.registry(),
            self.config.redaction.enabled,
            self.config.pattern_library.is_some(),
            self.audit_logger.is_some(),
        )
    }

    fn check_size(&self, document: &Document) -> crate::domain::Result<()> {
        let size = document.size_bytes();
        if size > self.config.max_input_bytes {
            return Err(LexShieldError::InputTooLarge {
                document_id: document.id.to_string(),
                size,
                limit: self.config.max_input_bytes,
            });
        }
        Ok(())
    }

    /// Detection stage: size check, scan, group by value
    fn scan_document(&self, document: Document) -> crate::domain::Result<ScannedDocument> {
        let start = Instant::now();
        self.check_size(&document)?;
        log_document_start!(&document.id, document.size_bytes());

        let ScanOutcome {
            detections,
            warnings,
        } = self.scanner.scan(&document.content);

        Ok(ScannedDocument {
            groups: group_by_value(detections),
            document,
            warnings,
            elapsed: start.elapsed(),
        })
    }

    /// Mapping stage: tokens, substitution, redaction, entity records
    fn finish_document(&self, scanned: ScannedDocument) -> crate::domain::Result<AnonymizationResult> {
        let start = Instant::now();
        let ScannedDocument {
            document,
            groups,
            warnings,
            elapsed,
        } = scanned;
        let redaction_enabled = self.config.redaction.enabled;

        let tokens = self.mappings.assign_all(groups.iter().map(|group| {
            let magnitude = (group.entity_type == EntityType::Financial)
                .then(|| self.config.magnitude.classify_text(&group.value));
            (group.entity_type, group.value.as_str(), magnitude)
        }));

        // Sensitive markers are removed with their sentence instead.
        let replacements: HashMap<String, String> = groups
            .iter()
            .zip(&tokens)
            .filter(|(group, _)| !(redaction_enabled && group.entity_type == EntityType::Sensitive))
            .map(|(group, token)| (group.value.clone(), token.clone()))
            .collect();
        let substituted = substitute(&document.content, &replacements)?;

        let (content, redactions) = if redaction_enabled {
            self.redactor.redact(&substituted.text)
        } else {
            (substituted.text, Vec::new())
        };

        let first_mentions = first_token_mentions(&content);
        let mut entities: Vec<Entity> = groups
            .into_iter()
            .zip(tokens)
            .map(|(group, token)| {
                let context = first_mentions
                    .get(token.as_str())
                    .map(|span| context_snippet(&content, span.clone(), self.config.context_window))
                    .unwrap_or_default();
                let occurrences = substituted
                    .occurrences
                    .get(&group.value)
                    .copied()
                    .unwrap_or(group.mentions);

                let mut entity = Entity::new(
                    group.entity_type,
                    group.value,
                    token,
                    group.pattern,
                    document.id.clone(),
                )
                .with_confidence(group.confidence);
                entity.context = context;
                entity.occurrences = occurrences.max(1);
                entity
            })
            .collect();
        // Stable: equal confidences keep first-mention order.
        entities.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let processing_time_ms = (elapsed + start.elapsed()).as_millis() as u64;
        let result = AnonymizationResult::new(
            Document::new(document.id, content),
            entities,
            redactions,
            warnings,
            processing_time_ms,
        );

        if let Some(ref logger) = self.audit_logger {
            logger
                .log_anonymization(&self.session_id, &result)
                .map_err(|e| LexShieldError::Io(format!("Failed to write audit log: {e:#}")))?;
        }

        log_document_complete!(
            &result.anonymized_doc.id,
            result.total_entities(),
            result.redactions.len(),
            processing_time_ms
        );

        Ok(result)
    }
}

/// Collapse disjoint detections into one group per distinct value
///
/// Groups keep first-mention order. Type and pattern come from the most
/// specific detection of the value; confidence is the highest seen.
fn group_by_value(detections: Vec<Detection>) -> Vec<ValueGroup> {
    let mut groups: Vec<ValueGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for detection in detections {
        match index.get(&detection.value) {
            Some(&position) => {
                let group = &mut groups[position];
                group.mentions += 1;
                let outranks = (detection.specificity, detection.confidence)
                    > (group.specificity, group.confidence);
                if outranks {
                    group.entity_type = detection.entity_type;
                    group.pattern = detection.pattern;
                    group.specificity = detection.specificity;
                }
                group.confidence = group.confidence.max(detection.confidence);
            }
            None => {
                index.insert(detection.value.clone(), groups.len());
                groups.push(ValueGroup {
                    entity_type: detection.entity_type,
                    value: detection.value,
                    pattern: detection.pattern,
                    confidence: detection.confidence,
                    specificity: detection.specificity,
                    mentions: 1,
                });
            }
        }
    }

    groups
}

/// Byte span of the first occurrence of every token in `text`
fn first_token_mentions(text: &str) -> HashMap<&str, Range<usize>> {
    let mut mentions = HashMap::new();
    for found in token_regex().find_iter(text) {
        mentions.entry(found.as_str()).or_insert_with(|| found.range());
    }
    mentions
}

/// Up to `window` characters either side of `span`, whitespace collapsed
fn context_snippet(text: &str, span: Range<usize>, window: usize) -> String {
    let from = if window == 0 {
        span.start
    } else {
        text[..span.start]
            .char_indices()
            .rev()
            .nth(window - 1)
            .map_or(0, |(i, _)| i)
    };
    let to = text[span.end..]
        .char_indices()
        .nth(window)
        .map_or(text.len(), |(i, _)| span.end + i);

    text[from..to].split_whitespace().collect::<Vec<_>>().join(" ")
}
