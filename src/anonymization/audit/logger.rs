//! Audit logger for anonymization operations

use crate::anonymization::models::{AnonymizationResult, EntityType};
use crate::domain::SessionId;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Audit log entry
///
/// Counts and digests only; no original value or token pairing is written.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum AuditLogEntry {
    Anonymize {
        timestamp: String,
        session_id: String,
        document_id: String,
        entity_count: usize,
        entities_by_type: BTreeMap<EntityType, usize>,
        redaction_count: usize,
        warning_count: usize,
        processing_time_ms: u64,
        /// SHA-256 of the anonymized content
        content_sha256: String,
    },
    ClearMappings {
        timestamp: String,
        session_id: String,
        mappings_cleared: usize,
    },
}

/// Appends one line per anonymization and per mapping purge
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create audit log directory: {}", parent.display())
                    })?;
                }
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the audit log
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Whether entries are written at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log an anonymized document
    pub fn log_anonymization(&self, session_id: &SessionId, result: &AnonymizationResult) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry::Anonymize {
            timestamp: result.timestamp.to_rfc3339(),
            session_id: session_id.to_string(),
            document_id: result.anonymized_doc.id.to_string(),
            entity_count: result.doc_entities.len(),
            entities_by_type: result.stats_by_type.clone(),
            redaction_count: result.redactions.len(),
            warning_count: result.warnings.len(),
            processing_time_ms: result.processing_time_ms,
            content_sha256: sha256_hex(&result.anonymized_doc.content),
        };

        self.write_entry(&entry)
    }

    /// Log a mapping purge
    pub fn log_clear(&self, session_id: &SessionId, mappings_cleared: usize) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry::ClearMappings {
            timestamp: chrono::Utc::now().to_rfc3339(),
            session_id: session_id.to_string(),
            mappings_cleared,
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry).context("Failed to serialize audit entry")?
        } else {
            format_plain(entry)
        };

        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;
        writeln!(file, "{line}").context("Failed to write audit entry")?;

        Ok(())
    }
}

fn format_plain(entry: &AuditLogEntry) -> String {
    match entry {
        AuditLogEntry::Anonymize {
            timestamp,
            session_id,
            document_id,
            entity_count,
            redaction_count,
            processing_time_ms,
            content_sha256,
            ..
        } => format!(
            "[{timestamp}] Session: {session_id} | Document: {document_id} | Entities: {entity_count} | Redactions: {redaction_count} | Time: {processing_time_ms}ms | SHA-256: {content_sha256}"
        ),
        AuditLogEntry::ClearMappings {
            timestamp,
            session_id,
            mappings_cleared,
        } => format!(
            "[{timestamp}] Session: {session_id} | Mappings cleared: {mappings_cleared}"
        ),
    }
}

fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
