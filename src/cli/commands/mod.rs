//! CLI command implementations
//!
//! This module contains all CLI command implementations and the helpers they
//! share for loading configuration and reading input files.

pub mod anonymize;
pub mod init;
pub mod scan;
pub mod stats;
pub mod validate;

use crate::anonymization::AnonymizationEngine;
use crate::config::{load_config_or_default, LexShieldConfig};
use crate::domain::{Document, DocumentId};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Load configuration and build an engine from it
pub(crate) fn build_engine(config_path: &str) -> anyhow::Result<(LexShieldConfig, AnonymizationEngine)> {
    let config = load_config_or_default(config_path)
        .with_context(|| format!("Failed to load configuration from {config_path}"))?;
    let engine = AnonymizationEngine::new(config.anonymization.clone())?;
    Ok((config, engine))
}

/// Read every input file as a document named after its file name
pub(crate) fn read_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    paths
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let id = DocumentId::new(document_name(path)).map_err(anyhow::Error::msg)?;
            Ok(Document::new(id, content))
        })
        .collect()
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
