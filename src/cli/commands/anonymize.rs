//! Anonymize command implementation
//!
//! This module implements the `anonymize` command: every input file is
//! anonymized within one session and written to the output directory under
//! its original file name.

use super::{build_engine, read_documents, scan::print_risk_report};
use crate::anonymization::AnonymizationEngine;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Plain-text documents to anonymize
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving the anonymized documents
    #[arg(short, long, default_value = "anonymized")]
    pub output_dir: PathBuf,

    /// Write a count-only mapping manifest (JSON) to this path
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Write the batch report (JSON) to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Disable sentence redaction for this run
    #[arg(long)]
    pub no_redaction: bool,

    /// Overwrite files already present in the output directory
    #[arg(long)]
    pub force: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(inputs = self.inputs.len(), "Starting anonymize command");

        let (config, engine) = match build_engine(config_path) {
            Ok(built) => built,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize anonymization engine");
                eprintln!("Configuration error: {e:#}");
                return Ok(2);
            }
        };
        let engine = if self.no_redaction {
            let mut anonymization = config.anonymization.clone();
            anonymization.redaction.enabled = false;
            AnonymizationEngine::new(anonymization)?
        } else {
            engine
        };

        let documents = match read_documents(&self.inputs) {
            Ok(documents) => documents,
            Err(e) => {
                eprintln!("Input error: {e:#}");
                return Ok(3);
            }
        };

        if !self.force {
            if let Some(existing) = documents
                .iter()
                .map(|d| self.output_dir.join(d.id.as_str()))
                .find(|path| path.exists())
            {
                println!("❌ Output file already exists: {}", existing.display());
                println!("   Use --force to overwrite");
                return Ok(2);
            }
        }
        std::fs::create_dir_all(&self.output_dir)?;

        let expected = documents.len();
        println!("🔒 Anonymizing {expected} document(s)...");
        let (results, report) = engine.anonymize_batch_with_report(documents).await;

        for result in &results {
            let path = self.output_dir.join(result.anonymized_doc.id.as_str());
            std::fs::write(&path, &result.anonymized_doc.content)?;
            println!(
                "  ✅ {} → {} ({} entities, {} redactions)",
                result.anonymized_doc.id,
                path.display(),
                result.total_entities(),
                result.redactions.len()
            );
        }

        print!("{}", report.format_console());

        let entities: Vec<_> = results
            .iter()
            .flat_map(|r| r.doc_entities.iter().cloned())
            .collect();
        let consolidated = engine.consolidate_entities(&entities);
        print_risk_report(&engine.analyze_privacy_risk(&consolidated));

        if let Some(ref path) = self.manifest {
            std::fs::write(path, engine.create_secure_mapping().to_json()?)?;
            println!("📄 Mapping manifest written to {}", path.display());
        }

        if let Some(ref path) = self.report {
            report.write_to_file(path)?;
            println!("📄 Batch report written to {}", path.display());
        }

        let cleared = engine.clear_mappings();
        tracing::debug!(cleared, "Session mappings purged");

        if results.len() < expected {
            println!(
                "⚠️  {} of {} document(s) could not be anonymized",
                expected - results.len(),
                expected
            );
            return Ok(1);
        }
        Ok(0)
    }
}
