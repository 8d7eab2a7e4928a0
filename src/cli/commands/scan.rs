//! Scan command implementation
//!
//! Runs detection only and reports what an anonymization run would find.
//! Nothing is written and no token is issued.

use super::{build_engine, read_documents};
use crate::anonymization::models::EntityType;
use crate::anonymization::RiskReport;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Plain-text documents to scan
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Print a JSON summary instead of the console report
    #[arg(long)]
    pub json: bool,
}

/// Per-document detection summary
#[derive(Debug, Serialize)]
struct DocumentScan {
    document_id: String,
    detections: usize,
    by_type: BTreeMap<EntityType, usize>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ScanSummary {
    documents: Vec<DocumentScan>,
    risk: RiskReport,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, engine) = match build_engine(config_path) {
            Ok(built) => built,
            Err(e) => {
                eprintln!("Configuration error: {e:#}");
                return Ok(2);
            }
        };

        let documents = match read_documents(&self.inputs) {
            Ok(documents) => documents,
            Err(e) => {
                eprintln!("Input error: {e:#}");
                return Ok(3);
            }
        };

        let mut scans = Vec::with_capacity(documents.len());
        let mut all_detections = Vec::new();
        let mut failed = 0;

        for document in &documents {
            match engine.detect(document) {
                Ok(outcome) => {
                    let mut by_type = BTreeMap::new();
                    for detection in &outcome.detections {
                        *by_type.entry(detection.entity_type).or_insert(0) += 1;
                    }
                    scans.push(DocumentScan {
                        document_id: document.id.to_string(),
                        detections: outcome.detections.len(),
                        by_type,
                        warnings: outcome.warnings,
                    });
                    all_detections.extend(outcome.detections);
                }
                Err(e) => {
                    tracing::error!(document_id = %document.id, error = %e, "Failed to scan document");
                    eprintln!("❌ {}: {e}", document.id);
                    failed += 1;
                }
            }
        }

        let risk = engine.analyze_detections(&all_detections);

        if self.json {
            let summary = ScanSummary {
                documents: scans,
                risk,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            for scan in &scans {
                println!("🔍 {} - {} detection(s)", scan.document_id, scan.detections);
                for (entity_type, count) in &scan.by_type {
                    println!("    {:28} {:>5}", entity_type.as_str(), count);
                }
                for warning in &scan.warnings {
                    println!("    ⚠️  {warning}");
                }
            }
            print_risk_report(&risk);
        }

        Ok(if failed > 0 { 1 } else { 0 })
    }
}

/// Print a risk report in the console style used by the other commands
pub(crate) fn print_risk_report(report: &RiskReport) {
    println!();
    println!("🛡️  PRIVACY RISK");
    println!("───────────────────────────────────────────────────────────────");
    println!("  Privacy Grade:  {}", report.privacy_grade);
    println!("  Risk Score:     {:.2}", report.risk_score);
    println!("  Entities:       {}", report.total_entities);
    for risk in &report.risks {
        println!();
        println!(
            "  [{}] {} ({} {})",
            risk.severity,
            risk.risk,
            risk.count,
            risk.entity_type.as_str()
        );
        println!("    → {}", risk.recommendation);
    }
    println!();
}
