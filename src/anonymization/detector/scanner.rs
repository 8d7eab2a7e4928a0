//! Runs every registered detector over a document
//!
//! A detector that returns an error (or panics) is skipped for that document:
//! the fault is logged, recorded as a warning and the other detectors still
//! run. Detections below the confidence threshold are dropped before overlap
//! resolution.

use super::overlap::resolve_overlaps;
use super::patterns::PatternRegistry;
use crate::anonymization::models::Detection;
use crate::log_detector_fault;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Outcome of scanning one text
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Disjoint accepted detections, ordered by start offset
    pub detections: Vec<Detection>,
    /// One message per detector that failed
    pub warnings: Vec<String>,
}

/// Detector runner with threshold filtering and overlap resolution
#[derive(Debug, Clone)]
pub struct EntityScanner {
    registry: Arc<PatternRegistry>,
    confidence_threshold: f32,
}

impl EntityScanner {
    /// Create a scanner over a registry
    pub fn new(registry: PatternRegistry, confidence_threshold: f32) -> Self {
        Self {
            registry: Arc::new(registry),
            confidence_threshold: confidence_threshold.clamp(0.0, 1.0),
        }
    }

    /// Registry this scanner runs
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Minimum confidence a detection needs to be kept
    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    /// Scan a text with every detector
    pub fn scan(&self, text: &str) -> ScanOutcome {
        if text.trim().is_empty() {
            return ScanOutcome::default();
        }

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();

        for detector in self.registry.detectors() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| detector.detect(text)));
            match outcome {
                Ok(Ok(found)) => {
                    tracing::trace!(detector = detector.name(), count = found.len(), "Detector finished");
                    candidates.extend(
                        found
                            .into_iter()
                            .filter(|d| d.confidence >= self.confidence_threshold),
                    );
                }
                Ok(Err(e)) => {
                    log_detector_fault!(detector.name(), e);
                    warnings.push(e.to_string());
                }
                Err(_) => {
                    let reason = "detector panicked";
                    log_detector_fault!(detector.name(), reason);
                    warnings.push(format!("detector '{}' failed: {reason}", detector.name()));
                }
            }
        }

        ScanOutcome {
            detections: resolve_overlaps(candidates),
            warnings,
        }
    }
}
