//! Entity detection module
//!
//! Provides the trait-based detector interface and the implementations used to
//! find identifying entities in plain-text legal documents. Detectors are
//! independent of each other; the [`scanner::EntityScanner`] runs them in
//! registry order, isolates faults and resolves overlapping spans.

pub mod overlap;
pub mod patterns;
pub mod person;
pub mod regex;
pub mod scanner;
pub mod sensitive;
pub mod vocabulary;

use crate::anonymization::models::{Detection, EntityType};
use crate::domain::DetectionError;

/// Trait for entity detector implementations
///
/// New jurisdictions' identifier formats are added by implementing this trait
/// (or by declaring a regex in a pattern library) and registering the detector
/// in a [`patterns::PatternRegistry`].
pub trait EntityDetector: Send + Sync {
    /// Unique detector name, reported as the entity's detection pattern
    fn name(&self) -> &str;

    /// Entity type produced by this detector
    fn entity_type(&self) -> EntityType;

    /// Overlap priority; the more specific detector wins a contested span
    fn specificity(&self) -> u8;

    /// Detect entities in a document's text
    fn detect(&self, text: &str) -> Result<Vec<Detection>, DetectionError>;
}
