//! Anonymization module for LexShield
//!
//! This module detects identifying entities in plain-text legal documents and
//! replaces them with stable, reversible tokens.
//!
//! # Architecture
//!
//! The anonymization pipeline consists of:
//! - **Detection**: pluggable detectors (regex patterns, person-name
//!   heuristics, sensitive markers) with overlap resolution
//! - **Mapping**: one token per distinct original value per session, with
//!   magnitude classes for monetary amounts
//! - **Redaction**: whole-sentence removal of privilege and confidentiality
//!   markers
//! - **Reporting**: consolidation, privacy risk grading, count-only manifests
//!   and an optional audit log
//!
//! # Usage
//!
//! ```rust,ignore
//! use lexshield::anonymization::{AnonymizationConfig, AnonymizationEngine};
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let result = engine.anonymize_document(&document)?;
//! let risk = engine.analyze_privacy_risk(&result.doc_entities);
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod consolidation;
pub mod detector;
pub mod engine;
pub mod models;
pub mod report;
pub mod risk;
pub mod stats;

// Re-export main types
pub use config::AnonymizationConfig;
pub use engine::AnonymizationEngine;
pub use models::{AnonymizationResult, Detection, Entity, EntityType};
pub use report::BatchReport;
pub use risk::{PrivacyGrade, RiskReport, Severity};
pub use audit::SecureMapping;
pub use stats::AnonymizerStats;
