//! # LexShield - legal document anonymization
//!
//! LexShield detects identifying entities in plain-text legal documents and
//! replaces them with stable, reversible tokens, so downstream analysis never
//! sees raw client data.
//!
//! ## Overview
//!
//! This library provides:
//! - **Detecting** names, organisations, dates, places, contact details,
//!   identifiers, amounts, case numbers and privilege markers
//! - **Tokenizing** every distinct value once per session (`PERSON_001`,
//!   `AMOUNT_LARGE_002`) with a reverse map for deanonymization
//! - **Redacting** whole sentences that carry confidentiality markers
//! - **Scoring** the privacy risk of what was found
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Detection, mapping, redaction and reporting
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lexshield::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use lexshield::domain::{Document, DocumentId};
//!
//! fn main() -> anyhow::Result<()> {
//!     let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//!
//!     let document = Document::new(
//!         DocumentId::new("claim.txt").map_err(anyhow::Error::msg)?,
//!         "John Smith claims £50,000 from Acme Holdings Ltd.",
//!     );
//!     let result = engine.anonymize_document(&document)?;
//!     println!("{}", result.anonymized_doc.content);
//!
//!     for entity in &result.doc_entities {
//!         assert_eq!(engine.deanonymize(&entity.anonymized_value)?, entity.original_value);
//!     }
//!
//!     let risk = engine.analyze_privacy_risk(&result.doc_entities);
//!     println!("Privacy grade: {}", risk.privacy_grade);
//!
//!     // Secure teardown between cases
//!     engine.clear_mappings();
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`] with [`domain::LexShieldError`];
//! unknown tokens fail with [`domain::LookupError`]:
//!
//! ```rust,no_run
//! use lexshield::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use lexshield::domain::LookupError;
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! assert!(matches!(
//!     engine.deanonymize("PERSON_042"),
//!     Err(LookupError::UnknownToken(_))
//! ));
//! # Ok(())
//! # }
//! ```

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
