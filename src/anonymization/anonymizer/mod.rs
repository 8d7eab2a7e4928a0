//! Token assignment, substitution and redaction
//!
//! - [`mapping`]: session-scoped bijection between originals and tokens
//! - [`magnitude`]: size classes for monetary amounts
//! - [`substitution`]: single-pass rewrite of a document
//! - [`redaction`]: sentence-level removal of sensitive markers

pub mod magnitude;
pub mod mapping;
pub mod redaction;
pub mod substitution;

pub use magnitude::{Magnitude, MagnitudeThresholds};
pub use mapping::{MappingSession, MappingStore};
pub use redaction::{Redaction, Redactor, SensitiveCategory};
