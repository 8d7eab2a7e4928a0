//! Domain error types
//!
//! This module defines the error hierarchy for LexShield. Detector faults and
//! token lookups have their own types so callers can tell a recoverable
//! detection problem from a session/logic error.

use thiserror::Error;

/// Main LexShield error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum LexShieldError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Token lookup errors (unknown or foreign tokens)
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Detector errors that could not be recovered locally
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Document exceeds the configured input bound
    #[error("Document '{document_id}' is {size} bytes, limit is {limit} bytes")]
    InputTooLarge {
        document_id: String,
        size: usize,
        limit: usize,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised when resolving a token back to its original value.
///
/// An unknown token means the caller mixed up sessions or fabricated a token;
/// it is always surfaced and never replaced with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The token was never issued by this session (or was cleared)
    #[error("token '{0}' was not issued by this session")]
    UnknownToken(String),
}

/// Errors raised by an individual entity detector.
///
/// The scanner isolates these: the failing detector is skipped, a warning is
/// recorded and the remaining detectors still run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    /// A pattern could not be compiled
    #[error("invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    /// A detector failed while scanning a document
    #[error("detector '{detector}' failed: {reason}")]
    PatternFailed { detector: String, reason: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for LexShieldError {
    fn from(err: std::io::Error) -> Self {
        LexShieldError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LexShieldError {
    fn from(err: serde_json::Error) -> Self {
        LexShieldError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LexShieldError {
    fn from(err: toml::de::Error) -> Self {
        LexShieldError::Configuration(format!("TOML parse error: {err}"))
    }
}
