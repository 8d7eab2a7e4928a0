//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted logs
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! Log events carry document IDs, counts and timings only. Original entity
//! values are never passed to a log macro.
//!
//! # Example
//!
//! ```no_run
//! use lexshield::logging::init_logging;
//! use lexshield::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a document anonymization
///
/// # Example
///
/// ```no_run
/// use lexshield::log_document_start;
/// use lexshield::domain::DocumentId;
///
/// let id = DocumentId::new("contract.txt").unwrap();
/// log_document_start!(&id, 2048);
/// ```
#[macro_export]
macro_rules! log_document_start {
    ($document_id:expr, $size_bytes:expr) => {
        tracing::debug!(
            document_id = %$document_id,
            size_bytes = $size_bytes,
            "Anonymizing document"
        );
    };
}

/// Log the completion of a document anonymization
///
/// # Example
///
/// ```no_run
/// use lexshield::log_document_complete;
/// use lexshield::domain::DocumentId;
///
/// let id = DocumentId::new("contract.txt").unwrap();
/// log_document_complete!(&id, 12, 1, 35u64);
/// ```
#[macro_export]
macro_rules! log_document_complete {
    ($document_id:expr, $entities:expr, $redactions:expr, $duration_ms:expr) => {
        tracing::info!(
            document_id = %$document_id,
            entities = $entities,
            redactions = $redactions,
            duration_ms = $duration_ms,
            "Document anonymized"
        );
    };
}

/// Log an isolated detector fault
///
/// # Example
///
/// ```no_run
/// use lexshield::log_detector_fault;
///
/// log_detector_fault!("uk_postcode", "regex size limit exceeded");
/// ```
#[macro_export]
macro_rules! log_detector_fault {
    ($detector:expr, $reason:expr) => {
        tracing::warn!(
            detector = $detector,
            reason = %$reason,
            "Detector failed, continuing with remaining detectors"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use lexshield::log_error_with_context;
/// use lexshield::domain::LexShieldError;
///
/// let error = LexShieldError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log progress through a document batch
///
/// # Example
///
/// ```no_run
/// use lexshield::log_batch_processing;
///
/// log_batch_processing!(10, 100);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing batch"
        );
    };
}
