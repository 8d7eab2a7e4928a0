//! Audit trail and secure export
//!
//! Provides structured audit logging for anonymization operations and the
//! count-only mapping manifest.

pub mod logger;
pub mod manifest;

pub use logger::AuditLogger;
pub use manifest::SecureMapping;
