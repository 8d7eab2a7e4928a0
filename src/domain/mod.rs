//! Domain models and types for LexShield.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DocumentId`], [`EntityId`], [`SessionId`])
//! - **The document record** ([`Document`])
//! - **Error types** ([`LexShieldError`], [`LookupError`], [`DetectionError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! ```rust
//! use lexshield::domain::{LexShieldError, LookupError};
//!
//! let err: LexShieldError = LookupError::UnknownToken("PERSON_042".into()).into();
//! assert!(matches!(err, LexShieldError::Lookup(_)));
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use document::Document;
pub use errors::{DetectionError, LexShieldError, LookupError};
pub use ids::{DocumentId, EntityId, SessionId};
pub use result::Result;
