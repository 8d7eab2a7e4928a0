//! Plain-text document record

use super::ids::DocumentId;
use serde::{Deserialize, Serialize};

/// A plain-text document as handed over by the extraction layer
///
/// The same shape is used for the anonymized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier
    pub id: DocumentId,
    /// Full text content
    pub content: String,
}

impl Document {
    /// Create a new document
    pub fn new(id: DocumentId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    /// Returns true when the content is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Content size in bytes
    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}
