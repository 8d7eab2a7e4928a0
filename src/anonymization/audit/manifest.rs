//! Secure mapping manifest
//!
//! The manifest describes a session's mapping store by aggregate counts only,
//! so it can be archived or shared without exposing any original value or
//! any original/token pairing.

use crate::anonymization::models::EntityType;
use crate::domain::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate view of a mapping store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecureMapping {
    pub session_id: SessionId,
    pub total_mappings: usize,
    pub entity_counts: BTreeMap<EntityType, usize>,
    pub timestamp: DateTime<Utc>,
}

impl SecureMapping {
    /// Build a manifest from per-type mapping counts
    pub fn new(session_id: SessionId, entity_counts: BTreeMap<EntityType, usize>) -> Self {
        Self {
            session_id,
            total_mappings: entity_counts.values().sum(),
            entity_counts,
            timestamp: Utc::now(),
        }
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
