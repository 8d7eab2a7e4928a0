//! Data models shared across the anonymization pipeline

pub mod entity;

pub use entity::{AnonymizationResult, Detection, Entity, EntityType};
