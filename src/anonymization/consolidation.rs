//! Merging entity observations that share a token

use crate::anonymization::models::Entity;
use std::collections::HashMap;

/// Merge entities with the same `anonymized_value`
///
/// Groups keep the order in which their token first appears. Each merged
/// record takes the union of source documents, the highest confidence (with
/// that observation's pattern and context) and the summed occurrence count.
/// Entities are only ever merged, never dropped.
pub fn consolidate_entities(entities: &[Entity]) -> Vec<Entity> {
    let mut merged: Vec<Entity> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entity in entities {
        match index.get(entity.anonymized_value.as_str()) {
            Some(&position) => {
                let target = &mut merged[position];
                target
                    .source_documents
                    .extend(entity.source_documents.iter().cloned());
                target.occurrences += entity.occurrences;
                if entity.confidence > target.confidence {
                    target.confidence = entity.confidence;
                    target.detection_pattern = entity.detection_pattern.clone();
                    if !entity.context.is_empty() {
                        target.context = entity.context.clone();
                    }
                }
            }
            None => {
                index.insert(entity.anonymized_value.as_str(), merged.len());
                merged.push(entity.clone());
            }
        }
    }

    merged
}
