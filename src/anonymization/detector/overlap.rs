//! Overlap resolution between detections
//!
//! Detections are ranked by specificity, then confidence, then span length,
//! then position (earlier first) and finally pattern name. Each candidate is
//! accepted only if it shares no byte with a higher-ranked accepted span, so
//! the result is a set of disjoint spans independent of detector order.

use crate::anonymization::models::Detection;
use std::cmp::Ordering;
use std::collections::BTreeMap;

fn rank(a: &Detection, b: &Detection) -> Ordering {
    b.specificity
        .cmp(&a.specificity)
        .then_with(|| b.confidence.total_cmp(&a.confidence))
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.pattern.cmp(&b.pattern))
}

/// Keep the winning detection for every contested span
///
/// Returns disjoint detections sorted by start offset.
pub fn resolve_overlaps(mut detections: Vec<Detection>) -> Vec<Detection> {
    detections.retain(|d| !d.is_empty());
    detections.sort_by(rank);

    // accepted spans keyed by start; disjoint, so only the nearest span
    // starting before a candidate's end can overlap it
    let mut accepted: BTreeMap<usize, Detection> = BTreeMap::new();
    for detection in detections {
        let blocked = accepted
            .range(..detection.end)
            .next_back()
            .is_some_and(|(_, prior)| prior.end > detection.start);
        if !blocked {
            accepted.insert(detection.start, detection);
        }
    }

    accepted.into_values().collect()
}
