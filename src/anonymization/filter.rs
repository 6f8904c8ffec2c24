//! Entity filtering
//!
//! Narrows detector output to the entity types the caller asked to
//! anonymize. The filter is stable (order preserved) and does not
//! deduplicate or merge overlapping spans; conflict handling happens at
//! apply time in the redactor.

use crate::domain::entity::DetectedEntity;
use std::collections::HashSet;

/// Retain entities whose type is in `requested`
///
/// An unset or empty request set is the identity: all detected entities pass
/// through.
pub fn filter_entities(
    entities: Vec<DetectedEntity>,
    requested: Option<&HashSet<String>>,
) -> Vec<DetectedEntity> {
    match requested {
        Some(types) if !types.is_empty() => entities
            .into_iter()
            .filter(|e| types.contains(&e.entity_type))
            .collect(),
        _ => entities,
    }
}
