//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::Event;

/// Ids present more than once, in first-seen order
pub fn duplicate_ids(events: &[Event]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for event in events {
        if !seen.insert(event.id.as_str()) && !duplicates.contains(&event.id.as_str()) {
            duplicates.push(event.id.as_str());
        }
    }
    duplicates
}

/// Whether any event has an empty or blank id
pub fn has_blank_id(events: &[Event]) -> bool {
    events.iter().any(|e| e.id.trim().is_empty())
}

/// Validate that the collection is internally consistent
pub fn assert_collection_invariants(events: &[Event]) {
    debug_assert!(
        duplicate_ids(events).is_empty(),
        "Event collection has duplicate ids: {:?}",
        duplicate_ids(events)
    );

    debug_assert!(
        !has_blank_id(events),
        "Event collection has an event without an id"
    );
}

/// Validate that an event whose `sold` was just written respects the
/// write-time rules
pub fn assert_event_writable(event: &Event) {
    debug_assert!(event.sold >= 0, "Event {} stored with sold {}", event.id, event.sold);
}
