//! Event store
//!
//! Owns the event collection and its storage backend. Every read goes through
//! the in-memory collection; every mutation is written back to the backend.
//! A failed write is logged and otherwise ignored: memory stays the source of
//! truth for the rest of the session.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::analytics::SalesSummary;
use crate::error::{Error, Result};
use crate::invariants::{
    assert_collection_invariants, assert_event_writable, duplicate_ids, has_blank_id,
};
use crate::models::{Event, EventDraft, EventPatch};
use crate::seed::default_events;
use crate::storage::{load_or_default, save, KeyValueStore, EVENTS_KEY};

pub struct EventStore<S: KeyValueStore> {
    backend: S,
    events: Vec<Event>,
}

impl<S: KeyValueStore> EventStore<S> {
    /// Load the stored collection, falling back to the built-in listing when
    /// nothing usable is stored. Never fails.
    #[instrument(skip(backend))]
    pub fn load(backend: S) -> Self {
        let stored: Option<Vec<Event>> = load_or_default(&backend, EVENTS_KEY, None);

        let events = match stored {
            Some(events) => {
                let duplicates = duplicate_ids(&events);
                if !duplicates.is_empty() {
                    warn!(?duplicates, "Stored events reuse ids, using defaults");
                    default_events()
                } else if has_blank_id(&events) {
                    warn!("Stored events include one without an id, using defaults");
                    default_events()
                } else {
                    events
                }
            }
            None => {
                info!("No stored events, seeding defaults");
                default_events()
            }
        };

        debug!(count = events.len(), "Events loaded");
        Self { backend, events }
    }

    /// All events in insertion order
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Totals for the admin dashboard
    pub fn summary(&self) -> SalesSummary {
        SalesSummary::from_events(&self.events)
    }

    /// Append a new event with a fresh id
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create(&mut self, draft: EventDraft) -> Result<Event> {
        let event = draft.into_event(self.fresh_id());
        event.validate()?;

        self.events.push(event.clone());
        self.commit();
        info!(id = %event.id, "Event created");
        Ok(event)
    }

    /// Merge `patch` into the event with `id`
    #[instrument(skip(self, patch))]
    pub fn update(&mut self, id: &str, patch: EventPatch) -> Result<Event> {
        let index = self.index_of(id)?;
        patch.validate()?;

        let updated = patch.applied_to(&self.events[index]);
        if patch.sold.is_some() {
            assert_event_writable(&updated);
        }
        self.events[index] = updated.clone();
        self.commit();
        info!(id, "Event updated");
        Ok(updated)
    }

    /// Delete the event with `id`, returning it
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &str) -> Result<Event> {
        let index = self.index_of(id)?;
        let removed = self.events.remove(index);
        self.commit();
        info!(id, "Event removed");
        Ok(removed)
    }

    /// Add `quantity` tickets to the sold count. Capacity is not enforced:
    /// oversold events are recorded as such.
    #[instrument(skip(self))]
    pub fn record_sale(&mut self, id: &str, quantity: u32) -> Result<Event> {
        if quantity == 0 {
            return Err(Error::Validation("quantity must be at least 1".into()));
        }
        let current = self.index_of(id).map(|i| self.events[i].sold)?;
        let sold = current.max(0).saturating_add(i64::from(quantity));
        self.update(
            id,
            EventPatch {
                sold: Some(sold),
                ..Default::default()
            },
        )
    }

    /// Replace everything with the built-in listing
    #[instrument(skip(self))]
    pub fn reset_to_defaults(&mut self) {
        self.events = default_events();
        self.commit();
        info!("Events reset to defaults");
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("event {id}")))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = format!("evt-{}", Uuid::new_v4().simple());
            if self.get_by_id(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&self) {
        assert_collection_invariants(&self.events);
        if let Err(e) = save(&self.backend, EVENTS_KEY, &self.events) {
            warn!(error = %e, "Could not persist events, keeping in-memory copy");
        }
    }
}
