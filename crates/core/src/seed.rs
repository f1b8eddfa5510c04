//! Built-in event listing
//!
//! Used on first run and whenever the stored collection cannot be read.

use crate::models::Event;

struct SeedEvent {
    id: &'static str,
    title: &'static str,
    date: &'static str,
    time: &'static str,
    venue: &'static str,
    price: f64,
    capacity: i64,
    sold: i64,
    cover: &'static str,
    description: &'static str,
}

const SEED_EVENTS: &[SeedEvent] = &[
    SeedEvent {
        id: "e1",
        title: "Concert de Printemps",
        date: "2026-03-21",
        time: "19:00",
        venue: "Église Sainte Croix",
        price: 25.0,
        capacity: 200,
        sold: 78,
        cover: "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=1400&q=80",
        description: "Une soirée enchanteresse avec La Grande Chorale de Sainte Croix : chants sacrés et pièces contemporaines.",
    },
    SeedEvent {
        id: "e2",
        title: "Soirée Gospel",
        date: "2026-06-12",
        time: "18:30",
        venue: "Salle des Fêtes",
        price: 18.0,
        capacity: 150,
        sold: 52,
        cover: "https://images.unsplash.com/photo-1508970436-6c0c4e8ad178?w=1400&q=80",
        description: "Gospel joyeux, pleine énergie et émotion. Préparez vos mains à applaudir !",
    },
    SeedEvent {
        id: "e3",
        title: "Messe Chantée — Noël",
        date: "2025-12-24",
        time: "20:00",
        venue: "Cathédrale",
        price: 0.0,
        capacity: 500,
        sold: 320,
        cover: "https://images.unsplash.com/photo-1526772662000-3f88f10405ff?w=1400&q=80",
        description: "Célébration de Noël avec la chorale, entrée libre (inscription recommandée).",
    },
];

/// The default collection, in display order
pub fn default_events() -> Vec<Event> {
    SEED_EVENTS
        .iter()
        .map(|seed| Event {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            date: seed.date.to_string(),
            time: seed.time.to_string(),
            venue: seed.venue.to_string(),
            price: seed.price,
            capacity: seed.capacity,
            sold: seed.sold,
            cover: seed.cover.to_string(),
            description: seed.description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_events_are_valid() {
        let events = default_events();
        assert_eq!(events.len(), 3);
        for event in &events {
            event.validate().unwrap();
            assert!(event.parsed_date().is_some(), "{} has no date", event.id);
        }
    }

    #[test]
    fn seed_ids_are_unique() {
        let ids: HashSet<_> = default_events().into_iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 3);
    }
}
