//! Event model - a single performance with ticketing metadata

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::{availability, Availability};
use crate::error::{Error, Result};

/// A performance listed on the site.
///
/// `capacity` and `sold` are kept exactly as stored, including values a hand
/// edit may have left negative or oversold; use [`Event::availability`] for
/// anything displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "crate::storage::parse::lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_string")]
    pub title: String,
    /// ISO date (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_string")]
    pub date: String,
    /// Start time, `HH:MM`, not validated
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_string")]
    pub time: String,
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_string")]
    pub venue: String,
    /// Ticket price; 0 means free entry
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_i64")]
    pub capacity: i64,
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_i64")]
    pub sold: i64,
    /// Cover image URL
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_string")]
    pub cover: String,
    #[serde(default, deserialize_with = "crate::storage::parse::lenient_string")]
    pub description: String,
}

impl Event {
    /// Parse the stored date for comparisons; `None` when it is not a date
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date)
    }

    /// Sold/remaining figures with negative or oversold values clamped
    pub fn availability(&self) -> Availability {
        availability(self.capacity, self.sold)
    }

    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }

    /// Check the fields the store refuses to accept on create
    pub fn validate(&self) -> Result<()> {
        check_title(&self.title)?;
        check_price(self.price)?;
        check_count("capacity", self.capacity)?;
        check_count("sold", self.sold)
    }
}

fn check_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation("title must not be empty".into()));
    }
    Ok(())
}

fn check_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::Validation(format!(
            "price must be zero or more, got {price}"
        )));
    }
    Ok(())
}

fn check_count(field: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(Error::Validation(format!(
            "{field} must be zero or more, got {value}"
        )));
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Everything needed to create an event; the store assigns the id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub price: f64,
    pub capacity: i64,
    #[serde(default)]
    pub sold: i64,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub description: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn with_venue(mut self, venue: impl Into<String>, time: impl Into<String>) -> Self {
        self.venue = venue.into();
        self.time = time.into();
        self
    }

    pub fn with_tickets(mut self, capacity: i64, price: f64) -> Self {
        self.capacity = capacity;
        self.price = price;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            time: self.time,
            venue: self.venue,
            price: self.price,
            capacity: self.capacity,
            sold: self.sold,
            cover: self.cover,
            description: self.description,
        }
    }
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<i64>,
    pub sold: Option<i64>,
    pub cover: Option<String>,
    pub description: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check only the fields being changed, so a stored record with a bad
    /// value elsewhere can still be corrected one field at a time
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(capacity) = self.capacity {
            check_count("capacity", capacity)?;
        }
        if let Some(sold) = self.sold {
            check_count("sold", sold)?;
        }
        Ok(())
    }

    /// Copy of `base` with every present field replaced
    pub fn applied_to(&self, base: &Event) -> Event {
        let mut event = base.clone();
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(date) = &self.date {
            event.date = date.clone();
        }
        if let Some(time) = &self.time {
            event.time = time.clone();
        }
        if let Some(venue) = &self.venue {
            event.venue = venue.clone();
        }
        if let Some(price) = self.price {
            event.price = price;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(sold) = self.sold {
            event.sold = sold;
        }
        if let Some(cover) = &self.cover {
            event.cover = cover.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Event {
        EventDraft::new("Soirée Gospel", "2026-06-12")
            .with_venue("Salle des Fêtes", "18:30")
            .with_tickets(150, 18.0)
            .into_event("e2".to_string())
    }

    #[test]
    fn test_parsed_date() {
        let mut event = sample();
        assert_eq!(event.parsed_date(), NaiveDate::from_ymd_opt(2026, 6, 12));

        event.date = "2026-06-12T18:30:00+04:00".to_string();
        assert_eq!(event.parsed_date(), NaiveDate::from_ymd_opt(2026, 6, 12));

        event.date = "bientôt".to_string();
        assert_eq!(event.parsed_date(), None);
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut event = sample();
        event.title = "   ".to_string();
        assert!(matches!(event.validate(), Err(Error::Validation(_))));

        let mut event = sample();
        event.capacity = -1;
        assert!(matches!(event.validate(), Err(Error::Validation(_))));

        let mut event = sample();
        event.price = -0.5;
        assert!(matches!(event.validate(), Err(Error::Validation(_))));

        let mut event = sample();
        event.price = f64::NAN;
        assert!(matches!(event.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_oversold_is_valid() {
        let mut event = sample();
        event.sold = 400;
        assert!(event.validate().is_ok());
        assert_eq!(event.availability().remaining, 0);
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let event = sample();
        let patch = EventPatch {
            sold: Some(60),
            venue: Some("Théâtre".to_string()),
            ..Default::default()
        };

        let updated = patch.applied_to(&event);
        assert_eq!(updated.sold, 60);
        assert_eq!(updated.venue, "Théâtre");
        assert_eq!(updated.title, event.title);
        assert_eq!(updated.capacity, event.capacity);
        assert!(!patch.is_empty());
        assert!(EventPatch::default().is_empty());
    }

    #[test]
    fn test_patch_validation_ignores_absent_fields() {
        assert!(EventPatch::default().validate().is_ok());

        let patch = EventPatch {
            sold: Some(-1),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(Error::Validation(_))));

        let patch = EventPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_lenient_deserialize() {
        let event: Event = serde_json::from_value(json!({
            "id": "e9",
            "title": "Répétition ouverte",
            "capacity": "120",
            "sold": null,
            "price": "abc"
        }))
        .unwrap();

        assert_eq!(event.capacity, 120);
        assert_eq!(event.sold, 0);
        assert_eq!(event.price, 0.0);
        assert_eq!(event.venue, "");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: std::result::Result<Event, _> =
            serde_json::from_value(json!({ "title": "Sans identifiant" }));
        assert!(result.is_err());
    }
}
