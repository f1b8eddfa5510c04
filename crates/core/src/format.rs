//! Display formatting helpers

use crate::models::parse_event_date;

/// `2026-03-21` becomes `21 Mar 2026`; anything unparseable is returned as is
pub fn format_date(raw: &str) -> String {
    match parse_event_date(raw) {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Price label in Mauritian rupees; zero (or nonsense) reads as free entry
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price <= 0.0 {
        return "Entrée libre".to_string();
    }
    if price.fract() == 0.0 {
        format!("Rs {price:.0}")
    } else {
        format!("Rs {price:.2}")
    }
}
