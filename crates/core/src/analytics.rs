//! Sales analytics for the admin dashboard
//!
//! Every figure here reads `capacity`, `sold` and `price` through the same
//! clamping as [`crate::availability`], so oversold or corrupt records never
//! produce negative totals.

use chrono::NaiveDate;

use crate::availability::availability;
use crate::models::Event;

/// Collection-wide totals
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesSummary {
    pub events: usize,
    pub capacity: u64,
    pub sold: u64,
    /// Sum of each event's bookable seats (oversold events contribute 0)
    pub remaining: u64,
    pub revenue: f64,
    pub percentage_sold: u8,
}

impl SalesSummary {
    pub fn from_events(events: &[Event]) -> Self {
        let mut summary = events.iter().fold(Self::default(), |mut acc, event| {
            let point = SalesPoint::from_event(event);
            acc.events += 1;
            acc.capacity = acc.capacity.saturating_add(clamp_count(event.capacity));
            acc.sold = acc.sold.saturating_add(point.sold);
            acc.remaining = acc.remaining.saturating_add(point.remaining);
            acc.revenue += point.revenue;
            acc
        });

        summary.percentage_sold = availability(
            i64::try_from(summary.capacity).unwrap_or(i64::MAX),
            i64::try_from(summary.sold).unwrap_or(i64::MAX),
        )
        .percentage_sold;
        summary
    }
}

/// One bar of the per-event sales chart
#[derive(Debug, Clone, PartialEq)]
pub struct SalesPoint {
    pub id: String,
    pub title: String,
    pub sold: u64,
    pub remaining: u64,
    pub percentage_sold: u8,
    pub revenue: f64,
}

impl SalesPoint {
    pub fn from_event(event: &Event) -> Self {
        let sold = clamp_count(event.sold);
        let availability = event.availability();
        let price = if event.price.is_finite() {
            event.price.max(0.0)
        } else {
            0.0
        };

        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            sold,
            remaining: availability.remaining,
            percentage_sold: availability.percentage_sold,
            revenue: price * sold as f64,
        }
    }
}

/// Chart rows in store order
pub fn sales_series(events: &[Event]) -> Vec<SalesPoint> {
    events.iter().map(SalesPoint::from_event).collect()
}

/// Split into `(upcoming, past)` relative to `today`, keeping store order.
/// Events whose date cannot be parsed are treated as upcoming.
pub fn partition_by_date(events: &[Event], today: NaiveDate) -> (Vec<&Event>, Vec<&Event>) {
    events
        .iter()
        .partition(|event| event.parsed_date().map_or(true, |date| date >= today))
}

fn clamp_count(value: i64) -> u64 {
    value.max(0).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_events;

    #[test]
    fn test_summary_over_seed() {
        let summary = SalesSummary::from_events(&default_events());

        assert_eq!(summary.events, 3);
        assert_eq!(summary.capacity, 850);
        assert_eq!(summary.sold, 450);
        assert_eq!(summary.remaining, 400);
        assert_eq!(summary.revenue, 2886.0);
        assert_eq!(summary.percentage_sold, 53);
    }

    #[test]
    fn test_summary_of_nothing() {
        assert_eq!(SalesSummary::from_events(&[]), SalesSummary::default());
    }

    #[test]
    fn test_summary_clamps_corrupt_records() {
        let mut events = default_events();
        events[0].capacity = -50;
        events[0].sold = -3;
        events[1].price = f64::NAN;
        events[2].sold = 900;

        let summary = SalesSummary::from_events(&events);
        assert_eq!(summary.capacity, 650);
        assert_eq!(summary.sold, 952);
        assert_eq!(summary.remaining, 98);
        assert_eq!(summary.revenue, 0.0);
        assert_eq!(summary.percentage_sold, 100);
    }

    #[test]
    fn test_sales_series_order_and_values() {
        let series = sales_series(&default_events());
        let ids: Vec<_> = series.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);

        assert_eq!(series[0].sold, 78);
        assert_eq!(series[0].remaining, 122);
        assert_eq!(series[0].percentage_sold, 39);
        assert_eq!(series[0].revenue, 1950.0);
        assert_eq!(series[2].revenue, 0.0);
    }

    #[test]
    fn test_partition_by_date() {
        let mut events = default_events();
        events[1].date = "à confirmer".to_string();
        let today = NaiveDate::from_ymd_opt(2026, 3, 21).unwrap();

        let (upcoming, past) = partition_by_date(&events, today);
        let upcoming: Vec<_> = upcoming.iter().map(|e| e.id.as_str()).collect();
        let past: Vec<_> = past.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(upcoming, vec!["e1", "e2"]);
        assert_eq!(past, vec!["e3"]);
    }
}
