//! Public event listing view model

use chorale_core::{
    format_date, format_price, partition_by_date, Error, Event, PaymentPrompt, Result,
};
use chrono::NaiveDate;

use crate::state::AppState;

const BAR_WIDTH: usize = 20;

/// Which events the listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Listing {
    #[default]
    Upcoming,
    Past,
    All,
}

/// One row of the public listing
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub when: String,
    pub venue: String,
    pub price: String,
    pub sold: u64,
    pub remaining: u64,
    pub percentage_sold: u8,
    pub sold_out: bool,
}

impl EventCard {
    pub fn from_event(event: &Event) -> Self {
        let availability = event.availability();
        let when = if event.time.is_empty() {
            format_date(&event.date)
        } else {
            format!("{} · {}", format_date(&event.date), event.time)
        };

        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            when,
            venue: event.venue.clone(),
            price: format_price(event.price),
            sold: event.sold.max(0).unsigned_abs(),
            remaining: availability.remaining,
            percentage_sold: availability.percentage_sold,
            sold_out: availability.is_sold_out(),
        }
    }

    pub fn render(&self) -> String {
        let status = if self.sold_out {
            "COMPLET".to_string()
        } else {
            format!("{} vendus · {} restants", self.sold, self.remaining)
        };
        format!(
            "[{}] {}\n    {} · {} · {}\n    {} {:>3}%  {}",
            self.id,
            self.title,
            self.when,
            self.venue,
            self.price,
            progress_bar(self.percentage_sold),
            self.percentage_sold,
            status
        )
    }
}

/// `[#####---------------]` for a percentage in `0..=100`
pub fn progress_bar(percentage: u8) -> String {
    let filled = (usize::from(percentage.min(100)) * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Cards for the chosen listing, in store order
pub fn event_cards(events: &[Event], listing: Listing, today: NaiveDate) -> Vec<EventCard> {
    let (upcoming, past) = partition_by_date(events, today);
    let selected: Vec<&Event> = match listing {
        Listing::Upcoming => upcoming,
        Listing::Past => past,
        Listing::All => events.iter().collect(),
    };
    selected.into_iter().map(EventCard::from_event).collect()
}

pub fn render_listing(state: &AppState, listing: Listing, today: NaiveDate) -> String {
    let cards = event_cards(state.store.list(), listing, today);
    let mut out = format!("{}\n\n", state.config.site_name);
    if cards.is_empty() {
        out.push_str("Aucun événement pour le moment.\n");
        return out;
    }
    for card in cards {
        out.push_str(&card.render());
        out.push_str("\n\n");
    }
    out
}

pub fn render_detail(state: &AppState, id: &str) -> Result<String> {
    let event = state
        .store
        .get_by_id(id)
        .ok_or_else(|| Error::NotFound(format!("event {id}")))?;

    let mut out = EventCard::from_event(event).render();
    if !event.description.is_empty() {
        out.push_str(&format!("\n\n{}", event.description));
    }
    if !event.cover.is_empty() {
        out.push_str(&format!("\n\nAffiche : {}", event.cover));
    }
    out.push('\n');
    Ok(out)
}

pub fn render_purchase(state: &AppState, id: &str, quantity: u32) -> Result<String> {
    let event = state
        .store
        .get_by_id(id)
        .ok_or_else(|| Error::NotFound(format!("event {id}")))?;

    if event.availability().is_sold_out() {
        return Ok(format!("« {} » est complet.\n", event.title));
    }

    let prompt = PaymentPrompt::for_event(&state.config.payment_phone, event, quantity)?;
    Ok(format!("{}\n{}\n", prompt.message, prompt.link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorale_core::{default_events, MemoryStore, SiteConfig};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    fn state() -> AppState {
        AppState::with_backend(SiteConfig::default(), Box::new(MemoryStore::new()))
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(20)));
        assert_eq!(progress_bar(39), format!("[{}{}]", "#".repeat(8), "-".repeat(12)));
    }

    #[test]
    fn card_for_seed_event() {
        let card = EventCard::from_event(&default_events()[0]);
        assert_eq!(card.when, "21 Mar 2026 · 19:00");
        assert_eq!(card.price, "Rs 25");
        assert_eq!(card.percentage_sold, 39);
        assert_eq!(card.remaining, 122);
        assert!(card.render().contains("78 vendus · 122 restants"));
    }

    #[test]
    fn oversold_card_shows_complet() {
        let mut event = default_events().remove(1);
        event.sold = 175;
        let card = EventCard::from_event(&event);

        assert!(card.sold_out);
        assert_eq!(card.sold, 175);
        assert!(card.render().contains("COMPLET"));
    }

    #[test]
    fn listing_filters_by_date() {
        let events = default_events();
        let upcoming: Vec<_> = event_cards(&events, Listing::Upcoming, today())
            .into_iter()
            .map(|c| c.id)
            .collect();
        let past: Vec<_> = event_cards(&events, Listing::Past, today())
            .into_iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(upcoming, vec!["e1", "e2"]);
        assert_eq!(past, vec!["e3"]);
        assert_eq!(event_cards(&events, Listing::All, today()).len(), 3);
    }

    #[test]
    fn listing_starts_with_site_name() {
        let out = render_listing(&state(), Listing::All, today());
        assert!(out.starts_with("La Grande Chorale de Sainte Croix"));
        assert!(out.contains("[e3] Messe Chantée — Noël"));
    }

    #[test]
    fn detail_unknown_event() {
        assert!(matches!(
            render_detail(&state(), "e42"),
            Err(Error::NotFound(_))
        ));
        assert!(render_detail(&state(), "e2").unwrap().contains("Gospel joyeux"));
    }

    #[test]
    fn purchase_prompt_uses_configured_phone() {
        let out = render_purchase(&state(), "e2", 2).unwrap();
        assert!(out.contains("+230 5252 0000"));
        assert!(out.contains("tel:+23052520000"));
        assert!(out.contains("Rs 36"));
    }
}
