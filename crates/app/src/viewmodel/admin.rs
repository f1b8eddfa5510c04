//! Admin view model
//!
//! Every mutation checks the session first; nothing reaches the store for a
//! caller that has not logged in.

use chorale_core::{sales_series, EventDraft, EventPatch, Result};

use super::events::progress_bar;
use crate::state::AppState;

const TITLE_WIDTH: usize = 28;

pub fn create_event(state: &mut AppState, draft: EventDraft) -> Result<String> {
    state.session.require()?;
    let event = state.store.create(draft)?;
    Ok(format!("Événement créé : [{}] {}\n", event.id, event.title))
}

pub fn update_event(state: &mut AppState, id: &str, patch: EventPatch) -> Result<String> {
    state.session.require()?;
    if patch.is_empty() {
        return Ok("Rien à modifier.\n".to_string());
    }
    let event = state.store.update(id, patch)?;
    Ok(format!("Événement mis à jour : [{}] {}\n", event.id, event.title))
}

pub fn record_sale(state: &mut AppState, id: &str, quantity: u32) -> Result<String> {
    state.session.require()?;
    let event = state.store.record_sale(id, quantity)?;
    let availability = event.availability();
    let mut out = format!(
        "[{}] {} billet(s) ajoutés : {} vendus, {} restants\n",
        event.id, quantity, event.sold, availability.remaining
    );
    if event.sold > event.capacity.max(0) {
        out.push_str(&format!(
            "Attention : {} billet(s) au-delà de la capacité\n",
            event.sold - event.capacity.max(0)
        ));
    }
    Ok(out)
}

pub fn remove_event(state: &mut AppState, id: &str) -> Result<String> {
    state.session.require()?;
    let event = state.store.remove(id)?;
    Ok(format!("Événement supprimé : [{}] {}\n", event.id, event.title))
}

pub fn reset_events(state: &mut AppState) -> Result<String> {
    state.session.require()?;
    state.store.reset_to_defaults();
    Ok(format!("{} événements par défaut restaurés.\n", state.store.len()))
}

/// Totals plus one chart row per event
pub fn render_dashboard(state: &AppState) -> Result<String> {
    state.session.require()?;

    let summary = state.store.summary();
    let mut out = format!("{} : tableau de bord\n\n", state.config.site_name);
    out.push_str(&format!(
        "Événements : {}\nCapacité totale : {}\nBillets vendus : {} ({}%)\nPlaces restantes : {}\nRecettes : Rs {:.2}\n\n",
        summary.events,
        summary.capacity,
        summary.sold,
        summary.percentage_sold,
        summary.remaining,
        summary.revenue
    ));

    for point in sales_series(state.store.list()) {
        out.push_str(&format!(
            "{:<width$} {} {:>3}%  {:>5} vendus  Rs {:.2}\n",
            truncate(&point.title, TITLE_WIDTH),
            progress_bar(point.percentage_sold),
            point.percentage_sold,
            point.sold,
            point.revenue,
            width = TITLE_WIDTH
        ));
    }
    Ok(out)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
