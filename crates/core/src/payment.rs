//! Mobile-money payment prompt
//!
//! Ticket purchases happen outside the site: the buyer is shown the choir's
//! phone number, the amount and a reference to quote. Nothing here talks to
//! a payment provider or checks the outcome.

use crate::error::{Error, Result};
use crate::format::format_price;
use crate::models::Event;

/// Everything a buyer needs to pay for tickets by phone
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPrompt {
    pub phone: String,
    /// `tel:` URI with spaces stripped
    pub link: String,
    pub amount: f64,
    pub reference: String,
    pub message: String,
}

impl PaymentPrompt {
    pub fn for_event(phone: &str, event: &Event, quantity: u32) -> Result<Self> {
        if quantity == 0 {
            return Err(Error::Validation("quantity must be at least 1".into()));
        }

        let unit = if event.is_free() || !event.price.is_finite() {
            0.0
        } else {
            event.price
        };
        let amount = unit * f64::from(quantity);
        if !amount.is_finite() {
            return Err(Error::Validation(format!(
                "amount for {quantity} ticket(s) is out of range"
            )));
        }
        let reference = format!("{}-{}", event.id, quantity);

        let message = if amount > 0.0 {
            format!(
                "Envoyez {} au {} via MCB Juice pour {} billet(s) « {} ». Référence : {}",
                format_price(amount),
                phone,
                quantity,
                event.title,
                reference
            )
        } else {
            format!(
                "Entrée libre pour « {} ». Réservez {} place(s) en contactant le {} (référence {})",
                event.title, quantity, phone, reference
            )
        };

        Ok(Self {
            phone: phone.to_string(),
            link: tel_link(phone),
            amount,
            reference,
            message,
        })
    }
}

fn tel_link(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}
