//! Ticket availability
//!
//! Turns raw `(capacity, sold)` pairs into display figures. Inputs are clamped
//! to zero first, so corrupt or oversold records still render.

/// Display figures for one event (or a total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability {
    /// Share of capacity sold, rounded half up, in `0..=100`
    pub percentage_sold: u8,
    /// Tickets still bookable, never negative
    pub remaining: u64,
}

impl Availability {
    /// True when there was something to sell and nothing is left
    pub fn is_sold_out(&self) -> bool {
        self.remaining == 0 && self.percentage_sold == 100
    }
}

/// Compute availability for any pair of stored values.
///
/// Never panics: negative inputs count as 0, a capacity of 0 reports 0%,
/// and oversold events cap at 100% with nothing remaining.
pub fn availability(capacity: i64, sold: i64) -> Availability {
    let capacity = capacity.max(0).unsigned_abs();
    let sold = sold.max(0).unsigned_abs();

    let percentage_sold = if capacity == 0 {
        0
    } else if sold >= capacity {
        100
    } else {
        // floor(sold * 100 / capacity + 0.5) without floats
        let (sold, capacity) = (u128::from(sold), u128::from(capacity));
        ((sold * 200 + capacity) / (capacity * 2)) as u8
    };

    Availability {
        percentage_sold,
        remaining: capacity.saturating_sub(sold),
    }
}
