//! Money utilities
//!
//! All amounts are rupee-denominated [`Decimal`] values rounded to two decimal
//! places, midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// GST rate applied to every booking subtotal (18%).
#[must_use]
pub fn gst_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// Round a monetary amount to two decimal places.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// GST due on a subtotal.
#[must_use]
pub fn gst_on(subtotal: Decimal) -> Decimal {
    round_money(subtotal * gst_rate())
}
