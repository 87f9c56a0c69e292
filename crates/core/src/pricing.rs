//! Park tariffs
//!
//! Subtotal calculations for open-session and party bookings. GST is applied
//! separately by [`crate::money::gst_on`].

use rust_decimal::Decimal;

use crate::booking::Duration;

/// Per-kid session price, rupees.
pub const KID_PRICE: u32 = 500;

/// Per-adult session price, rupees.
pub const ADULT_PRICE: u32 = 899;

/// Per-spectator session price, rupees.
pub const SPECTATOR_PRICE: u32 = 150;

/// Extra-hour surcharge per jumper for 120-minute sessions. Spectators are
/// excluded.
pub const EXTRA_HOUR_SURCHARGE: u32 = 500;

/// Per-participant party price, rupees.
pub const PARTY_PARTICIPANT_PRICE: u32 = 1500;

/// Price per chargeable party spectator, rupees.
pub const PARTY_EXTRA_SPECTATOR_PRICE: u32 = 100;

/// Number of party spectators admitted free.
pub const PARTY_FREE_SPECTATORS: u32 = 10;

/// Subtotal for an open session.
#[must_use]
pub fn session_subtotal(adults: u32, kids: u32, spectators: u32, duration: Duration) -> Decimal {
    let mut subtotal = Decimal::from(kids) * Decimal::from(KID_PRICE)
        + Decimal::from(adults) * Decimal::from(ADULT_PRICE)
        + Decimal::from(spectators) * Decimal::from(SPECTATOR_PRICE);

    if duration == Duration::Extended {
        subtotal +=
            (Decimal::from(kids) + Decimal::from(adults)) * Decimal::from(EXTRA_HOUR_SURCHARGE);
    }

    subtotal
}

/// Subtotal for a party booking. The first [`PARTY_FREE_SPECTATORS`] spectators
/// are free.
#[must_use]
pub fn party_subtotal(participants: u32, spectators: u32) -> Decimal {
    let chargeable_spectators = spectators.saturating_sub(PARTY_FREE_SPECTATORS);

    Decimal::from(participants) * Decimal::from(PARTY_PARTICIPANT_PRICE)
        + Decimal::from(chargeable_spectators) * Decimal::from(PARTY_EXTRA_SPECTATOR_PRICE)
}
