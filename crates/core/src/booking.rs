//! Booking request and priced-booking models

use jiff::civil::{Date, Time};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Session length options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Duration {
    /// A standard 60-minute session.
    #[serde(rename = "60")]
    Standard,

    /// An extended 120-minute session, surcharged per jumper.
    #[serde(rename = "120")]
    Extended,
}

impl Duration {
    /// Session length in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            Self::Standard => 60,
            Self::Extended => 120,
        }
    }
}

/// A minor listed on the liability waiver, as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorInput {
    pub name: String,
    /// Date of birth, ISO `YYYY-MM-DD`.
    pub dob: String,
}

/// An accompanying adult listed on the waiver, as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdultGuestInput {
    pub name: String,
}

/// An untrusted session-booking submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Booking date, ISO `YYYY-MM-DD`.
    pub date: String,
    /// Booking time, `HH:MM`.
    pub time: String,
    pub duration: Duration,
    pub adults: u32,
    pub kids: u32,
    pub spectators: u32,
    #[serde(default)]
    pub voucher_code: Option<String>,
    #[serde(default)]
    pub minors: Vec<MinorInput>,
    #[serde(default)]
    pub adult_guests: Vec<AdultGuestInput>,
    /// Signing adult's date of birth, ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

/// An untrusted party-booking submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Party date, ISO `YYYY-MM-DD`.
    pub date: String,
    /// Party start time, `HH:MM`.
    pub time: String,
    pub participants: u32,
    pub spectators: u32,
    pub child_name: String,
    pub child_age: u8,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// A minor on the waiver, validated and parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minor {
    pub name: String,
    pub dob: Date,
}

/// An accompanying adult on the waiver, validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdultGuest {
    pub name: String,
}

/// A validated, fully priced session booking intent.
///
/// All text fields are sanitised and the email is normalised (trimmed,
/// lowercased). Amounts are rupees rounded to two decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: Date,
    pub time: Time,
    pub duration: Duration,
    pub adults: u32,
    pub kids: u32,
    pub spectators: u32,
    pub minors: Vec<Minor>,
    pub adult_guests: Vec<AdultGuest>,
    pub date_of_birth: Option<Date>,
    pub subtotal: Decimal,
    pub gst: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    /// The voucher code as submitted, whether or not it applied.
    pub voucher_code: Option<String>,
    /// Whether the supplied voucher passed every applicability check.
    pub voucher_applied: bool,
    pub booking_number: String,
}

/// A validated, fully priced party booking intent.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedParty {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: Date,
    pub time: Time,
    pub participants: u32,
    pub spectators: u32,
    pub child_name: String,
    pub child_age: u8,
    pub special_requests: Option<String>,
    pub subtotal: Decimal,
    pub gst: Decimal,
    pub total_amount: Decimal,
    pub deposit_amount: Decimal,
    pub booking_number: String,
}

/// Generate a booking number for the given booking date: `NIP-YYYYMMDD-XXXX`
/// with a random zero-padded 4-digit suffix.
///
/// The suffix is not collision-free; callers that require store-wide uniqueness
/// must check-and-retry against existing records.
pub fn booking_number<R: Rng + ?Sized>(date: Date, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(0..10_000);

    format!(
        "NIP-{:04}{:02}{:02}-{suffix:04}",
        date.year(),
        date.month(),
        date.day(),
    )
}
