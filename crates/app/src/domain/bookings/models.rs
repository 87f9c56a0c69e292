//! Booking Models

use bounce::booking::{AdultGuest, Minor};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall booking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Session bookings are confirmed on creation.
    Confirmed,
    /// Party bookings await their deposit.
    Pending,
}

impl BookingStatus {
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Pending => "PENDING",
        }
    }
}

/// Payment state, tracked separately from the booking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
        }
    }
}

/// Liability-waiver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiverStatus {
    Pending,
    Signed,
}

impl WaiverStatus {
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Signed => "SIGNED",
        }
    }
}

/// Waiver payload persisted alongside a session booking, JSON-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waiver {
    pub date_of_birth: Option<Date>,
    pub minors: Vec<Minor>,
    pub adult_guests: Vec<AdultGuest>,
}

impl Waiver {
    /// A waiver counts as signed when anyone is actually listed on it.
    #[must_use]
    pub fn status(&self) -> WaiverStatus {
        if self.minors.is_empty() && self.adult_guests.is_empty() {
            WaiverStatus::Pending
        } else {
            WaiverStatus::Signed
        }
    }
}

/// Result of a successful session booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub booking_id: Uuid,
    pub booking_number: String,
}

/// Result of a successful party booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyConfirmation {
    pub booking_id: Uuid,
    pub booking_number: String,
    /// Total amount including GST.
    pub amount: Decimal,
    /// 50% deposit due to confirm the party.
    pub deposit_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waiver_with_minors_counts_as_signed() {
        let waiver = Waiver {
            date_of_birth: None,
            minors: vec![Minor {
                name: "Veer".to_string(),
                dob: jiff::civil::date(2018, 11, 2),
            }],
            adult_guests: Vec::new(),
        };

        assert_eq!(waiver.status(), WaiverStatus::Signed);
    }

    #[test]
    fn empty_waiver_is_pending() {
        let waiver = Waiver {
            date_of_birth: None,
            minors: Vec::new(),
            adult_guests: Vec::new(),
        };

        assert_eq!(waiver.status(), WaiverStatus::Pending);
    }

    #[test]
    fn waiver_json_uses_camel_case() {
        let waiver = Waiver {
            date_of_birth: Some(jiff::civil::date(1990, 1, 15)),
            minors: Vec::new(),
            adult_guests: vec![AdultGuest { name: "Asha Rao".to_string() }],
        };

        let json = serde_json::to_value(&waiver).unwrap_or_default();

        assert_eq!(json["dateOfBirth"], "1990-01-15");
        assert_eq!(json["adultGuests"][0]["name"], "Asha Rao");
    }
}
